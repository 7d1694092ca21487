//! The rack: an ordered row of modules and the per-frame loop that drives
//! every bus in it.
//!
//! Each frame runs in three steps:
//!
//! 1. Role units do their own housekeeping (CV edge detection, clearing
//!    outputs).
//! 2. Every bus is lent out of its slot, discovers its chain, runs its signal
//!    path against a shared borrow of the registry and fills its outbox.
//! 3. The outbox is published onto the role units, and the bus goes back.
//!
//! Buses are processed in creation order. Two buses never share a role unit
//! since discovery stops at the first non-role neighbor.

pub mod discovery;
pub mod publish;
pub mod registry;
pub mod role;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    bus::{Bus, BusVariant},
    control::{MessageReceiver, RackMessage},
    io::FrameCtx,
    state::{Persist, StateError, StateMap},
};

pub use discovery::{discover, DiscoveryPlan, MuteSoloBinding};
pub use publish::{Outbox, RoleOutput};
pub use registry::{Module, RackModule, Registry, UnitId};
pub use role::{Role, RoleTag, RoleUnit};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RackError {
    #[error("no unit {0} in the rack")]
    UnknownUnit(UnitId),
    #[error("unit {unit} is a {found}, expected a {expected}")]
    WrongKind {
        unit: UnitId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{kind} has no parameter {index}")]
    ParamOutOfRange { kind: &'static str, index: usize },
    #[error("joining at unit {0} would form a loop")]
    Cycle(UnitId),
}

/// Outcome of a control-queue drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Debug)]
pub struct Rack {
    registry: Registry,
    sample_rate: f32,
}

impl Rack {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            registry: Registry::new(),
            sample_rate,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the engine rate. Buses pick it up on their next frame.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate != self.sample_rate {
            log::info!("sample rate {} -> {}", self.sample_rate, sample_rate);
            self.sample_rate = sample_rate;
        }
    }

    /// Append a module at the right end of the rack.
    pub fn push(&mut self, module: Module) -> UnitId {
        let kind = module.kind();
        let id = self.registry.push(module);
        log::debug!("added {kind} {id}");
        id
    }

    pub fn push_bus(&mut self, variant: BusVariant) -> UnitId {
        self.push(Module::Bus(Box::new(Bus::new(variant, self.sample_rate))))
    }

    pub fn push_role(&mut self, role: Role) -> UnitId {
        self.push(Module::Role(RoleUnit::new(role)))
    }

    pub fn insert_after(&mut self, left: UnitId, module: Module) -> Result<UnitId, RackError> {
        let kind = module.kind();
        let id = self.registry.insert_after(left, module)?;
        log::debug!("inserted {kind} {id} after {left}");
        Ok(id)
    }

    pub fn remove(&mut self, id: UnitId) -> Result<Module, RackError> {
        let module = self.registry.remove(id)?;
        log::debug!("removed {} {id}", module.kind());
        Ok(module)
    }

    /// Slide `right` up against `left`, closing whatever gap was between them.
    pub fn join(&mut self, left: UnitId, right: UnitId) -> Result<(), RackError> {
        self.registry.join(left, right)?;
        log::debug!("joined {left} -> {right}");
        Ok(())
    }

    pub fn set_bypassed(&mut self, id: UnitId, bypassed: bool) -> Result<(), RackError> {
        self.registry.set_bypassed(id, bypassed)?;
        log::debug!("unit {id} bypassed={bypassed}");
        Ok(())
    }

    pub fn bus(&self, id: UnitId) -> Option<&Bus> {
        self.registry.bus(id)
    }

    pub fn bus_mut(&mut self, id: UnitId) -> Option<&mut Bus> {
        self.registry.bus_mut(id)
    }

    pub fn role(&self, id: UnitId) -> Option<&RoleUnit> {
        self.registry.role(id)
    }

    pub fn role_mut(&mut self, id: UnitId) -> Option<&mut RoleUnit> {
        self.registry.role_mut(id)
    }

    /// Set a parameter on any bus or role unit by descriptor index.
    pub fn set_param(&mut self, id: UnitId, param: usize, value: f32) -> Result<(), RackError> {
        match self.registry.get_mut(id) {
            Some(Module::Bus(bus)) => bus.set_param(param, value),
            Some(Module::Role(unit)) => unit.set_param(param, value),
            Some(Module::Foreign) => Err(RackError::WrongKind {
                unit: id,
                expected: "bus or role unit",
                found: "foreign",
            }),
            None => Err(RackError::UnknownUnit(id)),
        }
    }

    /// Run one frame for every module.
    pub fn process(&mut self, ctx: &FrameCtx) {
        // Walk slots by index; collecting ids would allocate
        let count = self.registry.slot_count();

        for index in 0..count {
            let id = UnitId(index as u32);
            if let Some(unit) = self.registry.role_mut(id) {
                unit.process();
            }
        }

        for index in 0..count {
            let id = UnitId(index as u32);
            if self.registry.bus(id).is_none() {
                continue;
            }
            let Some(Module::Bus(mut bus)) = self.registry.take(id) else {
                continue;
            };
            bus.process(ctx, &self.registry, id);
            for record in bus.outbox().iter() {
                publish::publish(record, &mut self.registry);
            }
            self.registry.put_back(id, Module::Bus(bus));
        }
    }

    /// Apply queued control messages. Call between frames.
    pub fn drain_messages<R: MessageReceiver>(&mut self, receiver: &mut R) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(message) = receiver.pop() {
            let result = match message {
                RackMessage::SetParam { unit, param, value } => self.set_param(unit, param, value),
                RackMessage::SetBypass { unit, bypassed } => self.registry.set_bypassed(unit, bypassed),
            };
            match result {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::warn!("dropped {message:?}: {err}");
                    report.rejected += 1;
                }
            }
        }
        report
    }

    /// Serialize the rack left to right as `[{ "module": kind, "state": {..} }]`.
    ///
    /// An entry that does not touch its predecessor carries `"detached": true`.
    pub fn to_json(&self) -> Value {
        let mut entries = Vec::new();
        for row in self.registry.rows() {
            for (pos, id) in row.into_iter().enumerate() {
                let Some(module) = self.registry.get(id) else {
                    continue;
                };
                let mut state = StateMap::new();
                match module {
                    Module::Bus(bus) => bus.save(&mut state),
                    Module::Role(unit) => unit.save(&mut state),
                    Module::Foreign => {}
                }
                let mut entry = Map::new();
                entry.insert("module".into(), Value::from(module.kind()));
                entry.insert("state".into(), Value::Object(state));
                if pos == 0 && !entries.is_empty() {
                    entry.insert("detached".into(), Value::Bool(true));
                }
                entries.push(Value::Object(entry));
            }
        }
        Value::Array(entries)
    }

    /// Rebuild a rack from [`Rack::to_json`] output.
    pub fn from_json(value: &Value, sample_rate: f32) -> Result<Self, StateError> {
        let entries = value.as_array().ok_or(StateError::NotAnArray)?;
        let mut rack = Rack::new(sample_rate);
        let empty = StateMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let kind = entry
                .get("module")
                .and_then(Value::as_str)
                .ok_or(StateError::MissingKind { index })?;
            let state = entry.get("state").and_then(Value::as_object).unwrap_or(&empty);
            let detached = entry.get("detached").and_then(Value::as_bool).unwrap_or(false);

            let module = match kind {
                "bus" => Module::Bus(Box::new(Bus::from_state(state, sample_rate))),
                "foreign" => Module::Foreign,
                other => {
                    let tag = RoleTag::from_kind(other)
                        .ok_or_else(|| StateError::UnknownKind(other.to_owned()))?;
                    let mut unit = RoleUnit::new(Role::for_tag(tag));
                    unit.load(state);
                    Module::Role(unit)
                }
            };

            if detached {
                rack.registry.push_detached(module);
            } else {
                rack.registry.push(module);
            }
        }

        log::info!("restored rack with {} modules", rack.registry.len());
        Ok(rack)
    }

    pub fn from_json_str(json: &str, sample_rate: f32) -> Result<Self, StateError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value, sample_rate)
    }
}
