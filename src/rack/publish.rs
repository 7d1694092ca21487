//! Cross-unit writes as records.
//!
//! While a bus runs its frame it only holds a shared borrow of the registry.
//! Anything it needs to write onto a role unit (send taps, fade monitor
//! voltages) goes into its [`Outbox`] instead, and the rack publishes the
//! records once the bus is done.

use crate::{
    rack::{discovery::MAX_SENDS, registry::Registry, registry::UnitId, role::Role},
    FADE_SLOTS, MAX_POLY,
};

/// One send tap plus a fade monitor.
pub const OUTBOX_CAPACITY: usize = MAX_SENDS + 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoleOutput {
    Send {
        unit: UnitId,
        channels: usize,
        left: [f32; MAX_POLY],
        right: [f32; MAX_POLY],
    },
    FadeMonitor {
        unit: UnitId,
        gains: [f32; FADE_SLOTS],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Outbox {
    records: [Option<RoleOutput>; OUTBOX_CAPACITY],
    len: usize,
}

impl Outbox {
    pub const fn new() -> Self {
        Self {
            records: [None; OUTBOX_CAPACITY],
            len: 0,
        }
    }

    /// Queue a record; false when full.
    pub fn push(&mut self, record: RoleOutput) -> bool {
        match self.records.get_mut(self.len) {
            Some(slot) => {
                *slot = Some(record);
                self.len += 1;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.records = [None; OUTBOX_CAPACITY];
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleOutput> {
        self.records[..self.len].iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Outbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one record to its target unit. Records for vanished units are dropped.
pub fn publish(record: &RoleOutput, registry: &mut Registry) {
    match *record {
        RoleOutput::Send {
            unit,
            channels,
            left,
            right,
        } => {
            if let Some(Role::Send(send)) = registry.role_mut(unit).map(|u| &mut u.role) {
                let channels = channels.min(MAX_POLY);
                send.send_left.write(&left[..channels]);
                send.send_right.write(&right[..channels]);
            }
        }
        RoleOutput::FadeMonitor { unit, gains } => {
            if let Some(Role::Fade(fade)) = registry.role_mut(unit).map(|u| &mut u.role) {
                for (out, gain) in fade.monitor.iter_mut().zip(gains) {
                    out.write(&[10.0 * gain]);
                }
            }
        }
    }
}
