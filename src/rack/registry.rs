//! Arena of rack modules with explicit left/right adjacency.
//!
//! Units live in slots addressed by [`UnitId`]. Ids are never reused, so a
//! stale id simply resolves to nothing. Adjacency is stored per slot: sliding
//! a module out of the rack leaves a gap on both sides rather than pulling
//! its neighbors together.

use crate::{
    bus::Bus,
    rack::{
        role::{RoleTag, RoleUnit},
        RackError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub(crate) u32);

impl UnitId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum Module {
    Bus(Box<Bus>),
    Role(RoleUnit),
    /// Any module that does not take part in bus composition.
    Foreign,
}

/// Capability query every rack module answers during discovery.
pub trait RackModule {
    fn role_tag(&self) -> Option<RoleTag>;
    fn is_bypassed(&self) -> bool;
}

impl RackModule for Module {
    fn role_tag(&self) -> Option<RoleTag> {
        match self {
            Module::Role(unit) => Some(unit.tag()),
            Module::Bus(_) | Module::Foreign => None,
        }
    }

    fn is_bypassed(&self) -> bool {
        match self {
            Module::Role(unit) => unit.bypassed,
            Module::Bus(_) | Module::Foreign => false,
        }
    }
}

impl Module {
    pub fn kind(&self) -> &'static str {
        match self {
            Module::Bus(_) => "bus",
            Module::Role(unit) => unit.tag().kind(),
            Module::Foreign => "foreign",
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    module: Option<Module>,
    /// False once removed; a live slot with `module == None` is a bus that
    /// is out for processing.
    live: bool,
    left: Option<UnitId>,
    right: Option<UnitId>,
}

#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    tail: Option<UnitId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: UnitId) -> Option<&Slot> {
        self.slots.get(id.index()).filter(|s| s.live)
    }

    fn slot_mut(&mut self, id: UnitId) -> Option<&mut Slot> {
        self.slots.get_mut(id.index()).filter(|s| s.live)
    }

    fn alloc(&mut self, module: Module) -> UnitId {
        let id = UnitId(self.slots.len() as u32);
        self.slots.push(Slot {
            module: Some(module),
            live: true,
            left: None,
            right: None,
        });
        id
    }

    /// Append to the right end of the rack.
    pub fn push(&mut self, module: Module) -> UnitId {
        let id = self.alloc(module);
        if let Some(tail) = self.tail {
            self.link(tail, id);
        }
        self.tail = Some(id);
        id
    }

    /// Append without touching anything, leaving a gap on both sides.
    pub fn push_detached(&mut self, module: Module) -> UnitId {
        let id = self.alloc(module);
        self.tail = Some(id);
        id
    }

    /// Slide `module` in directly right of `left`.
    pub fn insert_after(&mut self, left: UnitId, module: Module) -> Result<UnitId, RackError> {
        if self.slot(left).is_none() {
            return Err(RackError::UnknownUnit(left));
        }
        let old_right = self.right_of(left);
        let id = self.alloc(module);
        self.link(left, id);
        if let Some(right) = old_right {
            self.link(id, right);
        }
        if self.tail == Some(left) {
            self.tail = Some(id);
        }
        Ok(id)
    }

    /// Take a module out of the rack. Its neighbors are left facing a gap.
    pub fn remove(&mut self, id: UnitId) -> Result<Module, RackError> {
        let (left, right, module) = {
            let slot = self.slot_mut(id).ok_or(RackError::UnknownUnit(id))?;
            let module = slot.module.take().ok_or(RackError::UnknownUnit(id))?;
            slot.live = false;
            (slot.left.take(), slot.right.take(), module)
        };

        if let Some(l) = left.and_then(|l| self.slot_mut(l)) {
            l.right = None;
        }
        if let Some(r) = right.and_then(|r| self.slot_mut(r)) {
            r.left = None;
        }
        if self.tail == Some(id) {
            self.tail = left;
        }
        Ok(module)
    }

    /// Make `right` the direct right-hand neighbor of `left`, detaching
    /// whatever either was touching on that side.
    pub fn join(&mut self, left: UnitId, right: UnitId) -> Result<(), RackError> {
        if left == right {
            return Err(RackError::Cycle(left));
        }
        if self.slot(left).is_none() {
            return Err(RackError::UnknownUnit(left));
        }
        if self.slot(right).is_none() {
            return Err(RackError::UnknownUnit(right));
        }
        // Walking right from `right` must not come back to `left`
        let mut cursor = Some(right);
        let mut steps = 0;
        while let Some(id) = cursor {
            if id == left {
                return Err(RackError::Cycle(left));
            }
            steps += 1;
            if steps > self.slots.len() {
                break;
            }
            cursor = self.right_of(id);
        }

        self.link(left, right);
        if self.tail == Some(left) {
            self.tail = Some(right);
        }
        Ok(())
    }

    fn link(&mut self, left: UnitId, right: UnitId) {
        let old_right = self.right_of(left);
        let old_left = self.left_of(right);
        if let Some(r) = old_right.and_then(|r| self.slot_mut(r)) {
            r.left = None;
        }
        if let Some(l) = old_left.and_then(|l| self.slot_mut(l)) {
            l.right = None;
        }
        if let Some(slot) = self.slot_mut(left) {
            slot.right = Some(right);
        }
        if let Some(slot) = self.slot_mut(right) {
            slot.left = Some(left);
        }
    }

    pub fn get(&self, id: UnitId) -> Option<&Module> {
        self.slot(id).and_then(|s| s.module.as_ref())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Module> {
        self.slot_mut(id).and_then(|s| s.module.as_mut())
    }

    pub fn role(&self, id: UnitId) -> Option<&RoleUnit> {
        match self.get(id) {
            Some(Module::Role(unit)) => Some(unit),
            _ => None,
        }
    }

    pub fn role_mut(&mut self, id: UnitId) -> Option<&mut RoleUnit> {
        match self.get_mut(id) {
            Some(Module::Role(unit)) => Some(unit),
            _ => None,
        }
    }

    pub fn bus(&self, id: UnitId) -> Option<&Bus> {
        match self.get(id) {
            Some(Module::Bus(bus)) => Some(bus),
            _ => None,
        }
    }

    pub fn bus_mut(&mut self, id: UnitId) -> Option<&mut Bus> {
        match self.get_mut(id) {
            Some(Module::Bus(bus)) => Some(bus),
            _ => None,
        }
    }

    pub fn right_of(&self, id: UnitId) -> Option<UnitId> {
        self.slot(id).and_then(|s| s.right)
    }

    pub fn left_of(&self, id: UnitId) -> Option<UnitId> {
        self.slot(id).and_then(|s| s.left)
    }

    pub fn set_bypassed(&mut self, id: UnitId, bypassed: bool) -> Result<(), RackError> {
        match self.get_mut(id) {
            Some(Module::Role(unit)) => {
                unit.bypassed = bypassed;
                Ok(())
            }
            Some(other) => Err(RackError::WrongKind {
                unit: id,
                expected: "role unit",
                found: other.kind(),
            }),
            None => Err(RackError::UnknownUnit(id)),
        }
    }

    /// Live unit ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.live)
            .map(|(i, _)| UnitId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Units grouped into contiguous rows, each row left to right.
    pub fn rows(&self) -> Vec<Vec<UnitId>> {
        let mut rows = Vec::new();
        for head in self.ids().filter(|&id| self.left_of(id).is_none()) {
            let mut row = vec![head];
            let mut cursor = self.right_of(head);
            while let Some(id) = cursor {
                row.push(id);
                cursor = self.right_of(id);
            }
            rows.push(row);
        }
        rows
    }

    /// Slots ever allocated, removed ones included.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Lend a bus's module out of its slot; adjacency stays in place.
    pub(crate) fn take(&mut self, id: UnitId) -> Option<Module> {
        self.slot_mut(id).and_then(|s| s.module.take())
    }

    pub(crate) fn put_back(&mut self, id: UnitId, module: Module) {
        if let Some(slot) = self.slot_mut(id) {
            slot.module = Some(module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rack::role::{Role, RoleUnit};

    fn mute() -> Module {
        Module::Role(RoleUnit::new(Role::mute()))
    }

    #[test]
    fn test_push_links_left_to_right() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let b = reg.push(mute());
        let c = reg.push(Module::Foreign);

        assert_eq!(reg.right_of(a), Some(b));
        assert_eq!(reg.right_of(b), Some(c));
        assert_eq!(reg.left_of(c), Some(b));
        assert_eq!(reg.right_of(c), None);
    }

    #[test]
    fn test_remove_leaves_gap() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let b = reg.push(mute());
        let c = reg.push(Module::Foreign);

        reg.remove(b).unwrap();

        assert_eq!(reg.right_of(a), None);
        assert_eq!(reg.left_of(c), None);
        assert!(reg.get(b).is_none());
        assert_eq!(reg.rows(), vec![vec![a], vec![c]]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        reg.remove(a).unwrap();
        let b = reg.push(Module::Foreign);
        assert_ne!(a, b);
        assert!(matches!(reg.remove(a), Err(RackError::UnknownUnit(_))));
    }

    #[test]
    fn test_insert_after_splices() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let c = reg.push(Module::Foreign);
        let b = reg.insert_after(a, mute()).unwrap();

        assert_eq!(reg.rows(), vec![vec![a, b, c]]);
    }

    #[test]
    fn test_join_rejects_cycles() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let b = reg.push(Module::Foreign);
        assert!(matches!(reg.join(b, a), Err(RackError::Cycle(_))));
        assert!(matches!(reg.join(a, a), Err(RackError::Cycle(_))));
    }

    #[test]
    fn test_join_closes_gap() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let b = reg.push(mute());
        let c = reg.push(Module::Foreign);
        reg.remove(b).unwrap();

        reg.join(a, c).unwrap();
        assert_eq!(reg.rows(), vec![vec![a, c]]);
    }

    #[test]
    fn test_bypass_requires_role_unit() {
        let mut reg = Registry::new();
        let a = reg.push(Module::Foreign);
        let b = reg.push(mute());

        assert!(matches!(reg.set_bypassed(a, true), Err(RackError::WrongKind { .. })));
        reg.set_bypassed(b, true).unwrap();
        assert!(reg.get(b).map(|m| m.is_bypassed()).unwrap_or(false));
    }
}
