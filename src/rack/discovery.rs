use crate::rack::{
    registry::{RackModule, Registry, UnitId},
    role::RoleTag,
};

/*
Chain Discovery
===============

A bus has no configuration for its expanders. Every frame it looks at the
module to its right, then that module's right neighbor, and so on, and builds
a plan from whatever role units it finds.

    ┌─────┐┌──────┐┌──────┐┌─────┐┌──────┐┌─────────┐┌──────┐
    │ BUS ││ MUTE ││ SEND ││ PAN ││ SEND ││ foreign ││ SOLO │
    └─────┘└──────┘└──────┘└─────┘└──────┘└─────────┘└──────┘
       ●──────→───────→──────→──────→──────✕
                                          stop: not a role unit

Rules
-----

  stop          At an empty neighbor slot, at any module that is not a role
                unit, and at a second copy of a singular role. Everything
                past the stop point is ignored, even valid roles.

  repeat        Send is the only role that may appear several times. Sends
                keep their left-to-right order; that order is the chain
                order for cascaded returns.

  bypass        A bypassed unit is stepped over. It contributes nothing and
                does not claim its role slot, but the walk continues past
                it so the units behind it stay attached.

  mute + solo   Each may appear once. When both are found they share one
                fade engine, and the soft flag comes from whichever was
                found first.

The walk reads neighbors but never changes them. A plan lives for a single
frame, so removing or bypassing a unit takes effect on the next one.
*/

/// Longest chain a bus will walk.
pub const MAX_CHAIN: usize = 16;
/// Most sends one bus composes.
pub const MAX_SENDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MuteSoloBinding {
    #[default]
    None,
    Mute(UnitId),
    Solo(UnitId),
    Shared {
        mute: UnitId,
        solo: UnitId,
        /// The solo unit sits closer to the bus.
        solo_first: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryPlan {
    order: [Option<UnitId>; MAX_CHAIN],
    order_len: usize,
    sends: [Option<UnitId>; MAX_SENDS],
    send_len: usize,
    pub mute_solo: MuteSoloBinding,
    pub pan: Option<UnitId>,
    pub offset: Option<UnitId>,
    pub fade: Option<UnitId>,
}

impl DiscoveryPlan {
    pub const EMPTY: DiscoveryPlan = DiscoveryPlan {
        order: [None; MAX_CHAIN],
        order_len: 0,
        sends: [None; MAX_SENDS],
        send_len: 0,
        mute_solo: MuteSoloBinding::None,
        pan: None,
        offset: None,
        fade: None,
    };

    /// Active units, nearest first.
    pub fn order(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.order[..self.order_len].iter().flatten().copied()
    }

    /// Sends in chain order.
    pub fn sends(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.sends[..self.send_len].iter().flatten().copied()
    }

    pub fn send(&self, index: usize) -> Option<UnitId> {
        self.sends[..self.send_len].get(index).copied().flatten()
    }

    pub fn send_count(&self) -> usize {
        self.send_len
    }

    pub fn len(&self) -> usize {
        self.order_len
    }

    pub fn is_empty(&self) -> bool {
        self.order_len == 0
    }
}

impl Default for DiscoveryPlan {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Walk right from `bus` and resolve its role units.
pub fn discover(registry: &Registry, bus: UnitId) -> DiscoveryPlan {
    let mut plan = DiscoveryPlan::EMPTY;
    let mut mute: Option<UnitId> = None;
    let mut solo: Option<UnitId> = None;
    let mut solo_first = false;

    let mut cursor = registry.right_of(bus);
    // Bypassed units do not fill the plan, so bound the walk separately
    let mut steps = 0;

    while let Some(id) = cursor {
        steps += 1;
        if steps > MAX_CHAIN * 2 || plan.order_len == MAX_CHAIN {
            break;
        }
        let Some(module) = registry.get(id) else {
            break;
        };
        let Some(tag) = module.role_tag() else {
            break;
        };
        if module.is_bypassed() {
            cursor = registry.right_of(id);
            continue;
        }

        let claimed = !tag.is_repeatable()
            && plan
                .order()
                .any(|seen| registry.get(seen).and_then(|m| m.role_tag()) == Some(tag));
        if claimed {
            break;
        }

        match tag {
            RoleTag::Mute => mute = Some(id),
            RoleTag::Solo => {
                solo_first = mute.is_none();
                solo = Some(id);
            }
            RoleTag::Pan => plan.pan = Some(id),
            RoleTag::Offset => plan.offset = Some(id),
            RoleTag::Fade => plan.fade = Some(id),
            RoleTag::Send => {
                if plan.send_len == MAX_SENDS {
                    break;
                }
                plan.sends[plan.send_len] = Some(id);
                plan.send_len += 1;
            }
        }

        plan.order[plan.order_len] = Some(id);
        plan.order_len += 1;
        cursor = registry.right_of(id);
    }

    plan.mute_solo = match (mute, solo) {
        (None, None) => MuteSoloBinding::None,
        (Some(m), None) => MuteSoloBinding::Mute(m),
        (None, Some(s)) => MuteSoloBinding::Solo(s),
        (Some(mute), Some(solo)) => MuteSoloBinding::Shared {
            mute,
            solo,
            solo_first,
        },
    };
    plan
}
