//! Schmitt trigger edge detection for mute/solo CV inputs.
//!
//! The trigger goes high when the input reaches [`TRIGGER_HIGH`] and only
//! drops back low at [`TRIGGER_LOW`]. The hysteresis band keeps noisy gates
//! from chattering.

pub const TRIGGER_LOW: f32 = 0.1;
pub const TRIGGER_HIGH: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    pub const fn new() -> Self {
        Self { high: false }
    }

    /// Feed one sample. Returns true on a rising edge.
    #[inline]
    pub fn process(&mut self, voltage: f32) -> bool {
        if self.high {
            if voltage <= TRIGGER_LOW {
                self.high = false;
            }
            false
        } else if voltage >= TRIGGER_HIGH {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}
