#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
DC Blocker
==========

A one-pole highpass that removes constant offset while leaving audio alone.

    y[n] = x[n] - x[n-1] + r · y[n-1]

The difference x[n] - x[n-1] kills DC outright; the feedback term r · y[n-1]
restores everything above a very low corner so the filter is transparent for
audio.

The Coefficient
---------------

    r = 1 - 2π · fc / fs        fc = 10 Hz

At 48 kHz, r ≈ 0.99869. Running inside a 4x oversampler the effective rate is
192 kHz, so the blocker has to be told the factor or its corner lands four
times too high.

⚠️ r must stay strictly below 1.0 or the filter turns into an integrator. The
denominator is floored and the result clamped just under 1.
*/

/// Highpass corner in Hz.
const CUTOFF_HZ: f32 = 10.0;
/// Floor for the effective sample rate.
const MIN_RATE: f32 = 1.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DcBlockMode {
    #[default]
    Off,
    Before,
    BeforeAndAfter,
    After,
}

impl DcBlockMode {
    pub const ALL: [DcBlockMode; 4] = [
        DcBlockMode::Off,
        DcBlockMode::Before,
        DcBlockMode::BeforeAndAfter,
        DcBlockMode::After,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DcBlockMode::Off => "Off",
            DcBlockMode::Before => "Before master level",
            DcBlockMode::BeforeAndAfter => "Before and after master level",
            DcBlockMode::After => "After master level",
        }
    }

    /// Blocker runs before the master level.
    pub fn before(self) -> bool {
        matches!(self, DcBlockMode::Before | DcBlockMode::BeforeAndAfter)
    }

    /// Blocker runs after the master level.
    pub fn after(self) -> bool {
        matches!(self, DcBlockMode::After | DcBlockMode::BeforeAndAfter)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DcBlocker {
    r: f32,
    x1: f32,
    y1: f32,
    sample_rate: f32,
    factor: usize,
}

impl DcBlocker {
    pub fn new(sample_rate: f32, factor: usize) -> Self {
        let mut blocker = Self {
            r: 0.0,
            x1: 0.0,
            y1: 0.0,
            sample_rate: 0.0,
            factor: 0,
        };
        blocker.configure(sample_rate, factor);
        blocker
    }

    /// Recompute the coefficient; state resets only on an actual change.
    pub fn configure(&mut self, sample_rate: f32, factor: usize) {
        if sample_rate == self.sample_rate && factor == self.factor {
            return;
        }
        self.sample_rate = sample_rate;
        self.factor = factor;

        let rate = (sample_rate * factor.max(1) as f32).max(MIN_RATE);
        self.r = (1.0 - TAU * CUTOFF_HZ / rate).clamp(0.0, 1.0 - f32::EPSILON);
        self.reset();
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = x - self.x1 + self.r * self.y1;
        self.x1 = x;
        self.y1 = y;
        y
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }

    pub fn coefficient(&self) -> f32 {
        self.r
    }
}

impl Default for DcBlocker {
    fn default() -> Self {
        Self::new(48_000.0, 1)
    }
}
