//! Output clipping
//!
//! Summing four channels at full level can reach several times the output
//! scale. The clip stage decides what happens to those peaks.
//!
//! # Transfer Functions
//!
//! Hard Clip:
//!   f(x) = clamp(x, -ceiling, ceiling)
//!   - Exact below the ceiling, flat above it
//!   - Adds odd harmonics the moment it engages
//!
//! Soft Clip (rational tanh approximation):
//!   u    = clamp(x / ceiling, -3, 3)
//!   f(x) = ceiling · u(27 + u²) / (27 + 9u²)
//!   - Reaches exactly ±ceiling at u = ±3 with zero slope
//!   - Slope 1 at the origin, so quiet material passes nearly untouched
//!
//! # Placement
//!
//! Clipping can happen before or after the master level. Pre-level clipping
//! tames the raw sum and lets the master knob set the final loudness;
//! post-level clipping guarantees the output never leaves the ceiling.
//!
//!   pre:  sum → clip → DC → × master → DC → out
//!   post: sum → DC → × master → DC → clip → out
//!
//! Saturate is an oversampled soft clip with a 6 V ceiling, driven harder for
//! colour. Its asymmetric inputs leave an offset behind, so it always runs
//! the DC blocker after it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::OUTPUT_CEILING;

/// Ceiling for [`ClipMode::Saturate`].
pub const SATURATION_CEILING: f32 = 6.0;

/// Clamp to ±ceiling.
#[inline]
pub fn hard_clip(sample: f32, ceiling: f32) -> f32 {
    sample.clamp(-ceiling, ceiling)
}

/// Rational soft clip reaching ±ceiling at 3× the ceiling.
#[inline]
pub fn soft_clip(sample: f32, ceiling: f32) -> f32 {
    let ceiling = ceiling.max(f32::EPSILON);
    let u = (sample / ceiling).clamp(-3.0, 3.0);
    let u2 = u * u;
    ceiling * u * (27.0 + u2) / (27.0 + 9.0 * u2)
}

/// Where the clipper sits relative to the master level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlacement {
    None,
    PreLevel,
    PostLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipShape {
    Hard,
    Soft,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipMode {
    #[default]
    Off,
    Hard,
    Soft,
    OversampledSoft,
    HardPreLevel,
    SoftPreLevel,
    OversampledSoftPreLevel,
    Saturate,
}

impl ClipMode {
    pub const ALL: [ClipMode; 8] = [
        ClipMode::Off,
        ClipMode::Hard,
        ClipMode::Soft,
        ClipMode::OversampledSoft,
        ClipMode::HardPreLevel,
        ClipMode::SoftPreLevel,
        ClipMode::OversampledSoftPreLevel,
        ClipMode::Saturate,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ClipMode::Off => "Off",
            ClipMode::Hard => "Hard clip",
            ClipMode::Soft => "Soft clip",
            ClipMode::OversampledSoft => "Oversampled soft clip",
            ClipMode::HardPreLevel => "Hard clip, pre-level",
            ClipMode::SoftPreLevel => "Soft clip, pre-level",
            ClipMode::OversampledSoftPreLevel => "Oversampled soft clip, pre-level",
            ClipMode::Saturate => "Saturate",
        }
    }

    pub fn placement(self) -> ClipPlacement {
        match self {
            ClipMode::Off => ClipPlacement::None,
            ClipMode::HardPreLevel | ClipMode::SoftPreLevel | ClipMode::OversampledSoftPreLevel => {
                ClipPlacement::PreLevel
            }
            ClipMode::Hard | ClipMode::Soft | ClipMode::OversampledSoft | ClipMode::Saturate => {
                ClipPlacement::PostLevel
            }
        }
    }

    pub fn shape(self) -> ClipShape {
        match self {
            ClipMode::Hard | ClipMode::HardPreLevel => ClipShape::Hard,
            _ => ClipShape::Soft,
        }
    }

    pub fn is_oversampled(self) -> bool {
        matches!(
            self,
            ClipMode::OversampledSoft | ClipMode::OversampledSoftPreLevel | ClipMode::Saturate
        )
    }

    pub fn ceiling(self) -> f32 {
        match self {
            ClipMode::Saturate => SATURATION_CEILING,
            _ => OUTPUT_CEILING,
        }
    }

    /// Saturate leaves an offset behind and forces the after-level blocker.
    pub fn requires_dc_after(self) -> bool {
        self == ClipMode::Saturate
    }

    /// Apply this mode's transfer function (no oversampling, no placement).
    #[inline]
    pub fn apply(self, sample: f32) -> f32 {
        match self {
            ClipMode::Off => sample,
            _ => match self.shape() {
                ClipShape::Hard => hard_clip(sample, self.ceiling()),
                ClipShape::Soft => soft_clip(sample, self.ceiling()),
            },
        }
    }
}
