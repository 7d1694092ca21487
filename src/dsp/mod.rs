//! Low-level DSP primitives used by the bus pipeline.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside per-voice arrays. They stay focused on the
//! signal-processing math; the bus layers routing and role composition on top.

/// Hard and soft clipping with the clip-mode table.
pub mod clip;
/// Single-pole DC blocker with sample-rate aware coefficient.
pub mod dc_block;
/// Crossfade and voice-frame summing.
pub mod mix;
/// 4x up/down sampling around nonlinear stages.
pub mod oversample;
/// Pan-law table and gain functions.
pub mod pan;
/// Asymmetric rise/fall slew with shape blend.
pub mod slew;
/// Schmitt trigger edge detection.
pub mod trigger;
/// Voltage-controlled amplifier transfer modes.
pub mod vca;

pub use clip::ClipMode;
pub use dc_block::{DcBlockMode, DcBlocker};
pub use oversample::Oversampler;
pub use pan::{PanGains, PanLaw};
pub use slew::{ShapedSlew, SlewTiming};
pub use trigger::SchmittTrigger;
pub use vca::{VcaMode, VcaStage};
