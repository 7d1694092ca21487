pub mod bus; // The mixing bus and its per-frame signal pipeline
pub mod control; // Lock-free parameter messages from control threads
pub mod dsp;
pub mod io;
pub mod rack; // Adjacency registry, role units, discovery
pub mod state; // Flat key/value persistence

pub use bus::{Bus, BusVariant};
pub use io::FrameCtx;
pub use rack::{Module, Rack, UnitId};

/// Polyphony ceiling for every port.
pub const MAX_POLY: usize = 16;
/// Mixer channels per bus.
pub const CHANNELS: usize = 4;
/// Fade/offset slot index for the master section.
pub const MASTER: usize = 4;
/// Four channels plus master.
pub const FADE_SLOTS: usize = CHANNELS + 1;
/// Output scale in volts; clip ceilings are expressed against it.
pub const OUTPUT_CEILING: f32 = 10.0;

pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
