// Purpose - host-facing surfaces: frame context, poly ports, descriptors

pub mod descriptor;
pub mod port;

pub use descriptor::{ModuleDescriptor, ParamInfo, PortInfo};
pub use port::{PolyInput, PolyOutput};

/// Context passed to every module once per audio frame.
///
/// - sample_rate: engine sample rate (e.g., 48000.0)
/// - frame: monotonically increasing frame index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCtx {
    pub sample_rate: f32,
    pub frame: u64,
}

impl FrameCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frame: 0,
        }
    }

    /// Seconds per sample.
    #[inline]
    pub fn sample_time(&self) -> f32 {
        1.0 / self.sample_rate.max(1.0)
    }

    /// Advance to the next frame.
    #[inline]
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }
}

impl Default for FrameCtx {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}
