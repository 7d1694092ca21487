//! Polyphony resolution for the mix output.
//!
//! Every channel contributes a tap: its audio input and its CV input, each
//! carrying some number of poly voices. The mix runs as many voices as the
//! widest tap that actually reaches it, so a channel excluded from the mix
//! (its direct output is patched and exclusion is on) does not widen it.
//! With nothing connected the mix is mono.

use crate::{CHANNELS, MAX_POLY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTaps {
    /// Voices on the audio input (widest of left/right).
    pub input: usize,
    /// Voices on the channel CV input.
    pub cv: usize,
    /// Channel is kept out of the mix.
    pub excluded: bool,
}

impl ChannelTaps {
    /// Voices this channel processes for its own direct output.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.input.max(self.cv).clamp(1, MAX_POLY)
    }
}

/// Voice count for the mix: widest non-excluded tap, master CV or chain input.
pub fn resolve_mix_channels(taps: &[ChannelTaps; CHANNELS], master_cv: usize, chain: usize) -> usize {
    taps.iter()
        .filter(|t| !t.excluded)
        .map(|t| t.input.max(t.cv))
        .chain([master_cv, chain])
        .max()
        .unwrap_or(0)
        .clamp(1, MAX_POLY)
}
