//! Master clip and DC-block chain for one output voice.
//!
//! The order is fixed:
//!
//!   pre-level clip → DC block (before) → × master level → DC block (after) → post-level clip
//!
//! The bus splits this at the level multiply: [`MasterVoice::pre_level`] runs
//! everything before it, [`MasterVoice::post_level`] everything after. For
//! oversampled post-level modes the after-blocker and the clipper share one
//! oversampled pass, so the blocker runs at four times the sample rate.

use crate::dsp::{
    clip::{ClipMode, ClipPlacement},
    dc_block::{DcBlockMode, DcBlocker},
    oversample::{Oversampler, OVERSAMPLE},
};

#[derive(Debug, Clone, Copy)]
pub struct MasterVoice {
    pre: Oversampler,
    dc_before: DcBlocker,
    post: Oversampler,
    dc_after: DcBlocker,
}

impl MasterVoice {
    pub fn new(sample_rate: f32, clip: ClipMode) -> Self {
        let mut voice = Self {
            pre: Oversampler::new(),
            dc_before: DcBlocker::new(sample_rate, 1),
            post: Oversampler::new(),
            dc_after: DcBlocker::new(sample_rate, 1),
        };
        voice.configure(sample_rate, clip);
        voice
    }

    /// Track sample rate and clip mode; blockers reset only when their
    /// effective rate changes.
    pub fn configure(&mut self, sample_rate: f32, clip: ClipMode) {
        self.dc_before.configure(sample_rate, 1);
        let factor = if Self::post_oversampled(clip) {
            OVERSAMPLE
        } else {
            1
        };
        self.dc_after.configure(sample_rate, factor);
    }

    fn post_oversampled(clip: ClipMode) -> bool {
        clip.placement() == ClipPlacement::PostLevel && clip.is_oversampled()
    }

    /// Pre-level clip, then the before-blocker.
    #[inline]
    pub fn pre_level(&mut self, x: f32, clip: ClipMode, dc: DcBlockMode) -> f32 {
        let mut y = x;
        if clip.placement() == ClipPlacement::PreLevel {
            y = if clip.is_oversampled() {
                self.pre.process(y, |s| clip.apply(s))
            } else {
                clip.apply(y)
            };
        }
        if dc.before() {
            y = self.dc_before.process(y);
        }
        y
    }

    /// After-blocker, then the post-level clip.
    #[inline]
    pub fn post_level(&mut self, x: f32, clip: ClipMode, dc: DcBlockMode) -> f32 {
        let dc_after = dc.after() || clip.requires_dc_after();
        let post_clip = clip.placement() == ClipPlacement::PostLevel;

        if post_clip && clip.is_oversampled() {
            let blocker = &mut self.dc_after;
            return self.post.process(x, |s| {
                let s = if dc_after { blocker.process(s) } else { s };
                clip.apply(s)
            });
        }

        let mut y = x;
        if dc_after {
            y = self.dc_after.process(y);
        }
        if post_clip {
            y = clip.apply(y);
        }
        y
    }
}

impl Default for MasterVoice {
    fn default() -> Self {
        Self::new(48_000.0, ClipMode::Off)
    }
}
