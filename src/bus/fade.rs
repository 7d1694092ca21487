//! Fade engine: five shaped slews driven by mute/solo targets.
//!
//! Slots 0-3 follow the channels, slot 4 the master. Each frame the bus
//! resolves which slots should be audible from whatever mute and solo units
//! it discovered, then the engine moves every gain towards its target. In the
//! hard regime the gain snaps; in the soft regime it slews at the configured
//! rise/fall rate. Gains are never reset when units appear or disappear, so
//! removing a mute unit mid-fade glides the channel back open.

use crate::{
    dsp::slew::{ShapedSlew, SlewTiming},
    io::FrameCtx,
    CHANNELS, FADE_SLOTS, MASTER,
};

/// Which slots should be audible this frame, and in which regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTargets {
    pub audible: [bool; FADE_SLOTS],
    /// `None` keeps whichever regime was last active.
    pub soft: Option<bool>,
}

impl FadeTargets {
    /// Nothing muted or soloed.
    pub const OPEN: FadeTargets = FadeTargets {
        audible: [true; FADE_SLOTS],
        soft: None,
    };

    /// Mute unit alone: every slot, master included, follows its button.
    pub fn mute_only(muted: &[bool; FADE_SLOTS], soft: bool) -> Self {
        let mut audible = [true; FADE_SLOTS];
        for (a, &m) in audible.iter_mut().zip(muted.iter()) {
            *a = !m;
        }
        Self {
            audible,
            soft: Some(soft),
        }
    }

    /// Solo unit alone: if anything is soloed only soloed channels play.
    pub fn solo_only(soloed: &[bool; CHANNELS], soft: bool) -> Self {
        let any_solo = soloed.iter().any(|&s| s);
        let mut audible = [true; FADE_SLOTS];
        for (a, &s) in audible[..CHANNELS].iter_mut().zip(soloed.iter()) {
            *a = !any_solo || s;
        }
        Self {
            audible,
            soft: Some(soft),
        }
    }

    /// Mute and solo sharing one engine: solo wins whenever any is set.
    pub fn shared(muted: &[bool; FADE_SLOTS], soloed: &[bool; CHANNELS], soft: bool) -> Self {
        let any_solo = soloed.iter().any(|&s| s);
        let mut audible = [true; FADE_SLOTS];
        for i in 0..CHANNELS {
            audible[i] = if any_solo { soloed[i] } else { !muted[i] };
        }
        audible[MASTER] = !muted[MASTER];
        Self {
            audible,
            soft: Some(soft),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FadeEngine {
    slews: [ShapedSlew; FADE_SLOTS],
    gains: [f32; FADE_SLOTS],
    soft: bool,
}

impl FadeEngine {
    pub fn new() -> Self {
        Self {
            slews: [ShapedSlew::new(1.0); FADE_SLOTS],
            gains: [1.0; FADE_SLOTS],
            soft: false,
        }
    }

    /// Advance every slot one sample and return the shaped gains.
    pub fn process(
        &mut self,
        targets: &FadeTargets,
        timing: &SlewTiming,
        ctx: &FrameCtx,
    ) -> &[f32; FADE_SLOTS] {
        if let Some(soft) = targets.soft {
            self.soft = soft;
        }
        let timing = timing.clamped();

        for ((slew, gain), &audible) in self
            .slews
            .iter_mut()
            .zip(self.gains.iter_mut())
            .zip(targets.audible.iter())
        {
            let target = if audible { 1.0 } else { 0.0 };
            *gain = if self.soft {
                slew.next(target, &timing, ctx)
            } else {
                slew.snap(target);
                slew.output(timing.shape)
            };
        }

        &self.gains
    }

    #[inline]
    pub fn gain(&self, slot: usize) -> f32 {
        self.gains.get(slot).copied().unwrap_or(1.0)
    }

    pub fn gains(&self) -> &[f32; FADE_SLOTS] {
        &self.gains
    }

    pub fn is_soft(&self) -> bool {
        self.soft
    }
}

impl Default for FadeEngine {
    fn default() -> Self {
        Self::new()
    }
}
