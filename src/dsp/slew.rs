use crate::{dsp::mix::crossfade, io::FrameCtx, MIN_TIME};

/*
Shaped Slew Limiter
===================

The fade engine never jumps a gain from 0 to 1. It walks there at a limited
rate, then optionally bends the walk into a curve.

Vocabulary
----------

  linear        The rate-limited value (0.0 to 1.0). It moves towards the
                target by at most one step per sample.

  target        Where the value is heading: 0.0 (silent) or 1.0 (open).

  rise / fall   Seconds for a full 0 → 1 (rise) or 1 → 0 (fall) excursion.
                Rising and falling are limited independently, so a mute can
                snap shut quickly and reopen slowly.

  shape         -1.0 to +1.0. Bends the linear ramp:
                   0.0  →  straight line
                  +1.0  →  x⁴ (slow start, fast finish)
                  -1.0  →  1 - (1-x)⁴ (fast attack, pseudo-logarithmic)


The Math: Time to Step
----------------------

    step = 1.0 / (time_seconds × sample_rate)

A 40 ms fall at 48 kHz takes 1920 steps of 1/1920 each. Float rounding can
leave the last step a hair short, so convergence lands within one sample of
the configured time.


The Shape Blend
---------------

    curve  = x⁴            when shape ≥ 0
             1 - (1-x)⁴    when shape < 0
    output = crossfade(x, curve, |shape|)

    Output
      1.0 ┤           ..----‾‾   ← shape = -1 (fast attack)
          │       .-‾‾    _.--
          │    .-‾     _-‾      ← shape = 0 (linear)
          │  .‾     _-‾   _.-
          │ /    _-‾  __.-‾      ← shape = +1 (x⁴)
      0.0 ┼‾‾‾‾‾‾‾‾‾‾‾──────────→ linear
          0.0                1.0

Both curves are monotonic on [0, 1] and pass through 0 and 1, and a
crossfade of monotonic functions is monotonic too. So whatever the shape, the
output moves only towards the target and never leaves [0, 1].
*/

/// Default fade time when no timing unit is attached.
pub const DEFAULT_FADE_TIME: f32 = 0.04;
/// Longest accepted rise or fall time.
pub const MAX_FADE_TIME: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlewTiming {
    pub rise: f32,
    pub fall: f32,
    pub shape: f32,
}

impl SlewTiming {
    pub const fn new(rise: f32, fall: f32, shape: f32) -> Self {
        Self { rise, fall, shape }
    }

    /// Range-clamped copy.
    pub fn clamped(self) -> Self {
        Self {
            rise: self.rise.clamp(0.0, MAX_FADE_TIME),
            fall: self.fall.clamp(0.0, MAX_FADE_TIME),
            shape: self.shape.clamp(-1.0, 1.0),
        }
    }
}

impl Default for SlewTiming {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_TIME, DEFAULT_FADE_TIME, 0.0)
    }
}

/// Bend a linear position with the shape blend.
#[inline]
pub fn shape_curve(x: f32, shape: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    let shape = shape.clamp(-1.0, 1.0);
    let curved = if shape < 0.0 {
        let inv = 1.0 - x;
        1.0 - inv * inv * inv * inv
    } else {
        x * x * x * x
    };
    crossfade(x, curved, shape.abs())
}

#[derive(Debug, Clone, Copy)]
pub struct ShapedSlew {
    linear: f32,
}

impl ShapedSlew {
    pub fn new(initial: f32) -> Self {
        Self {
            linear: initial.clamp(0.0, 1.0),
        }
    }

    /// Advance one sample towards `target` and return the shaped output.
    pub fn next(&mut self, target: f32, timing: &SlewTiming, ctx: &FrameCtx) -> f32 {
        let target = target.clamp(0.0, 1.0);

        if self.linear < target {
            let step = 1.0 / (timing.rise.max(MIN_TIME) * ctx.sample_rate);
            self.linear = (self.linear + step).min(target);
        } else if self.linear > target {
            let step = 1.0 / (timing.fall.max(MIN_TIME) * ctx.sample_rate);
            self.linear = (self.linear - step).max(target);
        }

        debug_assert!((0.0..=1.0).contains(&self.linear));
        self.output(timing.shape)
    }

    /// Jump straight to `target` (hard regime).
    pub fn snap(&mut self, target: f32) {
        self.linear = target.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn output(&self, shape: f32) -> f32 {
        shape_curve(self.linear, shape)
    }

    pub fn linear(&self) -> f32 {
        self.linear
    }

    pub fn is_settled(&self, target: f32) -> bool {
        self.linear == target.clamp(0.0, 1.0)
    }
}

impl Default for ShapedSlew {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn ctx() -> FrameCtx {
        FrameCtx::new(SAMPLE_RATE)
    }

    #[test]
    fn test_rise_converges_within_one_sample_of_time() {
        let timing = SlewTiming::new(0.01, 0.5, 0.0);
        let mut slew = ShapedSlew::new(0.0);
        let ctx = ctx();

        for _ in 0..9 {
            slew.next(1.0, &timing, &ctx);
        }
        assert!(!slew.is_settled(1.0), "rise finished too early");

        for _ in 0..2 {
            slew.next(1.0, &timing, &ctx);
        }
        assert!(slew.is_settled(1.0), "rise should finish after 10 ± 1 samples");
    }

    #[test]
    fn test_fall_uses_its_own_rate() {
        let timing = SlewTiming::new(1.0, 0.005, 0.0);
        let mut slew = ShapedSlew::new(1.0);
        let ctx = ctx();

        for _ in 0..6 {
            slew.next(0.0, &timing, &ctx);
        }
        assert!(slew.is_settled(0.0));
    }

    #[test]
    fn test_output_is_monotonic_and_bounded_for_every_shape() {
        let ctx = ctx();
        for shape in [-1.0, -0.5, 0.0, 0.3, 1.0] {
            let timing = SlewTiming::new(0.05, 0.05, shape);
            let mut slew = ShapedSlew::new(0.0);
            let mut last = slew.output(shape);
            for _ in 0..60 {
                let out = slew.next(1.0, &timing, &ctx);
                assert!((0.0..=1.0).contains(&out));
                assert!(out >= last, "shape {shape} went backwards");
                last = out;
            }
            assert_eq!(last, 1.0);

            for _ in 0..60 {
                let out = slew.next(0.0, &timing, &ctx);
                assert!((0.0..=1.0).contains(&out));
                assert!(out <= last, "shape {shape} went backwards on fall");
                last = out;
            }
            assert_eq!(last, 0.0);
        }
    }

    #[test]
    fn test_shape_curves() {
        assert_eq!(shape_curve(0.5, 0.0), 0.5);
        assert!((shape_curve(0.5, 1.0) - 0.0625).abs() < 1e-6);
        assert!((shape_curve(0.5, -1.0) - 0.9375).abs() < 1e-6);
        assert_eq!(shape_curve(0.0, -1.0), 0.0);
        assert_eq!(shape_curve(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_snap_jumps_immediately() {
        let mut slew = ShapedSlew::new(1.0);
        slew.snap(0.0);
        assert_eq!(slew.output(0.0), 0.0);
    }

    #[test]
    fn test_zero_time_is_floored() {
        let timing = SlewTiming::new(0.0, 0.0, 0.0);
        let mut slew = ShapedSlew::new(0.0);
        let out = slew.next(1.0, &timing, &FrameCtx::new(48_000.0));
        assert!(out > 0.999, "floored time should open in about one sample");
    }
}
