//! Crossfade and summing helpers for per-voice frames.

/*
Crossfading and Summing
=======================

Two additive operations show up all over the bus:

  crossfade     Blend A towards B by an amount in [0, 1].
                  amount = 0.0  →  all A
                  amount = 1.0  →  all B
                The fade engine uses it to morph a linear ramp into a curve.

  summing       Plain addition of voice frames. Channels, send returns and
                the chain input all sum into the mix this way; returns carry
                their return-level weight.

                ⚠️ Summing never normalizes. Four channels at 5 V each become 20 V.
                The clip stage is where the bus deals with that, not here.


The Math: Linear Crossfade
--------------------------

    output = A × (1 - amount) + B × amount
           = A + (B - A) × amount

The second form is what we compute: when A == B the result is exactly A, so
endpoints stay exact. The weights always sum to 1.0. When A and B are both
monotonic in some variable, so is the blend; the fade engine relies on that.


Frames
------

A frame is one value per poly voice, `[f32; MAX_POLY]`. Only the first
`channels` entries are meaningful; helpers take the count explicitly so the
unused tail is never touched.
*/

use crate::MAX_POLY;

pub type VoiceFrame = [f32; MAX_POLY];

/// Blend `a` towards `b` (single sample).
///
/// output = (a × (1-amount)) + (b × amount)
#[inline]
pub fn crossfade(a: f32, b: f32, amount: f32) -> f32 {
    let amount = amount.clamp(0.0, 1.0);
    a + (b - a) * amount
}

/// Add the first `channels` voices of `src` into `dst`.
#[inline]
pub fn sum_into(dst: &mut VoiceFrame, src: &VoiceFrame, channels: usize) {
    let channels = channels.min(MAX_POLY);
    for (d, &s) in dst[..channels].iter_mut().zip(src[..channels].iter()) {
        *d += s;
    }
}

/// Add `src × weight` into `dst` for the first `channels` voices.
#[inline]
pub fn sum_weighted_into(dst: &mut VoiceFrame, src: &VoiceFrame, weight: f32, channels: usize) {
    let channels = channels.min(MAX_POLY);
    for (d, &s) in dst[..channels].iter_mut().zip(src[..channels].iter()) {
        *d += s * weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossfade_endpoints() {
        assert_eq!(crossfade(1.0, 0.5, 0.0), 1.0);
        assert_eq!(crossfade(1.0, 0.5, 1.0), 0.5);
        assert_eq!(crossfade(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn test_crossfade_amount_clamped() {
        assert_eq!(crossfade(1.0, 0.0, 2.0), 0.0);
        assert_eq!(crossfade(1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn test_sum_into_respects_channel_count() {
        let mut dst = [1.0; MAX_POLY];
        let src = [2.0; MAX_POLY];

        sum_into(&mut dst, &src, 3);

        assert_eq!(&dst[..4], &[3.0, 3.0, 3.0, 1.0]);
    }

    #[test]
    fn test_sum_can_exceed_output_scale() {
        let mut dst = [0.0; MAX_POLY];
        let src = [5.0; MAX_POLY];
        for _ in 0..4 {
            sum_into(&mut dst, &src, 1);
        }
        assert_eq!(dst[0], 20.0);
    }

    #[test]
    fn test_weighted_sum() {
        let mut dst = [0.0; MAX_POLY];
        let src = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        sum_weighted_into(&mut dst, &src, 0.5, 3);

        assert_eq!(&dst[..3], &[0.5, 1.0, 1.5]);
        assert_eq!(dst[3], 0.0);
    }
}
