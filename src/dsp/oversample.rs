use std::f32::consts::{PI, TAU};

/*
4x Oversampling
===============

Multiplying audio by a control voltage that moves at audio rate, or pushing
audio through a clipper, creates new frequencies. Any that land above
Nyquist fold back down as inharmonic aliasing. Running the nonlinearity at
four times the sample rate gives those products room to exist, and a steep
lowpass removes them before we drop back to the base rate.

    x ──→ [zero-stuff ×4] ──→ [anti-image LP] ──→ f(·) ──→ [anti-alias LP] ──→ [keep 1 of 4] ──→ y
              base rate            4× rate         4× rate       4× rate            base rate

Vocabulary
----------

  zero-stuffing   Upsampling by inserting three zeros after each sample.
                  The first sample is multiplied by 4 so the average (DC)
                  level is preserved.

  imaging         Zero-stuffing leaves mirror copies of the spectrum around
                  multiples of the base rate. The first lowpass removes them.

  decimation      Keeping every fourth sample. Only safe after the second
                  lowpass has removed everything above the base Nyquist.


The Filter Bank
---------------

Both lowpasses are 8th-order Butterworth, built from four biquad sections:

    | section | pole angle | Q      |
    | ------- | ---------- | ------ |
    | 1       | π/16       | 0.5098 |
    | 2       | 3π/16      | 0.6013 |
    | 3       | 5π/16      | 0.9000 |
    | 4       | 7π/16      | 2.5629 |

The cutoff sits at 0.45 × the base sample rate. Because that is a fixed
fraction of the oversampled rate, the coefficients never depend on the actual
sample rate and are computed once at construction.
*/

/// Oversampling factor for every band-limited stage.
pub const OVERSAMPLE: usize = 4;

const SECTIONS: usize = 4;
/// Cutoff as a fraction of the oversampled rate.
const CUTOFF: f32 = 0.45 / OVERSAMPLE as f32;

#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl BiquadCoeffs {
    /// RBJ cookbook lowpass. `cutoff` is in cycles per sample.
    fn lowpass(cutoff: f32, q: f32) -> Self {
        let w0 = TAU * cutoff;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);

        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 - cos_w0) / 2.0) / a0,
            b1: (1.0 - cos_w0) / a0,
            b2: ((1.0 - cos_w0) / 2.0) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Transposed direct form II state.
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    z1: f32,
    z2: f32,
}

impl BiquadState {
    #[inline]
    fn process(&mut self, input: f32, c: &BiquadCoeffs) -> f32 {
        let output = c.b0 * input + self.z1;
        self.z1 = c.b1 * input - c.a1 * output + self.z2;
        self.z2 = c.b2 * input - c.a2 * output;
        output
    }
}

/// 8th-order Butterworth lowpass at the oversampled rate.
#[derive(Debug, Clone, Copy)]
pub struct AntiAliasFilter {
    coeffs: [BiquadCoeffs; SECTIONS],
    state: [BiquadState; SECTIONS],
}

impl AntiAliasFilter {
    pub fn new() -> Self {
        let order = (SECTIONS * 2) as f32;
        let coeffs = std::array::from_fn(|k| {
            let angle = PI * (2 * k + 1) as f32 / (2.0 * order);
            let q = 1.0 / (2.0 * angle.cos());
            BiquadCoeffs::lowpass(CUTOFF, q)
        });

        Self {
            coeffs,
            state: [BiquadState::default(); SECTIONS],
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut x = input;
        for (state, coeffs) in self.state.iter_mut().zip(self.coeffs.iter()) {
            x = state.process(x, coeffs);
        }
        x
    }

    pub fn reset(&mut self) {
        self.state = [BiquadState::default(); SECTIONS];
    }
}

impl Default for AntiAliasFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-stuff and anti-image filter one base-rate sample into four.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upsampler {
    filter: AntiAliasFilter,
}

impl Upsampler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> [f32; OVERSAMPLE] {
        let mut out = [0.0; OVERSAMPLE];
        out[0] = self.filter.process(input * OVERSAMPLE as f32);
        for o in out.iter_mut().skip(1) {
            *o = self.filter.process(0.0);
        }
        out
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

/// Anti-alias filter four oversampled samples and keep the last.
#[derive(Debug, Clone, Copy, Default)]
pub struct Downsampler {
    filter: AntiAliasFilter,
}

impl Downsampler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, frames: &[f32; OVERSAMPLE]) -> f32 {
        let mut out = 0.0;
        for &x in frames {
            out = self.filter.process(x);
        }
        out
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

/// Paired up/down sampler around a per-sample nonlinearity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oversampler {
    up: Upsampler,
    down: Downsampler,
}

impl Oversampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` on each oversampled sample of `input`.
    #[inline]
    pub fn process<F: FnMut(f32) -> f32>(&mut self, input: f32, mut f: F) -> f32 {
        let mut frames = self.up.process(input);
        for x in frames.iter_mut() {
            *x = f(*x);
        }
        self.down.process(&frames)
    }

    pub fn reset(&mut self) {
        self.up.reset();
        self.down.reset();
    }
}
