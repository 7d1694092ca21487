#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oversample::{Downsampler, Upsampler, OVERSAMPLE};

/*
Voltage-Controlled Amplification
================================

A VCA multiplies audio by a gain derived from a control voltage. Every bus
channel (and the master) on a VCA-capable bus has one.

    output = audio × gain(cv)

Vocabulary
----------

  cv            Control voltage. 10 V means unity gain, so the raw gain is
                g = cv / 10.

  clamped       The gain is held to [0, 1]. Negative CV closes the VCA, CV
                above 10 V cannot amplify.

  bipolar       The gain is signed and unbounded. Negative CV inverts the
                audio (ring-modulator territory), CV above 10 V amplifies.

  exponential   The gain is raised to the 4th power. Low CV values open the
                VCA slowly, which sounds more natural for fades than a
                straight line.


The Transfer Table
------------------

    | mode                    | gain(g)              | range    |
    | ----------------------- | -------------------- | -------- |
    | unipolar linear         | clamp(g, 0, 1)       | [0, 1]   |
    | unipolar exponential    | clamp(g, 0, 1)⁴      | [0, 1]   |
    | bipolar linear          | g                    | signed   |
    | bipolar exponential     | sign(g) · |g|⁴       | signed   |
    | band-limited linear     | clamp(g, 0, 1)       | [0, 1]   |
    | band-limited exponential| clamp(g, 0, 1)⁴      | [0, 1]   |

    Gain
     1.0 ┤            ___________   ← linear (clamped)
         │          /       _.-
         │        /      _-‾
         │      /     .-‾          ← exponential
         │    /    .-‾
     0.0 ┼──/___.-‾──────────────→ CV
         0 V                   10 V


Why Band-Limit?
---------------

Multiplying audio by a fast-moving CV is amplitude modulation. A 1.5 kHz sine
times a 7 kHz CV produces sidebands at 5.5 kHz and 8.5 kHz, and the 4th
power adds more at multiples of 7 kHz. The ones above Nyquist fold back as
aliasing.

The band-limited modes upsample both signals by four, do the multiply at the
high rate, and filter before decimating:

    audio ──→ [up ×4] ──┐
                        ├──→ a × gain(cv) ──→ [down ×4] ──→ output
    cv    ──→ [up ×4] ──┘

⚠️ Oversampling only helps when both sides are moving. If either input is
unpatched the stage falls back to the direct multiply, which is exact for a
constant on either side.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VcaMode {
    #[default]
    UnipolarLinear,
    UnipolarExponential,
    BipolarLinear,
    BipolarExponential,
    BandLimitedLinear,
    BandLimitedExponential,
}

impl VcaMode {
    pub const ALL: [VcaMode; 6] = [
        VcaMode::UnipolarLinear,
        VcaMode::UnipolarExponential,
        VcaMode::BipolarLinear,
        VcaMode::BipolarExponential,
        VcaMode::BandLimitedLinear,
        VcaMode::BandLimitedExponential,
    ];

    /// Mode for a selector index, clamped into range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            VcaMode::UnipolarLinear => "Unipolar linear",
            VcaMode::UnipolarExponential => "Unipolar exponential",
            VcaMode::BipolarLinear => "Bipolar linear",
            VcaMode::BipolarExponential => "Bipolar exponential",
            VcaMode::BandLimitedLinear => "Band-limited linear",
            VcaMode::BandLimitedExponential => "Band-limited exponential",
        }
    }

    pub fn is_band_limited(self) -> bool {
        matches!(
            self,
            VcaMode::BandLimitedLinear | VcaMode::BandLimitedExponential
        )
    }

    pub fn is_clamped(self) -> bool {
        !matches!(self, VcaMode::BipolarLinear | VcaMode::BipolarExponential)
    }

    /// Gain for a control voltage (10 V = unity).
    #[inline]
    pub fn gain(self, cv: f32) -> f32 {
        let g = cv / 10.0;
        match self {
            VcaMode::UnipolarLinear | VcaMode::BandLimitedLinear => g.clamp(0.0, 1.0),
            VcaMode::UnipolarExponential | VcaMode::BandLimitedExponential => {
                let g = g.clamp(0.0, 1.0);
                g * g * g * g
            }
            VcaMode::BipolarLinear => g,
            VcaMode::BipolarExponential => {
                let a = g.abs();
                g.signum() * a * a * a * a
            }
        }
    }
}

/// Per-voice band-limiting state for one VCA (left/right audio, shared CV).
#[derive(Debug, Clone, Copy, Default)]
pub struct VcaStage {
    audio_up: [Upsampler; 2],
    cv_up: Upsampler,
    down: [Downsampler; 2],
}

impl VcaStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the VCA to one mono sample.
    ///
    /// `band_limit` is the caller's "both sides patched" verdict; the stage
    /// only oversamples when the mode asks for it as well.
    #[inline]
    pub fn process(&mut self, mode: VcaMode, audio: f32, cv: f32, band_limit: bool) -> f32 {
        if !(band_limit && mode.is_band_limited()) {
            return audio * mode.gain(cv);
        }

        let cv_os = self.cv_up.process(cv);
        let mut audio_os = self.audio_up[0].process(audio);
        for (a, &c) in audio_os.iter_mut().zip(cv_os.iter()) {
            *a *= mode.gain(c);
        }
        self.down[0].process(&audio_os)
    }

    /// Apply the VCA to a stereo pair sharing one CV.
    #[inline]
    pub fn process_stereo(
        &mut self,
        mode: VcaMode,
        left: f32,
        right: f32,
        cv: f32,
        band_limit: bool,
    ) -> (f32, f32) {
        if !(band_limit && mode.is_band_limited()) {
            let gain = mode.gain(cv);
            return (left * gain, right * gain);
        }

        let cv_os = self.cv_up.process(cv);
        let mut gains = [0.0; OVERSAMPLE];
        for (g, &c) in gains.iter_mut().zip(cv_os.iter()) {
            *g = mode.gain(c);
        }

        let mut l = self.audio_up[0].process(left);
        let mut r = self.audio_up[1].process(right);
        for i in 0..OVERSAMPLE {
            l[i] *= gains[i];
            r[i] *= gains[i];
        }
        (self.down[0].process(&l), self.down[1].process(&r))
    }

    pub fn reset(&mut self) {
        for up in self.audio_up.iter_mut() {
            up.reset();
        }
        self.cv_up.reset();
        for down in self.down.iter_mut() {
            down.reset();
        }
    }
}
