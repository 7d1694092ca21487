#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Pan Laws
========

Panning a mono channel into a stereo pair is a question of how loud each side
should be at each knob position. The answer is the pan law.

    pan = -1.0  →  hard left
    pan =  0.0  →  center
    pan = +1.0  →  hard right

Vocabulary
----------

  0 dB law      Each side stays at unity until the knob moves away from it,
                then falls linearly to silence. Center is 1/1, which is
                louder than either extreme.

  center dip    Both sides are attenuated at center (−1.5 to −6 dB) so a
                signal sounds equally loud wherever it sits. −3 dB is the
                classic constant-power law.

  side boost    Same curve, but scaled up so center is unity and the
                extremes are boosted by the law's amount instead.

  true stereo   For stereo sources. Instead of splitting a mono signal, it
                fades one side out and folds it into the other.


The Math: Power-Shaped Laws
---------------------------

With p = (pan + 1) / 2 running 0 → 1 and k = dB / 6.0206:

    center dip:   L = (1 - p)^k           R = p^k
    side boost:   L = G · (1 - p)^k       R = G · p^k       G = 10^(dB/20)

At center p = 0.5, and 0.5^k = 10^(−dB/20), so a center dip of 3 dB lands
at 0.7079 per side, and a side boost of 3 dB lands at exactly 1.0 with
1.4125 at the extremes.

    Gain (−3 dB dip)
     1.0 ┤‾‾-._              _.-‾‾
         │     ‾-.        .-‾
    .707 ┤        ‾-.__.-‾       ← L and R cross here
         │      _.-‾    ‾-._
     0.0 ┼__.-‾‾              ‾‾-.__
        -1.0        0.0         +1.0 pan


True Stereo
-----------

    pan ≤ 0:   L_out = L + R·(−pan)      R_out = R · (1 + pan)
    pan > 0:   L_out = L · (1 − pan)     R_out = R + L·pan

Centered, both sides pass untouched. Hard left sums everything into L.
*/

/// dB per doubling of amplitude.
const DB_PER_OCTAVE: f32 = 6.0206;
/// Exponent floor for the power-shaped laws.
const MIN_EXPONENT: f32 = 1e-3;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanLaw {
    #[default]
    ZeroDb,
    SideBoost1_5,
    SideBoost3,
    SideBoost4_5,
    SideBoost6,
    CenterDip1_5,
    CenterDip3,
    CenterDip4_5,
    CenterDip6,
    TrueStereo,
}

/// Four-way gain matrix: `ll` is left→left, `rl` right→left, and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGains {
    pub ll: f32,
    pub rl: f32,
    pub lr: f32,
    pub rr: f32,
}

impl PanGains {
    pub const UNITY: PanGains = PanGains {
        ll: 1.0,
        rl: 0.0,
        lr: 0.0,
        rr: 1.0,
    };

    #[inline]
    pub fn apply(&self, left: f32, right: f32) -> (f32, f32) {
        (
            left * self.ll + right * self.rl,
            left * self.lr + right * self.rr,
        )
    }
}

impl PanLaw {
    pub const ALL: [PanLaw; 10] = [
        PanLaw::ZeroDb,
        PanLaw::SideBoost1_5,
        PanLaw::SideBoost3,
        PanLaw::SideBoost4_5,
        PanLaw::SideBoost6,
        PanLaw::CenterDip1_5,
        PanLaw::CenterDip3,
        PanLaw::CenterDip4_5,
        PanLaw::CenterDip6,
        PanLaw::TrueStereo,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            PanLaw::ZeroDb => "0 dB",
            PanLaw::SideBoost1_5 => "+1.5 dB side",
            PanLaw::SideBoost3 => "+3 dB side",
            PanLaw::SideBoost4_5 => "+4.5 dB side",
            PanLaw::SideBoost6 => "+6 dB side",
            PanLaw::CenterDip1_5 => "-1.5 dB center",
            PanLaw::CenterDip3 => "-3 dB center",
            PanLaw::CenterDip4_5 => "-4.5 dB center",
            PanLaw::CenterDip6 => "-6 dB center",
            PanLaw::TrueStereo => "True stereo",
        }
    }

    /// Law depth in dB, zero for the linear and true-stereo laws.
    pub fn db(self) -> f32 {
        match self {
            PanLaw::SideBoost1_5 | PanLaw::CenterDip1_5 => 1.5,
            PanLaw::SideBoost3 | PanLaw::CenterDip3 => 3.0,
            PanLaw::SideBoost4_5 | PanLaw::CenterDip4_5 => 4.5,
            PanLaw::SideBoost6 | PanLaw::CenterDip6 => 6.0,
            PanLaw::ZeroDb | PanLaw::TrueStereo => 0.0,
        }
    }

    pub fn is_side_boost(self) -> bool {
        matches!(
            self,
            PanLaw::SideBoost1_5 | PanLaw::SideBoost3 | PanLaw::SideBoost4_5 | PanLaw::SideBoost6
        )
    }

    /// Gain matrix for a pan position in [-1, 1].
    pub fn gains(self, pan: f32) -> PanGains {
        let pan = pan.clamp(-1.0, 1.0);
        match self {
            PanLaw::ZeroDb => PanGains {
                ll: (1.0 - pan).min(1.0),
                rl: 0.0,
                lr: 0.0,
                rr: (1.0 + pan).min(1.0),
            },
            PanLaw::TrueStereo => {
                if pan <= 0.0 {
                    PanGains {
                        ll: 1.0,
                        rl: -pan,
                        lr: 0.0,
                        rr: 1.0 + pan,
                    }
                } else {
                    PanGains {
                        ll: 1.0 - pan,
                        rl: 0.0,
                        lr: pan,
                        rr: 1.0,
                    }
                }
            }
            _ => {
                let db = self.db();
                let k = (db / DB_PER_OCTAVE).max(MIN_EXPONENT);
                let p = (pan + 1.0) * 0.5;
                let boost = if self.is_side_boost() {
                    10f32.powf(db / 20.0)
                } else {
                    1.0
                };
                PanGains {
                    ll: boost * (1.0 - p).powf(k),
                    rl: 0.0,
                    lr: 0.0,
                    rr: boost * p.powf(k),
                }
            }
        }
    }
}
