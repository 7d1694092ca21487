//! Level-mode table.
//!
//! A level knob always travels 0..1. The level mode decides what that travel
//! means: a gain of 0..2 shown in dB, a plain percentage, or a bipolar
//! multiplier that can invert the channel. It also decides which voltage an
//! unpatched channel input produces, so a channel with nothing plugged in can
//! act as a DC source.
//!
//! | mode        | gain range | knob default | normal | display        |
//! | ----------- | ---------- | ------------ | ------ | -------------- |
//! | dB audio x2 | 0 .. 2     | 0.5 (unity)  | 0 V    | dB             |
//! | dB poly sum | 0 .. 2     | 0.5 (unity)  | 0 V    | dB             |
//! | percent     | 0 .. 1     | 1.0          | 10 V   | 0 .. 100 %     |
//! | bipolar x2  | -2 .. 2    | 0.75 (unity) | 5 V    | -2x .. 2x      |
//! | bipolar x10 | -10 .. 10  | 0.55 (unity) | 1 V    | -10x .. 10x    |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display/scaling entry for one level mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub unit: &'static str,
    pub display_multiplier: f32,
    pub display_offset: f32,
    pub default: f32,
    pub normal: f32,
    pub scale: f32,
    pub offset: f32,
    pub db_display: bool,
}

const DB_INFO: LevelInfo = LevelInfo {
    unit: " dB",
    display_multiplier: 1.0,
    display_offset: 0.0,
    default: 0.5,
    normal: 0.0,
    scale: 2.0,
    offset: 0.0,
    db_display: true,
};

const PERCENT_INFO: LevelInfo = LevelInfo {
    unit: "%",
    display_multiplier: 100.0,
    display_offset: 0.0,
    default: 1.0,
    normal: 10.0,
    scale: 1.0,
    offset: 0.0,
    db_display: false,
};

const BIPOLAR_X2_INFO: LevelInfo = LevelInfo {
    unit: "x",
    display_multiplier: 4.0,
    display_offset: -2.0,
    default: 0.75,
    normal: 5.0,
    scale: 4.0,
    offset: -0.5,
    db_display: false,
};

const BIPOLAR_X10_INFO: LevelInfo = LevelInfo {
    unit: "x",
    display_multiplier: 20.0,
    display_offset: -10.0,
    default: 0.55,
    normal: 1.0,
    scale: 20.0,
    offset: -0.5,
    db_display: false,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelMode {
    #[default]
    DbAudioX2,
    DbPolySum,
    Percent,
    BipolarX2,
    BipolarX10,
}

impl LevelMode {
    pub const ALL: [LevelMode; 5] = [
        LevelMode::DbAudioX2,
        LevelMode::DbPolySum,
        LevelMode::Percent,
        LevelMode::BipolarX2,
        LevelMode::BipolarX10,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            LevelMode::DbAudioX2 => "dB, audio x2",
            LevelMode::DbPolySum => "dB, poly sum",
            LevelMode::Percent => "Percent",
            LevelMode::BipolarX2 => "Bipolar x2",
            LevelMode::BipolarX10 => "Bipolar x10",
        }
    }

    pub fn info(self) -> &'static LevelInfo {
        match self {
            LevelMode::DbAudioX2 | LevelMode::DbPolySum => &DB_INFO,
            LevelMode::Percent => &PERCENT_INFO,
            LevelMode::BipolarX2 => &BIPOLAR_X2_INFO,
            LevelMode::BipolarX10 => &BIPOLAR_X10_INFO,
        }
    }

    /// Poly voices are summed to one before leaving the bus.
    pub fn is_poly_sum(self) -> bool {
        self == LevelMode::DbPolySum
    }

    /// Input voltage for an unpatched channel.
    #[inline]
    pub fn normal(self) -> f32 {
        self.info().normal
    }

    /// Gain for a knob position.
    #[inline]
    pub fn gain(self, knob: f32) -> f32 {
        let info = self.info();
        (knob.clamp(0.0, 1.0) + info.offset) * info.scale
    }

    /// Value shown to the user for a knob position.
    pub fn display(self, knob: f32) -> f32 {
        let info = self.info();
        let knob = knob.clamp(0.0, 1.0);
        if info.db_display {
            let gain = self.gain(knob);
            if gain <= 0.0 {
                f32::NEG_INFINITY
            } else {
                20.0 * gain.log10()
            }
        } else {
            knob * info.display_multiplier + info.display_offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unity() {
        for mode in [LevelMode::DbAudioX2, LevelMode::DbPolySum, LevelMode::BipolarX2, LevelMode::BipolarX10] {
            let gain = mode.gain(mode.info().default);
            assert!((gain - 1.0).abs() < 1e-5, "{mode:?} default gave {gain}");
        }
        assert_eq!(LevelMode::Percent.gain(1.0), 1.0);
    }

    #[test]
    fn test_gain_ranges() {
        assert_eq!(LevelMode::DbAudioX2.gain(1.0), 2.0);
        assert_eq!(LevelMode::DbAudioX2.gain(0.0), 0.0);
        assert_eq!(LevelMode::BipolarX2.gain(0.0), -2.0);
        assert_eq!(LevelMode::BipolarX2.gain(1.0), 2.0);
        assert_eq!(LevelMode::BipolarX10.gain(0.0), -10.0);
        assert_eq!(LevelMode::BipolarX10.gain(1.0), 10.0);
    }

    #[test]
    fn test_knob_is_clamped() {
        assert_eq!(LevelMode::DbAudioX2.gain(5.0), 2.0);
        assert_eq!(LevelMode::Percent.gain(-1.0), 0.0);
    }

    #[test]
    fn test_normal_voltages() {
        assert_eq!(LevelMode::DbAudioX2.normal(), 0.0);
        assert_eq!(LevelMode::DbPolySum.normal(), 0.0);
        assert_eq!(LevelMode::Percent.normal(), 10.0);
        assert_eq!(LevelMode::BipolarX2.normal(), 5.0);
        assert_eq!(LevelMode::BipolarX10.normal(), 1.0);
    }

    #[test]
    fn test_display() {
        assert!(LevelMode::DbAudioX2.display(0.5).abs() < 1e-4);
        assert!((LevelMode::DbAudioX2.display(1.0) - 6.0206).abs() < 1e-3);
        assert_eq!(LevelMode::DbAudioX2.display(0.0), f32::NEG_INFINITY);
        assert_eq!(LevelMode::Percent.display(0.25), 25.0);
        assert_eq!(LevelMode::BipolarX2.display(0.75), 1.0);
    }
}
