//! Polyphonic port values as the host hands them over.
//!
//! The host owns cable bookkeeping; each frame it tells us how many channels a
//! port carries and what the voltages are. A port with zero channels is
//! unpatched.

use crate::MAX_POLY;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyInput {
    channels: usize,
    voltages: [f32; MAX_POLY],
}

impl PolyInput {
    pub const fn disconnected() -> Self {
        Self {
            channels: 0,
            voltages: [0.0; MAX_POLY],
        }
    }

    /// A patched monophonic input holding `voltage`.
    pub fn mono(voltage: f32) -> Self {
        let mut input = Self::disconnected();
        input.channels = 1;
        input.voltages[0] = voltage;
        input
    }

    /// A patched input carrying `voltages` (truncated to [`MAX_POLY`]).
    pub fn poly(voltages: &[f32]) -> Self {
        let mut input = Self::disconnected();
        input.channels = voltages.len().min(MAX_POLY);
        input.voltages[..input.channels].copy_from_slice(&voltages[..input.channels]);
        input
    }

    pub fn set_channels(&mut self, channels: usize) {
        self.channels = channels.min(MAX_POLY);
    }

    pub fn set_voltage(&mut self, channel: usize, voltage: f32) {
        if let Some(v) = self.voltages.get_mut(channel) {
            *v = voltage;
        }
    }

    /// Unpatch the input.
    pub fn disconnect(&mut self) {
        self.channels = 0;
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.channels > 0
    }

    /// Raw voltage of one channel, 0 V above the channel count.
    #[inline]
    pub fn voltage(&self, channel: usize) -> f32 {
        if channel < self.channels {
            self.voltages[channel]
        } else {
            0.0
        }
    }

    /// Voltage for a poly voice of the mix: a mono cable feeds every voice.
    #[inline]
    pub fn poly_voltage(&self, channel: usize) -> f32 {
        if self.channels == 1 {
            self.voltages[0]
        } else {
            self.voltage(channel)
        }
    }

    /// Voltage for a poly voice, or `normal` when unpatched.
    #[inline]
    pub fn normal_or(&self, channel: usize, normal: f32) -> f32 {
        if self.is_connected() {
            self.poly_voltage(channel)
        } else {
            normal
        }
    }

    /// Every carried voice summed once; 0 V when unpatched.
    #[inline]
    pub fn sum(&self) -> f32 {
        self.voltages[..self.channels].iter().sum()
    }
}

impl Default for PolyInput {
    fn default() -> Self {
        Self::disconnected()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyOutput {
    channels: usize,
    voltages: [f32; MAX_POLY],
    patched: bool,
}

impl PolyOutput {
    pub const fn new() -> Self {
        Self {
            channels: 0,
            voltages: [0.0; MAX_POLY],
            patched: false,
        }
    }

    pub fn set_channels(&mut self, channels: usize) {
        self.channels = channels.min(MAX_POLY);
    }

    #[inline]
    pub fn set_voltage(&mut self, channel: usize, voltage: f32) {
        if let Some(v) = self.voltages.get_mut(channel) {
            *v = voltage;
        }
    }

    /// Write `voltages` and set the channel count to match.
    pub fn write(&mut self, voltages: &[f32]) {
        let channels = voltages.len().min(MAX_POLY);
        self.voltages[..channels].copy_from_slice(&voltages[..channels]);
        self.channels = channels;
    }

    /// Zero the output and drop its channel count.
    pub fn clear(&mut self) {
        self.voltages = [0.0; MAX_POLY];
        self.channels = 0;
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn voltage(&self, channel: usize) -> f32 {
        if channel < self.channels {
            self.voltages[channel]
        } else {
            0.0
        }
    }

    pub fn voltages(&self) -> &[f32] {
        &self.voltages[..self.channels]
    }

    /// Whether the host reports a cable plugged into this output.
    #[inline]
    pub fn is_patched(&self) -> bool {
        self.patched
    }

    pub fn set_patched(&mut self, patched: bool) {
        self.patched = patched;
    }
}

impl Default for PolyOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_cable_feeds_every_voice() {
        let input = PolyInput::mono(3.0);
        assert_eq!(input.poly_voltage(0), 3.0);
        assert_eq!(input.poly_voltage(7), 3.0);
        assert_eq!(input.voltage(7), 0.0);
    }

    #[test]
    fn test_poly_cable_is_zero_above_count() {
        let input = PolyInput::poly(&[1.0, 2.0, 3.0]);
        assert_eq!(input.channels(), 3);
        assert_eq!(input.poly_voltage(2), 3.0);
        assert_eq!(input.poly_voltage(3), 0.0);
    }

    #[test]
    fn test_unpatched_input_uses_normal() {
        let input = PolyInput::disconnected();
        assert!(!input.is_connected());
        assert_eq!(input.normal_or(0, 10.0), 10.0);
        assert_eq!(PolyInput::mono(2.0).normal_or(0, 10.0), 2.0);
    }

    #[test]
    fn test_sum_counts_each_voice_once() {
        assert_eq!(PolyInput::poly(&[1.0, 2.0, 3.0]).sum(), 6.0);
        assert_eq!(PolyInput::mono(4.0).sum(), 4.0);
        assert_eq!(PolyInput::disconnected().sum(), 0.0);
    }

    #[test]
    fn test_poly_is_truncated_to_ceiling() {
        let voltages = [1.0; 20];
        assert_eq!(PolyInput::poly(&voltages).channels(), MAX_POLY);
    }

    #[test]
    fn test_output_write_and_clear() {
        let mut out = PolyOutput::new();
        out.write(&[1.0, -1.0]);
        assert_eq!(out.channels(), 2);
        assert_eq!(out.voltages(), &[1.0, -1.0]);
        out.clear();
        assert_eq!(out.channels(), 0);
        assert_eq!(out.voltage(0), 0.0);
    }
}
