//! Demo builder and runner
//!
//! The rack is moved into the audio callback; the main thread only talks to
//! it through an rtrb queue.

use std::{f32::consts::TAU, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use mixbus::{
    control::RackMessage,
    io::{FrameCtx, PolyInput},
    rack::Role,
    BusVariant, Rack, UnitId, CHANNELS, MASTER,
};

const QUEUE_CAPACITY: usize = 64;
/// Peak voltage of each test tone.
const TONE_VOLTS: f32 = 5.0;
/// Mix volts to full-scale output.
const OUTPUT_SCALE: f32 = 0.05;
const MASTER_KNOB: f32 = 0.4;

struct Tone {
    freq: f32,
    pan: f32,
    phase: f32,
}

pub struct Demo {
    tones: Vec<Tone>,
    toggle_every: Duration,
}

impl Demo {
    pub fn new() -> Self {
        Self {
            tones: Vec::new(),
            toggle_every: Duration::from_secs(2),
        }
    }

    /// Add a sine tone on the next free channel.
    pub fn tone(mut self, freq: f32, pan: f32) -> Self {
        if self.tones.len() < CHANNELS {
            self.tones.push(Tone {
                freq,
                pan,
                phase: 0.0,
            });
        }
        self
    }

    /// How often the control thread flips a channel mute.
    pub fn toggle_every(mut self, every: Duration) -> Self {
        self.toggle_every = every;
        self
    }

    pub fn run(mut self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!("output: {sample_rate} Hz, {channels} channels");

        // Bus | Mute | Pan | Fade
        let mut rack = Rack::new(sample_rate);
        let bus = rack.push_bus(BusVariant::VCA_STEREO);
        let mute = rack.push_role(Role::mute());
        let pan = rack.push_role(Role::pan());
        let fade = rack.push_role(Role::fade());

        rack.set_param(fade, 0, 0.4).wrap_err("rise time")?;
        rack.set_param(fade, 1, 0.15).wrap_err("fall time")?;
        rack.set_param(fade, 2, -0.5).wrap_err("fade shape")?;
        for (i, tone) in self.tones.iter().enumerate() {
            rack.set_param(pan, i, tone.pan).wrap_err("pan")?;
        }
        rack.set_param(bus, 4, MASTER_KNOB).wrap_err("master level")?;
        if let Some(level_mode) = rack.bus(bus).map(|b| b.params.level_mode) {
            log::info!(
                "master at {:.1}{} ({})",
                level_mode.display(MASTER_KNOB),
                level_mode.info().unit,
                level_mode.label()
            );
        }

        let (mut producer, mut consumer) = RingBuffer::<RackMessage>::new(QUEUE_CAPACITY);
        let mut ctx = FrameCtx::new(sample_rate);
        let mut tones = std::mem::take(&mut self.tones);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                rack.drain_messages(&mut consumer);

                for frame in data.chunks_mut(channels) {
                    render_frame(&mut rack, bus, &mut tones, &ctx);
                    rack.process(&ctx);
                    ctx.advance();

                    let (l, r) = rack
                        .bus(bus)
                        .map(|b| (b.outputs.mix_left.voltage(0), b.outputs.mix_right.voltage(0)))
                        .unwrap_or((0.0, 0.0));
                    for (ch, sample) in frame.iter_mut().enumerate() {
                        let v = if ch % 2 == 0 { l } else { r };
                        *sample = (v * OUTPUT_SCALE).clamp(-1.0, 1.0);
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;
        log::info!("playing; mutes toggle every {:?}. Ctrl+C to stop", self.toggle_every);

        let mut step = 0usize;
        loop {
            std::thread::sleep(self.toggle_every);
            let channel = step % CHANNELS;
            let muted = (step / CHANNELS) % 2 == 0;
            step += 1;

            let message = RackMessage::SetParam {
                unit: mute,
                param: channel,
                value: if muted { 1.0 } else { 0.0 },
            };
            if producer.push(message).is_err() {
                log::warn!("control queue full, dropped {message:?}");
            } else {
                log::info!("channel {} {}", channel + 1, if muted { "muted" } else { "open" });
            }
        }
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the test tones and write them onto the bus inputs.
fn render_frame(rack: &mut Rack, bus: UnitId, tones: &mut [Tone], ctx: &FrameCtx) {
    let Some(b) = rack.bus_mut(bus) else {
        return;
    };
    let dt = ctx.sample_time();
    for (i, tone) in tones.iter_mut().enumerate() {
        b.inputs.left[i] = PolyInput::mono(TONE_VOLTS * (TAU * tone.phase).sin());
        tone.phase = (tone.phase + tone.freq * dt).fract();
    }
    // 0.2 Hz tremolo between 4 V and 10 V
    let lfo = (TAU * 0.2 * ctx.frame as f32 * dt).sin();
    b.inputs.cv[MASTER] = PolyInput::mono(7.0 + 3.0 * lfo);
}
