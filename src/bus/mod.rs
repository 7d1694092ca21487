//! The mixing bus and its per-frame signal path.
//!
//! A bus is four channels summed into a mono or stereo mix. On its own it
//! only scales and sums; everything else (mute, solo, pan, sends, offsets,
//! fade timing) comes from role units discovered to its right each frame.
//!
//! Per channel voice:
//!
//! ```text
//!   in ─→ + pre offset ─→ × level ─→ × VCA(cv) ─→ + post offset ─→ pan ─→ × fade ─→ direct out
//!                                                                                  └─→ mix, send taps
//! ```
//!
//! Then the sends run in chain order, the chain input joins, and the master
//! section applies its own offset, clip, DC block, level and VCA.

pub mod fade;
pub mod level;
pub mod master;
pub mod poly;

use crate::{
    dsp::{
        clip::ClipMode,
        dc_block::DcBlockMode,
        mix::{sum_into, sum_weighted_into, VoiceFrame},
        pan::PanGains,
        slew::SlewTiming,
        vca::{VcaMode, VcaStage},
    },
    io::{FrameCtx, ModuleDescriptor, ParamInfo, PolyInput, PolyOutput, PortInfo},
    rack::{
        discovery::{discover, DiscoveryPlan, MuteSoloBinding, MAX_SENDS},
        publish::{Outbox, RoleOutput},
        registry::{Registry, UnitId},
        role::{OffsetUnit, PanUnit, SendUnit},
        RackError,
    },
    state::{read_bool, read_f32, read_index, write_bool, write_f32, write_index, Persist, StateMap},
    CHANNELS, FADE_SLOTS, MASTER, MAX_POLY,
};

pub use fade::{FadeEngine, FadeTargets};
pub use level::LevelMode;
pub use master::MasterVoice;
pub use poly::{resolve_mix_channels, ChannelTaps};

/// Stereo and VCA capability, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusVariant {
    pub stereo: bool,
    pub vca: bool,
}

impl BusVariant {
    pub const MONO: BusVariant = BusVariant {
        stereo: false,
        vca: false,
    };
    pub const STEREO: BusVariant = BusVariant {
        stereo: true,
        vca: false,
    };
    pub const VCA_MONO: BusVariant = BusVariant {
        stereo: false,
        vca: true,
    };
    pub const VCA_STEREO: BusVariant = BusVariant {
        stereo: true,
        vca: true,
    };

    pub fn sides(self) -> usize {
        if self.stereo {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusParams {
    pub levels: [f32; CHANNELS],
    pub master: f32,
    pub level_mode: LevelMode,
    pub vca_mode: VcaMode,
    pub clip_mode: ClipMode,
    pub dc_block_mode: DcBlockMode,
    /// Channels whose direct output is patched stay out of the mix.
    pub exclude_patched: bool,
}

impl BusParams {
    /// Knobs at the level mode's own default.
    pub fn with_level_mode(level_mode: LevelMode) -> Self {
        let knob = level_mode.info().default;
        Self {
            levels: [knob; CHANNELS],
            master: knob,
            level_mode,
            vca_mode: VcaMode::default(),
            clip_mode: ClipMode::default(),
            dc_block_mode: DcBlockMode::default(),
            exclude_patched: false,
        }
    }
}

impl Default for BusParams {
    fn default() -> Self {
        Self::with_level_mode(LevelMode::default())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BusInputs {
    pub left: [PolyInput; CHANNELS],
    /// Stereo only; an unpatched right input follows the left.
    pub right: [PolyInput; CHANNELS],
    /// Channel CVs then master CV (VCA buses only).
    pub cv: [PolyInput; FADE_SLOTS],
    pub chain_left: PolyInput,
    pub chain_right: PolyInput,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BusOutputs {
    pub left: [PolyOutput; CHANNELS],
    pub right: [PolyOutput; CHANNELS],
    pub mix_left: PolyOutput,
    pub mix_right: PolyOutput,
}

/// Role units resolved for this frame.
#[derive(Clone, Copy)]
struct Resolved<'a> {
    pan: Option<&'a PanUnit>,
    offset: Option<&'a OffsetUnit>,
    sends: [Option<&'a SendUnit>; MAX_SENDS],
    send_count: usize,
}

impl Resolved<'_> {
    fn pre(&self, slot: usize) -> f32 {
        self.offset.map_or(0.0, |o| o.pre(slot))
    }

    fn post(&self, slot: usize) -> f32 {
        self.offset.map_or(0.0, |o| o.post(slot))
    }
}

#[derive(Debug)]
pub struct Bus {
    variant: BusVariant,
    pub params: BusParams,
    pub inputs: BusInputs,
    pub outputs: BusOutputs,
    plan: DiscoveryPlan,
    fade: FadeEngine,
    /// `slot * MAX_POLY + voice`, slots 0-3 channels and 4 master.
    vca: Vec<VcaStage>,
    /// `side * MAX_POLY + voice`.
    master: Vec<MasterVoice>,
    outbox: Outbox,
    sample_rate: f32,
    configured_clip: ClipMode,
}

impl Bus {
    pub fn new(variant: BusVariant, sample_rate: f32) -> Self {
        let params = BusParams::default();
        Self {
            variant,
            params,
            inputs: BusInputs::default(),
            outputs: BusOutputs::default(),
            plan: DiscoveryPlan::EMPTY,
            fade: FadeEngine::new(),
            vca: vec![VcaStage::new(); FADE_SLOTS * MAX_POLY],
            master: vec![MasterVoice::new(sample_rate, params.clip_mode); 2 * MAX_POLY],
            outbox: Outbox::new(),
            sample_rate,
            configured_clip: params.clip_mode,
        }
    }

    /// Build from a persisted snapshot; `stereo`/`vca` pick the variant.
    pub fn from_state(state: &StateMap, sample_rate: f32) -> Self {
        let variant = BusVariant {
            stereo: read_bool(state, "stereo", false),
            vca: read_bool(state, "vca", false),
        };
        let mut bus = Bus::new(variant, sample_rate);
        bus.load(state);
        bus
    }

    pub fn variant(&self) -> BusVariant {
        self.variant
    }

    pub fn plan(&self) -> &DiscoveryPlan {
        &self.plan
    }

    pub fn fade(&self) -> &FadeEngine {
        &self.fade
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Retune rate-dependent state. Called from `process` on a rate change.
    pub fn configure(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.configured_clip = self.params.clip_mode;
        for voice in self.master.iter_mut() {
            voice.configure(sample_rate, self.configured_clip);
        }
    }

    pub fn descriptor(&self) -> &'static ModuleDescriptor {
        match (self.variant.stereo, self.variant.vca) {
            (false, false) => &MONO_DESCRIPTOR,
            (true, false) => &STEREO_DESCRIPTOR,
            (false, true) => &VCA_MONO_DESCRIPTOR,
            (true, true) => &VCA_STEREO_DESCRIPTOR,
        }
    }

    pub fn set_param(&mut self, index: usize, value: f32) -> Result<(), RackError> {
        let info = BUS_PARAMS
            .get(index)
            .ok_or(RackError::ParamOutOfRange { kind: "bus", index })?;
        let v = info.clamp(value);
        let selector = v.round() as usize;

        match index {
            0..=3 => self.params.levels[index] = v,
            4 => self.params.master = v,
            5 => self.params.level_mode = LevelMode::from_index(selector),
            6 => self.params.vca_mode = VcaMode::from_index(selector),
            7 => self.params.clip_mode = ClipMode::from_index(selector),
            8 => self.params.dc_block_mode = DcBlockMode::from_index(selector),
            _ => self.params.exclude_patched = v >= 0.5,
        }
        Ok(())
    }

    pub fn param(&self, index: usize) -> Option<f32> {
        let p = &self.params;
        Some(match index {
            0..=3 => p.levels[index],
            4 => p.master,
            5 => p.level_mode.index() as f32,
            6 => p.vca_mode.index() as f32,
            7 => p.clip_mode.index() as f32,
            8 => p.dc_block_mode.index() as f32,
            9 => {
                if p.exclude_patched {
                    1.0
                } else {
                    0.0
                }
            }
            _ => return None,
        })
    }

    /// Run one frame. `me` is this bus's own id in `registry`.
    pub fn process(&mut self, ctx: &FrameCtx, registry: &Registry, me: UnitId) {
        if ctx.sample_rate != self.sample_rate || self.params.clip_mode != self.configured_clip {
            self.configure(ctx.sample_rate);
        }

        self.plan = discover(registry, me);
        self.outbox.clear();

        let resolved = self.resolve(registry);
        let gains = self.run_fade(registry, ctx);

        let stereo = self.variant.stereo;
        let vca = self.variant.vca;
        let params = self.params;
        let level_mode = params.level_mode;
        let normal = level_mode.normal();
        let poly_sum = level_mode.is_poly_sum();

        // Polyphony
        let mut taps = [ChannelTaps::default(); CHANNELS];
        for (i, tap) in taps.iter_mut().enumerate() {
            let right = if stereo {
                self.inputs.right[i].channels()
            } else {
                0
            };
            tap.input = self.inputs.left[i].channels().max(right);
            tap.cv = if vca { self.inputs.cv[i].channels() } else { 0 };
            tap.excluded = params.exclude_patched
                && (self.outputs.left[i].is_patched() || (stereo && self.outputs.right[i].is_patched()));
        }
        let master_cv = if vca { self.inputs.cv[MASTER].channels() } else { 0 };
        let chain_right = if stereo {
            self.inputs.chain_right.channels()
        } else {
            0
        };
        let chain = self.inputs.chain_left.channels().max(chain_right);
        let mix_channels = resolve_mix_channels(&taps, master_cv, chain);
        let out_channels = if poly_sum { 1 } else { mix_channels };

        let mut mix: [VoiceFrame; 2] = [[0.0; MAX_POLY]; 2];
        let mut send_taps: [[VoiceFrame; 2]; MAX_SENDS] = [[[0.0; MAX_POLY]; 2]; MAX_SENDS];

        // Channels
        for (i, tap) in taps.iter().enumerate() {
            let own = tap.channel_count();
            // Poly sum counts each voice a channel carries exactly once
            let voices = if tap.excluded || poly_sum {
                own
            } else {
                own.max(mix_channels)
            };
            let level = level_mode.gain(params.levels[i]);
            let cv_patched = vca && self.inputs.cv[i].is_connected();
            let audio_patched = self.inputs.left[i].is_connected()
                || (stereo && self.inputs.right[i].is_connected());
            let weights = resolved.sends.map(|s| s.map_or(0.0, |s| s.tap_weight(i)));

            for c in 0..voices {
                let in_l = self.inputs.left[i].normal_or(c, normal);
                let in_r = if stereo && self.inputs.right[i].is_connected() {
                    self.inputs.right[i].poly_voltage(c)
                } else {
                    in_l
                };

                let mut l = (in_l + resolved.pre(i)) * level;
                let mut r = (in_r + resolved.pre(i)) * level;

                if cv_patched {
                    let cv = self.inputs.cv[i].poly_voltage(c);
                    let stage = &mut self.vca[i * MAX_POLY + c];
                    if stereo {
                        (l, r) = stage.process_stereo(params.vca_mode, l, r, cv, audio_patched);
                    } else {
                        l = stage.process(params.vca_mode, l, cv, audio_patched);
                    }
                }

                l += resolved.post(i);
                r += resolved.post(i);

                if stereo {
                    let pan_gains = resolved
                        .pan
                        .map_or(PanGains::UNITY, |p| p.law.gains(p.pan_for(i, c)));
                    (l, r) = pan_gains.apply(l, r);
                }

                l *= gains[i];
                r *= gains[i];

                if c < own {
                    self.outputs.left[i].set_voltage(c, l);
                    if stereo {
                        self.outputs.right[i].set_voltage(c, r);
                    }
                }

                if tap.excluded || c >= mix_channels {
                    continue;
                }
                let v = if poly_sum { 0 } else { c };
                mix[0][v] += l;
                mix[1][v] += r;
                for (s, w) in weights.iter().enumerate().take(resolved.send_count) {
                    send_taps[s][0][v] += l * w;
                    send_taps[s][1][v] += r * w;
                }
            }

            self.outputs.left[i].set_channels(own);
            self.outputs.right[i].set_channels(if stereo { own } else { 0 });
        }

        // Sends, in chain order
        let mut carry: [VoiceFrame; 2] = [[0.0; MAX_POLY]; 2];
        for s in 0..resolved.send_count {
            let (Some(send), Some(unit)) = (resolved.sends[s], self.plan.send(s)) else {
                continue;
            };
            let tap = &mut send_taps[s];
            sum_into(&mut tap[0], &carry[0], out_channels);
            sum_into(&mut tap[1], &carry[1], out_channels);
            carry = [[0.0; MAX_POLY]; 2];

            self.outbox.push(RoleOutput::Send {
                unit,
                channels: out_channels,
                left: tap[0],
                right: if stereo { tap[1] } else { tap[0] },
            });

            let ret = collect_pair(&send.return_left, &send.return_right, stereo, poly_sum, out_channels);

            let target = if send.chain && s + 1 < resolved.send_count {
                &mut carry
            } else {
                &mut mix
            };
            let ret_gain = send.return_gain();
            sum_weighted_into(&mut target[0], &ret[0], ret_gain, out_channels);
            sum_weighted_into(&mut target[1], &ret[1], ret_gain, out_channels);
        }

        // Chain input
        let chained = collect_pair(
            &self.inputs.chain_left,
            &self.inputs.chain_right,
            stereo,
            poly_sum,
            out_channels,
        );
        sum_into(&mut mix[0], &chained[0], out_channels);
        sum_into(&mut mix[1], &chained[1], out_channels);

        // Master
        let master_level = level_mode.gain(params.master) * gains[MASTER];
        let master_cv_patched = vca && self.inputs.cv[MASTER].is_connected();
        let any_audio = self.inputs.left.iter().any(PolyInput::is_connected)
            || (stereo && self.inputs.right.iter().any(PolyInput::is_connected))
            || chain > 0;
        let (clip, dc) = (params.clip_mode, params.dc_block_mode);
        let sides = self.variant.sides();

        for c in 0..out_channels {
            let mut y = [0.0f32; 2];
            for side in 0..sides {
                let x = mix[side][c] + resolved.pre(MASTER);
                y[side] = self.master[side * MAX_POLY + c].pre_level(x, clip, dc) * master_level;
            }

            if master_cv_patched {
                let cv = self.inputs.cv[MASTER].poly_voltage(c);
                let stage = &mut self.vca[MASTER * MAX_POLY + c];
                if stereo {
                    (y[0], y[1]) = stage.process_stereo(params.vca_mode, y[0], y[1], cv, any_audio);
                } else {
                    y[0] = stage.process(params.vca_mode, y[0], cv, any_audio);
                }
            }

            for side in 0..sides {
                let x = y[side] + resolved.post(MASTER);
                y[side] = self.master[side * MAX_POLY + c].post_level(x, clip, dc);
            }

            self.outputs.mix_left.set_voltage(c, y[0]);
            if stereo {
                self.outputs.mix_right.set_voltage(c, y[1]);
            }
        }
        self.outputs.mix_left.set_channels(out_channels);
        self.outputs
            .mix_right
            .set_channels(if stereo { out_channels } else { 0 });
    }

    fn resolve<'a>(&self, registry: &'a Registry) -> Resolved<'a> {
        let mut resolved = Resolved {
            pan: self.plan.pan.and_then(|id| registry.role(id)).and_then(|u| u.as_pan()),
            offset: self
                .plan
                .offset
                .and_then(|id| registry.role(id))
                .and_then(|u| u.as_offset()),
            sends: [None; MAX_SENDS],
            send_count: 0,
        };
        for (slot, id) in resolved.sends.iter_mut().zip(self.plan.sends()) {
            *slot = registry.role(id).and_then(|u| u.as_send());
            resolved.send_count += 1;
        }
        resolved
    }

    /// Resolve mute/solo targets, step the fade engine, queue the monitor.
    fn run_fade(&mut self, registry: &Registry, ctx: &FrameCtx) -> [f32; FADE_SLOTS] {
        let mute = |id: UnitId| registry.role(id).and_then(|u| u.as_mute());
        let solo = |id: UnitId| registry.role(id).and_then(|u| u.as_solo());

        let targets = match self.plan.mute_solo {
            MuteSoloBinding::None => Some(FadeTargets::OPEN),
            MuteSoloBinding::Mute(id) => mute(id).map(|m| FadeTargets::mute_only(&m.states(), m.soft)),
            MuteSoloBinding::Solo(id) => solo(id).map(|s| FadeTargets::solo_only(&s.states(), s.soft)),
            MuteSoloBinding::Shared {
                mute: m,
                solo: s,
                solo_first,
            } => match (mute(m), solo(s)) {
                (Some(m), Some(s)) => {
                    let soft = if solo_first { s.soft } else { m.soft };
                    Some(FadeTargets::shared(&m.states(), &s.states(), soft))
                }
                _ => None,
            },
        }
        .unwrap_or(FadeTargets::OPEN);

        let fade_unit = self.plan.fade.and_then(|id| registry.role(id)?.as_fade().map(|f| (id, f)));
        let timing = fade_unit.map_or(SlewTiming::default(), |(_, f)| f.timing());
        let gains = *self.fade.process(&targets, &timing, ctx);

        if let Some((unit, _)) = fade_unit {
            self.outbox.push(RoleOutput::FadeMonitor { unit, gains });
        }
        gains
    }
}

/// Read a left/right input pair into mix voices. An unpatched right follows
/// the left; in poly sum every carried voice lands on voice 0.
fn collect_pair(
    left: &PolyInput,
    right: &PolyInput,
    stereo: bool,
    poly_sum: bool,
    channels: usize,
) -> [VoiceFrame; 2] {
    let mut frame: [VoiceFrame; 2] = [[0.0; MAX_POLY]; 2];
    let right_patched = stereo && right.is_connected();
    if poly_sum {
        frame[0][0] = left.sum();
        frame[1][0] = if right_patched { right.sum() } else { frame[0][0] };
        return frame;
    }
    for c in 0..channels {
        frame[0][c] = left.poly_voltage(c);
        frame[1][c] = if right_patched { right.poly_voltage(c) } else { frame[0][c] };
    }
    frame
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

const LEVEL_KEYS: [&str; CHANNELS] = ["level0", "level1", "level2", "level3"];

impl Persist for Bus {
    fn save(&self, map: &mut StateMap) {
        let p = &self.params;
        write_bool(map, "stereo", self.variant.stereo);
        write_bool(map, "vca", self.variant.vca);
        write_index(map, "levelMode", p.level_mode.index());
        write_index(map, "vcaMode", p.vca_mode.index());
        write_index(map, "clipMode", p.clip_mode.index());
        write_index(map, "dcBlockMode", p.dc_block_mode.index());
        write_bool(map, "excludePatched", p.exclude_patched);
        for (key, &level) in LEVEL_KEYS.iter().zip(p.levels.iter()) {
            write_f32(map, key, level);
        }
        write_f32(map, "master", p.master);
    }

    fn load(&mut self, map: &StateMap) {
        let level_mode = LevelMode::from_index(read_index(map, "levelMode", 0, LevelMode::ALL.len()));
        let defaults = BusParams::with_level_mode(level_mode);
        let p = &mut self.params;
        p.level_mode = level_mode;
        p.vca_mode = VcaMode::from_index(read_index(map, "vcaMode", 0, VcaMode::ALL.len()));
        p.clip_mode = ClipMode::from_index(read_index(map, "clipMode", 0, ClipMode::ALL.len()));
        p.dc_block_mode =
            DcBlockMode::from_index(read_index(map, "dcBlockMode", 0, DcBlockMode::ALL.len()));
        p.exclude_patched = read_bool(map, "excludePatched", defaults.exclude_patched);
        for ((key, level), default) in LEVEL_KEYS.iter().zip(p.levels.iter_mut()).zip(defaults.levels) {
            *level = read_f32(map, key, default, 0.0, 1.0);
        }
        p.master = read_f32(map, "master", defaults.master, 0.0, 1.0);
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

pub const BUS_PARAMS: [ParamInfo; 10] = [
    ParamInfo::new("Level 1", 0.0, 1.0, 0.5),
    ParamInfo::new("Level 2", 0.0, 1.0, 0.5),
    ParamInfo::new("Level 3", 0.0, 1.0, 0.5),
    ParamInfo::new("Level 4", 0.0, 1.0, 0.5),
    ParamInfo::new("Master level", 0.0, 1.0, 0.5),
    ParamInfo::new("Level mode", 0.0, 4.0, 0.0),
    ParamInfo::new("VCA mode", 0.0, 5.0, 0.0),
    ParamInfo::new("Clip mode", 0.0, 7.0, 0.0),
    ParamInfo::new("DC block", 0.0, 3.0, 0.0),
    ParamInfo::new("Exclude patched outputs", 0.0, 1.0, 0.0),
];

const MONO_INPUTS: [PortInfo; 5] = [
    PortInfo::new("In 1"),
    PortInfo::new("In 2"),
    PortInfo::new("In 3"),
    PortInfo::new("In 4"),
    PortInfo::new("Chain"),
];

const STEREO_INPUTS: [PortInfo; 10] = [
    PortInfo::new("In 1 L"),
    PortInfo::new("In 1 R"),
    PortInfo::new("In 2 L"),
    PortInfo::new("In 2 R"),
    PortInfo::new("In 3 L"),
    PortInfo::new("In 3 R"),
    PortInfo::new("In 4 L"),
    PortInfo::new("In 4 R"),
    PortInfo::new("Chain L"),
    PortInfo::new("Chain R"),
];

const VCA_MONO_INPUTS: [PortInfo; 10] = [
    PortInfo::new("In 1"),
    PortInfo::new("In 2"),
    PortInfo::new("In 3"),
    PortInfo::new("In 4"),
    PortInfo::new("Chain"),
    PortInfo::new("CV 1"),
    PortInfo::new("CV 2"),
    PortInfo::new("CV 3"),
    PortInfo::new("CV 4"),
    PortInfo::new("Master CV"),
];

const VCA_STEREO_INPUTS: [PortInfo; 15] = [
    PortInfo::new("In 1 L"),
    PortInfo::new("In 1 R"),
    PortInfo::new("In 2 L"),
    PortInfo::new("In 2 R"),
    PortInfo::new("In 3 L"),
    PortInfo::new("In 3 R"),
    PortInfo::new("In 4 L"),
    PortInfo::new("In 4 R"),
    PortInfo::new("Chain L"),
    PortInfo::new("Chain R"),
    PortInfo::new("CV 1"),
    PortInfo::new("CV 2"),
    PortInfo::new("CV 3"),
    PortInfo::new("CV 4"),
    PortInfo::new("Master CV"),
];

const MONO_OUTPUTS: [PortInfo; 5] = [
    PortInfo::new("Out 1"),
    PortInfo::new("Out 2"),
    PortInfo::new("Out 3"),
    PortInfo::new("Out 4"),
    PortInfo::new("Mix"),
];

const STEREO_OUTPUTS: [PortInfo; 10] = [
    PortInfo::new("Out 1 L"),
    PortInfo::new("Out 1 R"),
    PortInfo::new("Out 2 L"),
    PortInfo::new("Out 2 R"),
    PortInfo::new("Out 3 L"),
    PortInfo::new("Out 3 R"),
    PortInfo::new("Out 4 L"),
    PortInfo::new("Out 4 R"),
    PortInfo::new("Mix L"),
    PortInfo::new("Mix R"),
];

// Every variant shares one parameter index space; VCA mode is inert without CV.
pub static MONO_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "bus",
    params: &BUS_PARAMS,
    inputs: &MONO_INPUTS,
    outputs: &MONO_OUTPUTS,
};

pub static STEREO_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "bus",
    params: &BUS_PARAMS,
    inputs: &STEREO_INPUTS,
    outputs: &STEREO_OUTPUTS,
};

pub static VCA_MONO_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "bus",
    params: &BUS_PARAMS,
    inputs: &VCA_MONO_INPUTS,
    outputs: &MONO_OUTPUTS,
};

pub static VCA_STEREO_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "bus",
    params: &BUS_PARAMS,
    inputs: &VCA_STEREO_INPUTS,
    outputs: &STEREO_OUTPUTS,
};
