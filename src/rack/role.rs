//! Role units: the expanders a bus discovers to its right.
//!
//! Each unit carries one role. Mute, Solo, Pan, Offset and Fade are singular
//! in a bus chain; Send may repeat. Units never touch the bus directly: the
//! bus reads them during its frame and hands back [`RoleOutput`] records for
//! anything it wants written to their outputs.
//!
//! [`RoleOutput`]: crate::rack::publish::RoleOutput

use crate::{
    dsp::{
        pan::PanLaw,
        slew::{SlewTiming, DEFAULT_FADE_TIME, MAX_FADE_TIME},
        trigger::SchmittTrigger,
    },
    io::{ModuleDescriptor, ParamInfo, PolyInput, PolyOutput, PortInfo},
    rack::RackError,
    state::{read_bool, read_f32, read_index, write_bool, write_f32, write_index, Persist, StateMap},
    CHANNELS, FADE_SLOTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Mute,
    Solo,
    Pan,
    Send,
    Offset,
    Fade,
}

impl RoleTag {
    /// Only sends may appear more than once in a chain.
    pub fn is_repeatable(self) -> bool {
        self == RoleTag::Send
    }

    /// Persisted module kind.
    pub fn kind(self) -> &'static str {
        match self {
            RoleTag::Mute => "mute",
            RoleTag::Solo => "solo",
            RoleTag::Pan => "pan",
            RoleTag::Send => "send",
            RoleTag::Offset => "offset",
            RoleTag::Fade => "fade",
        }
    }

    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "mute" => Some(RoleTag::Mute),
            "solo" => Some(RoleTag::Solo),
            "pan" => Some(RoleTag::Pan),
            "send" => Some(RoleTag::Send),
            "offset" => Some(RoleTag::Offset),
            "fade" => Some(RoleTag::Fade),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Mute / Solo
// ---------------------------------------------------------------------------

/// Latching buttons with CV control, shared by the mute and solo units.
///
/// Toggle mode: a rising CV edge flips the button.
/// Gate mode: while a CV is patched its Schmitt state is the button state.
#[derive(Debug, Clone, Copy)]
pub struct SwitchBank<const N: usize> {
    pub pressed: [bool; N],
    pub cv: [PolyInput; N],
    pub soft: bool,
    pub toggle: bool,
    triggers: [SchmittTrigger; N],
}

impl<const N: usize> SwitchBank<N> {
    pub fn new() -> Self {
        Self {
            pressed: [false; N],
            cv: [PolyInput::disconnected(); N],
            soft: true,
            toggle: true,
            triggers: [SchmittTrigger::new(); N],
        }
    }

    /// Run the edge detectors for this frame.
    pub fn update(&mut self) {
        for ((trigger, cv), pressed) in self
            .triggers
            .iter_mut()
            .zip(self.cv.iter())
            .zip(self.pressed.iter_mut())
        {
            if !cv.is_connected() {
                trigger.reset();
                continue;
            }
            if trigger.process(cv.voltage(0)) && self.toggle {
                *pressed = !*pressed;
            }
        }
    }

    /// Effective switch states after CV handling.
    pub fn states(&self) -> [bool; N] {
        let mut states = self.pressed;
        if !self.toggle {
            for ((state, cv), trigger) in states.iter_mut().zip(self.cv.iter()).zip(self.triggers.iter()) {
                if cv.is_connected() {
                    *state = trigger.is_high();
                }
            }
        }
        states
    }
}

impl<const N: usize> Default for SwitchBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub type MuteUnit = SwitchBank<FADE_SLOTS>;
pub type SoloUnit = SwitchBank<CHANNELS>;

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct PanUnit {
    pub pan: [f32; CHANNELS],
    /// Attenuverter on each pan CV, -1..1.
    pub cv_amount: [f32; CHANNELS],
    pub law: PanLaw,
    pub cv: [PolyInput; CHANNELS],
}

impl PanUnit {
    pub fn new() -> Self {
        Self {
            pan: [0.0; CHANNELS],
            cv_amount: [1.0; CHANNELS],
            law: PanLaw::default(),
            cv: [PolyInput::disconnected(); CHANNELS],
        }
    }

    /// Pan position for one channel voice; ±5 V of CV spans the full range.
    #[inline]
    pub fn pan_for(&self, channel: usize, voice: usize) -> f32 {
        let cv = self.cv[channel].poly_voltage(voice);
        (self.pan[channel] + cv / 5.0 * self.cv_amount[channel]).clamp(-1.0, 1.0)
    }
}

impl Default for PanUnit {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Send / Return
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SendUnit {
    pub levels: [f32; CHANNELS],
    pub send_level: f32,
    pub return_level: f32,
    /// Feed the return into the next send's tap instead of the mix.
    pub chain: bool,
    pub return_left: PolyInput,
    pub return_right: PolyInput,
    pub send_left: PolyOutput,
    pub send_right: PolyOutput,
}

impl SendUnit {
    pub fn new() -> Self {
        Self {
            levels: [0.0; CHANNELS],
            send_level: 1.0,
            return_level: 1.0,
            chain: false,
            return_left: PolyInput::disconnected(),
            return_right: PolyInput::disconnected(),
            send_left: PolyOutput::new(),
            send_right: PolyOutput::new(),
        }
    }

    /// How much of channel `channel` reaches this send.
    #[inline]
    pub fn tap_weight(&self, channel: usize) -> f32 {
        self.levels[channel].clamp(0.0, 1.0) * self.send_level.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn return_gain(&self) -> f32 {
        self.return_level.clamp(0.0, 1.0)
    }
}

impl Default for SendUnit {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// Fixed voltage added before and after the level stage (channels + master).
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetUnit {
    pub pre: [f32; FADE_SLOTS],
    pub post: [f32; FADE_SLOTS],
}

impl OffsetUnit {
    #[inline]
    pub fn pre(&self, slot: usize) -> f32 {
        self.pre[slot].clamp(-10.0, 10.0)
    }

    #[inline]
    pub fn post(&self, slot: usize) -> f32 {
        self.post[slot].clamp(-10.0, 10.0)
    }
}

// ---------------------------------------------------------------------------
// Fade timing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FadeUnit {
    pub rise: f32,
    pub fall: f32,
    pub shape: f32,
    /// 10 V × current gain, channels then master.
    pub monitor: [PolyOutput; FADE_SLOTS],
}

impl FadeUnit {
    pub fn new() -> Self {
        Self {
            rise: DEFAULT_FADE_TIME,
            fall: DEFAULT_FADE_TIME,
            shape: 0.0,
            monitor: [PolyOutput::new(); FADE_SLOTS],
        }
    }

    pub fn timing(&self) -> SlewTiming {
        SlewTiming::new(self.rise, self.fall, self.shape).clamped()
    }
}

impl Default for FadeUnit {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Role {
    Mute(MuteUnit),
    Solo(SoloUnit),
    Pan(PanUnit),
    Send(SendUnit),
    Offset(OffsetUnit),
    Fade(FadeUnit),
}

impl Role {
    pub fn mute() -> Self {
        Role::Mute(MuteUnit::new())
    }

    pub fn solo() -> Self {
        Role::Solo(SoloUnit::new())
    }

    pub fn pan() -> Self {
        Role::Pan(PanUnit::new())
    }

    pub fn send() -> Self {
        Role::Send(SendUnit::new())
    }

    pub fn offset() -> Self {
        Role::Offset(OffsetUnit::default())
    }

    pub fn fade() -> Self {
        Role::Fade(FadeUnit::new())
    }

    pub fn for_tag(tag: RoleTag) -> Self {
        match tag {
            RoleTag::Mute => Self::mute(),
            RoleTag::Solo => Self::solo(),
            RoleTag::Pan => Self::pan(),
            RoleTag::Send => Self::send(),
            RoleTag::Offset => Self::offset(),
            RoleTag::Fade => Self::fade(),
        }
    }

    pub fn tag(&self) -> RoleTag {
        match self {
            Role::Mute(_) => RoleTag::Mute,
            Role::Solo(_) => RoleTag::Solo,
            Role::Pan(_) => RoleTag::Pan,
            Role::Send(_) => RoleTag::Send,
            Role::Offset(_) => RoleTag::Offset,
            Role::Fade(_) => RoleTag::Fade,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoleUnit {
    pub role: Role,
    pub bypassed: bool,
}

impl RoleUnit {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            bypassed: false,
        }
    }

    #[inline]
    pub fn tag(&self) -> RoleTag {
        self.role.tag()
    }

    /// Per-frame housekeeping before any bus reads this unit.
    ///
    /// Outputs are cleared here; the owning bus republishes them after its
    /// own frame. A unit no bus picks up therefore goes quiet.
    pub fn process(&mut self) {
        match &mut self.role {
            Role::Mute(bank) => {
                if !self.bypassed {
                    bank.update();
                }
            }
            Role::Solo(bank) => {
                if !self.bypassed {
                    bank.update();
                }
            }
            Role::Send(send) => {
                send.send_left.clear();
                send.send_right.clear();
            }
            Role::Fade(fade) => {
                for out in fade.monitor.iter_mut() {
                    out.clear();
                }
            }
            Role::Pan(_) | Role::Offset(_) => {}
        }
    }

    pub fn as_mute(&self) -> Option<&MuteUnit> {
        match &self.role {
            Role::Mute(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_solo(&self) -> Option<&SoloUnit> {
        match &self.role {
            Role::Solo(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pan(&self) -> Option<&PanUnit> {
        match &self.role {
            Role::Pan(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_send(&self) -> Option<&SendUnit> {
        match &self.role {
            Role::Send(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_send_mut(&mut self) -> Option<&mut SendUnit> {
        match &mut self.role {
            Role::Send(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_offset(&self) -> Option<&OffsetUnit> {
        match &self.role {
            Role::Offset(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_fade(&self) -> Option<&FadeUnit> {
        match &self.role {
            Role::Fade(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_fade_mut(&mut self) -> Option<&mut FadeUnit> {
        match &mut self.role {
            Role::Fade(f) => Some(f),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> &'static ModuleDescriptor {
        match self.tag() {
            RoleTag::Mute => &MUTE_DESCRIPTOR,
            RoleTag::Solo => &SOLO_DESCRIPTOR,
            RoleTag::Pan => &PAN_DESCRIPTOR,
            RoleTag::Send => &SEND_DESCRIPTOR,
            RoleTag::Offset => &OFFSET_DESCRIPTOR,
            RoleTag::Fade => &FADE_DESCRIPTOR,
        }
    }

    /// Set a parameter by descriptor index, clamped into range.
    pub fn set_param(&mut self, index: usize, value: f32) -> Result<(), RackError> {
        let info = self.descriptor().param(index).ok_or(RackError::ParamOutOfRange {
            kind: self.tag().kind(),
            index,
        })?;
        let v = info.clamp(value);
        let on = v >= 0.5;

        match &mut self.role {
            Role::Mute(bank) => match index {
                0..=4 => bank.pressed[index] = on,
                5 => bank.soft = on,
                _ => bank.toggle = on,
            },
            Role::Solo(bank) => match index {
                0..=3 => bank.pressed[index] = on,
                4 => bank.soft = on,
                _ => bank.toggle = on,
            },
            Role::Pan(pan) => match index {
                0..=3 => pan.pan[index] = v,
                4..=7 => pan.cv_amount[index - 4] = v,
                _ => pan.law = PanLaw::from_index(v.round() as usize),
            },
            Role::Send(send) => match index {
                0..=3 => send.levels[index] = v,
                4 => send.send_level = v,
                5 => send.return_level = v,
                _ => send.chain = on,
            },
            Role::Offset(offset) => match index {
                0..=4 => offset.pre[index] = v,
                _ => offset.post[index - FADE_SLOTS] = v,
            },
            Role::Fade(fade) => match index {
                0 => fade.rise = v,
                1 => fade.fall = v,
                _ => fade.shape = v,
            },
        }
        Ok(())
    }

    /// Current value of a parameter by descriptor index.
    pub fn param(&self, index: usize) -> Option<f32> {
        self.descriptor().param(index)?;
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Some(match &self.role {
            Role::Mute(bank) => match index {
                0..=4 => flag(bank.pressed[index]),
                5 => flag(bank.soft),
                _ => flag(bank.toggle),
            },
            Role::Solo(bank) => match index {
                0..=3 => flag(bank.pressed[index]),
                4 => flag(bank.soft),
                _ => flag(bank.toggle),
            },
            Role::Pan(pan) => match index {
                0..=3 => pan.pan[index],
                4..=7 => pan.cv_amount[index - 4],
                _ => pan.law.index() as f32,
            },
            Role::Send(send) => match index {
                0..=3 => send.levels[index],
                4 => send.send_level,
                5 => send.return_level,
                _ => flag(send.chain),
            },
            Role::Offset(offset) => match index {
                0..=4 => offset.pre[index],
                _ => offset.post[index - FADE_SLOTS],
            },
            Role::Fade(fade) => match index {
                0 => fade.rise,
                1 => fade.fall,
                _ => fade.shape,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

const MUTE_KEYS: [&str; CHANNELS] = ["mute0", "mute1", "mute2", "mute3"];
const SOLO_KEYS: [&str; CHANNELS] = ["solo0", "solo1", "solo2", "solo3"];
const PAN_KEYS: [&str; CHANNELS] = ["pan0", "pan1", "pan2", "pan3"];
const PAN_CV_KEYS: [&str; CHANNELS] = ["panCv0", "panCv1", "panCv2", "panCv3"];
const SEND_KEYS: [&str; CHANNELS] = ["send0", "send1", "send2", "send3"];
const PRE_OFFSET_KEYS: [&str; FADE_SLOTS] = [
    "preOffset0",
    "preOffset1",
    "preOffset2",
    "preOffset3",
    "preOffset4",
];
const POST_OFFSET_KEYS: [&str; FADE_SLOTS] = [
    "postOffset0",
    "postOffset1",
    "postOffset2",
    "postOffset3",
    "postOffset4",
];

impl Persist for RoleUnit {
    fn save(&self, map: &mut StateMap) {
        write_bool(map, "bypassed", self.bypassed);
        match &self.role {
            Role::Mute(bank) => {
                write_bool(map, "softMute", bank.soft);
                write_bool(map, "toggleMute", bank.toggle);
                for (key, &on) in MUTE_KEYS.iter().zip(bank.pressed.iter()) {
                    write_bool(map, key, on);
                }
                write_bool(map, "muteMaster", bank.pressed[CHANNELS]);
            }
            Role::Solo(bank) => {
                write_bool(map, "softMute", bank.soft);
                write_bool(map, "toggleMute", bank.toggle);
                for (key, &on) in SOLO_KEYS.iter().zip(bank.pressed.iter()) {
                    write_bool(map, key, on);
                }
            }
            Role::Pan(pan) => {
                for i in 0..CHANNELS {
                    write_f32(map, PAN_KEYS[i], pan.pan[i]);
                    write_f32(map, PAN_CV_KEYS[i], pan.cv_amount[i]);
                }
                write_index(map, "panLaw", pan.law.index());
            }
            Role::Send(send) => {
                write_bool(map, "sendChain", send.chain);
                for (key, &level) in SEND_KEYS.iter().zip(send.levels.iter()) {
                    write_f32(map, key, level);
                }
                write_f32(map, "sendLevel", send.send_level);
                write_f32(map, "returnLevel", send.return_level);
            }
            Role::Offset(offset) => {
                for i in 0..FADE_SLOTS {
                    write_f32(map, PRE_OFFSET_KEYS[i], offset.pre[i]);
                    write_f32(map, POST_OFFSET_KEYS[i], offset.post[i]);
                }
            }
            Role::Fade(fade) => {
                write_f32(map, "rise", fade.rise);
                write_f32(map, "fall", fade.fall);
                write_f32(map, "shape", fade.shape);
            }
        }
    }

    fn load(&mut self, map: &StateMap) {
        self.bypassed = read_bool(map, "bypassed", false);
        match &mut self.role {
            Role::Mute(bank) => {
                bank.soft = read_bool(map, "softMute", true);
                bank.toggle = read_bool(map, "toggleMute", true);
                for (key, on) in MUTE_KEYS.iter().zip(bank.pressed.iter_mut()) {
                    *on = read_bool(map, key, false);
                }
                bank.pressed[CHANNELS] = read_bool(map, "muteMaster", false);
            }
            Role::Solo(bank) => {
                bank.soft = read_bool(map, "softMute", true);
                bank.toggle = read_bool(map, "toggleMute", true);
                for (key, on) in SOLO_KEYS.iter().zip(bank.pressed.iter_mut()) {
                    *on = read_bool(map, key, false);
                }
            }
            Role::Pan(pan) => {
                for i in 0..CHANNELS {
                    pan.pan[i] = read_f32(map, PAN_KEYS[i], 0.0, -1.0, 1.0);
                    pan.cv_amount[i] = read_f32(map, PAN_CV_KEYS[i], 1.0, -1.0, 1.0);
                }
                pan.law = PanLaw::from_index(read_index(map, "panLaw", 0, PanLaw::ALL.len()));
            }
            Role::Send(send) => {
                send.chain = read_bool(map, "sendChain", false);
                for (key, level) in SEND_KEYS.iter().zip(send.levels.iter_mut()) {
                    *level = read_f32(map, key, 0.0, 0.0, 1.0);
                }
                send.send_level = read_f32(map, "sendLevel", 1.0, 0.0, 1.0);
                send.return_level = read_f32(map, "returnLevel", 1.0, 0.0, 1.0);
            }
            Role::Offset(offset) => {
                for i in 0..FADE_SLOTS {
                    offset.pre[i] = read_f32(map, PRE_OFFSET_KEYS[i], 0.0, -10.0, 10.0);
                    offset.post[i] = read_f32(map, POST_OFFSET_KEYS[i], 0.0, -10.0, 10.0);
                }
            }
            Role::Fade(fade) => {
                fade.rise = read_f32(map, "rise", DEFAULT_FADE_TIME, 0.0, MAX_FADE_TIME);
                fade.fall = read_f32(map, "fall", DEFAULT_FADE_TIME, 0.0, MAX_FADE_TIME);
                fade.shape = read_f32(map, "shape", 0.0, -1.0, 1.0);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

const MUTE_PARAMS: [ParamInfo; 7] = [
    ParamInfo::new("Mute 1", 0.0, 1.0, 0.0),
    ParamInfo::new("Mute 2", 0.0, 1.0, 0.0),
    ParamInfo::new("Mute 3", 0.0, 1.0, 0.0),
    ParamInfo::new("Mute 4", 0.0, 1.0, 0.0),
    ParamInfo::new("Mute master", 0.0, 1.0, 0.0),
    ParamInfo::new("Soft mute", 0.0, 1.0, 1.0),
    ParamInfo::new("Toggle CV", 0.0, 1.0, 1.0),
];

const SOLO_PARAMS: [ParamInfo; 6] = [
    ParamInfo::new("Solo 1", 0.0, 1.0, 0.0),
    ParamInfo::new("Solo 2", 0.0, 1.0, 0.0),
    ParamInfo::new("Solo 3", 0.0, 1.0, 0.0),
    ParamInfo::new("Solo 4", 0.0, 1.0, 0.0),
    ParamInfo::new("Soft solo", 0.0, 1.0, 1.0),
    ParamInfo::new("Toggle CV", 0.0, 1.0, 1.0),
];

const PAN_PARAMS: [ParamInfo; 9] = [
    ParamInfo::new("Pan 1", -1.0, 1.0, 0.0),
    ParamInfo::new("Pan 2", -1.0, 1.0, 0.0),
    ParamInfo::new("Pan 3", -1.0, 1.0, 0.0),
    ParamInfo::new("Pan 4", -1.0, 1.0, 0.0),
    ParamInfo::new("Pan CV 1", -1.0, 1.0, 1.0),
    ParamInfo::new("Pan CV 2", -1.0, 1.0, 1.0),
    ParamInfo::new("Pan CV 3", -1.0, 1.0, 1.0),
    ParamInfo::new("Pan CV 4", -1.0, 1.0, 1.0),
    ParamInfo::new("Pan law", 0.0, 9.0, 0.0),
];

const SEND_PARAMS: [ParamInfo; 7] = [
    ParamInfo::new("Send 1", 0.0, 1.0, 0.0),
    ParamInfo::new("Send 2", 0.0, 1.0, 0.0),
    ParamInfo::new("Send 3", 0.0, 1.0, 0.0),
    ParamInfo::new("Send 4", 0.0, 1.0, 0.0),
    ParamInfo::new("Send level", 0.0, 1.0, 1.0),
    ParamInfo::new("Return level", 0.0, 1.0, 1.0),
    ParamInfo::new("Chain", 0.0, 1.0, 0.0),
];

const OFFSET_PARAMS: [ParamInfo; 10] = [
    ParamInfo::new("Pre offset 1", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Pre offset 2", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Pre offset 3", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Pre offset 4", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Pre offset master", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Post offset 1", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Post offset 2", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Post offset 3", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Post offset 4", -10.0, 10.0, 0.0).with_unit(" V"),
    ParamInfo::new("Post offset master", -10.0, 10.0, 0.0).with_unit(" V"),
];

const FADE_PARAMS: [ParamInfo; 3] = [
    ParamInfo::new("Rise", 0.0, MAX_FADE_TIME, DEFAULT_FADE_TIME).with_unit(" s"),
    ParamInfo::new("Fall", 0.0, MAX_FADE_TIME, DEFAULT_FADE_TIME).with_unit(" s"),
    ParamInfo::new("Shape", -1.0, 1.0, 0.0),
];

const MUTE_INPUTS: [PortInfo; 5] = [
    PortInfo::new("Mute 1 CV"),
    PortInfo::new("Mute 2 CV"),
    PortInfo::new("Mute 3 CV"),
    PortInfo::new("Mute 4 CV"),
    PortInfo::new("Mute master CV"),
];

const SOLO_INPUTS: [PortInfo; 4] = [
    PortInfo::new("Solo 1 CV"),
    PortInfo::new("Solo 2 CV"),
    PortInfo::new("Solo 3 CV"),
    PortInfo::new("Solo 4 CV"),
];

const PAN_INPUTS: [PortInfo; 4] = [
    PortInfo::new("Pan 1 CV"),
    PortInfo::new("Pan 2 CV"),
    PortInfo::new("Pan 3 CV"),
    PortInfo::new("Pan 4 CV"),
];

const SEND_INPUTS: [PortInfo; 2] = [PortInfo::new("Return L"), PortInfo::new("Return R")];
const SEND_OUTPUTS: [PortInfo; 2] = [PortInfo::new("Send L"), PortInfo::new("Send R")];

const FADE_OUTPUTS: [PortInfo; 5] = [
    PortInfo::new("Gain 1"),
    PortInfo::new("Gain 2"),
    PortInfo::new("Gain 3"),
    PortInfo::new("Gain 4"),
    PortInfo::new("Gain master"),
];

pub static MUTE_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "mute",
    params: &MUTE_PARAMS,
    inputs: &MUTE_INPUTS,
    outputs: &[],
};

pub static SOLO_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "solo",
    params: &SOLO_PARAMS,
    inputs: &SOLO_INPUTS,
    outputs: &[],
};

pub static PAN_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "pan",
    params: &PAN_PARAMS,
    inputs: &PAN_INPUTS,
    outputs: &[],
};

pub static SEND_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "send",
    params: &SEND_PARAMS,
    inputs: &SEND_INPUTS,
    outputs: &SEND_OUTPUTS,
};

pub static OFFSET_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "offset",
    params: &OFFSET_PARAMS,
    inputs: &[],
    outputs: &[],
};

pub static FADE_DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    kind: "fade",
    params: &FADE_PARAMS,
    inputs: &[],
    outputs: &FADE_OUTPUTS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_mode_flips_on_rising_edge() {
        let mut bank = MuteUnit::new();
        bank.cv[1] = PolyInput::mono(5.0);
        bank.update();
        assert!(bank.states()[1]);

        // Held high: no further flip
        bank.update();
        assert!(bank.states()[1]);

        bank.cv[1] = PolyInput::mono(0.0);
        bank.update();
        bank.cv[1] = PolyInput::mono(5.0);
        bank.update();
        assert!(!bank.states()[1]);
    }

    #[test]
    fn test_gate_mode_follows_cv() {
        let mut bank = SoloUnit::new();
        bank.toggle = false;
        bank.pressed[0] = true;
        bank.cv[0] = PolyInput::mono(0.0);
        bank.update();
        assert!(!bank.states()[0], "patched CV overrides the button");

        bank.cv[0] = PolyInput::mono(2.0);
        bank.update();
        assert!(bank.states()[0]);

        bank.cv[0] = PolyInput::disconnected();
        bank.update();
        assert!(bank.states()[0], "unpatched falls back to the button");
    }

    #[test]
    fn test_pan_cv_is_attenuverted_and_clamped() {
        let mut pan = PanUnit::new();
        pan.pan[0] = 0.2;
        pan.cv[0] = PolyInput::mono(2.5);
        pan.cv_amount[0] = -1.0;
        assert!((pan.pan_for(0, 0) + 0.3).abs() < 1e-6);

        pan.cv[0] = PolyInput::mono(50.0);
        pan.cv_amount[0] = 1.0;
        assert_eq!(pan.pan_for(0, 0), 1.0);
    }

    #[test]
    fn test_set_param_clamps_and_rejects_unknown() {
        let mut unit = RoleUnit::new(Role::fade());
        unit.set_param(0, 99.0).unwrap();
        assert_eq!(unit.param(0), Some(MAX_FADE_TIME));
        assert!(matches!(
            unit.set_param(3, 0.0),
            Err(RackError::ParamOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_pan_law_param_selects_law() {
        let mut unit = RoleUnit::new(Role::pan());
        unit.set_param(8, 6.0).unwrap();
        assert_eq!(unit.as_pan().map(|p| p.law), Some(PanLaw::CenterDip3));
    }

    #[test]
    fn test_bypassed_send_is_cleared() {
        let mut unit = RoleUnit::new(Role::send());
        if let Some(send) = unit.as_send_mut() {
            send.send_left.write(&[1.0]);
        }
        unit.bypassed = true;
        unit.process();
        assert_eq!(unit.as_send().map(|s| s.send_left.channels()), Some(0));
    }

    #[test]
    fn test_persist_round_trip() {
        let mut unit = RoleUnit::new(Role::offset());
        unit.set_param(2, -3.5).unwrap();
        unit.set_param(9, 4.0).unwrap();
        unit.bypassed = true;

        let mut map = StateMap::new();
        unit.save(&mut map);

        let mut restored = RoleUnit::new(Role::offset());
        restored.load(&map);
        assert!(restored.bypassed);
        assert_eq!(restored.param(2), Some(-3.5));
        assert_eq!(restored.param(9), Some(4.0));
    }

    #[test]
    fn test_only_send_repeats() {
        assert!(RoleTag::Send.is_repeatable());
        assert!(!RoleTag::Mute.is_repeatable());
        assert_eq!(RoleTag::from_kind("fade"), Some(RoleTag::Fade));
    }
}
