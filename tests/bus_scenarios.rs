use mixbus::{
    bus::LevelMode,
    control::RackMessage,
    dsp::{ClipMode, VcaMode, VcaStage},
    io::PolyInput,
    rack::{MuteSoloBinding, Role},
    BusVariant, FrameCtx, Module, Rack, UnitId,
};
use rustfft::{num_complex::Complex, FftPlanner};

const SR: f32 = 48_000.0;

/// Run `frames` frames, advancing `ctx`.
fn run(rack: &mut Rack, ctx: &mut FrameCtx, frames: usize) {
    for _ in 0..frames {
        rack.process(ctx);
        ctx.advance();
    }
}

fn mix(rack: &Rack, bus: UnitId) -> f32 {
    rack.bus(bus).map_or(f32::NAN, |b| b.outputs.mix_left.voltage(0))
}

/// Mono bus with `volts` on every channel.
fn loaded_bus(rack: &mut Rack, volts: [f32; 4]) -> UnitId {
    let bus = rack.push_bus(BusVariant::MONO);
    if let Some(b) = rack.bus_mut(bus) {
        for (input, v) in b.inputs.left.iter_mut().zip(volts) {
            *input = PolyInput::mono(v);
        }
    }
    bus
}

#[test]
fn clip_modes_limit_a_hot_mix() {
    // 4 x 5 V at x2, master at unity
    for (mode, lo, hi) in [
        (ClipMode::Off, 40.0, 40.0),
        (ClipMode::Hard, 10.0, 10.0),
        (ClipMode::Soft, 9.01, 10.0),
    ] {
        let mut rack = Rack::new(SR);
        let bus = loaded_bus(&mut rack, [5.0; 4]);
        let b = rack.bus_mut(bus).unwrap();
        b.params.level_mode = LevelMode::DbAudioX2;
        b.params.levels = [1.0; 4];
        b.params.master = 0.5;
        b.params.clip_mode = mode;

        let mut ctx = FrameCtx::new(SR);
        run(&mut rack, &mut ctx, 1);
        let v = mix(&rack, bus);
        assert!((lo..=hi).contains(&v), "{mode:?} gave {v}");
    }
}

#[test]
fn oversampled_soft_clip_settles_under_ceiling() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [5.0; 4]);
    let b = rack.bus_mut(bus).unwrap();
    b.params.levels = [1.0; 4];
    b.params.clip_mode = ClipMode::OversampledSoft;

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 2_000);
    let v = mix(&rack, bus);
    assert!((v - 10.0).abs() < 0.01, "settled at {v}");
}

#[test]
fn hard_mute_drops_channel_on_first_frame() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 2.0, 3.0, 4.0]);
    let mute = rack.push_role(Role::mute());
    rack.set_param(mute, 5, 0.0).unwrap();

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 10.0);

    rack.set_param(mute, 0, 1.0).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 9.0);

    rack.set_param(mute, 0, 0.0).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 10.0);
}

#[test]
fn soft_mute_converges_within_one_sample_of_fall_time() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 0.0, 0.0, 0.0]);
    let mute = rack.push_role(Role::mute());
    let fade = rack.push_role(Role::fade());
    rack.set_param(fade, 1, 0.01).unwrap();
    rack.set_param(mute, 0, 1.0).unwrap();

    // 10 ms at 48 kHz
    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 479);
    let gain = rack.bus(bus).unwrap().fade().gain(0);
    assert!(gain > 0.0, "fade finished early");

    run(&mut rack, &mut ctx, 2);
    assert_eq!(rack.bus(bus).unwrap().fade().gain(0), 0.0);
    assert_eq!(mix(&rack, bus), 0.0);
}

#[test]
fn removing_mute_glides_channel_back() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 0.0, 0.0, 0.0]);
    let mute = rack.push_role(Role::mute());
    rack.set_param(mute, 0, 1.0).unwrap();

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 4_000);
    assert_eq!(mix(&rack, bus), 0.0);

    rack.remove(mute).unwrap();
    run(&mut rack, &mut ctx, 1);
    let first = mix(&rack, bus);
    assert!(first > 0.0 && first < 1.0, "expected a glide, got {first}");

    run(&mut rack, &mut ctx, 4_000);
    assert_eq!(mix(&rack, bus), 1.0);
}

#[test]
fn removing_send_drops_its_return_next_frame() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 0.0, 0.0, 0.0]);
    let send = rack.push_role(Role::send());
    if let Some(s) = rack.role_mut(send).and_then(|u| u.as_send_mut()) {
        s.return_left = PolyInput::mono(3.0);
    }

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 4.0);

    rack.remove(send).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 1.0);
    assert_eq!(rack.bus(bus).unwrap().plan().send_count(), 0);
}

#[test]
fn solo_overrides_mute() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 2.0, 3.0, 4.0]);
    let mute = rack.push_role(Role::mute());
    let solo = rack.push_role(Role::solo());
    rack.set_param(mute, 5, 0.0).unwrap();
    rack.set_param(solo, 4, 0.0).unwrap();

    rack.set_param(mute, 0, 1.0).unwrap();
    rack.set_param(solo, 0, 1.0).unwrap();
    rack.set_param(solo, 2, 1.0).unwrap();

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 4.0);

    // Releasing every solo hands control back to the mutes
    rack.set_param(solo, 0, 0.0).unwrap();
    rack.set_param(solo, 2, 0.0).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 9.0);
}

#[test]
fn discovery_stops_at_foreign_module() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 1.0, 0.0, 0.0]);
    let pan = rack.push_role(Role::pan());
    rack.push(Module::Foreign);
    let mute = rack.push_role(Role::mute());
    rack.set_param(mute, 5, 0.0).unwrap();
    rack.set_param(mute, 0, 1.0).unwrap();

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);

    let b = rack.bus(bus).unwrap();
    assert_eq!(b.plan().pan, Some(pan));
    assert_eq!(b.plan().mute_solo, MuteSoloBinding::None);
    assert_eq!(mix(&rack, bus), 2.0);
}

#[test]
fn discovery_stops_at_duplicate_role() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 1.0, 0.0, 0.0]);
    let first = rack.push_role(Role::mute());
    let second = rack.push_role(Role::mute());
    for unit in [first, second] {
        rack.set_param(unit, 5, 0.0).unwrap();
    }
    rack.set_param(second, 0, 1.0).unwrap();

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);

    assert_eq!(rack.bus(bus).unwrap().plan().mute_solo, MuteSoloBinding::Mute(first));
    assert_eq!(mix(&rack, bus), 2.0);
}

#[test]
fn joining_across_a_gap_attaches_units() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 1.0, 0.0, 0.0]);
    let foreign = rack.push(Module::Foreign);
    let mute = rack.push_role(Role::mute());
    rack.set_param(mute, 5, 0.0).unwrap();
    rack.set_param(mute, 0, 1.0).unwrap();

    rack.remove(foreign).unwrap();
    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 2.0);

    rack.join(bus, mute).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 1.0);
}

#[test]
fn bypassed_unit_is_transparent() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [1.0, 1.0, 0.0, 0.0]);
    let mute = rack.push_role(Role::mute());
    let send = rack.push_role(Role::send());
    rack.set_param(mute, 5, 0.0).unwrap();
    rack.set_param(mute, 1, 1.0).unwrap();
    if let Some(s) = rack.role_mut(send).and_then(|u| u.as_send_mut()) {
        s.return_left = PolyInput::mono(5.0);
    }

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 6.0);

    rack.set_bypassed(mute, true).unwrap();
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 7.0);
}

#[test]
fn rack_json_round_trip() {
    let mut rack = Rack::new(SR);
    let bus = rack.push_bus(BusVariant::VCA_STEREO);
    let mute = rack.push_role(Role::mute());
    let send = rack.push_role(Role::send());
    let gap = rack.push(Module::Foreign);
    rack.push_role(Role::fade());
    rack.remove(gap).unwrap();

    rack.set_param(bus, 2, 0.8).unwrap();
    rack.set_param(bus, 7, 3.0).unwrap();
    rack.set_param(mute, 3, 1.0).unwrap();
    rack.set_param(send, 6, 1.0).unwrap();
    rack.set_bypassed(send, true).unwrap();

    let json = serde_json::to_string(&rack.to_json()).unwrap();
    let restored = Rack::from_json_str(&json, SR).unwrap();

    assert_eq!(restored.to_json(), rack.to_json());
    assert_eq!(restored.registry().rows().len(), 2);
    let ids: Vec<_> = restored.registry().rows().concat();
    let b = restored.bus(ids[0]).unwrap();
    assert_eq!(b.variant(), BusVariant::VCA_STEREO);
    assert_eq!(b.params.levels[2], 0.8);
    assert_eq!(b.params.clip_mode, ClipMode::OversampledSoft);
    assert!(restored.role(ids[2]).unwrap().bypassed);
}

#[test]
fn role_settings_survive_a_reload() {
    let mut rack = Rack::new(SR);
    let bus = rack.push_bus(BusVariant::STEREO);
    let solo = rack.push_role(Role::solo());
    let pan = rack.push_role(Role::pan());
    let send = rack.push_role(Role::send());
    let fade = rack.push_role(Role::fade());

    let settings: [(UnitId, &[(usize, f32)]); 4] = [
        (solo, &[(1, 1.0), (4, 0.0), (5, 0.0)]),
        (
            pan,
            &[
                (0, -0.75),
                (1, 0.25),
                (2, 0.5),
                (3, -1.0),
                (4, -0.5),
                (5, 0.0),
                (6, 0.25),
                (7, -1.0),
                (8, 6.0),
            ],
        ),
        (send, &[(0, 0.25), (2, 0.75), (4, 0.5), (5, 0.125), (6, 1.0)]),
        (fade, &[(0, 0.25), (1, 1.5), (2, -0.625)]),
    ];
    for (unit, params) in settings {
        for &(param, value) in params {
            rack.set_param(unit, param, value).unwrap();
        }
    }

    let json = serde_json::to_string(&rack.to_json()).unwrap();
    let mut restored = Rack::from_json_str(&json, SR).unwrap();
    let ids: Vec<_> = restored.registry().rows().concat();
    assert_eq!(ids.len(), 5);

    for ((unit, params), &restored_id) in settings.iter().zip(&ids[1..]) {
        let original = rack.role(*unit).unwrap();
        let reloaded = restored.role(restored_id).unwrap();
        assert_eq!(reloaded.tag(), original.tag());
        for &(param, value) in params.iter() {
            assert_eq!(reloaded.param(param), Some(value), "{:?} param {param}", original.tag());
        }
    }

    // Same inputs through both racks give the same mix
    for (r, b) in [(&mut rack, bus), (&mut restored, ids[0])] {
        if let Some(bus) = r.bus_mut(b) {
            for (i, input) in bus.inputs.left.iter_mut().enumerate() {
                *input = PolyInput::mono(i as f32 + 1.0);
            }
        }
    }
    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 64);
    let mut ctx = FrameCtx::new(SR);
    run(&mut restored, &mut ctx, 64);

    let (a, b) = (rack.bus(bus).unwrap(), restored.bus(ids[0]).unwrap());
    assert_eq!(a.outputs.mix_left.voltage(0), b.outputs.mix_left.voltage(0));
    assert_eq!(a.outputs.mix_right.voltage(0), b.outputs.mix_right.voltage(0));
}

#[test]
fn messages_cross_the_ring_buffer() {
    let mut rack = Rack::new(SR);
    let bus = loaded_bus(&mut rack, [2.0, 2.0, 0.0, 0.0]);
    let mute = rack.push_role(Role::mute());

    let (mut producer, mut consumer) = rtrb::RingBuffer::<RackMessage>::new(8);
    producer
        .push(RackMessage::SetParam {
            unit: mute,
            param: 5,
            value: 0.0,
        })
        .unwrap();
    producer
        .push(RackMessage::SetParam {
            unit: mute,
            param: 1,
            value: 1.0,
        })
        .unwrap();
    producer
        .push(RackMessage::SetBypass {
            unit: bus,
            bypassed: true,
        })
        .unwrap();

    let report = rack.drain_messages(&mut consumer);
    assert_eq!(report.applied, 2);
    assert_eq!(report.rejected, 1);

    let mut ctx = FrameCtx::new(SR);
    run(&mut rack, &mut ctx, 1);
    assert_eq!(mix(&rack, bus), 2.0);
}

/// Amplitude of FFT bin `bin` for a real signal.
fn bin_amplitude(spectrum: &[Complex<f32>], bin: usize) -> f32 {
    spectrum[bin].norm() * 2.0 / spectrum.len() as f32
}

fn am_spectrum(mode: VcaMode) -> Vec<Complex<f32>> {
    const WARMUP: usize = 1_000;
    const N: usize = 4_800;
    let mut stage = VcaStage::new();
    let mut buffer = Vec::with_capacity(N);

    for n in 0..WARMUP + N {
        let t = n as f32 / SR;
        let audio = 5.0 * (std::f32::consts::TAU * 1_500.0 * t).sin();
        let cv = 5.0 + 5.0 * (std::f32::consts::TAU * 7_000.0 * t).sin();
        let y = stage.process(mode, audio, cv, true);
        if n >= WARMUP {
            buffer.push(Complex::new(y, 0.0));
        }
    }

    FftPlanner::<f32>::new().plan_fft_forward(N).process(&mut buffer);
    buffer
}

#[test]
fn band_limited_vca_reduces_aliasing() {
    // gain⁴ carries a 28 kHz component; 28 kHz ± 1.5 kHz folds to 18.5 and 21.5 kHz
    let naive = am_spectrum(VcaMode::UnipolarExponential);
    let limited = am_spectrum(VcaMode::BandLimitedExponential);

    for bin in [1_850, 2_150] {
        let n = bin_amplitude(&naive, bin);
        let b = bin_amplitude(&limited, bin);
        assert!(n > 0.005, "expected an alias at bin {bin}, got {n}");
        assert!(b < n * 0.5, "bin {bin}: band-limited {b} vs naive {n}");
    }

    // The wanted sidebands survive
    let carrier_n = bin_amplitude(&naive, 150);
    let carrier_b = bin_amplitude(&limited, 150);
    assert!((carrier_b / carrier_n - 1.0).abs() < 0.1);
}
