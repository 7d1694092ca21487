//! Whole-bus scenarios, from a bare mono bus to a fully loaded stereo chain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use mixbus::{
    dsp::{ClipMode, VcaMode},
    io::PolyInput,
    rack::Role,
    BusVariant, FrameCtx, Rack, UnitId, MASTER, MAX_POLY,
};

use crate::BLOCK_SIZES;

fn render(rack: &mut Rack, ctx: &mut FrameCtx, frames: usize) {
    for _ in 0..frames {
        rack.process(ctx);
        ctx.advance();
    }
}

fn feed(rack: &mut Rack, bus: UnitId, voices: usize, cv: bool) {
    let Some(b) = rack.bus_mut(bus) else {
        return;
    };
    let volts: Vec<f32> = (0..voices).map(|v| v as f32 * 0.25).collect();
    for i in 0..4 {
        b.inputs.left[i] = PolyInput::poly(&volts);
        if cv {
            b.inputs.cv[i] = PolyInput::poly(&[7.5; MAX_POLY][..voices]);
        }
    }
    if cv {
        b.inputs.cv[MASTER] = PolyInput::mono(8.0);
    }
}

pub fn bench_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bus");

    for &size in BLOCK_SIZES {
        // === BARE: mono bus, nothing attached ===
        let mut bare = Rack::new(48_000.0);
        let bus = bare.push_bus(BusVariant::MONO);
        feed(&mut bare, bus, 1, false);
        let mut ctx = FrameCtx::new(48_000.0);

        group.bench_with_input(BenchmarkId::new("bare_mono", size), &size, |b, &size| {
            b.iter(|| render(black_box(&mut bare), &mut ctx, size))
        });

        // === LOADED: stereo bus with every role and two sends ===
        let mut loaded = Rack::new(48_000.0);
        let bus = loaded.push_bus(BusVariant::STEREO);
        for role in [
            Role::mute(),
            Role::solo(),
            Role::pan(),
            Role::offset(),
            Role::send(),
            Role::send(),
            Role::fade(),
        ] {
            loaded.push_role(role);
        }
        feed(&mut loaded, bus, 4, false);
        if let Some(b) = loaded.bus_mut(bus) {
            b.params.clip_mode = ClipMode::OversampledSoft;
        }
        let mut ctx = FrameCtx::new(48_000.0);

        group.bench_with_input(BenchmarkId::new("loaded_stereo", size), &size, |b, &size| {
            b.iter(|| render(black_box(&mut loaded), &mut ctx, size))
        });

        // === POLY VCA: 16 voices band-limited on every channel ===
        let mut poly = Rack::new(48_000.0);
        let bus = poly.push_bus(BusVariant::VCA_STEREO);
        poly.push_role(Role::fade());
        feed(&mut poly, bus, 16, true);
        if let Some(b) = poly.bus_mut(bus) {
            b.params.vca_mode = VcaMode::BandLimitedExponential;
        }
        let mut ctx = FrameCtx::new(48_000.0);

        group.bench_with_input(BenchmarkId::new("vca_16_voices", size), &size, |b, &size| {
            b.iter(|| render(black_box(&mut poly), &mut ctx, size))
        });
    }

    group.finish();
}
