//! Benchmarks for master clip modes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use mixbus::{
    bus::MasterVoice,
    dsp::{ClipMode, DcBlockMode},
};

use crate::BLOCK_SIZES;

pub fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/clip");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| 15.0 * (i as f32 * 0.1).sin()).collect();

        for (name, mode) in [
            ("hard", ClipMode::Hard),
            ("soft", ClipMode::Soft),
            ("oversampled_soft", ClipMode::OversampledSoft),
            ("saturate", ClipMode::Saturate),
        ] {
            let mut voice = MasterVoice::new(48_000.0, mode);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for &x in input.iter() {
                        let y = voice.pre_level(x, mode, DcBlockMode::Before);
                        black_box(voice.post_level(y, mode, DcBlockMode::Before));
                    }
                })
            });
        }
    }

    group.finish();
}
