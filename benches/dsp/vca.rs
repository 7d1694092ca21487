//! Benchmarks for the per-voice VCA, direct and band-limited.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use mixbus::{
    dsp::{VcaMode, VcaStage},
    MAX_POLY,
};

use crate::BLOCK_SIZES;

pub fn bench_vca(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/vca");

    for &size in BLOCK_SIZES {
        let audio: Vec<f32> = (0..size).map(|i| 5.0 * (i as f32 * 0.1).sin()).collect();
        let cv: Vec<f32> = (0..size).map(|i| 5.0 + 5.0 * (i as f32 * 0.9).sin()).collect();

        let mut stage = VcaStage::new();
        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, _| {
            b.iter(|| {
                for (&a, &v) in audio.iter().zip(cv.iter()) {
                    black_box(stage.process(VcaMode::UnipolarLinear, a, v, true));
                }
            })
        });

        let mut stage = VcaStage::new();
        group.bench_with_input(BenchmarkId::new("band_limited", size), &size, |b, _| {
            b.iter(|| {
                for (&a, &v) in audio.iter().zip(cv.iter()) {
                    black_box(stage.process(VcaMode::BandLimitedExponential, a, v, true));
                }
            })
        });

        // Worst case: every voice of a channel band-limited in stereo
        let mut stages = [VcaStage::new(); MAX_POLY];
        group.bench_with_input(BenchmarkId::new("band_limited_16_stereo", size), &size, |b, _| {
            b.iter(|| {
                for (&a, &v) in audio.iter().zip(cv.iter()) {
                    for stage in stages.iter_mut() {
                        black_box(stage.process_stereo(VcaMode::BandLimitedLinear, a, -a, v, true));
                    }
                }
            })
        });
    }

    group.finish();
}
