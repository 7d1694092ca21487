//! Benchmarks for low-level bus stages.

mod clip;
mod vca;

pub use clip::bench_clip;
pub use vca::bench_vca;
