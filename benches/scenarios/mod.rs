//! Benchmarks for composed racks.

mod bus;

pub use bus::bench_bus;
