//! mixbus - four test tones through a composed stereo VCA bus
//!
//! Run with: cargo run --bin mixbus
//! Set RUST_LOG=debug to watch rack edits.

mod app;

use app::Demo;
use env_logger::Env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    Demo::new()
        .tone(110.0, -0.6)
        .tone(220.0, 0.6)
        .tone(330.0, -0.2)
        .tone(440.0, 0.2)
        .toggle_every(std::time::Duration::from_secs(2))
        .run()
}
