//! Runs one launch without a window and prints the flight as JSON.
//!
//! Usage: `trace [CONFIG.json]`. Without a path the config is read from stdin; an
//! empty input uses the defaults.

use std::io::Read;

use projectile::{
    error::Result,
    trace::{self, TraceConfig},
};

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let config = if json.trim().is_empty() {
        TraceConfig::default()
    } else {
        TraceConfig::from_json(&json)?
    };

    let report = trace::run(config)?;
    log::info!(
        "Traced {} ticks, finished: {}",
        report.ticks,
        report.finished
    );

    serde_json::to_writer_pretty(std::io::stdout(), &report)?;
    println!();
    Ok(())
}
