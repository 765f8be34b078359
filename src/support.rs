use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Debug, Parser)]
#[command(about = "Solve one day of the puzzle calendar")]
pub struct Args {
    /// Puzzle input. Read from stdin when omitted.
    pub data_file: Option<PathBuf>,
}

impl Args {
    pub fn read_input(&self) -> Result<String> {
        match &self.data_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

pub fn setup() -> Result<String> {
    init_logging();
    let args = Args::parse();
    let input = args.read_input()?;
    tracing::debug!(bytes = input.len(), "read puzzle input");
    Ok(input)
}

pub struct Timing {
    label: &'static str,
    start: Instant,
}

impl Timing {
    pub fn start(label: &'static str) -> Timing {
        Timing {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timing {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(
            label = self.label,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "done"
        );
    }
}
