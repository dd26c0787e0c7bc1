//! Tracing subscriber setup for the binary.
//!
//! Events go to stderr; stdout and the two output files stay pure data.

use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "PEERWATCH_LOG";

#[derive(Clone, Copy, Debug)]
pub struct TelemetryConfig {
    pub verbose: u8,
    pub quiet: bool,
}

impl TelemetryConfig {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn default_directive(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Installs the global subscriber. `PEERWATCH_LOG` overrides the level
/// derived from the CLI flags.
pub fn init(config: TelemetryConfig) {
    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
