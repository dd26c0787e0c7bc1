//! CLI surface: four positional paths plus report knobs.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::info;

use crate::driver::{self, RunError};
use crate::report;
use crate::Result;

#[derive(Parser, Debug)]
#[command(
    name = "pw",
    version,
    about = "Flags purchases that stand out from a buyer's social network"
)]
pub struct Cli {
    /// Batch input: a header line with D and T, then one event per line.
    pub batch: PathBuf,

    /// Stream input: one event per line, no header.
    pub stream: PathBuf,

    /// Output file for flagged purchases (one JSON object per line).
    pub anomaly_out: PathBuf,

    /// Output file for the largest-network report.
    pub network_out: PathBuf,

    /// How many users the network report lists.
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub top: usize,

    /// Neighborhood degree used by the network report.
    #[arg(long, default_value_t = 2, value_name = "D")]
    pub network_degree: u32,

    /// Errors only.
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Full run: batch graph, stream evaluation, network report.
pub fn run(cli: Cli) -> Result<()> {
    let (config, mut store) = driver::load_batch(&cli.batch)?;
    let summary = driver::process_stream(&mut store, config, &cli.stream, &cli.anomaly_out)?;

    let file = File::create(&cli.network_out).map_err(|source| RunError::Io {
        path: cli.network_out.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    let report_io = |source| RunError::Io {
        path: cli.network_out.clone(),
        source,
    };
    report::write_network_report(&mut out, &store, cli.network_degree, cli.top)
        .map_err(report_io)?;
    out.flush().map_err(report_io)?;

    info!(flagged = summary.flagged, "run complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_paths_parse() {
        let cli = parse_from(["pw", "batch.json", "stream.json", "out.json", "report.txt"]);
        assert_eq!(cli.batch, PathBuf::from("batch.json"));
        assert_eq!(cli.network_out, PathBuf::from("report.txt"));
        assert_eq!(cli.top, 10);
        assert_eq!(cli.network_degree, 2);
    }

    #[test]
    fn report_knobs_parse() {
        let cli = parse_from([
            "pw", "b", "s", "a", "n", "--top", "3", "--network-degree", "1", "-vv",
        ]);
        assert_eq!(cli.top, 3);
        assert_eq!(cli.network_degree, 1);
        assert_eq!(cli.verbose, 2);
    }
}
