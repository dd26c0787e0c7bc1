//! Batch/stream driver: strictly sequential line-by-line ingestion.
//!
//! Batch phase: header line, then events applied with sequence indices
//! 1, 2, .. per event line. Stream phase: every purchase is evaluated
//! against the graph as it stood BEFORE the event, flagged records are
//! written out, and only then is the event applied; the sequence index for
//! a stream apply is the node count plus one, computed before the apply,
//! because it feeds the ordering key of the reference window.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{Amount, Event, GraphStore, UserId, apply_event, evaluate, resolve};
use crate::detector::{ConfigError, DetectorConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} line {}: {}", .path.display(), .line, .source)]
    MalformedLine {
        path: PathBuf,
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {}", .path.display(), .source)]
    BadHeader {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("{}: failed to encode anomaly record: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Totals for the stream phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stream_events: u64,
    pub flagged: u64,
}

/// Batch phase: reads the header, then folds every event into a fresh
/// store. No anomaly evaluation happens here.
pub fn load_batch(path: &Path) -> Result<(DetectorConfig, GraphStore), RunError> {
    let mut lines = LineReader::open(path)?;

    // The header is the literal first line; a blank one is as fatal as a
    // malformed one.
    let Some((_, header)) = lines.next_raw()? else {
        return Err(RunError::BadHeader {
            path: path.to_path_buf(),
            source: ConfigError::MissingHeader,
        });
    };
    let config = DetectorConfig::parse_header(&header).map_err(|source| RunError::BadHeader {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        degree = config.degree(),
        window = config.window(),
        "building initial graph"
    );

    let mut store = GraphStore::new();
    let mut seq = 0u64;
    while let Some((line_no, line)) = lines.next_event()? {
        let event = parse_event(path, line_no, &line)?;
        seq += 1;
        apply_event(&mut store, &event, seq);
    }
    info!(users = store.len(), events = seq, "initial graph ready");

    Ok((config, store))
}

/// Stream phase: evaluate purchases on the pre-update graph, write flagged
/// records to `anomaly_path`, then apply each event.
pub fn process_stream(
    store: &mut GraphStore,
    config: DetectorConfig,
    stream_path: &Path,
    anomaly_path: &Path,
) -> Result<RunSummary, RunError> {
    let mut lines = LineReader::open(stream_path)?;
    let out = File::create(anomaly_path).map_err(|source| RunError::Io {
        path: anomaly_path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(out);

    let mut summary = RunSummary::default();
    while let Some((line_no, line)) = lines.next_event()? {
        let event = parse_event(stream_path, line_no, &line)?;

        if let Event::Purchase {
            id,
            timestamp,
            amount,
        } = &event
        {
            let neighborhood = resolve(store, id, config.degree());
            match evaluate(store, &neighborhood, config.window(), amount.value()) {
                Some(eval) if eval.anomalous => {
                    write_flagged(&mut out, anomaly_path, id, timestamp, amount, eval.mean, eval.sd)?;
                    summary.flagged += 1;
                }
                Some(_) => {}
                None => debug!(
                    user = %id,
                    line = line_no,
                    "no purchase history in neighborhood, evaluation skipped"
                ),
            }
        }

        let seq = store.len() as u64 + 1;
        apply_event(store, &event, seq);
        summary.stream_events += 1;
    }

    out.flush().map_err(|source| RunError::Io {
        path: anomaly_path.to_path_buf(),
        source,
    })?;
    info!(
        events = summary.stream_events,
        flagged = summary.flagged,
        "stream complete"
    );
    Ok(summary)
}

/// Flagged purchase, one JSON object per line. Field order is part of the
/// output contract; `timestamp` and `amount` echo the wire text verbatim.
#[derive(Debug, Serialize)]
struct AnomalyRecord<'a> {
    event_type: &'a str,
    timestamp: &'a str,
    id: &'a str,
    amount: &'a str,
    mean: String,
    sd: String,
}

fn write_flagged(
    out: &mut impl Write,
    path: &Path,
    id: &UserId,
    timestamp: &str,
    amount: &Amount,
    mean: f64,
    sd: f64,
) -> Result<(), RunError> {
    let record = AnomalyRecord {
        event_type: "purchase",
        timestamp,
        id: id.as_str(),
        amount: amount.as_str(),
        mean: format!("{mean:.2}"),
        sd: format!("{sd:.2}"),
    };
    let json = serde_json::to_string(&record).map_err(|source| RunError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(out, "{json}").map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_event(path: &Path, line: u64, raw: &str) -> Result<Event, RunError> {
    serde_json::from_str(raw).map_err(|source| RunError::MalformedLine {
        path: path.to_path_buf(),
        line,
        source,
    })
}

/// Line reader that tracks 1-based line numbers for error reporting.
struct LineReader {
    path: PathBuf,
    reader: BufReader<File>,
    line_no: u64,
}

impl LineReader {
    fn open(path: &Path) -> Result<Self, RunError> {
        let file = File::open(path).map_err(|source| RunError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            line_no: 0,
        })
    }

    /// Next line verbatim (trailing newline stripped), or `None` at EOF.
    fn next_raw(&mut self) -> Result<Option<(u64, String)>, RunError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|source| RunError::Io {
                path: self.path.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        self.line_no += 1;
        Ok(Some((self.line_no, line)))
    }

    /// Next non-blank line; whitespace-only lines are skipped and do not
    /// consume a sequence index.
    fn next_event(&mut self) -> Result<Option<(u64, String)>, RunError> {
        while let Some((line_no, line)) = self.next_raw()? {
            if !line.trim().is_empty() {
                return Ok(Some((line_no, line)));
            }
        }
        Ok(None)
    }
}
