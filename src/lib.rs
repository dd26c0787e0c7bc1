#![forbid(unsafe_code)]

//! One-pass purchase anomaly detection over a social graph.
//!
//! A batch phase folds an event log (befriend, unfriend, purchase) into an
//! in-memory graph; a stream phase replays further events, testing each
//! purchase against the mean and population standard deviation of its
//! buyer's D-degree neighborhood before folding it in.

pub mod cli;
pub mod core;
pub mod detector;
pub mod driver;
pub mod error;
pub mod report;
pub mod telemetry;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Amount, ApplyOutcome, Evaluation, Event, GraphStore, Purchase, UserId, UserNode, apply_event,
    evaluate, resolve,
};
pub use crate::detector::DetectorConfig;
pub use crate::driver::RunSummary;
