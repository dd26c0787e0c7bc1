//! Detector core: graph model, event application, neighborhood resolution,
//! reference-window statistics.
//!
//! Layering, leaves first:
//! - identity: UserId
//! - graph: Purchase, UserNode, GraphStore
//! - event: wire events
//! - apply: event -> store mutation
//! - neighborhood: bounded-degree reachability
//! - stats: window selection + mean/sd classification

pub mod apply;
pub mod event;
pub mod graph;
pub mod identity;
pub mod neighborhood;
pub mod stats;

pub use apply::{ApplyOutcome, apply_event};
pub use event::{Amount, Event};
pub use graph::{GraphStore, Purchase, UserNode};
pub use identity::{InvalidUserId, UserId};
pub use neighborhood::resolve;
pub use stats::{Evaluation, evaluate};
