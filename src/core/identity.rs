//! Identity atoms.
//!
//! UserId: opaque participant identifier from the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user id that failed validation at the wire boundary.
#[derive(Debug, Error)]
#[error("invalid user id: {reason}")]
pub struct InvalidUserId {
    pub reason: &'static str,
}

/// User identifier - non-empty opaque string.
///
/// Ids arrive on the wire and are never generated locally. The graph treats
/// them as opaque keys; no validation beyond non-empty.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidUserId> {
        let s = s.into();
        if s.is_empty() {
            Err(InvalidUserId { reason: "empty" })
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> String {
        id.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({:?})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
