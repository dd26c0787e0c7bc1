//! Detector parameters, parsed from the batch header line.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("batch input is empty, expected a header line with D and T")]
    MissingHeader,

    #[error("malformed header line: {source}")]
    Header {
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} must be a positive integer (got {value})")]
    OutOfRange { name: &'static str, value: u64 },
}

/// Degree bound D and history window T, validated at construction: invalid
/// values are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectorConfig {
    degree: u32,
    window: usize,
}

impl DetectorConfig {
    pub fn new(degree: u64, window: u64) -> Result<Self, ConfigError> {
        let degree = u32::try_from(degree)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or(ConfigError::OutOfRange {
                name: "D",
                value: degree,
            })?;
        let window = usize::try_from(window)
            .ok()
            .filter(|w| *w >= 1)
            .ok_or(ConfigError::OutOfRange {
                name: "T",
                value: window,
            })?;
        Ok(Self { degree, window })
    }

    /// Parses the first line of the batch input.
    pub fn parse_header(line: &str) -> Result<Self, ConfigError> {
        let header: WireHeader =
            serde_json::from_str(line).map_err(|source| ConfigError::Header { source })?;
        Self::new(header.degree, header.window)
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

#[derive(Debug, Deserialize)]
struct WireHeader {
    #[serde(rename = "D", deserialize_with = "flexible_u64")]
    degree: u64,
    #[serde(rename = "T", deserialize_with = "flexible_u64")]
    window: u64,
}

/// The reference data set quotes header values (`"D":"3"`); accept both
/// string and number wire forms.
fn flexible_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexU64;

    impl Visitor<'_> for FlexU64 {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer as a string or number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom("integer out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("not an integer: {v:?}")))
        }
    }

    deserializer.deserialize_any(FlexU64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_accepts_quoted_values() {
        let config = DetectorConfig::parse_header(r#"{"D":"3", "T":"50"}"#).unwrap();
        assert_eq!(config.degree(), 3);
        assert_eq!(config.window(), 50);
    }

    #[test]
    fn header_accepts_numeric_values() {
        let config = DetectorConfig::parse_header(r#"{"D":2, "T":10}"#).unwrap();
        assert_eq!(config.degree(), 2);
        assert_eq!(config.window(), 10);
    }

    #[test]
    fn zero_degree_is_rejected() {
        let err = DetectorConfig::parse_header(r#"{"D":"0", "T":"50"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { name: "D", .. }));
    }

    #[test]
    fn missing_window_is_rejected() {
        let err = DetectorConfig::parse_header(r#"{"D":"3"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Header { .. }));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        assert!(DetectorConfig::parse_header(r#"{"D":"three", "T":"50"}"#).is_err());
    }
}
