//! Wire events.
//!
//! One JSON object per input line, tagged by `event_type`. Amounts keep the
//! verbatim wire text next to the parsed value so flagged output can echo
//! the input exactly.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use super::identity::UserId;

/// Purchase amount: parsed value plus verbatim wire text.
///
/// The reference data set serializes amounts as JSON strings
/// (`"amount":"16.83"`); numeric wire forms are accepted too. Non-finite
/// values are rejected at decode time so statistics never see NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    raw: String,
    value: f64,
}

impl Amount {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The amount exactly as it appeared on the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn from_wire_str(raw: String) -> Result<Self, String> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("not a decimal amount: {raw:?}"))?;
        if !value.is_finite() {
            return Err(format!("amount must be finite: {raw:?}"));
        }
        Ok(Self { raw, value })
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::from_wire_str(v.to_string()).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                if !v.is_finite() {
                    return Err(E::custom("amount must be finite"));
                }
                Ok(Amount {
                    raw: v.to_string(),
                    value: v,
                })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount {
                    raw: v.to_string(),
                    value: v as f64,
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount {
                    raw: v.to_string(),
                    value: v as f64,
                })
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// One parsed input event.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Event {
    Purchase {
        id: UserId,
        timestamp: String,
        amount: Amount,
    },
    Befriend {
        id1: UserId,
        id2: UserId,
    },
    Unfriend {
        id1: UserId,
        id2: UserId,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Purchase { .. } => "purchase",
            Event::Befriend { .. } => "befriend",
            Event::Unfriend { .. } => "unfriend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_decodes_with_string_amount() {
        let event: Event = serde_json::from_str(
            r#"{"event_type":"purchase", "id":"5", "timestamp":"2017-06-13 11:33:01", "amount":"16.80"}"#,
        )
        .unwrap();

        let Event::Purchase { id, amount, .. } = &event else {
            panic!("expected purchase, got {event:?}");
        };
        assert_eq!(id.as_str(), "5");
        assert_eq!(amount.value(), 16.80);
        // Verbatim text survives, trailing zero included.
        assert_eq!(amount.as_str(), "16.80");
    }

    #[test]
    fn purchase_decodes_with_numeric_amount() {
        let event: Event = serde_json::from_str(
            r#"{"event_type":"purchase", "id":"5", "timestamp":"t", "amount":1000}"#,
        )
        .unwrap();

        let Event::Purchase { amount, .. } = &event else {
            panic!("expected purchase");
        };
        assert_eq!(amount.value(), 1000.0);
        assert_eq!(amount.as_str(), "1000");
    }

    #[test]
    fn befriend_and_unfriend_decode() {
        let befriend: Event =
            serde_json::from_str(r#"{"event_type":"befriend", "id1":"1", "id2":"2"}"#).unwrap();
        assert_eq!(befriend.kind(), "befriend");

        let unfriend: Event =
            serde_json::from_str(r#"{"event_type":"unfriend", "id1":"1", "id2":"2"}"#).unwrap();
        assert_eq!(unfriend.kind(), "unfriend");
    }

    #[test]
    fn unknown_event_type_is_an_error() {
        let result: Result<Event, _> =
            serde_json::from_str(r#"{"event_type":"refund", "id":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_amount_is_an_error() {
        let result: Result<Event, _> = serde_json::from_str(
            r#"{"event_type":"purchase", "id":"1", "timestamp":"t", "amount":"lots"}"#,
        );
        assert!(result.is_err());
    }
}
