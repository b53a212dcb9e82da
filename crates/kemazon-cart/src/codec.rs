//! Persisted cart payload.
//!
//! Version 1 wraps the lines in an envelope:
//!
//! ```json
//! { "schemaVersion": 1, "savedAt": "2026-10-18T12:00:00Z", "lines": [ ... ] }
//! ```
//!
//! A bare array of lines is the version 0 layout written before the
//! envelope existed. It is still readable and is replaced by the envelope
//! on the next write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::{Cart, CartLine};
use crate::CartError;

/// Schema version written by [`encode`].
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    lines: &'a [CartLine],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    lines: Vec<CartLine>,
}

/// Serialize a cart, stamped with the current time.
pub fn encode(cart: &Cart) -> Result<Vec<u8>, CartError> {
    encode_at(cart, Utc::now())
}

/// Serialize a cart with an explicit save timestamp.
pub fn encode_at(cart: &Cart, saved_at: DateTime<Utc>) -> Result<Vec<u8>, CartError> {
    let envelope = EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        saved_at,
        lines: cart.lines(),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parse a persisted payload.
///
/// Duplicate products are merged and out-of-range quantities normalized, so
/// the returned cart always satisfies the line invariants.
pub fn decode(bytes: &[u8]) -> Result<Cart, CartError> {
    let value: Value = serde_json::from_slice(bytes).map_err(unreadable)?;

    let lines = match &value {
        Value::Array(_) => Vec::<CartLine>::deserialize(&value).map_err(unreadable)?,
        Value::Object(fields) => {
            let version = fields
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    CartError::PersistedStateUnreadable("missing schemaVersion".to_string())
                })?;
            if version > u64::from(SCHEMA_VERSION) {
                return Err(CartError::UnsupportedSchemaVersion {
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }
            Envelope::deserialize(&value).map_err(unreadable)?.lines
        }
        other => {
            return Err(CartError::PersistedStateUnreadable(format!(
                "expected an array or object, found {}",
                json_kind(other)
            )))
        }
    };

    Ok(Cart::from_lines(lines))
}

fn unreadable(e: serde_json::Error) -> CartError {
    CartError::PersistedStateUnreadable(e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
