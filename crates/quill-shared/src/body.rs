//! Request-body decoding with a strict/lenient unknown-field policy.
//!
//! Strict mode mirrors a disallow-unknown-fields decoder: any key outside
//! the declared payload shape rejects the body. Lenient mode ignores
//! unknown keys. The mode is chosen at startup, not per request.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Body decoding failures, surfaced to callers as bad-request errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// Decode a JSON request body into `T`.
pub fn decode_body<T: DeserializeOwned>(
    bytes: &[u8],
    strict: bool,
    allowed: &[&str],
) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    if strict {
        if let Some(key) = object.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(DecodeError::UnknownField(key.clone()));
        }
    }

    Ok(serde_json::from_value(value)?)
}
