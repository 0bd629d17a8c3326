//! Response envelope parsing.
//!
//! Every backend response is wrapped in a JSON envelope:
//! `{"response": "ok"|"fail", "data": ..., "code": ..., "message": ...}`.
//! An `ok` envelope unwraps to its `data` member (or the whole object when
//! no `data` key is present); a `fail` envelope becomes a [`FailResponse`]
//! carrying the backend's code and message. Anything else is a protocol
//! violation and is reported as a failure too.

use serde::Deserialize;

use crate::error::{Error, FailResponse, Result};

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<String>,
    data: Option<serde_json::Value>,
    code: Option<i64>,
    message: Option<String>,
}

/// Parse a raw response body and unwrap the envelope.
pub fn parse_envelope(raw: &str) -> Result<serde_json::Value> {
    let body: serde_json::Value = serde_json::from_str(raw)
        .map_err(|_| Error::fail(format!("cannot parse response with content '{raw}'")))?;

    let Ok(envelope) = serde_json::from_value::<Envelope>(body.clone()) else {
        return Err(Error::fail(format!(
            "cannot find response status in content '{raw}'"
        )));
    };

    match envelope.response.as_deref() {
        Some("ok") => Ok(envelope.data.unwrap_or(body)),
        Some("fail") => Err(Error::Fail(FailResponse::new(
            envelope
                .message
                .unwrap_or_else(|| format!("fail response without message in '{raw}'")),
            envelope.code,
        ))),
        _ => Err(Error::fail(format!(
            "cannot find response status in content '{raw}'"
        ))),
    }
}
