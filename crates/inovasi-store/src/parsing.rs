//! JSON parsing functions for PostgREST responses.
//!
//! This module provides sync parsing functions that convert raw response
//! bodies into domain records or error messages.

use crate::error::{RestError, RestResult};
use crate::http::HttpResponse;
use inovasi_core::Record;
use serde::Deserialize;

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract a displayable message from an error body.
///
/// Uses PostgREST's `message` field when present, otherwise the raw body.
pub fn error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    if let Some(message) = parsed {
        return message;
    }
    let raw = body.trim();
    if raw.is_empty() {
        format!("HTTP {status}")
    } else {
        raw.to_string()
    }
}

/// Turn a non-success response into `RestError::Status`.
pub fn ensure_success(response: HttpResponse) -> RestResult<String> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(RestError::Status {
            status: response.status,
            message: error_message(response.status, &response.body),
        })
    }
}

/// Parse a row array.
pub fn parse_records(body: &str) -> RestResult<Vec<Record>> {
    Ok(serde_json::from_str(body)?)
}

/// Parse the representation returned by an insert; PostgREST echoes an array.
pub fn parse_inserted(body: &str) -> RestResult<Record> {
    parse_records(body)?
        .into_iter()
        .next()
        .ok_or_else(|| RestError::InvalidResponse {
            message: "Insert returned no rows".to_string(),
        })
}
