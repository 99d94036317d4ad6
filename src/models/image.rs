//! Base64 transport for inline images and documents
//!
//! Photos and service documents travel as base64 text in JSON and are
//! stored as raw `BYTEA`.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{AppError, AppResult};

/// Decode an optional base64 payload. Absent or blank input stores as NULL.
pub fn decode(field: &str, value: Option<&str>) -> AppResult<Option<Vec<u8>>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(encoded) => STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|e| AppError::Validation(format!("{} is not valid base64: {}", field, e))),
    }
}

pub fn encode(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| STANDARD.encode(b))
}
