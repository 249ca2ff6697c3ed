//! Author birth records, stored as base64-encoded JSON.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// One author and the approximate birth year (or range) shown for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    #[serde(alias = "birth", alias = "born")]
    pub birth_info: String,
}

/// Decode the authors file content.
///
/// Line breaks inside the base64 payload are ignored.
pub fn decode_authors(raw: &[u8]) -> Result<Vec<AuthorRecord>, String> {
    let compact: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let json = STANDARD
        .decode(compact)
        .map_err(|e| format!("invalid base64: {e}"))?;
    serde_json::from_slice(&json).map_err(|e| format!("invalid JSON: {e}"))
}
