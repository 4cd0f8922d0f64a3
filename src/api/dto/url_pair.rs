//! Structured success body for shorten and lookup.

use serde::{Deserialize, Serialize};

/// `{"status_code": 200, "original": "...", "shortened": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPairBody {
    pub status_code: u16,
    pub original: String,
    pub shortened: String,
}
