//! Persisted URL record.

use chrono::{DateTime, Utc};

/// A stored mapping from an original URL to its fingerprint.
///
/// Records are immutable once created. `id` is an internal row identifier;
/// the public token is always `fingerprint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original: String,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original: String,
        fingerprint: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original,
            fingerprint,
            created_at,
        }
    }
}

/// Outcome of an insert-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored {
    /// A new row was appended.
    Created(UrlRecord),
    /// A row with the same fingerprint already existed and was returned untouched.
    Existing(UrlRecord),
}

impl Stored {
    pub fn record(&self) -> &UrlRecord {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    pub fn into_record(self) -> UrlRecord {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
