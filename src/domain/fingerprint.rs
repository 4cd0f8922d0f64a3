//! Deterministic fingerprints used as public short tokens.
//!
//! A fingerprint is the lowercase hex MD5 digest of the URL's UTF-8 bytes.
//! Fingerprints are public, so MD5 is not a security boundary here. The
//! digest must stay MD5: issued short links embed it.
//!
//! # Collisions
//!
//! Two different URLs can share a digest. For `n` stored URLs the chance of
//! any collision is roughly `n² / 2¹²⁹`, about 1.5e-27 at one million rows,
//! so the store treats the digest as advisory uniqueness. What happens when a
//! collision is detected is decided by [`CollisionPolicy`].

use md5::{Digest, Md5};
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 32;

/// Computes the fingerprint of `original`.
pub fn fingerprint(original: &str) -> String {
    hex::encode(Md5::digest(original.as_bytes()))
}

/// Returns true if `token` has the shape of a fingerprint.
///
/// Anything else can never be in the store, so callers may answer
/// "not found" without a lookup.
pub fn is_fingerprint(token: &str) -> bool {
    token.len() == FINGERPRINT_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// What the store does when a fingerprint already belongs to a different URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Log a warning and hand back the existing record.
    #[default]
    Merge,
    /// Fail the insert with [`crate::error::AppError::FingerprintCollision`].
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "collision policy must be 'merge' or 'reject', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => f.write_str("merge"),
            Self::Reject => f.write_str("reject"),
        }
    }
}
