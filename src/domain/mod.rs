//! Domain layer: the URL ↔ fingerprint model and the store contract.
//!
//! Nothing in here knows about HTTP, SQLite, or Redis.
//!
//! - [`fingerprint`] - Deterministic token derivation and collision policy
//! - [`entities`] - Records and value types passed between layers
//! - [`repositories`] - The fingerprint store trait implemented by infrastructure

pub mod entities;
pub mod fingerprint;
pub mod repositories;
