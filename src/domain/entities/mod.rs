//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted URL ↔ fingerprint mapping
//! - [`Stored`] - Result of an insert-if-absent: freshly created or already present
//! - [`HostContext`] - Scheme and host the short URL is published under
//! - [`ShortUrl`] - What `shorten` hands back to callers
//! - [`RedirectInstruction`] - What `redirect` hands back to the HTTP layer

pub mod short_url;
pub mod url_record;

pub use short_url::{HostContext, RedirectInstruction, ShortUrl, ShortenOutcome};
pub use url_record::{Stored, UrlRecord};
