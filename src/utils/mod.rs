//! Request helpers shared by the API and web layers.
//!
//! - [`extract_host`] - Scheme/host detection for composing short URLs

pub mod extract_host;
