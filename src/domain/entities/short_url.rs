//! Value types produced by the shortening service.

/// Scheme and host under which short URLs are published.
///
/// Usually taken from the incoming request (see
/// [`crate::utils::extract_host`]), so the same record yields
/// `http://localhost:8080/to/…` in development and `https://s.example/to/…`
/// in production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub scheme: String,
    /// Host as presented by the client, including a port if one was given.
    pub host: String,
}

impl HostContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Composes the public short URL for a fingerprint.
    pub fn short_url(&self, fingerprint: &str) -> String {
        format!("{}://{}/to/{}", self.scheme, self.host, fingerprint)
    }
}

/// Whether `shorten` stored a new record or reused an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenOutcome {
    Stored,
    Deduplicated,
}

/// Result of shortening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub original: String,
    pub shortened: String,
    pub fingerprint: String,
    pub outcome: ShortenOutcome,
}

/// Instruction for the HTTP layer to send a "see other" redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    pub status: u16,
    pub location: String,
}

impl RedirectInstruction {
    /// HTTP 303 See Other.
    pub const SEE_OTHER: u16 = 303;

    pub fn see_other(location: impl Into<String>) -> Self {
        Self {
            status: Self::SEE_OTHER,
            location: location.into(),
        }
    }
}
