//! Client configuration.

/// Default base URL of the IPMA open-data service.
pub const DEFAULT_BASE_URL: &str = "https://api.ipma.pt";

/// Referer the upstream service expects on every request.
pub const DEFAULT_REFERER: &str = "http://www.ipma.pt";

/// Default number of nearby candidates tried by the soft-fail accessors.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`Session`](crate::Session) and its HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpmaConfig {
    /// Base URL every dataset path is resolved against
    pub base_url: String,
    /// Value sent in the `Referer` header
    pub referer: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How many nearby forecast locations / stations / sea locations an
    /// accessor tries before giving up
    pub candidate_limit: usize,
}

impl IpmaConfig {
    /// Create a config pointing at the production service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Build a config from defaults, overridden by `IPMA_BASE_URL` and
    /// `IPMA_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(url) = std::env::var("IPMA_BASE_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }
        if let Some(secs) = std::env::var("IPMA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the Referer header value.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set how many candidates the fallback accessors try.
    pub fn with_candidate_limit(mut self, n: usize) -> Self {
        self.candidate_limit = n.max(1);
        self
    }
}

impl Default for IpmaConfig {
    fn default() -> Self {
        Self::new()
    }
}
