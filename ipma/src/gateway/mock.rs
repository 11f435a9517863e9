//! Mock gateway serving canned payloads.
//!
//! Lets repositories, accessors and the resolver run without network
//! access. Every request is counted per URL so tests can assert how often
//! a dataset was actually fetched.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::client::{Body, Gateway};
use super::error::RetrievalError;

#[derive(Debug, Clone)]
enum Canned {
    Json(serde_json::Value),
    Text(String),
    Status(u16),
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Canned>,
    requests: HashMap<String, usize>,
}

/// In-memory gateway keyed by URL.
///
/// URLs without a registered response answer with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file below `dir`, served at
    /// `{base_url}/{path relative to dir}`.
    pub fn from_dir(base_url: &str, dir: impl AsRef<Path>) -> Result<Self, RetrievalError> {
        let dir = dir.as_ref();
        let gateway = Self::new();
        let base_url = base_url.trim_end_matches('/');

        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let entries = std::fs::read_dir(&current).map_err(|e| io_error(&current, e))?;

            for entry in entries {
                let path = entry.map_err(|e| io_error(&current, e))?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                let relative = path
                    .strip_prefix(dir)
                    .map_err(|e| io_error(&path, e))?
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");

                let json = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
                let value: serde_json::Value = serde_json::from_str(&json)
                    .map_err(|e| RetrievalError::decode(&path.to_string_lossy(), e))?;

                gateway.insert_json(format!("{base_url}/{relative}"), value);
            }
        }

        Ok(gateway)
    }

    /// Serve `value` as JSON at `url`.
    pub fn with_json(self, url: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert_json(url, value);
        self
    }

    /// Serve `text` with a non-JSON content type at `url`.
    pub fn with_text(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.state()
            .responses
            .insert(url.into(), Canned::Text(text.into()));
        self
    }

    /// Answer requests to `url` with HTTP `status`.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.state()
            .responses
            .insert(url.into(), Canned::Status(status));
        self
    }

    /// Register or replace the JSON served at `url`.
    pub fn insert_json(&self, url: impl Into<String>, value: serde_json::Value) {
        self.state().responses.insert(url.into(), Canned::Json(value));
    }

    /// Number of requests made to `url` so far.
    pub fn requests(&self, url: &str) -> usize {
        self.state().requests.get(url).copied().unwrap_or(0)
    }

    /// Number of requests made to any URL so far.
    pub fn total_requests(&self) -> usize {
        self.state().requests.values().sum()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Gateway for MockGateway {
    async fn retrieve(&self, url: &str) -> Result<Body, RetrievalError> {
        let canned = {
            let mut state = self.state();
            *state.requests.entry(url.to_string()).or_insert(0) += 1;
            state.responses.get(url).cloned()
        };

        match canned {
            Some(Canned::Json(value)) => Ok(Body::Json(value)),
            Some(Canned::Text(text)) => Ok(Body::Text(text)),
            Some(Canned::Status(status)) => Err(RetrievalError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(RetrievalError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn io_error(path: &Path, err: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::Transport {
        url: path.to_string_lossy().into_owned(),
        message: err.to_string(),
    }
}
