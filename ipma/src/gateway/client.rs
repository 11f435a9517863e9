//! HTTP gateway to the IPMA open-data service.
//!
//! Issues plain GET requests with the Referer header the service expects,
//! decodes JSON bodies and classifies every failure as a [`RetrievalError`].
//! Retrying is left to the callers.

use std::future::Future;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, REFERER};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::IpmaConfig;

use super::error::RetrievalError;

/// Parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Body served as `application/json`
    Json(serde_json::Value),
    /// Any other content type, returned verbatim
    Text(String),
}

impl Body {
    /// Interpret the body as JSON.
    ///
    /// Some datasets are served with a non-JSON content type even though
    /// their payload is JSON, so text bodies are parsed as well.
    pub fn into_json(self, url: &str) -> Result<serde_json::Value, RetrievalError> {
        match self {
            Body::Json(value) => Ok(value),
            Body::Text(text) => serde_json::from_str(&text).map_err(|e| RetrievalError::Decode {
                url: url.to_string(),
                message: format!("{e} (body: {})", snippet(&text)),
            }),
        }
    }
}

/// Source of upstream datasets.
///
/// [`HttpGateway`] is the production implementation. `MockGateway`, built
/// under `cfg(test)` or the `mock` feature, serves canned payloads.
pub trait Gateway: Send + Sync {
    /// GET `url` and return its parsed body.
    fn retrieve(&self, url: &str) -> impl Future<Output = Result<Body, RetrievalError>> + Send;
}

/// Fetch `url` and decode it into `T`.
pub(crate) async fn fetch_json<G, T>(gateway: &G, url: &str) -> Result<T, RetrievalError>
where
    G: Gateway,
    T: DeserializeOwned,
{
    let value = gateway.retrieve(url).await?.into_json(url)?;
    serde_json::from_value(value).map_err(|e| RetrievalError::decode(url, e))
}

/// reqwest-backed gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway with the Referer and timeout from `config`.
    pub fn new(config: &IpmaConfig) -> Result<Self, RetrievalError> {
        let mut headers = HeaderMap::new();

        let referer =
            HeaderValue::from_str(&config.referer).map_err(|e| RetrievalError::Transport {
                url: config.base_url.clone(),
                message: format!("invalid Referer header: {e}"),
            })?;
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RetrievalError::Transport {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { http })
    }
}

impl Gateway for HttpGateway {
    async fn retrieve(&self, url: &str) -> Result<Body, RetrievalError> {
        debug!(url, "GET");

        let transport = |e: reqwest::Error| RetrievalError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let text = response.text().await.map_err(transport)?;

        if is_json {
            serde_json::from_str(&text)
                .map(Body::Json)
                .map_err(|e| RetrievalError::Decode {
                    url: url.to_string(),
                    message: format!("{e} (body: {})", snippet(&text)),
                })
        } else {
            Ok(Body::Text(text))
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
