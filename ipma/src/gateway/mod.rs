//! Transport gateway to the IPMA open-data service.
//!
//! The gateway is the only place that knows about HTTP. Everything above it
//! sees parsed bodies or a [`RetrievalError`].

mod client;
mod endpoints;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub(crate) use client::fetch_json;
pub use client::{Body, Gateway, HttpGateway};
pub use endpoints::Endpoints;
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGateway;
