//! Client for the IPMA (Portuguese weather service) open-data API.
//!
//! Resolves a coordinate to the nearest forecast location, observation
//! station and sea location that currently publish data, and exposes the
//! forecasts, observations, sea forecasts, fire and UV risk and warnings
//! for that point.
//!
//! ```no_run
//! use ipma::{Coordinate, ForecastPeriod, IpmaConfig, Location, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(IpmaConfig::from_env())?;
//! let here = Coordinate::new(40.6517, -8.6573)?;
//! let location = Location::resolve(&session, here, false).await?;
//!
//! for forecast in location.forecast(ForecastPeriod::Daily).await {
//!     println!("{forecast}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod de;
pub mod domain;
pub mod error;
pub mod fire_risk;
pub mod forecast;
pub mod gateway;
pub mod location;
pub mod nearest;
pub mod observation;
pub mod reference;
pub mod sea;
pub mod session;
pub mod uv;
pub mod warnings;

#[cfg(test)]
mod testing;

pub use config::IpmaConfig;
pub use domain::{CompassPoint, Coordinate, DayOffset, Language, SeaDay};
pub use error::{CandidateKind, IpmaError};
pub use fire_risk::{FireRisk, FireRiskLevel};
pub use forecast::{Forecast, ForecastPeriod};
pub use gateway::{Gateway, HttpGateway, RetrievalError};
#[cfg(any(test, feature = "mock"))]
pub use gateway::MockGateway;
pub use location::{Location, Ranks};
pub use observation::{Observation, ObservationBoard};
pub use sea::{SeaForecast, SeaForecastDay};
pub use session::Session;
pub use uv::{UvLevel, UvRisk};
pub use warnings::{AwarenessLevel, Warning};
