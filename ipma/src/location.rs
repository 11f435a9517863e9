//! The weather at a point.
//!
//! [`Location::resolve`] picks the nearest forecast location, observation
//! station and (optionally) sea location that currently publish data. The
//! accessors then pull data on demand, falling back to further candidates
//! when one is offline.

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::domain::{Coordinate, DayOffset, SeaDay};
use crate::error::{CandidateKind, IpmaError};
use crate::fire_risk::FireRisk;
use crate::forecast::{Forecast, ForecastPeriod};
use crate::gateway::{Gateway, HttpGateway};
use crate::nearest;
use crate::observation::Observation;
use crate::reference::{District, ForecastLocation, SeaLocation, Station};
use crate::sea::{SeaForecast, SeaForecastDay};
use crate::session::Session;
use crate::uv::UvRisk;
use crate::warnings::Warning;

/// Starting positions in each ranked candidate list (0 = nearest).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ranks {
    pub forecast: usize,
    pub station: usize,
    pub sea: usize,
}

/// A resolved point with known-good candidates, closest first.
#[derive(Debug)]
pub struct Location<'s, G: Gateway = HttpGateway> {
    session: &'s Session<G>,
    coordinate: Coordinate,
    forecast_locations: Vec<ForecastLocation>,
    stations: Vec<Station>,
    sea_locations: Option<Vec<SeaLocation>>,
    district: OnceCell<Option<District>>,
}

impl<'s, G: Gateway> Location<'s, G> {
    /// Resolve `coordinate` starting from the nearest candidates.
    pub async fn resolve(
        session: &'s Session<G>,
        coordinate: Coordinate,
        with_sea: bool,
    ) -> Result<Self, IpmaError> {
        Self::resolve_from(session, coordinate, with_sea, Ranks::default()).await
    }

    /// Resolve `coordinate` starting from the given candidate ranks.
    ///
    /// Each round validates the selected forecast location, station and sea
    /// location together. A failing candidate advances its own rank and the
    /// round starts over. A list runs out after `candidate_limit` attempts
    /// or at its end, whichever comes first.
    pub async fn resolve_from(
        session: &'s Session<G>,
        coordinate: Coordinate,
        with_sea: bool,
        start: Ranks,
    ) -> Result<Self, IpmaError> {
        let gateway = session.gateway();
        let limit = session.config().candidate_limit;

        let forecast_locations = session.forecast_locations().get(gateway, Some(&coordinate)).await?;
        let stations = session.stations().get(gateway, Some(&coordinate)).await?;
        let sea_locations = if with_sea {
            Some(session.sea_locations().get(gateway, Some(&coordinate)).await?)
        } else {
            None
        };

        let exhausted = |kind| IpmaError::ResolutionExhausted {
            kind,
            coordinate: coordinate.to_string(),
        };
        let in_bounds = |rank: usize, start: usize, len: usize| rank < len && rank - start < limit;

        let mut ranks = start;
        loop {
            if !in_bounds(ranks.forecast, start.forecast, forecast_locations.len()) {
                return Err(exhausted(CandidateKind::ForecastLocation));
            }
            if !in_bounds(ranks.station, start.station, stations.len()) {
                return Err(exhausted(CandidateKind::ObservationStation));
            }
            if let Some(sea) = &sea_locations
                && !in_bounds(ranks.sea, start.sea, sea.len())
            {
                return Err(exhausted(CandidateKind::SeaLocation));
            }

            let location = &forecast_locations[ranks.forecast];
            if !has_forecast(session, location).await {
                ranks.forecast += 1;
                continue;
            }

            let station = &stations[ranks.station];
            if !has_observation(session, station).await {
                ranks.station += 1;
                continue;
            }

            if let Some(sea) = &sea_locations {
                let sea_location = &sea[ranks.sea];
                if !has_sea_forecast(session, sea_location).await {
                    ranks.sea += 1;
                    continue;
                }
            }

            info!(
                location = %location,
                station = %station,
                "using {} as weather station for {}",
                station.name,
                location.name
            );

            return Ok(Self {
                session,
                coordinate,
                forecast_locations: forecast_locations[ranks.forecast..].to_vec(),
                stations: stations[ranks.station..].to_vec(),
                sea_locations: sea_locations.as_ref().map(|sea| sea[ranks.sea..].to_vec()),
                district: OnceCell::new(),
            });
        }
    }

    pub fn session(&self) -> &'s Session<G> {
        self.session
    }

    /// The coordinate this location was resolved for.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn forecast_location(&self) -> &ForecastLocation {
        // resolution only succeeds with at least one candidate in each list
        &self.forecast_locations[0]
    }

    fn station(&self) -> &Station {
        &self.stations[0]
    }

    fn sea_location(&self) -> Option<&SeaLocation> {
        self.sea_locations.as_ref().and_then(|s| s.first())
    }

    pub fn name(&self) -> &str {
        &self.forecast_location().name
    }

    pub fn global_id(&self) -> u32 {
        self.forecast_location().global_id
    }

    pub fn station_name(&self) -> &str {
        &self.station().name
    }

    pub fn station_id(&self) -> u32 {
        self.station().id
    }

    pub fn station_coordinate(&self) -> Coordinate {
        self.station().coordinate
    }

    pub fn sea_location_name(&self) -> Option<&str> {
        self.sea_location().map(|s| s.name.as_str())
    }

    pub fn sea_location_global_id(&self) -> Option<u32> {
        self.sea_location().map(|s| s.global_id)
    }

    /// Forecast location candidates, the selected one first.
    pub fn forecast_candidates(&self) -> &[ForecastLocation] {
        &self.forecast_locations
    }

    /// Station candidates, the selected one first.
    pub fn station_candidates(&self) -> &[Station] {
        &self.stations
    }

    /// Sea location candidates, when sea data was requested.
    pub fn sea_candidates(&self) -> Option<&[SeaLocation]> {
        self.sea_locations.as_deref()
    }

    fn limit(&self) -> usize {
        self.session.config().candidate_limit
    }

    /// Forecast of the nearest candidate that has one.
    ///
    /// Empty when no candidate within the limit returned rows.
    pub async fn forecast(&self, period: ForecastPeriod) -> Vec<Forecast> {
        self.forecast_at(period, Utc::now()).await
    }

    pub(crate) async fn forecast_at(&self, period: ForecastPeriod, now: DateTime<Utc>) -> Vec<Forecast> {
        for location in self.forecast_locations.iter().take(self.limit()) {
            match self.session.forecast_at(location.global_id, period, now).await {
                Ok(forecasts) if !forecasts.is_empty() => return forecasts,
                Ok(_) => warn!(location = %location, "no forecast rows"),
                Err(e) => warn!(location = %location, error = %e, "could not retrieve forecast"),
            }
        }

        error!(location = %self.name(), "could not retrieve a forecast");
        Vec::new()
    }

    /// Current observation of the nearest station with a valid reading.
    pub async fn observation(&self) -> Option<Observation> {
        let board = match self.session.observations().await {
            Ok(board) => board,
            Err(e) => {
                warn!(error = %e, "could not retrieve observations");
                return None;
            }
        };

        for station in self.stations.iter().take(self.limit()) {
            debug!(station = %station, "checking observation");
            match board.current(station.id) {
                Some(observation) => return Some(observation.clone()),
                None => warn!(station = %station, "no valid observation"),
            }
        }

        error!(location = %self.name(), "could not retrieve a valid observation");
        None
    }

    /// Sea forecast for the next three days at the nearest sea location
    /// with data.
    ///
    /// Empty when sea data was not requested at resolution.
    pub async fn sea_forecast(&self) -> Vec<SeaForecast> {
        let Some(candidates) = &self.sea_locations else {
            return Vec::new();
        };

        let mut days: Vec<SeaForecastDay> = Vec::with_capacity(SeaDay::ALL.len());
        for day in SeaDay::ALL {
            match self.session.sea_forecast(day).await {
                Ok(forecast) => days.push(forecast),
                Err(e) => warn!(day = day.offset(), error = %e, "could not retrieve sea forecast"),
            }
        }

        for location in candidates.iter().take(self.limit()) {
            let records: Vec<SeaForecast> = days
                .iter()
                .filter_map(|d| d.for_location(location.global_id).cloned())
                .collect();
            if !records.is_empty() {
                return records;
            }
            warn!(location = %location, "no sea forecast");
        }

        Vec::new()
    }

    /// Fire risk of the DICO region nearest to this location.
    pub async fn fire_risk(&self, day: DayOffset) -> Option<FireRisk> {
        match self.session.fire_risk(day).await {
            Ok(risks) => nearest::closest(&self.coordinate, &risks, 0).cloned(),
            Err(e) => {
                warn!(day = day.label(), error = %e, "could not retrieve fire risk");
                None
            }
        }
    }

    /// District nearest to this location, looked up once.
    pub async fn district(&self) -> Result<Option<&District>, IpmaError> {
        let district = self
            .district
            .get_or_try_init(|| async {
                self.session
                    .districts()
                    .closest(self.session.gateway(), &self.coordinate, 0)
                    .await
            })
            .await?;
        Ok(district.as_ref())
    }

    /// Earliest UV forecast for this location's district.
    pub async fn uv_risk(&self) -> Option<UvRisk> {
        let district = match self.district().await {
            Ok(Some(district)) => district,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not resolve district for UV");
                return None;
            }
        };

        match self.session.uv(district.global_id).await {
            Ok(risks) => risks.into_iter().next(),
            Err(e) => {
                warn!(district = %district, error = %e, "could not retrieve UV");
                None
            }
        }
    }

    /// Active warnings for this location's warning area.
    ///
    /// Failures are returned rather than logged.
    pub async fn warnings(&self) -> Result<Vec<Warning>, IpmaError> {
        let Some(district) = self.district().await? else {
            return Ok(Vec::new());
        };
        self.session.warnings(&district.warning_area).await
    }
}

async fn has_forecast<G: Gateway>(session: &Session<G>, location: &ForecastLocation) -> bool {
    match session.forecast(location.global_id, ForecastPeriod::Daily).await {
        Ok(rows) if !rows.is_empty() => true,
        Ok(_) => {
            warn!(location = %location, "no forecast, trying next location");
            false
        }
        Err(e) => {
            warn!(location = %location, error = %e, "forecast failed, trying next location");
            false
        }
    }
}

async fn has_observation<G: Gateway>(session: &Session<G>, station: &Station) -> bool {
    match session.observations().await {
        Ok(board) if board.current(station.id).is_some() => true,
        Ok(_) => {
            warn!(station = %station, "no valid observation, trying next station");
            false
        }
        Err(e) => {
            warn!(station = %station, error = %e, "observations failed, trying next station");
            false
        }
    }
}

async fn has_sea_forecast<G: Gateway>(session: &Session<G>, location: &SeaLocation) -> bool {
    match session.sea_forecast(SeaDay::Today).await {
        Ok(day) if day.for_location(location.global_id).is_some() => true,
        Ok(_) => {
            warn!(location = %location, "no sea forecast, trying next sea location");
            false
        }
        Err(e) => {
            warn!(location = %location, error = %e, "sea forecast failed, trying next sea location");
            false
        }
    }
}
