//! A session bundles a gateway with one instance of every reference
//! repository, so datasets are fetched once per session.

use tracing::info;

use crate::config::IpmaConfig;
use crate::error::IpmaError;
use crate::gateway::{Endpoints, Gateway, HttpGateway};
use crate::reference::{
    ClassifierKind, ClassifierRepository, District, ForecastLocation, Repository, SeaLocation,
    Station,
};

/// Entry point of the library.
///
/// Dataset fetches that are not reference data (forecasts, observations,
/// sea forecasts, fire risk, UV, warnings) are not cached and hit the
/// gateway on every call.
#[derive(Debug)]
pub struct Session<G = HttpGateway> {
    gateway: G,
    config: IpmaConfig,
    endpoints: Endpoints,
    districts: Repository<District>,
    forecast_locations: Repository<ForecastLocation>,
    sea_locations: Repository<SeaLocation>,
    stations: Repository<Station>,
    weather_types: ClassifierRepository,
    wind_speed_classes: ClassifierRepository,
    precipitation_classes: ClassifierRepository,
}

impl Session<HttpGateway> {
    /// Session talking to the real service.
    pub fn new(config: IpmaConfig) -> Result<Self, IpmaError> {
        let gateway = HttpGateway::new(&config)?;
        info!(base_url = %config.base_url, "created IPMA session");
        Ok(Self::with_gateway(gateway, config))
    }
}

impl<G: Gateway> Session<G> {
    pub fn with_gateway(gateway: G, config: IpmaConfig) -> Self {
        let endpoints = Endpoints::new(config.base_url.clone());

        Self {
            districts: Repository::new("districts", endpoints.districts(), District::parse_dataset),
            forecast_locations: Repository::new(
                "forecast locations",
                endpoints.forecast_locations(),
                ForecastLocation::parse_dataset,
            ),
            sea_locations: Repository::new(
                "sea locations",
                endpoints.sea_locations(),
                SeaLocation::parse_dataset,
            ),
            stations: Repository::new("stations", endpoints.stations(), Station::parse_dataset),
            weather_types: ClassifierRepository::new(
                ClassifierKind::WeatherType,
                endpoints.weather_types(),
            ),
            wind_speed_classes: ClassifierRepository::new(
                ClassifierKind::WindSpeed,
                endpoints.wind_speed_classes(),
            ),
            precipitation_classes: ClassifierRepository::new(
                ClassifierKind::Precipitation,
                endpoints.precipitation_classes(),
            ),
            gateway,
            config,
            endpoints,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &IpmaConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn districts(&self) -> &Repository<District> {
        &self.districts
    }

    pub fn forecast_locations(&self) -> &Repository<ForecastLocation> {
        &self.forecast_locations
    }

    pub fn sea_locations(&self) -> &Repository<SeaLocation> {
        &self.sea_locations
    }

    pub fn stations(&self) -> &Repository<Station> {
        &self.stations
    }

    pub fn weather_types(&self) -> &ClassifierRepository {
        &self.weather_types
    }

    pub fn wind_speed_classes(&self) -> &ClassifierRepository {
        &self.wind_speed_classes
    }

    pub fn precipitation_classes(&self) -> &ClassifierRepository {
        &self.precipitation_classes
    }

    /// Look up a forecast location by its global id.
    pub async fn find_forecast_location(
        &self,
        global_id: u32,
    ) -> Result<Option<ForecastLocation>, IpmaError> {
        let all = self.forecast_locations.all(&self.gateway).await?;
        Ok(all.iter().find(|l| l.global_id == global_id).cloned())
    }

    /// Look up a sea location by its global id.
    pub async fn find_sea_location(&self, global_id: u32) -> Result<Option<SeaLocation>, IpmaError> {
        let all = self.sea_locations.all(&self.gateway).await?;
        Ok(all.iter().find(|l| l.global_id == global_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn repositories_share_the_session_gateway() {
        let session = testing::session();

        assert!(!session.forecast_locations().is_loaded());
        let aveiro = session.find_forecast_location(1010500).await.unwrap().unwrap();
        assert_eq!(aveiro.name, "Aveiro");
        assert!(session.forecast_locations().is_loaded());

        assert!(session.find_forecast_location(42).await.unwrap().is_none());

        let url = session.endpoints().forecast_locations();
        assert_eq!(session.gateway().requests(&url), 1);
    }

    #[tokio::test]
    async fn sea_location_lookup() {
        let session = testing::session();
        let sea = session.find_sea_location(1010500).await.unwrap().unwrap();
        assert_eq!(sea.name, "Aveiro");
    }

    #[test]
    fn endpoints_follow_the_configured_base() {
        let session = Session::with_gateway(
            crate::gateway::MockGateway::new(),
            IpmaConfig::new().with_base_url("http://localhost:9999/"),
        );
        assert_eq!(
            session.stations().url(),
            "http://localhost:9999/open-data/observation/meteorology/stations/stations.json"
        );
    }
}
