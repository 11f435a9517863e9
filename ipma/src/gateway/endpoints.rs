//! URLs of the upstream datasets.
//!
//! Every path hangs off one base URL so a local server can replace the
//! whole service in tests.

use crate::domain::{DayOffset, SeaDay};

/// Dataset URL builder for one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create endpoints under `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The base URL every path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Districts and islands reference list.
    pub fn districts(&self) -> String {
        self.join("/open-data/distrits-islands.json")
    }

    /// Forecast locations reference list.
    pub fn forecast_locations(&self) -> String {
        self.join("/public-data/forecast/locations.json")
    }

    /// Sea forecast locations reference list.
    pub fn sea_locations(&self) -> String {
        self.join("/open-data/sea-locations.json")
    }

    /// Observation stations (GeoJSON features).
    pub fn stations(&self) -> String {
        self.join("/open-data/observation/meteorology/stations/stations.json")
    }

    /// Hourly observations of every station.
    pub fn observations(&self) -> String {
        self.join("/open-data/observation/meteorology/stations/observations.json")
    }

    /// Aggregate 10-day forecast for one forecast location.
    pub fn forecast(&self, global_id: u32) -> String {
        self.join(&format!("/public-data/forecast/aggregate/{global_id}.json"))
    }

    /// Daily sea forecast for every sea location.
    pub fn sea_forecast(&self, day: SeaDay) -> String {
        self.join(&format!(
            "/open-data/forecast/oceanography/daily/hp-daily-sea-forecast-day{}.json",
            day.offset()
        ))
    }

    /// Weather type classifier.
    pub fn weather_types(&self) -> String {
        self.join("/open-data/weather-type-classe.json")
    }

    /// Daily wind speed class classifier.
    pub fn wind_speed_classes(&self) -> String {
        self.join("/open-data/wind-speed-daily-classe.json")
    }

    /// Precipitation intensity class classifier.
    pub fn precipitation_classes(&self) -> String {
        self.join("/open-data/precipitation-classe.json")
    }

    /// Fire risk (RCM) per DICO region.
    pub fn fire_risk(&self, day: DayOffset) -> String {
        self.join(&format!(
            "/open-data/forecast/meteorology/rcm/rcm-d{}.json",
            day.offset()
        ))
    }

    /// UV index forecast.
    pub fn uv(&self) -> String {
        self.join("/open-data/forecast/meteorology/uv/uv.json")
    }

    /// Active weather warnings.
    pub fn warnings(&self) -> String {
        self.join("/open-data/forecast/warnings/warnings_www.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_onto_base() {
        let endpoints = Endpoints::new("https://api.ipma.pt/");

        assert_eq!(endpoints.base_url(), "https://api.ipma.pt");
        assert_eq!(
            endpoints.districts(),
            "https://api.ipma.pt/open-data/distrits-islands.json"
        );
        assert_eq!(
            endpoints.forecast(1010500),
            "https://api.ipma.pt/public-data/forecast/aggregate/1010500.json"
        );
    }

    #[test]
    fn day_offsets_in_paths() {
        let endpoints = Endpoints::new("http://mock");

        assert_eq!(
            endpoints.fire_risk(DayOffset::Tomorrow),
            "http://mock/open-data/forecast/meteorology/rcm/rcm-d1.json"
        );
        assert_eq!(
            endpoints.sea_forecast(SeaDay::DayAfterTomorrow),
            "http://mock/open-data/forecast/oceanography/daily/hp-daily-sea-forecast-day2.json"
        );
    }
}
