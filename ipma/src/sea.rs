//! Daily sea forecasts for coastal locations.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::domain::{CompassPoint, SeaDay};
use crate::error::IpmaError;
use crate::gateway::{fetch_json, Gateway};
use crate::session::Session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeaForecastPayload {
    #[serde(deserialize_with = "de::date")]
    forecast_date: NaiveDate,
    #[serde(deserialize_with = "de::timestamp")]
    data_update: DateTime<Utc>,
    data: Vec<SeaRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeaRow {
    #[serde(deserialize_with = "de::id")]
    global_id_local: u32,
    #[serde(default, deserialize_with = "de::measurement")]
    wave_period_min: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    wave_period_max: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    wave_high_min: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    wave_high_max: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    total_sea_min: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    total_sea_max: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    sst_min: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    sst_max: Option<f64>,
    #[serde(default)]
    pred_wave_dir: Option<String>,
}

/// Sea conditions for one coastal location on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaForecast {
    pub global_id: u32,
    pub date: NaiveDate,
    pub update_time: DateTime<Utc>,
    /// Peak period associated with swell (s)
    pub min_swell_period: Option<f64>,
    pub max_swell_period: Option<f64>,
    /// Swell height (m)
    pub min_swell_height: Option<f64>,
    pub max_swell_height: Option<f64>,
    /// Total sea height (m)
    pub min_wave_height: Option<f64>,
    pub max_wave_height: Option<f64>,
    /// Sea surface temperature (°C)
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub wave_direction: Option<CompassPoint>,
}

impl fmt::Display for SeaForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sea forecast for {} on {}", self.global_id, self.date)?;
        if let Some(t) = self.min_temperature {
            write!(f, ", sea temperature {t}°C")?;
        }
        if let Some(h) = self.max_wave_height {
            write!(f, ", waves up to {h} m")?;
        }
        if let Some(dir) = self.wave_direction {
            write!(f, " from {}", dir.abbreviation())?;
        }
        Ok(())
    }
}

/// One day of the sea forecast dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaForecastDay {
    pub day: SeaDay,
    pub date: NaiveDate,
    pub records: Vec<SeaForecast>,
}

impl SeaForecastDay {
    fn from_payload(day: SeaDay, payload: SeaForecastPayload) -> Self {
        let date = payload.forecast_date;
        let update_time = payload.data_update;

        let records = payload
            .data
            .into_iter()
            .map(|r| SeaForecast {
                global_id: r.global_id_local,
                date,
                update_time,
                min_swell_period: r.wave_period_min,
                max_swell_period: r.wave_period_max,
                min_swell_height: r.wave_high_min,
                max_swell_height: r.wave_high_max,
                min_wave_height: r.total_sea_min,
                max_wave_height: r.total_sea_max,
                min_temperature: r.sst_min,
                max_temperature: r.sst_max,
                wave_direction: r.pred_wave_dir.as_deref().and_then(CompassPoint::parse),
            })
            .collect();

        Self { day, date, records }
    }

    /// The record for sea location `global_id`.
    pub fn for_location(&self, global_id: u32) -> Option<&SeaForecast> {
        self.records.iter().find(|r| r.global_id == global_id)
    }
}

impl<G: Gateway> Session<G> {
    /// Fetch the sea forecast dataset for `day`.
    pub async fn sea_forecast(&self, day: SeaDay) -> Result<SeaForecastDay, IpmaError> {
        let url = self.endpoints().sea_forecast(day);
        let payload: SeaForecastPayload = fetch_json(self.gateway(), &url).await?;
        let forecast = SeaForecastDay::from_payload(day, payload);

        debug!(day = day.offset(), count = forecast.records.len(), "fetched sea forecast");
        Ok(forecast)
    }
}
