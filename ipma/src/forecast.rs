//! Per-location aggregate forecasts.
//!
//! The aggregate dataset mixes hourly, three-hourly and daily rows for the
//! next ten days. A fetch keeps the rows for one [`ForecastPeriod`] that
//! are not more than an hour old, decorated with their classifiers.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::domain::{CompassPoint, Language};
use crate::error::IpmaError;
use crate::gateway::{fetch_json, Gateway};
use crate::reference::{Classifier, ForecastLocation};
use crate::session::Session;

/// Horizon of each forecast row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastPeriod {
    /// Hourly rows, three days ahead
    Hourly,
    /// Three-hourly rows, five days ahead
    ThreeHourly,
    /// Daily rows, ten days ahead
    #[default]
    Daily,
}

impl ForecastPeriod {
    /// Value of the upstream `idPeriodo` field.
    pub fn hours(&self) -> i64 {
        match self {
            Self::Hourly => 1,
            Self::ThreeHourly => 3,
            Self::Daily => 24,
        }
    }

    pub fn from_hours(hours: i64) -> Option<Self> {
        match hours {
            1 => Some(Self::Hourly),
            3 => Some(Self::ThreeHourly),
            24 => Some(Self::Daily),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastRow {
    #[serde(default, deserialize_with = "de::measurement")]
    t_min: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    t_max: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    t_med: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    utci: Option<f64>,
    #[serde(rename = "hR", default, deserialize_with = "de::measurement")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    probabilidade_precipita: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    ff_vento: Option<f64>,
    #[serde(default)]
    dd_vento: Option<String>,
    #[serde(default, deserialize_with = "de::class_id")]
    id_ffx_vento: Option<i64>,
    #[serde(default, alias = "classPrecInt", deserialize_with = "de::class_id")]
    id_intensidade_precipita: Option<i64>,
    #[serde(default, deserialize_with = "de::class_id")]
    id_tipo_tempo: Option<i64>,
    #[serde(rename = "iUv", default, deserialize_with = "de::measurement")]
    uv_index: Option<f64>,
    #[serde(default)]
    intervalo_hora: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    id_periodo: i64,
    #[serde(deserialize_with = "de::id")]
    global_id_local: u32,
    #[serde(deserialize_with = "de::timestamp")]
    data_prev: DateTime<Utc>,
    #[serde(deserialize_with = "de::timestamp")]
    data_update: DateTime<Utc>,
}

/// One forecast row.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub global_id: u32,
    /// Forecast location the row belongs to, when listed
    pub location: Option<ForecastLocation>,
    pub period: ForecastPeriod,
    pub forecast_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub hour_interval: Option<String>,
    pub min_temperature: Option<f64>,
    pub medium_temperature: Option<f64>,
    pub maximum_temperature: Option<f64>,
    /// UTCI "feels like" temperature
    pub feels_like_temperature: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<f64>,
    /// Probability of more than 0.3 mm of rain (%)
    pub precipitation_probability: Option<f64>,
    pub wind_strength: Option<f64>,
    pub wind_direction: Option<CompassPoint>,
    pub wind_speed_class: Option<Classifier>,
    pub precipitation_class: Option<Classifier>,
    pub weather_type: Classifier,
    pub uv_index: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Forecast {
    /// Average temperature.
    ///
    /// Daily rows only carry the extremes; the midpoint of max and min,
    /// rounded to one decimal, is used for those.
    pub fn temperature(&self) -> Option<f64> {
        if let Some(t) = self.medium_temperature {
            return Some(t);
        }
        match (self.maximum_temperature, self.min_temperature) {
            (Some(max), Some(min)) => {
                debug!(global_id = self.global_id, "averaging max and min temperature");
                Some(round1((max - min) / 2.0 + min))
            }
            _ => None,
        }
    }

    pub fn max_temperature(&self) -> Option<f64> {
        self.maximum_temperature.or(self.medium_temperature)
    }

    /// Weather description, with a wind clause when the wind class is known.
    pub fn description(&self, lang: Language) -> String {
        let weather = self.weather_type.description(lang);

        let Some(wind) = self.wind_speed_class.as_ref().filter(|c| !c.is_sentinel()) else {
            return weather.to_string();
        };
        let strength = wind.description(lang).to_lowercase();

        match (lang, self.wind_direction) {
            (Language::Portuguese, Some(dir)) => {
                format!("{weather}, vento {strength} de {}", dir.name(lang))
            }
            (Language::Portuguese, None) => format!("{weather}, vento {strength}"),
            (Language::English, Some(dir)) => {
                format!("{weather}, {strength} wind from {}", dir.name(lang))
            }
            (Language::English, None) => format!("{weather}, {strength} wind"),
        }
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = self
            .location
            .as_ref()
            .map(|l| l.name.clone())
            .unwrap_or_else(|| self.global_id.to_string());

        write!(f, "Forecast for {place} at {}: ", self.forecast_time.format("%Y-%m-%d %H:%M"))?;
        if let Some(t) = self.temperature() {
            write!(f, "{t}°C, ")?;
        }
        if let Some(h) = self.humidity {
            write!(f, "{h}%, ")?;
        }
        f.write_str(self.weather_type.description(Language::English))
    }
}

/// Keep the rows for `period` whose forecast time is later than an hour
/// before `now`, oldest first.
fn select_rows(rows: Vec<ForecastRow>, period: ForecastPeriod, now: DateTime<Utc>) -> Vec<ForecastRow> {
    let cutoff = now - Duration::hours(1);
    let mut rows: Vec<_> = rows
        .into_iter()
        .filter(|r| r.id_periodo == period.hours() && r.data_prev > cutoff)
        .collect();
    rows.sort_by_key(|r| r.data_prev);
    rows
}

impl<G: Gateway> Session<G> {
    /// Forecast rows for the location `global_id`.
    ///
    /// An empty result means the location has no upcoming rows for
    /// `period`; transport and decode failures are errors.
    pub async fn forecast(
        &self,
        global_id: u32,
        period: ForecastPeriod,
    ) -> Result<Vec<Forecast>, IpmaError> {
        self.forecast_at(global_id, period, Utc::now()).await
    }

    pub(crate) async fn forecast_at(
        &self,
        global_id: u32,
        period: ForecastPeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Forecast>, IpmaError> {
        let url = self.endpoints().forecast(global_id);
        let rows: Vec<ForecastRow> = fetch_json(self.gateway(), &url).await?;
        let rows = select_rows(rows, period, now);

        let location = self.find_forecast_location(global_id).await?;
        let gateway = self.gateway();

        let mut forecasts = Vec::with_capacity(rows.len());
        for row in rows {
            let weather_type = self.weather_types().get_or_sentinel(gateway, row.id_tipo_tempo).await?;
            let wind_speed_class = match row.id_ffx_vento {
                Some(id) => Some(self.wind_speed_classes().get(gateway, id).await?),
                None => None,
            };
            let precipitation_class = match row.id_intensidade_precipita {
                Some(id) => Some(self.precipitation_classes().get(gateway, id).await?),
                None => None,
            };

            forecasts.push(Forecast {
                global_id: row.global_id_local,
                location: location.clone(),
                period,
                forecast_time: row.data_prev,
                update_time: row.data_update,
                hour_interval: row.intervalo_hora,
                min_temperature: row.t_min,
                medium_temperature: row.t_med,
                maximum_temperature: row.t_max,
                feels_like_temperature: row.utci,
                humidity: row.humidity,
                precipitation_probability: row.probabilidade_precipita,
                wind_strength: row.ff_vento,
                wind_direction: row.dd_vento.as_deref().and_then(CompassPoint::parse),
                wind_speed_class,
                precipitation_class,
                weather_type,
                uv_index: row.uv_index,
            });
        }

        debug!(global_id, count = forecasts.len(), "fetched forecast");
        Ok(forecasts)
    }
}
