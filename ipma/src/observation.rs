//! Hourly station observations.
//!
//! The dataset covers the last day for every station, keyed by timestamp
//! and then by station id. A `null` station entry is a missing reading.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::domain::CompassPoint;
use crate::error::IpmaError;
use crate::gateway::{fetch_json, Gateway, RetrievalError};
use crate::session::Session;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationRow {
    #[serde(rename = "intensidadeVentoKM", default, deserialize_with = "de::measurement")]
    intensidade_vento_km: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    temperatura: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    radiacao: Option<f64>,
    #[serde(default, deserialize_with = "de::class_id")]
    id_direcc_vento: Option<i64>,
    #[serde(default, deserialize_with = "de::measurement")]
    prec_acumulada: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    intensidade_vento: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    humidade: Option<f64>,
    #[serde(default, deserialize_with = "de::measurement")]
    pressao: Option<f64>,
}

/// One hourly reading of one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station_id: u32,
    pub timestamp: DateTime<Utc>,
    /// Air temperature at 1.5 m, hourly mean (°C)
    pub temperature: Option<f64>,
    /// Relative humidity at 1.5 m, hourly mean (%)
    pub humidity: Option<f64>,
    /// Pressure reduced to mean sea level (hPa)
    pub pressure: Option<f64>,
    /// Solar radiation (kJ/m²)
    pub radiation: Option<f64>,
    /// Precipitation accumulated over the hour (mm)
    pub accumulated_precipitation: Option<f64>,
    /// Wind intensity at 10 m (m/s)
    pub wind_intensity: Option<f64>,
    /// Wind intensity at 10 m (km/h)
    pub wind_intensity_km: Option<f64>,
    /// `None` for calm or unknown
    pub wind_direction: Option<CompassPoint>,
}

impl Observation {
    /// A reading is usable when both temperature and humidity were measured.
    pub fn is_valid(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some()
    }

    fn from_row(station_id: u32, timestamp: DateTime<Utc>, row: ObservationRow) -> Self {
        Self {
            station_id,
            timestamp,
            temperature: row.temperatura,
            humidity: row.humidade,
            pressure: row.pressao,
            radiation: row.radiacao,
            accumulated_precipitation: row.prec_acumulada,
            wind_intensity: row.intensidade_vento,
            wind_intensity_km: row.intensidade_vento_km,
            wind_direction: row.id_direcc_vento.and_then(CompassPoint::from_observation_id),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weather in {} at {}", self.station_id, self.timestamp.format("%Y-%m-%d %H:%M"))?;
        if let (Some(t), Some(h)) = (self.temperature, self.humidity) {
            write!(f, ": {t}°C, {h}%")?;
        }
        Ok(())
    }
}

/// Every reading in one observations payload, grouped by station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationBoard {
    stations: HashMap<u32, Vec<Observation>>,
}

impl ObservationBoard {
    fn parse(
        url: &str,
        raw: BTreeMap<String, HashMap<String, Option<ObservationRow>>>,
    ) -> Result<Self, RetrievalError> {
        let mut stations: HashMap<u32, Vec<Observation>> = HashMap::new();

        for (stamp, readings) in raw {
            let timestamp = de::parse_timestamp(&stamp)
                .ok_or_else(|| RetrievalError::decode(url, format!("invalid timestamp {stamp:?}")))?;

            for (station, row) in readings {
                let Some(row) = row else { continue };
                let station_id = station
                    .parse::<u32>()
                    .map_err(|e| RetrievalError::decode(url, format!("station id {station:?}: {e}")))?;
                stations
                    .entry(station_id)
                    .or_default()
                    .push(Observation::from_row(station_id, timestamp, row));
            }
        }

        for readings in stations.values_mut() {
            readings.sort_by_key(|o| o.timestamp);
        }

        Ok(Self { stations })
    }

    /// Readings of `station_id`, oldest first.
    pub fn readings(&self, station_id: u32) -> &[Observation] {
        self.stations.get(&station_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Most recent reading of `station_id`.
    pub fn latest(&self, station_id: u32) -> Option<&Observation> {
        self.readings(station_id).last()
    }

    /// Most recent reading of `station_id`, if it is valid.
    pub fn current(&self, station_id: u32) -> Option<&Observation> {
        self.latest(station_id).filter(|o| o.is_valid())
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }
}

impl<G: Gateway> Session<G> {
    /// Fetch the current observations of every station.
    pub async fn observations(&self) -> Result<ObservationBoard, IpmaError> {
        let url = self.endpoints().observations();
        let raw = fetch_json(self.gateway(), &url).await?;
        let board = ObservationBoard::parse(&url, raw)?;

        debug!(stations = board.station_count(), "fetched observations");
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    #[tokio::test]
    async fn readings_are_grouped_and_sorted() {
        let session = testing::session();
        let board = session.observations().await.unwrap();

        let readings = board.readings(1210702);
        assert_eq!(readings.len(), 2);
        assert!(readings[0].timestamp < readings[1].timestamp);

        let latest = board.latest(1210702).unwrap();
        assert_eq!(latest.temperature, Some(17.4));
        assert_eq!(latest.humidity, Some(71.0));
        assert_eq!(latest.wind_direction, Some(CompassPoint::NorthWest));
        assert_eq!(latest.wind_intensity, Some(3.3));
        assert_eq!(latest.wind_intensity_km, Some(11.9));
        assert_eq!(latest.timestamp.format("%H:%M").to_string(), "10:00");
    }

    #[tokio::test]
    async fn null_entries_are_missing_readings() {
        let session = testing::session();
        let board = session.observations().await.unwrap();

        assert_eq!(board.readings(1210718).len(), 1);
        assert!(board.readings(42).is_empty());
    }

    #[tokio::test]
    async fn sentinel_readings_are_never_current() {
        let session = testing::session();
        let board = session.observations().await.unwrap();

        let latest = board.latest(1210718).unwrap();
        assert_eq!(latest.temperature, None);
        assert!(!latest.is_valid());
        assert!(board.current(1210718).is_none());
        assert!(board.current(1210702).is_some());
    }

    #[test]
    fn bad_station_key_is_a_decode_error() {
        let raw = serde_json::from_value(json!({
            "2024-05-01T10:00": {"not-a-station": testing::reading(15.0, 70.0)}
        }))
        .unwrap();
        let err = ObservationBoard::parse("http://mock", raw).unwrap_err();
        assert!(matches!(err, RetrievalError::Decode { .. }));
    }

    #[test]
    fn every_measurement_is_decoded() {
        let mut row = testing::reading(15.0, 70.0);
        row["intensidadeVentoKM"] = json!(-99.0);
        let raw = serde_json::from_value(json!({"2024-05-01T10:00": {"1": row}})).unwrap();
        let board = ObservationBoard::parse("http://mock", raw).unwrap();

        let reading = board.latest(1).unwrap();
        assert_eq!(reading.wind_intensity_km, None);
        assert_eq!(reading.wind_intensity, Some(3.3));
        assert_eq!(reading.pressure, Some(1017.4));
        assert_eq!(reading.radiation, Some(502.1));
        assert_eq!(reading.accumulated_precipitation, Some(0.0));
    }

    #[test]
    fn calm_wind_has_no_direction() {
        let mut row = testing::reading(15.0, 70.0);
        row["idDireccVento"] = json!(0);
        let raw = serde_json::from_value(json!({"2024-05-01T10:00": {"1": row}})).unwrap();
        let board = ObservationBoard::parse("http://mock", raw).unwrap();
        assert_eq!(board.latest(1).unwrap().wind_direction, None);
    }
}
