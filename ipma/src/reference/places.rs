//! Place-like reference entities: districts, forecast locations, sea
//! locations and observation stations.

use std::fmt;

use serde::Deserialize;

use crate::de;
use crate::domain::{Coordinate, InvalidCoordinate};
use crate::nearest::Located;

/// `{"data": [...]}` wrapper used by several datasets.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// Raw place record shared by the districts and forecast locations lists.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceDto {
    #[serde(deserialize_with = "de::id")]
    global_id_local: u32,
    local: String,
    #[serde(deserialize_with = "de::integer")]
    id_regiao: i64,
    #[serde(deserialize_with = "de::integer")]
    id_distrito: i64,
    #[serde(deserialize_with = "de::integer")]
    id_concelho: i64,
    id_area_aviso: String,
    #[serde(deserialize_with = "de::number")]
    latitude: f64,
    #[serde(deserialize_with = "de::number")]
    longitude: f64,
}

/// An administrative district or island.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PlaceDto")]
pub struct District {
    pub global_id: u32,
    pub name: String,
    pub region_id: i64,
    pub district_id: i64,
    pub municipality_id: i64,
    /// Warning area code (e.g. "AVR")
    pub warning_area: String,
    pub coordinate: Coordinate,
}

impl TryFrom<PlaceDto> for District {
    type Error = InvalidCoordinate;

    fn try_from(dto: PlaceDto) -> Result<Self, Self::Error> {
        Ok(Self {
            global_id: dto.global_id_local,
            name: dto.local,
            region_id: dto.id_regiao,
            district_id: dto.id_distrito,
            municipality_id: dto.id_concelho,
            warning_area: dto.id_area_aviso,
            coordinate: Coordinate::new(dto.latitude, dto.longitude)?,
        })
    }
}

impl District {
    pub(crate) fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value::<DataEnvelope<Self>>(value).map(|e| e.data)
    }
}

impl Located for District {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.global_id)
    }
}

/// A place with its own weather forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PlaceDto")]
pub struct ForecastLocation {
    /// Global forecast id, stable across datasets
    pub global_id: u32,
    pub name: String,
    pub region_id: i64,
    pub district_id: i64,
    pub municipality_id: i64,
    pub warning_area: String,
    pub coordinate: Coordinate,
}

impl TryFrom<PlaceDto> for ForecastLocation {
    type Error = InvalidCoordinate;

    fn try_from(dto: PlaceDto) -> Result<Self, Self::Error> {
        Ok(Self {
            global_id: dto.global_id_local,
            name: dto.local,
            region_id: dto.id_regiao,
            district_id: dto.id_distrito,
            municipality_id: dto.id_concelho,
            warning_area: dto.id_area_aviso,
            coordinate: Coordinate::new(dto.latitude, dto.longitude)?,
        })
    }
}

impl ForecastLocation {
    pub(crate) fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Located for ForecastLocation {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl fmt::Display for ForecastLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.global_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeaLocationDto {
    #[serde(deserialize_with = "de::id")]
    global_id_local: u32,
    local: String,
    #[serde(deserialize_with = "de::integer")]
    id_regiao: i64,
    id_area_aviso: String,
    #[serde(deserialize_with = "de::integer")]
    id_local: i64,
    #[serde(deserialize_with = "de::number")]
    latitude: f64,
    #[serde(deserialize_with = "de::number")]
    longitude: f64,
}

/// A coastal point with a sea state forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SeaLocationDto")]
pub struct SeaLocation {
    pub global_id: u32,
    pub name: String,
    pub region_id: i64,
    pub warning_area: String,
    pub local_id: i64,
    pub coordinate: Coordinate,
}

impl TryFrom<SeaLocationDto> for SeaLocation {
    type Error = InvalidCoordinate;

    fn try_from(dto: SeaLocationDto) -> Result<Self, Self::Error> {
        Ok(Self {
            global_id: dto.global_id_local,
            name: dto.local,
            region_id: dto.id_regiao,
            warning_area: dto.id_area_aviso,
            local_id: dto.id_local,
            coordinate: Coordinate::new(dto.latitude, dto.longitude)?,
        })
    }
}

impl SeaLocation {
    pub(crate) fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Located for SeaLocation {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl fmt::Display for SeaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.global_id)
    }
}

/// GeoJSON feature describing one station.
#[derive(Debug, Deserialize)]
struct StationFeature {
    geometry: PointGeometry,
    properties: StationProperties,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    /// `[longitude, latitude]`, GeoJSON order
    coordinates: (f64, f64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationProperties {
    #[serde(deserialize_with = "de::id")]
    id_estacao: u32,
    local_estacao: String,
}

/// A weather observation station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "StationFeature")]
pub struct Station {
    pub id: u32,
    pub name: String,
    pub coordinate: Coordinate,
}

impl TryFrom<StationFeature> for Station {
    type Error = InvalidCoordinate;

    fn try_from(feature: StationFeature) -> Result<Self, Self::Error> {
        let (longitude, latitude) = feature.geometry.coordinates;
        Ok(Self {
            id: feature.properties.id_estacao,
            name: feature.properties.local_estacao,
            coordinate: Coordinate::new(latitude, longitude)?,
        })
    }
}

impl Station {
    pub(crate) fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Located for Station {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}
