//! Fire risk (RCM) per DICO region.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::domain::{Coordinate, DayOffset, Language};
use crate::error::IpmaError;
use crate::gateway::{Gateway, RetrievalError, fetch_json};
use crate::nearest::Located;
use crate::session::Session;

/// Fire risk level, 1 (reduced) to 5 (maximum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FireRiskLevel {
    Reduced = 1,
    Moderate = 2,
    High = 3,
    VeryHigh = 4,
    Maximum = 5,
}

impl FireRiskLevel {
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::Reduced),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            4 => Some(Self::VeryHigh),
            5 => Some(Self::Maximum),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self, lang: Language) -> &'static str {
        match (lang, self) {
            (Language::Portuguese, Self::Reduced) => "Risco reduzido",
            (Language::Portuguese, Self::Moderate) => "Risco moderado",
            (Language::Portuguese, Self::High) => "Risco elevado",
            (Language::Portuguese, Self::VeryHigh) => "Risco muito elevado",
            (Language::Portuguese, Self::Maximum) => "Risco máximo",
            (Language::English, Self::Reduced) => "Reduced risk",
            (Language::English, Self::Moderate) => "Moderate risk",
            (Language::English, Self::High) => "High risk",
            (Language::English, Self::VeryHigh) => "Very high risk",
            (Language::English, Self::Maximum) => "Maximum risk",
        }
    }
}

impl fmt::Display for FireRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::default()))
    }
}

#[derive(Debug, Deserialize)]
struct RcmPayload {
    local: BTreeMap<String, RegionDto>,
}

#[derive(Debug, Deserialize)]
struct RegionDto {
    dico: String,
    data: RiskDto,
    #[serde(deserialize_with = "de::number")]
    latitude: f64,
    #[serde(deserialize_with = "de::number")]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RiskDto {
    #[serde(deserialize_with = "de::integer")]
    rcm: i64,
}

/// Fire risk for one DICO region on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct FireRisk {
    /// DICO region code
    pub dico: String,
    pub level: FireRiskLevel,
    pub coordinate: Coordinate,
}

impl TryFrom<RegionDto> for FireRisk {
    type Error = String;

    fn try_from(dto: RegionDto) -> Result<Self, Self::Error> {
        let level = FireRiskLevel::from_level(dto.data.rcm)
            .ok_or_else(|| format!("region {}: unknown fire risk level {}", dto.dico, dto.data.rcm))?;
        let coordinate =
            Coordinate::new(dto.latitude, dto.longitude).map_err(|e| format!("region {}: {e}", dto.dico))?;

        Ok(Self {
            dico: dto.dico,
            level,
            coordinate,
        })
    }
}

impl FireRisk {
    /// Decode an RCM payload, ordered by region key.
    fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        let payload: RcmPayload = serde_json::from_value(value)?;
        payload
            .local
            .into_values()
            .map(|dto| FireRisk::try_from(dto).map_err(serde::de::Error::custom))
            .collect()
    }
}

impl Located for FireRisk {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl fmt::Display for FireRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} para {}", self.level, self.dico)
    }
}

impl<G: Gateway> Session<G> {
    /// Fire risk of every DICO region for `day`.
    ///
    /// The dataset is republished daily, so it is fetched on every call.
    pub async fn fire_risk(&self, day: DayOffset) -> Result<Vec<FireRisk>, IpmaError> {
        let url = self.endpoints().fire_risk(day);
        let payload: serde_json::Value = fetch_json(self.gateway(), &url).await?;
        let risks = FireRisk::parse_dataset(payload).map_err(|e| RetrievalError::decode(&url, e))?;

        debug!(day = day.label(), count = risks.len(), "fetched fire risk");
        Ok(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "dataPrev": "2024-08-01",
            "local": {
                "0105": {"data": {"rcm": 3}, "dico": "0105", "latitude": 40.6413, "longitude": -8.6535},
                "1312": {"data": {"rcm": 1}, "dico": "1312", "latitude": "41.1580", "longitude": "-8.6294"}
            }
        })
    }

    #[test]
    fn parse_regions() {
        let risks = FireRisk::parse_dataset(payload()).unwrap();
        assert_eq!(risks.len(), 2);
        assert_eq!(risks[0].dico, "0105");
        assert_eq!(risks[0].level, FireRiskLevel::High);
        assert_eq!(risks[1].coordinate.latitude(), 41.158);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let payload = json!({
            "local": {"0105": {"data": {"rcm": 9}, "dico": "0105", "latitude": 40.6, "longitude": -8.6}}
        });
        let err = FireRisk::parse_dataset(payload).unwrap_err();
        assert!(err.to_string().contains("unknown fire risk level 9"));
    }

    #[tokio::test]
    async fn each_day_has_its_own_dataset() {
        let session = testing::session();

        let today = session.fire_risk(DayOffset::Today).await.unwrap();
        let tomorrow = session.fire_risk(DayOffset::Tomorrow).await.unwrap();
        assert_eq!(today[0].level, FireRiskLevel::High);
        assert_eq!(tomorrow[0].level, FireRiskLevel::VeryHigh);
    }

    #[tokio::test]
    async fn republished_data_is_picked_up() {
        let session = testing::session();
        let url = testing::endpoints().fire_risk(DayOffset::Today);

        let first = session.fire_risk(DayOffset::Today).await.unwrap();
        session.gateway().insert_json(&url, testing::fire_risk(5));
        let second = session.fire_risk(DayOffset::Today).await.unwrap();

        assert_eq!(first[0].level, FireRiskLevel::High);
        assert_eq!(second[0].level, FireRiskLevel::Maximum);
        assert_eq!(session.gateway().requests(&url), 2);
    }

    #[tokio::test]
    async fn bad_level_is_a_decode_error() {
        let gateway = testing::gateway();
        let session = testing::session_with(gateway.clone());
        gateway.insert_json(testing::endpoints().fire_risk(DayOffset::Today), testing::fire_risk(7));

        let err = session.fire_risk(DayOffset::Today).await.unwrap_err();
        assert!(matches!(err, IpmaError::Retrieval(RetrievalError::Decode { .. })));
    }

    #[test]
    fn labels() {
        assert_eq!(FireRiskLevel::Maximum.to_string(), "Risco máximo");
        assert_eq!(FireRiskLevel::VeryHigh.label(Language::English), "Very high risk");
        assert_eq!(FireRiskLevel::Moderate.level(), 2);
        assert_eq!(FireRiskLevel::from_level(0), None);

        let risk = FireRisk::parse_dataset(payload()).unwrap().remove(0);
        assert_eq!(risk.to_string(), "Risco elevado para 0105");
    }
}
