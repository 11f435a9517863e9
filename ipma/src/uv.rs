//! UV index forecasts per district.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::error::IpmaError;
use crate::gateway::{fetch_json, Gateway};
use crate::session::Session;

/// UV risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(index: f64) -> Self {
        if index <= 2.0 {
            Self::Low
        } else if index <= 5.0 {
            Self::Moderate
        } else if index <= 7.0 {
            Self::High
        } else if index <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    /// Portuguese band name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Moderate => "Moderado",
            Self::High => "Elevado",
            Self::VeryHigh => "Muito Elevado",
            Self::Extreme => "Extremo",
        }
    }

    /// Recommended protection, in Portuguese.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Não é necessário proteção",
            Self::Moderate => "Óculos de Sol e protector solar",
            Self::High => "Utilizar óculos de Sol com filtro UV, chapéu, t-shirt e protector solar",
            Self::VeryHigh => {
                "Utilizar óculos de Sol com filtro UV, chapéu, t-shirt, guarda-sol, protector solar e evitar a exposição das crianças ao Sol"
            }
            Self::Extreme => "Evitar o mais possível a exposição ao Sol. Aproveite para descansar em casa.",
        }
    }
}

impl fmt::Display for UvLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UvRow {
    #[serde(deserialize_with = "de::integer")]
    id_periodo: i64,
    #[serde(default)]
    intervalo_hora: Option<String>,
    #[serde(deserialize_with = "de::date")]
    data: NaiveDate,
    #[serde(deserialize_with = "de::id")]
    global_id_local: u32,
    #[serde(deserialize_with = "de::number")]
    i_uv: f64,
}

/// UV index forecast for one district on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct UvRisk {
    pub period_id: i64,
    pub hour_interval: Option<String>,
    pub date: NaiveDate,
    pub global_id: u32,
    pub index: f64,
}

impl UvRisk {
    pub fn level(&self) -> UvLevel {
        UvLevel::from_index(self.index)
    }
}

impl From<UvRow> for UvRisk {
    fn from(row: UvRow) -> Self {
        Self {
            period_id: row.id_periodo,
            hour_interval: row.intervalo_hora.filter(|s| !s.is_empty()),
            date: row.data,
            global_id: row.global_id_local,
            index: row.i_uv,
        }
    }
}

impl fmt::Display for UvRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.level();
        write!(f, "UV {} ({level}) em {}: {}", self.index, self.date, level.advice())
    }
}

impl<G: Gateway> Session<G> {
    /// UV forecasts for district `global_id`, earliest date first.
    pub async fn uv(&self, global_id: u32) -> Result<Vec<UvRisk>, IpmaError> {
        let url = self.endpoints().uv();
        let rows: Vec<UvRow> = fetch_json(self.gateway(), &url).await?;

        let mut risks: Vec<UvRisk> = rows
            .into_iter()
            .filter(|r| r.global_id_local == global_id)
            .map(UvRisk::from)
            .collect();
        risks.sort_by_key(|r| r.date);

        debug!(global_id, count = risks.len(), "fetched UV forecast");
        Ok(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn filtered_by_district_and_sorted() {
        let session = testing::session();
        let risks = session.uv(1010500).await.unwrap();

        assert_eq!(risks.len(), 2);
        assert!(risks[0].date < risks[1].date);
        assert_eq!(risks[0].index, 8.2);
        assert_eq!(risks[0].level(), UvLevel::VeryHigh);
        assert_eq!(risks[0].hour_interval, None);
    }

    #[tokio::test]
    async fn unknown_district_is_empty() {
        let session = testing::session();
        assert!(session.uv(1).await.unwrap().is_empty());
    }

    #[test]
    fn bands() {
        assert_eq!(UvLevel::from_index(0.0), UvLevel::Low);
        assert_eq!(UvLevel::from_index(2.0), UvLevel::Low);
        assert_eq!(UvLevel::from_index(2.1), UvLevel::Moderate);
        assert_eq!(UvLevel::from_index(7.0), UvLevel::High);
        assert_eq!(UvLevel::from_index(10.0), UvLevel::VeryHigh);
        assert_eq!(UvLevel::from_index(11.5), UvLevel::Extreme);
        assert_eq!(UvLevel::Moderate.to_string(), "Moderado");
        assert_eq!(UvLevel::Low.advice(), "Não é necessário proteção");
    }
}
