//! Weather warnings per warning area.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::de;
use crate::error::IpmaError;
use crate::gateway::{fetch_json, Gateway};
use crate::session::Session;

/// Warning severity. Green is the nominal level and is never reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AwarenessLevel {
    Green,
    Yellow,
    Orange,
    Red,
    Unknown(String),
}

impl AwarenessLevel {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "orange" => Self::Orange,
            "red" => Self::Red,
            _ => Self::Unknown(s.to_string()),
        }
    }

    pub fn is_nominal(&self) -> bool {
        *self == Self::Green
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Unknown(s) => s,
        }
    }
}

impl fmt::Display for AwarenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WarningRow {
    #[serde(default)]
    text: Option<String>,
    awareness_type_name: String,
    id_area_aviso: String,
    #[serde(deserialize_with = "de::timestamp")]
    start_time: DateTime<Utc>,
    #[serde(rename = "awarenessLevelID")]
    awareness_level_id: String,
    #[serde(deserialize_with = "de::timestamp")]
    end_time: DateTime<Utc>,
}

/// An active warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub text: String,
    /// Hazard, e.g. "Agitação Marítima"
    pub awareness_type: String,
    pub area_id: String,
    pub level: AwarenessLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<WarningRow> for Warning {
    fn from(row: WarningRow) -> Self {
        Self {
            text: row.text.unwrap_or_default(),
            awareness_type: row.awareness_type_name,
            area_id: row.id_area_aviso,
            level: AwarenessLevel::parse(&row.awareness_level_id),
            start: row.start_time,
            end: row.end_time,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} - {} - {}",
            self.level,
            self.text,
            self.awareness_type,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

impl<G: Gateway> Session<G> {
    /// Non-green warnings for warning area `area_id`.
    ///
    /// Unlike the other datasets, callers should treat a failure here as
    /// significant: no result does not mean no warnings.
    pub async fn warnings(&self, area_id: &str) -> Result<Vec<Warning>, IpmaError> {
        let url = self.endpoints().warnings();
        let rows: Vec<WarningRow> = fetch_json(self.gateway(), &url).await?;

        let warnings: Vec<Warning> = rows
            .into_iter()
            .filter(|r| r.id_area_aviso == area_id)
            .map(Warning::from)
            .filter(|w| !w.level.is_nominal())
            .collect();

        debug!(area_id, count = warnings.len(), "fetched warnings");
        Ok(warnings)
    }
}
