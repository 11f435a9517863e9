//! Classifier datasets: weather types, wind speed classes and
//! precipitation intensity classes.
//!
//! Each maps a numeric id to a Portuguese and an English description. The
//! id `-99` is the "no information" bucket.

use std::fmt;

use serde::Deserialize;

use crate::de;
use crate::domain::Language;
use crate::error::IpmaError;
use crate::gateway::Gateway;

use super::places::DataEnvelope;
use super::repository::Repository;

/// Which classifier dataset an entity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    WeatherType,
    WindSpeed,
    Precipitation,
}

impl ClassifierKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeatherType => "weather types",
            Self::WindSpeed => "wind speed classes",
            Self::Precipitation => "precipitation classes",
        }
    }
}

/// One classifier entry.
///
/// The three datasets name their fields differently; the aliases below
/// fold them into one shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Classifier {
    #[serde(
        rename = "idWeatherType",
        alias = "classWindSpeed",
        alias = "classPrecInt",
        deserialize_with = "de::integer"
    )]
    pub id: i64,
    #[serde(
        rename = "descWeatherTypeEN",
        alias = "descIdWeatherTypeEN",
        alias = "descClassWindSpeedDailyEN",
        alias = "descClassPrecIntEN"
    )]
    pub en: String,
    #[serde(
        rename = "descWeatherTypePT",
        alias = "descIdWeatherTypePT",
        alias = "descClassWindSpeedDailyPT",
        alias = "descClassPrecIntPT"
    )]
    pub pt: String,
}

impl Classifier {
    /// Description in `lang`.
    pub fn description(&self, lang: Language) -> &str {
        match lang {
            Language::Portuguese => &self.pt,
            Language::English => &self.en,
        }
    }

    /// Whether this is the "no information" entry.
    pub fn is_sentinel(&self) -> bool {
        self.id < 0
    }

    /// Decode a classifier payload, ordered by `|id|` so the sentinel
    /// entry sorts last.
    pub(crate) fn parse_dataset(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        let mut entries = serde_json::from_value::<DataEnvelope<Self>>(value)?.data;
        entries.sort_by_key(|c| c.id.unsigned_abs());
        Ok(entries)
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description(Language::default()))
    }
}

/// Pick the entry for `id` out of entries sorted by `|id|`.
///
/// Negative ids resolve to the sentinel bucket. Other ids match exactly
/// when possible, and otherwise fall back to the classified entry with the
/// nearest id.
fn select(entries: &[Classifier], id: i64) -> Option<&Classifier> {
    if id < 0 {
        return entries
            .iter()
            .find(|c| c.id == id)
            .or_else(|| entries.iter().rev().find(|c| c.is_sentinel()))
            .or_else(|| entries.last());
    }

    entries
        .iter()
        .find(|c| c.id == id)
        .or_else(|| {
            entries
                .iter()
                .filter(|c| !c.is_sentinel())
                .min_by_key(|c| c.id.abs_diff(id))
        })
        .or_else(|| entries.last())
}

/// Repository of one classifier dataset, queried by id.
#[derive(Debug)]
pub struct ClassifierRepository {
    kind: ClassifierKind,
    inner: Repository<Classifier>,
}

impl ClassifierRepository {
    pub fn new(kind: ClassifierKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            inner: Repository::new(kind.name(), url, Classifier::parse_dataset),
        }
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Every entry, ordered by `|id|`.
    pub async fn all<G: Gateway>(&self, gateway: &G) -> Result<&[Classifier], IpmaError> {
        self.inner.all(gateway).await
    }

    /// The entry for `id`; `-99` gives the "no information" entry.
    pub async fn get<G: Gateway>(&self, gateway: &G, id: i64) -> Result<Classifier, IpmaError> {
        let entries = self.inner.all(gateway).await?;
        select(entries, id)
            .cloned()
            .ok_or(IpmaError::EmptyDataset {
                dataset: self.kind.name(),
            })
    }

    /// Like [`get`](Self::get), with an absent id treated as `-99`.
    pub async fn get_or_sentinel<G: Gateway>(
        &self,
        gateway: &G,
        id: Option<i64>,
    ) -> Result<Classifier, IpmaError> {
        self.get(gateway, id.unwrap_or(de::SENTINEL as i64)).await
    }
}
