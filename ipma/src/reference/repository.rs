//! Lazily-populated, in-memory reference datasets.
//!
//! A repository starts empty and fetches its endpoint the first time it is
//! queried. The parsed collection is kept for the repository's lifetime and
//! never re-fetched; drop and recreate the repository to refresh it.

use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::IpmaError;
use crate::gateway::{Gateway, RetrievalError};
use crate::nearest::{self, Located};

/// Decoder turning a whole dataset payload into entities.
pub type Parser<E> = fn(serde_json::Value) -> Result<Vec<E>, serde_json::Error>;

/// A reference dataset fetched at most once.
///
/// Population goes through a [`OnceCell`], so concurrent first queries
/// still trigger a single upstream request.
#[derive(Debug)]
pub struct Repository<E> {
    name: &'static str,
    url: String,
    parse: Parser<E>,
    entities: OnceCell<Vec<E>>,
}

impl<E> Repository<E> {
    /// Create an unloaded repository for the dataset at `url`.
    pub fn new(name: &'static str, url: impl Into<String>, parse: Parser<E>) -> Self {
        Self {
            name,
            url: url.into(),
            parse,
            entities: OnceCell::new(),
        }
    }

    /// Dataset name used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Endpoint the dataset is populated from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the dataset has been fetched yet.
    pub fn is_loaded(&self) -> bool {
        self.entities.initialized()
    }

    /// Every entity in upstream order, fetching on first use.
    pub async fn all<G: Gateway>(&self, gateway: &G) -> Result<&[E], IpmaError> {
        let entities = self
            .entities
            .get_or_try_init(|| async {
                let payload = gateway.retrieve(&self.url).await?.into_json(&self.url)?;
                let entities =
                    (self.parse)(payload).map_err(|e| RetrievalError::decode(&self.url, e))?;

                if entities.is_empty() {
                    return Err(IpmaError::EmptyDataset { dataset: self.name });
                }

                debug!(dataset = self.name, count = entities.len(), "loaded reference data");
                Ok::<_, IpmaError>(entities)
            })
            .await?;

        Ok(entities.as_slice())
    }
}

impl<E: Located + Clone> Repository<E> {
    /// Entities ordered closest-first to `origin`, or in upstream order
    /// when no origin is given.
    pub async fn get<G: Gateway>(
        &self,
        gateway: &G,
        origin: Option<&Coordinate>,
    ) -> Result<Vec<E>, IpmaError> {
        let entities = self.all(gateway).await?;

        Ok(match origin {
            Some(origin) => nearest::rank_by_distance(origin, entities),
            None => entities.to_vec(),
        })
    }

    /// The entity at distance rank `rank` from `origin` (0 = nearest).
    pub async fn closest<G: Gateway>(
        &self,
        gateway: &G,
        origin: &Coordinate,
        rank: usize,
    ) -> Result<Option<E>, IpmaError> {
        let entities = self.all(gateway).await?;
        Ok(nearest::closest(origin, entities, rank).cloned())
    }
}
