//! Library error types.

use std::fmt;

use crate::gateway::RetrievalError;

/// Which ranked candidate list ran out during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    ForecastLocation,
    ObservationStation,
    SeaLocation,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CandidateKind::ForecastLocation => "forecast location",
            CandidateKind::ObservationStation => "observation station",
            CandidateKind::SeaLocation => "sea location",
        })
    }
}

/// Errors surfaced to callers of the library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IpmaError {
    /// An upstream request failed or returned an unreadable body
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// An upstream dataset contained no usable records
    #[error("dataset {dataset} has no records")]
    EmptyDataset { dataset: &'static str },

    /// Every ranked candidate failed validation
    #[error("no {kind} near {coordinate} has usable data")]
    ResolutionExhausted {
        kind: CandidateKind,
        coordinate: String,
    },
}
