//! Static reference datasets and the repositories that cache them.

mod classifier;
mod places;
mod repository;

pub use classifier::{Classifier, ClassifierKind, ClassifierRepository};
pub use places::{District, ForecastLocation, SeaLocation, Station};
pub use repository::{Parser, Repository};
