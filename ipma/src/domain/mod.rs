//! Small value types shared by every dataset.

mod coordinate;
mod day;
mod language;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use day::{DayOffset, SeaDay};
pub use language::{CompassPoint, Language};
