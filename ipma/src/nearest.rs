//! Nearest-neighbour ranking over reference entities.

use crate::domain::Coordinate;

/// Anything with a position on the map.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

/// Order `entities` by ascending great-circle distance to `origin`.
///
/// The sort is stable: entities at the same distance keep their upstream
/// order.
pub fn rank_by_distance<T: Located + Clone>(origin: &Coordinate, entities: &[T]) -> Vec<T> {
    let mut ranked: Vec<(f64, &T)> = entities
        .iter()
        .map(|e| (origin.distance_km(&e.coordinate()), e))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked.into_iter().map(|(_, e)| e.clone()).collect()
}

/// The entity at position `rank` (0 = nearest) in distance order, if there
/// are that many.
pub fn closest<'a, T: Located>(origin: &Coordinate, entities: &'a [T], rank: usize) -> Option<&'a T> {
    let mut ranked: Vec<(f64, usize)> = entities
        .iter()
        .enumerate()
        .map(|(i, e)| (origin.distance_km(&e.coordinate()), i))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked.get(rank).map(|&(_, i)| &entities[i])
}
