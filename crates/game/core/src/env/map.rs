use crate::state::{Distance, Point3};

/// Map/terrain queries the engine delegates to the map owner.
///
/// The engine only enforces numeric contracts (range, movement budget); how
/// far apart two points are and whether a point can be stood on is the map's
/// business.
pub trait MapOracle: Send + Sync {
    /// Distance a creature covers going from `from` to `to`.
    fn distance(&self, from: Point3, to: Point3) -> Distance {
        from.distance_to(to)
    }

    /// Whether terrain at `point` can be occupied.
    fn is_passable(&self, point: Point3) -> bool;
}

/// Featureless terrain: straight-line distance, everything passable.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenTerrain;

impl MapOracle for OpenTerrain {
    fn is_passable(&self, _point: Point3) -> bool {
        true
    }
}
