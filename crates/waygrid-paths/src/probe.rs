use waygrid_core::WorldPoint;

/// Environment query deciding whether a cell is obstructed.
///
/// Called once per cell when a grid is built and again on every
/// walkability refresh, with the cell's world-space center and an effective
/// detection radius.
pub trait ObstacleProbe<const D: usize> {
    /// Whether anything blocking lies within `radius` of `center`.
    fn is_blocked(&self, center: WorldPoint<D>, radius: f32) -> bool;
}

impl<const D: usize, F> ObstacleProbe<D> for F
where
    F: Fn(WorldPoint<D>, f32) -> bool,
{
    #[inline]
    fn is_blocked(&self, center: WorldPoint<D>, radius: f32) -> bool {
        self(center, radius)
    }
}

/// Probe for an empty world: nothing is ever blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenWorld;

impl<const D: usize> ObstacleProbe<D> for OpenWorld {
    #[inline]
    fn is_blocked(&self, _center: WorldPoint<D>, _radius: f32) -> bool {
        false
    }
}

/// Probe over a set of spherical obstacles (discs in 2D).
///
/// A cell is blocked when its detection sphere overlaps any obstacle.
#[derive(Debug, Clone, Default)]
pub struct Spheres<const D: usize> {
    spheres: Vec<(WorldPoint<D>, f32)>,
}

impl<const D: usize> Spheres<D> {
    /// Create an empty obstacle set.
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
        }
    }

    /// Add an obstacle (builder).
    pub fn with(mut self, center: WorldPoint<D>, radius: f32) -> Self {
        self.push(center, radius);
        self
    }

    /// Add an obstacle.
    pub fn push(&mut self, center: WorldPoint<D>, radius: f32) {
        self.spheres.push((center, radius));
    }

    /// Remove every obstacle.
    pub fn clear(&mut self) {
        self.spheres.clear();
    }
}

impl<const D: usize> ObstacleProbe<D> for Spheres<D> {
    fn is_blocked(&self, center: WorldPoint<D>, radius: f32) -> bool {
        self.spheres
            .iter()
            .any(|&(c, r)| c.distance(center) <= r + radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_probes() {
        let probe = |c: WorldPoint<2>, _r: f32| c.axis(0) > 1.0;
        assert!(probe.is_blocked(WorldPoint::xy(2.0, 0.0), 0.5));
        assert!(!probe.is_blocked(WorldPoint::xy(0.0, 0.0), 0.5));
    }

    #[test]
    fn open_world_blocks_nothing() {
        assert!(!ObstacleProbe::<3>::is_blocked(&OpenWorld, WorldPoint::ORIGIN, 100.0));
    }

    #[test]
    fn spheres_overlap_test() {
        let probe = Spheres::new().with(WorldPoint::xy(0.0, 0.0), 1.0);
        assert!(probe.is_blocked(WorldPoint::xy(1.4, 0.0), 0.5));
        assert!(!probe.is_blocked(WorldPoint::xy(1.6, 0.0), 0.5));
        assert!(!Spheres::<2>::new().is_blocked(WorldPoint::ORIGIN, 1.0));
    }
}
