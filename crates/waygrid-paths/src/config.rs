use waygrid_core::{Lattice, WorldPoint};

use crate::error::GridError;

/// Recommended bounds for [`GridConfig::detection_scale`].
pub const DETECTION_SCALE_RANGE: (f32, f32) = (0.1, 10.0);

/// Construction parameters for a [`GridSpace`](crate::GridSpace).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default = "GridConfig::default"))]
pub struct GridConfig<const D: usize> {
    /// World position of the grid's center.
    pub center: WorldPoint<D>,
    /// World-space extent per axis.
    #[cfg_attr(feature = "serde", serde(with = "waygrid_core::serde_array"))]
    pub world_size: [f32; D],
    /// Half the edge length of a cell.
    pub node_radius: f32,
    /// Multiplier on `node_radius` for the obstacle probe; larger values
    /// mark more cells near obstacles as blocked.
    pub detection_scale: f32,
    /// Build the neighbour table once up front instead of enumerating
    /// neighbours on every expansion.
    pub precompute_neighbors: bool,
    /// Re-probe walkability whenever the host calls
    /// [`Pathfinder::update`](crate::Pathfinder::update).
    pub auto_refresh: bool,
}

impl<const D: usize> Default for GridConfig<D> {
    fn default() -> Self {
        Self {
            center: WorldPoint::ORIGIN,
            world_size: [10.0; D],
            node_radius: 0.25,
            detection_scale: 1.0,
            precompute_neighbors: true,
            auto_refresh: false,
        }
    }
}

impl<const D: usize> GridConfig<D> {
    /// Config for a grid of `world_size` centered on the origin.
    pub fn new(world_size: [f32; D], node_radius: f32) -> Self {
        Self {
            world_size,
            node_radius,
            ..Self::default()
        }
    }

    /// Set the grid center (builder).
    pub fn with_center(mut self, center: WorldPoint<D>) -> Self {
        self.center = center;
        self
    }

    /// Set the detection scale (builder).
    pub fn with_detection_scale(mut self, scale: f32) -> Self {
        self.detection_scale = scale;
        self
    }

    /// Enable or disable the precomputed neighbour table (builder).
    pub fn with_precomputed_neighbors(mut self, on: bool) -> Self {
        self.precompute_neighbors = on;
        self
    }

    /// Enable or disable auto refresh (builder).
    pub fn with_auto_refresh(mut self, on: bool) -> Self {
        self.auto_refresh = on;
        self
    }

    /// Edge length of a cell.
    #[inline]
    pub fn node_diameter(&self) -> f32 {
        self.node_radius * 2.0
    }

    /// Radius handed to the obstacle probe.
    #[inline]
    pub fn detection_radius(&self) -> f32 {
        self.node_radius * self.detection_scale
    }

    /// Check every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), GridError> {
        self.cell_counts().map(|_| ())
    }

    /// Per-axis cell counts, `round(world_size / diameter)` with ties to
    /// even, after validating the parameters.
    pub fn cell_counts(&self) -> Result<[i32; D], GridError> {
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            return Err(GridError::InvalidRadius(self.node_radius));
        }
        if !(self.detection_scale.is_finite() && self.detection_scale > 0.0) {
            return Err(GridError::InvalidDetectionScale(self.detection_scale));
        }
        let (lo, hi) = DETECTION_SCALE_RANGE;
        if self.detection_scale <= lo || self.detection_scale > hi {
            log::warn!(
                "detection scale {} outside recommended range ({lo}, {hi}]",
                self.detection_scale
            );
        }

        let diameter = self.node_diameter();
        let mut dims = [0i32; D];
        for (axis, (dim, &size)) in dims.iter_mut().zip(self.world_size.iter()).enumerate() {
            if !(size.is_finite() && size > 0.0) {
                return Err(GridError::InvalidExtent { axis, value: size });
            }
            let n = (size / diameter).round_ties_even();
            if !n.is_finite() || n >= i32::MAX as f32 {
                return Err(GridError::TooManyCells);
            }
            if n < 1.0 {
                return Err(GridError::EmptyAxis { axis });
            }
            *dim = n as i32;
        }
        Lattice::checked_len(dims).ok_or(GridError::TooManyCells)?;
        Ok(dims)
    }
}

/// Tuning for [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Give up after expanding this many cells. `None` searches until the
    /// open set is exhausted.
    pub max_expansions: Option<usize>,
    /// Log the duration of every search at `info` instead of `debug`.
    pub log_timings: bool,
}

impl SearchConfig {
    /// Set the expansion budget (builder).
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Enable or disable timing logs at `info` (builder).
    pub fn with_log_timings(mut self, on: bool) -> Self {
        self.log_timings = on;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_config_round_trip() {
        let cfg = GridConfig::new([12.0, 4.0, 6.0], 0.5)
            .with_center(WorldPoint::xyz(1.0, 2.0, 3.0))
            .with_auto_refresh(true);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig<3> = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GridConfig<2> =
            serde_json::from_str(r#"{"world_size":[3.0,3.0],"node_radius":0.5}"#).unwrap();
        assert_eq!(cfg.cell_counts(), Ok([3, 3]));
        assert!(cfg.precompute_neighbors);
        let search: SearchConfig = serde_json::from_str(r#"{"max_expansions":64}"#).unwrap();
        assert_eq!(search.max_expansions, Some(64));
        assert!(!search.log_timings);
    }
}
