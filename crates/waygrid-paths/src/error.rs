use std::fmt;

/// Errors that can occur when building a [`GridSpace`](crate::GridSpace).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The node radius is not a positive finite number.
    InvalidRadius(f32),
    /// A world-size axis is not a positive finite number.
    InvalidExtent { axis: usize, value: f32 },
    /// The obstacle detection scale is not a positive finite number.
    InvalidDetectionScale(f32),
    /// An axis rounds to zero cells (extent smaller than half a cell).
    EmptyAxis { axis: usize },
    /// The cell count overflows the index type.
    TooManyCells,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius(r) => write!(f, "grid: node radius must be positive, got {r}"),
            Self::InvalidExtent { axis, value } => {
                write!(f, "grid: world size on axis {axis} must be positive, got {value}")
            }
            Self::InvalidDetectionScale(s) => {
                write!(f, "grid: obstacle detection scale must be positive, got {s}")
            }
            Self::EmptyAxis { axis } => write!(f, "grid: axis {axis} has no cells"),
            Self::TooManyCells => f.write_str("grid: cell count overflows the index type"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            GridError::InvalidRadius(-1.0).to_string(),
            "grid: node radius must be positive, got -1"
        );
        assert_eq!(
            GridError::EmptyAxis { axis: 2 }.to_string(),
            "grid: axis 2 has no cells"
        );
        let boxed: Box<dyn std::error::Error> = Box::new(GridError::TooManyCells);
        assert!(boxed.to_string().contains("overflows"));
    }
}
