//! Coordinate, axis and crop policy types used throughout the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CenterError;

/// Image origin in (row, column) order.
///
/// A `None` component leaves that axis un-centered. Negative components
/// count from the far edge, so `-1.0` is the last row or column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub row: Option<f64>,
    pub col: Option<f64>,
}

impl Origin {
    /// Origin with both coordinates set.
    pub fn new(row: f64, col: f64) -> Self {
        Self {
            row: Some(row),
            col: Some(col),
        }
    }

    /// Origin that only centers rows.
    pub fn row_only(row: f64) -> Self {
        Self {
            row: Some(row),
            col: None,
        }
    }

    /// Origin that only centers columns.
    pub fn col_only(col: f64) -> Self {
        Self {
            row: None,
            col: Some(col),
        }
    }

    /// Coordinate along `axis` (0 = row, 1 = column).
    pub fn get(&self, axis: usize) -> Option<f64> {
        match axis {
            0 => self.row,
            1 => self.col,
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Origin {
    fn from((row, col): (f64, f64)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let show = |c: Option<f64>| c.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(f, "({}, {})", show(self.row), show(self.col))
    }
}

/// Set of image axes: 0 is vertical (rows), 1 is horizontal (columns).
///
/// Serialized as a list of axis indices, e.g. `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Axes {
    rows: bool,
    cols: bool,
}

impl Axes {
    pub const BOTH: Axes = Axes {
        rows: true,
        cols: true,
    };
    pub const ROWS: Axes = Axes {
        rows: true,
        cols: false,
    };
    pub const COLS: Axes = Axes {
        rows: false,
        cols: true,
    };

    /// Build an axis set from indices, rejecting anything but 0 and 1.
    pub fn from_indices(indices: &[usize]) -> Result<Self, CenterError> {
        let mut axes = Axes {
            rows: false,
            cols: false,
        };
        for &axis in indices {
            match axis {
                0 => axes.rows = true,
                1 => axes.cols = true,
                other => return Err(CenterError::InvalidAxis(other)),
            }
        }
        Ok(axes)
    }

    pub fn contains(&self, axis: usize) -> bool {
        match axis {
            0 => self.rows,
            1 => self.cols,
            _ => false,
        }
    }

    /// Member axes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let axes = *self;
        (0..2).filter(move |&a| axes.contains(a))
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::BOTH
    }
}

impl TryFrom<Vec<usize>> for Axes {
    type Error = CenterError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

impl From<Axes> for Vec<usize> {
    fn from(axes: Axes) -> Self {
        axes.iter().collect()
    }
}

/// Output size policy for [`set_center`](crate::set_center::set_center).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPolicy {
    /// Same shape as the input; data shifted past an edge is lost and
    /// exposed regions are zero.
    #[default]
    MaintainSize,
    /// Largest symmetric crop around the origin that needs no padding.
    ValidRegion,
    /// Zero-pad so that no input sample is discarded.
    MaintainData,
}

impl CropPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            CropPolicy::MaintainSize => "maintain_size",
            CropPolicy::ValidRegion => "valid_region",
            CropPolicy::MaintainData => "maintain_data",
        }
    }
}

impl FromStr for CropPolicy {
    type Err = CenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintain_size" => Ok(CropPolicy::MaintainSize),
            "valid_region" => Ok(CropPolicy::ValidRegion),
            "maintain_data" => Ok(CropPolicy::MaintainData),
            other => Err(CenterError::InvalidCrop(other.to_string())),
        }
    }
}

impl fmt::Display for CropPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_from_indices() {
        assert_eq!(Axes::from_indices(&[0, 1]).unwrap(), Axes::BOTH);
        assert_eq!(Axes::from_indices(&[1, 0, 1]).unwrap(), Axes::BOTH);
        assert_eq!(Axes::from_indices(&[0]).unwrap(), Axes::ROWS);
        assert_eq!(Axes::from_indices(&[1]).unwrap(), Axes::COLS);
        assert!(matches!(
            Axes::from_indices(&[0, 2]),
            Err(CenterError::InvalidAxis(2))
        ));
    }

    #[test]
    fn test_axes_iter_is_ordered() {
        assert_eq!(Axes::BOTH.iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(Axes::COLS.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_crop_policy_parsing() {
        for policy in [
            CropPolicy::MaintainSize,
            CropPolicy::ValidRegion,
            CropPolicy::MaintainData,
        ] {
            assert_eq!(policy.name().parse::<CropPolicy>().unwrap(), policy);
        }
        let err = "maintain_everything".parse::<CropPolicy>().unwrap_err();
        assert!(matches!(err, CenterError::InvalidCrop(ref s) if s == "maintain_everything"));
        assert!(err.to_string().contains("maintain_everything"));
    }

    #[test]
    fn test_origin_accessors() {
        let origin = Origin::row_only(3.5);
        assert_eq!(origin.get(0), Some(3.5));
        assert_eq!(origin.get(1), None);
        assert_eq!(Origin::from((1.0, 2.0)), Origin::new(1.0, 2.0));
        assert_eq!(Origin::col_only(4.0).to_string(), "(-, 4)");
    }
}
