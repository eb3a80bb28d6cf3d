use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Horizontal/vertical distance between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            horizontal: 80.0,
            vertical: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconcileOptions {
    /// Select every unmapped node (both networks) after clearing the previous selection.
    pub select_unmapped: bool,
    /// Move unmapped target nodes beside the matched cluster and lay them out in a grid.
    pub grid_unmapped: bool,
    pub grid: GridSpacing,
    /// Horizontal gap between the right-most matched target node and the grid anchor.
    pub anchor_offset: f64,
    /// Copy the source viewport onto the target once placement is done.
    pub copy_viewport: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            select_unmapped: false,
            grid_unmapped: false,
            grid: GridSpacing::default(),
            anchor_offset: 200.0,
            copy_viewport: true,
        }
    }
}

impl ReconcileOptions {
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidOptions {
                    message: format!("{name} must be a positive finite number, got {v}"),
                })
            }
        };
        positive("grid.horizontal", self.grid.horizontal)?;
        positive("grid.vertical", self.grid.vertical)?;
        if !self.anchor_offset.is_finite() {
            return Err(Error::InvalidOptions {
                message: format!("anchorOffset must be finite, got {}", self.anchor_offset),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let opts: ReconcileOptions =
            serde_json::from_str(r#"{ "gridUnmapped": true, "grid": { "vertical": 10 } }"#)
                .unwrap();
        assert!(opts.grid_unmapped);
        assert!(!opts.select_unmapped);
        assert_eq!(opts.grid.horizontal, 80.0);
        assert_eq!(opts.grid.vertical, 10.0);
        assert_eq!(opts.anchor_offset, 200.0);
        assert!(opts.copy_viewport);
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let mut opts = ReconcileOptions::default();
        opts.grid.vertical = 0.0;
        assert!(matches!(
            opts.validate(),
            Err(Error::InvalidOptions { .. })
        ));
        opts.grid.vertical = f64::NAN;
        assert!(opts.validate().is_err());
    }
}
