//! # Section Geometry
//!
//! Rectangular beam and column cross-sections with their reinforcement
//! layout, read from the caller's geometry parameter map. Lengths are in
//! centimetres; bar diameters are entered in millimetres (field convention)
//! and converted once at the map boundary.
//!
//! Column analyses are directional: analyzing about the X axis swaps the
//! roles of width/height and of the two bar-count families, so downstream
//! code always works in the "bending about Y" convention.

pub mod fibers;
pub mod rebar;

pub use fibers::{Fiber, FiberMesh};
pub use rebar::RebarPoint;

use serde::{Deserialize, Serialize};

use crate::errors::{SectError, SectResult};
use crate::params::ParameterMap;
use crate::units::{Centimetres, Millimetres};

/// Bending direction for column analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    /// Bending about the X axis (section rotated: width/height swapped)
    X,
    /// Bending about the Y axis (section as entered)
    #[default]
    Y,
}

fn mm_to_cm(map: &ParameterMap, key: &str) -> SectResult<f64> {
    let d: Centimetres = Millimetres(map.require(key)?).into();
    Ok(d.0)
}

/// Rectangular beam section with bottom/top reinforcement layers.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width": 30.0,
///   "height": 50.0,
///   "cover": 4.0,
///   "tie_dia": 10.0,
///   "tie_spacing": 15.0,
///   "bottom_bars": 3, "bottom_dia": 16.0,
///   "top_bars": 2, "top_dia": 12.0
/// }
/// ```
///
/// Dimensions in cm, bar diameters in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSection {
    /// Width b (cm)
    pub width: f64,
    /// Height h (cm)
    pub height: f64,
    /// Clear cover to the tie (cm)
    pub cover: f64,
    /// Transverse (tie) bar diameter (cm)
    pub tie_dia: f64,
    /// Tie spacing (cm)
    pub tie_spacing: f64,
    /// Bottom-layer bar count
    pub bottom_bars: usize,
    /// Bottom-layer bar diameter (cm)
    pub bottom_dia: f64,
    /// Top-layer bar count
    pub top_bars: usize,
    /// Top-layer bar diameter (cm)
    pub top_dia: f64,
}

impl BeamSection {
    /// Read the section from its parameter map (diameters in mm).
    pub fn from_map(map: &ParameterMap) -> SectResult<Self> {
        let section = BeamSection {
            width: map.require("width")?,
            height: map.require("height")?,
            cover: map.require("cover")?,
            tie_dia: mm_to_cm(map, "tie_dia")?,
            tie_spacing: map.require("tie_spacing")?,
            bottom_bars: map.require_count("bottom_bars")?,
            bottom_dia: mm_to_cm(map, "bottom_dia")?,
            top_bars: map.require_count("top_bars")?,
            top_dia: mm_to_cm(map, "top_dia")?,
        };
        section.validate()?;
        Ok(section)
    }

    fn validate(&self) -> SectResult<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SectError::invalid_parameter(
                "width",
                format!("{}x{}", self.width, self.height),
                "section dimensions must be positive",
            ));
        }
        if self.cover <= 0.0 || 2.0 * self.cover >= self.height.min(self.width) {
            return Err(SectError::invalid_parameter(
                "cover",
                self.cover.to_string(),
                "cover must be positive and leave a core",
            ));
        }
        Ok(())
    }

    /// Gross area b·h (cm²).
    pub fn gross_area(&self) -> f64 {
        self.width * self.height
    }
}

/// Rectangular column section with a perimeter bar arrangement and
/// rectangular tie sets in both directions.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width": 40.0,
///   "height": 40.0,
///   "cover": 4.0,
///   "tie_dia": 10.0,
///   "tie_spacing": 10.0,
///   "corner_dia": 18.0, "edge_dia": 16.0,
///   "bars_x": 3, "bars_y": 3,
///   "legs_x": 3, "legs_y": 3
/// }
/// ```
///
/// Dimensions in cm, bar diameters in mm. `bars_x`/`bars_y` are the bars
/// per face in each direction (corners counted in both), `legs_x`/`legs_y`
/// the tie legs crossing each direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSection {
    /// Width b (cm)
    pub width: f64,
    /// Height h (cm)
    pub height: f64,
    /// Clear cover to the tie (cm)
    pub cover: f64,
    /// Transverse (tie) bar diameter (cm)
    pub tie_dia: f64,
    /// Tie spacing along the member (cm)
    pub tie_spacing: f64,
    /// Corner longitudinal bar diameter (cm)
    pub corner_dia: f64,
    /// Edge (non-corner) longitudinal bar diameter (cm)
    pub edge_dia: f64,
    /// Bars per face, X direction
    pub bars_x: usize,
    /// Bars per face, Y direction
    pub bars_y: usize,
    /// Tie legs crossing the X direction
    pub legs_x: usize,
    /// Tie legs crossing the Y direction
    pub legs_y: usize,
}

impl ColumnSection {
    /// Read the section from its parameter map (diameters in mm).
    pub fn from_map(map: &ParameterMap) -> SectResult<Self> {
        let section = ColumnSection {
            width: map.require("width")?,
            height: map.require("height")?,
            cover: map.require("cover")?,
            tie_dia: mm_to_cm(map, "tie_dia")?,
            tie_spacing: map.require("tie_spacing")?,
            corner_dia: mm_to_cm(map, "corner_dia")?,
            edge_dia: mm_to_cm(map, "edge_dia")?,
            bars_x: map.require_count("bars_x")?,
            bars_y: map.require_count("bars_y")?,
            legs_x: map.require_count("legs_x")?,
            legs_y: map.require_count("legs_y")?,
        };
        section.validate()?;
        Ok(section)
    }

    fn validate(&self) -> SectResult<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SectError::invalid_parameter(
                "width",
                format!("{}x{}", self.width, self.height),
                "section dimensions must be positive",
            ));
        }
        if self.cover <= 0.0 || 2.0 * self.cover >= self.height.min(self.width) {
            return Err(SectError::invalid_parameter(
                "cover",
                self.cover.to_string(),
                "cover must be positive and leave a core",
            ));
        }
        if self.bars_x < 2 || self.bars_y < 2 {
            return Err(SectError::invalid_parameter(
                "bars_x",
                format!("{}/{}", self.bars_x, self.bars_y),
                "a perimeter arrangement needs at least 2 bars per face",
            ));
        }
        if self.legs_x < 2 || self.legs_y < 2 {
            return Err(SectError::invalid_parameter(
                "legs_x",
                format!("{}/{}", self.legs_x, self.legs_y),
                "a rectangular tie set has at least 2 legs each way",
            ));
        }
        if self.tie_spacing <= self.tie_dia {
            return Err(SectError::invalid_parameter(
                "tie_spacing",
                self.tie_spacing.to_string(),
                "tie spacing must exceed the tie diameter",
            ));
        }
        Ok(())
    }

    /// The section as seen by an analysis in `direction`: bending about X
    /// swaps width/height, the bar-count families, and the leg counts.
    pub fn oriented(&self, direction: Direction) -> ColumnSection {
        match direction {
            Direction::Y => *self,
            Direction::X => ColumnSection {
                width: self.height,
                height: self.width,
                bars_x: self.bars_y,
                bars_y: self.bars_x,
                legs_x: self.legs_y,
                legs_y: self.legs_x,
                ..*self
            },
        }
    }

    /// Gross area b·h (cm²).
    pub fn gross_area(&self) -> f64 {
        self.width * self.height
    }

    /// Total longitudinal bars on the perimeter (corners counted once):
    /// 2·(bars_x + bars_y) − 4.
    pub fn total_bars(&self) -> usize {
        2 * (self.bars_x + self.bars_y) - 4
    }

    /// Confined core width, bc = b − 2·cover − tie_dia (centreline dims).
    pub fn core_width(&self) -> f64 {
        self.width - 2.0 * self.cover - self.tie_dia
    }

    /// Confined core height, dc = h − 2·cover − tie_dia.
    pub fn core_height(&self) -> f64 {
        self.height - 2.0 * self.cover - self.tie_dia
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_column() -> ColumnSection {
        ColumnSection {
            width: 40.0,
            height: 40.0,
            cover: 4.0,
            tie_dia: 1.0,
            tie_spacing: 10.0,
            corner_dia: 1.8,
            edge_dia: 1.6,
            bars_x: 3,
            bars_y: 3,
            legs_x: 3,
            legs_y: 3,
        }
    }

    #[test]
    fn test_core_dimensions() {
        let c = square_column();
        assert_eq!(c.core_width(), 40.0 - 8.0 - 1.0);
        assert_eq!(c.core_height(), 31.0);
    }

    #[test]
    fn test_total_bars_counts_corners_once() {
        let c = square_column();
        assert_eq!(c.total_bars(), 8);
    }

    #[test]
    fn test_oriented_swap() {
        let mut c = square_column();
        c.height = 60.0;
        c.bars_y = 4;
        let x = c.oriented(Direction::X);
        assert_eq!(x.width, 60.0);
        assert_eq!(x.height, 40.0);
        assert_eq!(x.bars_x, 4);
        assert_eq!(x.bars_y, 3);
        let y = c.oriented(Direction::Y);
        assert_eq!(y, c);
    }

    #[test]
    fn test_from_map_converts_diameters() {
        let map: ParameterMap = serde_json::from_str(
            r#"{"width": 40, "height": 40, "cover": 4, "tie_dia": 10,
                "tie_spacing": 10, "corner_dia": 18, "edge_dia": 16,
                "bars_x": 3, "bars_y": 3, "legs_x": 3, "legs_y": 3}"#,
        )
        .unwrap();
        let c = ColumnSection::from_map(&map).unwrap();
        assert_eq!(c.tie_dia, 1.0);
        assert_eq!(c.corner_dia, 1.8);
    }
}
