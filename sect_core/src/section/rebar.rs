//! # Rebar Layout
//!
//! Discrete reinforcement points built once per analysis from the layout
//! rules and immutable thereafter. Each point is a (area, height) pair; a
//! point aggregates every bar in one row.
//!
//! - Beams: a bottom layer and a top layer.
//! - Columns: two corner rows (2 corner bars each) at the extreme heights,
//!   with edge-bar rows spread linearly between the corner rows; the rows
//!   adjacent to the corners sit at the edge-bar height (corner and edge
//!   diameters differ, so their centres do too).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{BeamSection, ColumnSection};

/// A reinforcement row: aggregated bar area at one height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarPoint {
    /// Total bar area in the row (cm²)
    pub area: f64,
    /// Bar-centre height above the section bottom (cm)
    pub y: f64,
}

/// Area of one bar of diameter `d`.
pub fn bar_area(d: f64) -> f64 {
    0.25 * PI * d * d
}

/// Beam reinforcement: bottom and top layers.
///
/// Layer centres sit at cover + tie diameter + half the layer's bar
/// diameter from the nearest face.
pub fn beam_rows(section: &BeamSection) -> Vec<RebarPoint> {
    let rec = section.cover + section.tie_dia;
    vec![
        RebarPoint {
            area: section.bottom_bars as f64 * bar_area(section.bottom_dia),
            y: rec + section.bottom_dia / 2.0,
        },
        RebarPoint {
            area: section.top_bars as f64 * bar_area(section.top_dia),
            y: section.height - rec - section.top_dia / 2.0,
        },
    ]
}

/// Column reinforcement rows for an already-oriented section.
///
/// Produces, bottom to top: a corner row (2 corner bars), an edge row of
/// `bars_x - 2` bars, `bars_y - 2` interior rows of 2 edge bars spread
/// linearly between the corner heights, the mirrored edge row, and the top
/// corner row. Rows that would hold zero bars are dropped.
pub fn column_rows(section: &ColumnSection) -> Vec<RebarPoint> {
    let rec = section.cover + section.tie_dia;
    let corner_area = bar_area(section.corner_dia);
    let edge_area = bar_area(section.edge_dia);

    let y_corner_bot = rec + section.corner_dia / 2.0;
    let y_corner_top = section.height - y_corner_bot;
    let y_edge_bot = rec + section.edge_dia / 2.0;
    let y_edge_top = section.height - y_edge_bot;

    let mut rows = Vec::with_capacity(section.bars_y + 2);
    rows.push(RebarPoint {
        area: 2.0 * corner_area,
        y: y_corner_bot,
    });
    if section.bars_x > 2 {
        rows.push(RebarPoint {
            area: (section.bars_x - 2) as f64 * edge_area,
            y: y_edge_bot,
        });
    }
    // interior rows of the side faces, between the corner heights
    let n_y = section.bars_y;
    if n_y > 2 {
        let step = (y_corner_top - y_corner_bot) / (n_y - 1) as f64;
        for i in 1..(n_y - 1) {
            rows.push(RebarPoint {
                area: 2.0 * edge_area,
                y: y_corner_bot + step * i as f64,
            });
        }
    }
    if section.bars_x > 2 {
        rows.push(RebarPoint {
            area: (section.bars_x - 2) as f64 * edge_area,
            y: y_edge_top,
        });
    }
    rows.push(RebarPoint {
        area: 2.0 * corner_area,
        y: y_corner_top,
    });
    rows
}

/// Total steel area of a set of rows (cm²).
pub fn total_area(rows: &[RebarPoint]) -> f64 {
    rows.iter().map(|r| r.area).sum()
}

/// Height of the extreme tension row (the deepest steel), used for the
/// strength-reduction factor.
pub fn extreme_depth(rows: &[RebarPoint]) -> f64 {
    rows.iter().map(|r| r.y).fold(f64::NAN, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn beam() -> BeamSection {
        BeamSection {
            width: 30.0,
            height: 50.0,
            cover: 4.0,
            tie_dia: 1.0,
            tie_spacing: 15.0,
            bottom_bars: 3,
            bottom_dia: 1.6,
            top_bars: 2,
            top_dia: 1.2,
        }
    }

    fn column() -> ColumnSection {
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
    fn test_beam_layer_heights() {
        let rows = beam_rows(&beam());
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[0].y, 4.0 + 1.0 + 0.8);
        assert_relative_eq!(rows[1].y, 50.0 - 5.0 - 0.6);
        assert_relative_eq!(rows[0].area, 3.0 * bar_area(1.6));
    }

    #[test]
    fn test_column_rows_symmetric() {
        let rows = column_rows(&column());
        // corner, edge, interior, edge, corner
        assert_eq!(rows.len(), 5);
        let h = 40.0;
        for (low, high) in [(0, 4), (1, 3)] {
            assert_relative_eq!(rows[low].y, h - rows[high].y, max_relative = 1e-12);
            assert_relative_eq!(rows[low].area, rows[high].area);
        }
    }

    #[test]
    fn test_column_total_area_counts_all_bars() {
        let rows = column_rows(&column());
        // 4 corner bars + 4 edge bars
        let expect = 4.0 * bar_area(1.8) + 4.0 * bar_area(1.6);
        assert_relative_eq!(total_area(&rows), expect, max_relative = 1e-12);
    }

    #[test]
    fn test_two_by_two_column_has_corner_rows_only() {
        let mut c = column();
        c.bars_x = 2;
        c.bars_y = 2;
        let rows = column_rows(&c);
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(total_area(&rows), 4.0 * bar_area(1.8));
    }

    #[test]
    fn test_extreme_depth_is_top_row() {
        let rows = beam_rows(&beam());
        assert_relative_eq!(extreme_depth(&rows), 50.0 - 5.0 - 0.6);
    }
}
