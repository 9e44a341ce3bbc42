//! # Fiber Discretization
//!
//! Horizontal strip meshes for fiber integration. The height [0, h] is cut
//! into `n` equal strips, with two extra edges inserted at the cover/core
//! interface heights so no strip straddles the interface. For confined
//! analyses each strip's area is split into a core portion (core width,
//! when the strip centroid lies inside the core band) and a cover portion
//! (the remainder); unconfined analyses use a single gross-width mesh.
//!
//! Meshes are rebuilt fresh per analysis call; they are cheap and
//! input-dependent, so nothing is cached.

use serde::{Deserialize, Serialize};

/// A single concrete fiber: a strip of area with one representative
/// stress evaluated at its centroid height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    /// Strip area (cm²)
    pub area: f64,
    /// Centroid height above the section bottom (cm)
    pub y: f64,
}

/// Fiber mesh partitioned into cover and core regions.
///
/// For unconfined analyses `core` is empty and `cover` carries the gross
/// width. The union of all fiber areas equals the gross area b·h.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FiberMesh {
    /// Cover fibers (full height; reduced to the shell width inside the core band)
    pub cover: Vec<Fiber>,
    /// Core fibers (only inside the core band)
    pub core: Vec<Fiber>,
}

impl FiberMesh {
    /// Gross-width mesh for unconfined analyses.
    ///
    /// `interface` is the cover/core interface height (cover + tie_dia/2);
    /// edges are still inserted there so comparative runs of the confined
    /// and unconfined pipelines integrate over identical strips.
    pub fn gross(width: f64, height: f64, interface: f64, strips: usize) -> FiberMesh {
        let edges = strip_edges(height, interface, strips);
        let cover = edges
            .windows(2)
            .map(|w| Fiber {
                area: (w[1] - w[0]) * width,
                y: 0.5 * (w[0] + w[1]),
            })
            .collect();
        FiberMesh {
            cover,
            core: Vec::new(),
        }
    }

    /// Cover/core split mesh for confined analyses.
    ///
    /// Strips whose centroid lies inside [interface, height - interface]
    /// contribute `core_width`-wide fibers to the core and the remaining
    /// shell to the cover; strips outside the band are cover only.
    pub fn split(width: f64, height: f64, interface: f64, strips: usize) -> FiberMesh {
        let core_width = (width - 2.0 * interface).max(0.0);
        let edges = strip_edges(height, interface, strips);
        let mut cover = Vec::with_capacity(edges.len() - 1);
        let mut core = Vec::new();
        for w in edges.windows(2) {
            let dy = w[1] - w[0];
            let y = 0.5 * (w[0] + w[1]);
            let in_band = y >= interface && y <= height - interface;
            let core_area = if in_band { dy * core_width } else { 0.0 };
            cover.push(Fiber {
                area: dy * width - core_area,
                y,
            });
            if in_band {
                core.push(Fiber { area: core_area, y });
            }
        }
        FiberMesh { cover, core }
    }

    /// Total meshed area (cm²); equals the gross area for both variants.
    pub fn total_area(&self) -> f64 {
        self.cover.iter().map(|f| f.area).sum::<f64>()
            + self.core.iter().map(|f| f.area).sum::<f64>()
    }
}

/// Strip edges: `strips` equal divisions of [0, height] plus the two
/// cover/core interface heights, deduplicated and sorted.
fn strip_edges(height: f64, interface: f64, strips: usize) -> Vec<f64> {
    let n = strips.max(1);
    let mut edges: Vec<f64> = (0..=n).map(|i| height * i as f64 / n as f64).collect();
    for extra in [interface, height - interface] {
        if extra > 0.0 && extra < height && !edges.iter().any(|&e| (e - extra).abs() < 1e-9) {
            edges.push(extra);
        }
    }
    edges.sort_by(|a, b| a.partial_cmp(b).unwrap());
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gross_mesh_area_and_count() {
        let mesh = FiberMesh::gross(30.0, 50.0, 4.5, 10);
        // 10 strips + 2 inserted interface edges
        assert_eq!(mesh.cover.len(), 12);
        assert!(mesh.core.is_empty());
        assert_relative_eq!(mesh.total_area(), 1500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_split_mesh_conserves_area() {
        let mesh = FiberMesh::split(40.0, 40.0, 4.5, 12);
        assert_relative_eq!(mesh.total_area(), 1600.0, max_relative = 1e-12);
        assert!(!mesh.core.is_empty());
    }

    #[test]
    fn test_no_strip_straddles_interface() {
        let mesh = FiberMesh::split(40.0, 40.0, 4.5, 7);
        // every core fiber centroid lies strictly inside the band
        for f in &mesh.core {
            assert!(f.y > 4.5 && f.y < 35.5);
        }
        // cover fibers outside the band carry the full width
        for f in &mesh.cover {
            if f.y < 4.5 || f.y > 35.5 {
                let dy = f.area / 40.0;
                assert!(dy > 0.0);
            }
        }
    }

    #[test]
    fn test_interface_on_grid_not_duplicated() {
        // interface 10.0 coincides with a grid edge for strips=4, height=40
        let mesh = FiberMesh::gross(40.0, 40.0, 10.0, 4);
        assert_eq!(mesh.cover.len(), 4);
    }

    #[test]
    fn test_fiber_areas_positive() {
        let mesh = FiberMesh::split(40.0, 60.0, 5.0, 33);
        assert!(mesh.cover.iter().all(|f| f.area > 0.0));
        assert!(mesh.core.iter().all(|f| f.area > 0.0));
    }
}
