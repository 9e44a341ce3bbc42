//! # Axial-Moment Interaction Diagram
//!
//! Strength-design P-M surface of a column, swept directly over the
//! neutral-axis depth with the rectangular (Whitney) stress block — not
//! fiber integration — and a bilinear steel law. The two sweep extremes
//! are replaced by their closed forms: pure tension at c → 0 and pure
//! compression at c = h. Each point also carries the strength-reduction
//! factor φ interpolated from the extreme-tension-steel strain.
//!
//! Output units: c in cm, P in tf, M in tf·m.

use serde::{Deserialize, Serialize};

use crate::errors::SectResult;
use crate::materials::{ConcreteMaterial, SteelMaterial};
use crate::section::{rebar, ColumnSection, Direction, RebarPoint};
use crate::units::{KgCm, KgForce, TonneForce, TonneMetre};

/// Number of neutral-axis stations
const STEPS: usize = 100;

/// A computed interaction surface: nominal and design sequences over the
/// swept neutral-axis depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiagram {
    /// Neutral-axis depths (cm), uniform over [0, h]
    pub c: Vec<f64>,
    /// Nominal axial capacity Pn (tf, compression positive)
    pub axial: Vec<f64>,
    /// Nominal moment capacity Mn (tf·m)
    pub moment: Vec<f64>,
    /// Strength-reduction factor φ per station
    pub phi: Vec<f64>,
    /// Design axial capacity φPn (tf)
    pub design_axial: Vec<f64>,
    /// Design moment capacity φMn (tf·m)
    pub design_moment: Vec<f64>,
}

/// Whitney stress-block depth factor β1, clamped to [0.65, 0.85].
pub fn beta_1(fc0: f64) -> f64 {
    (0.85 - 0.05 * (fc0 - 280.0) / 70.0).clamp(0.65, 0.85)
}

/// Pure-tension closed form: P = −Σ As·fy (kgf).
fn pure_tension(rows: &[RebarPoint], fy: f64) -> f64 {
    -fy * rebar::total_area(rows)
}

/// Pure-compression closed form: P0 = 0.85·fc0·(Ag − As) + fy·As (kgf).
fn pure_compression(rows: &[RebarPoint], gross_area: f64, fc0: f64, fy: f64) -> f64 {
    let as_total = rebar::total_area(rows);
    0.85 * fc0 * (gross_area - as_total) + fy * as_total
}

/// Stress-block resultants at one interior neutral-axis depth,
/// (P, M) in (kgf, kgf·cm), moment about mid-height.
fn block_resultants(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    rows: &[RebarPoint],
    width: f64,
    height: f64,
    c: f64,
) -> (f64, f64) {
    let b1 = beta_1(concrete.fc0);
    let a = b1 * c;
    let block_force = 0.85 * concrete.fc0 * width * a;
    let mut p = block_force;
    let mut m = block_force * (height / 2.0 - a / 2.0);

    for row in rows {
        let strain = concrete.eps_cu * (c - row.y) / c;
        let stress = steel.bilinear_stress(strain);
        p += stress * row.area;
        m += stress * row.area * (height / 2.0 - row.y);
    }
    (p, m)
}

/// φ from the extreme-tension-steel strain: 0.65 when at or below yield,
/// 0.90 at eps_y + 0.003 and beyond, linear in between.
fn phi_factor(extreme_tension_strain: f64, eps_y: f64) -> f64 {
    if extreme_tension_strain <= eps_y {
        0.65
    } else if extreme_tension_strain >= eps_y + 0.003 {
        0.90
    } else {
        0.65 + 0.25 * (extreme_tension_strain - eps_y) / 0.003
    }
}

/// Generate the interaction diagram of a column about `direction`.
pub fn interaction_diagram(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &ColumnSection,
    direction: Direction,
) -> SectResult<InteractionDiagram> {
    let oriented = section.oriented(direction);
    let rows = rebar::column_rows(&oriented);
    let height = oriented.height;
    let d_max = rebar::extreme_depth(&rows);

    let mut c_stations = Vec::with_capacity(STEPS);
    let mut axial = Vec::with_capacity(STEPS);
    let mut moment = Vec::with_capacity(STEPS);
    let mut phi = Vec::with_capacity(STEPS);

    for i in 0..STEPS {
        let c = height * i as f64 / (STEPS - 1) as f64;
        let (p_kg, m_kgcm) = if i == 0 {
            (pure_tension(&rows, steel.fy), 0.0)
        } else if i == STEPS - 1 {
            (
                pure_compression(&rows, oriented.gross_area(), concrete.fc0, steel.fy),
                0.0,
            )
        } else {
            block_resultants(concrete, steel, &rows, oriented.width, height, c)
        };

        let et = concrete.eps_cu * (d_max - c) / c.max(1e-9);
        let p: TonneForce = KgForce(p_kg).into();
        let m: TonneMetre = KgCm(m_kgcm).into();
        c_stations.push(c);
        axial.push(p.0);
        moment.push(m.0);
        phi.push(phi_factor(et, steel.eps_y));
    }

    let design_axial = axial.iter().zip(&phi).map(|(p, f)| p * f).collect();
    let design_moment = moment.iter().zip(&phi).map(|(m, f)| m * f).collect();

    Ok(InteractionDiagram {
        c: c_stations,
        axial,
        moment,
        phi,
        design_axial,
        design_moment,
    })
}
