//! # Confinement Solver
//!
//! Everything between the tie layout and the confined concrete law:
//!
//! 1. effective-confinement geometry — core dimensions, the parabolic
//!    ineffective wedges between restrained bars, the effective-area
//!    coefficient ke, and the lateral confining pressures;
//! 2. confined peak stress fcc — by default an octahedral-stress fixed
//!    point on a five-parameter failure surface, alternatively the Mander
//!    design chart;
//! 3. confined strain at peak, ecc = eps_c0·(1 + 5(fcc/fc0 − 1));
//! 4. confined ultimate strain — energy balance between the confined
//!    concrete curve, the unconfined curve, and the transverse steel's
//!    strain-energy capacity.

pub mod energy;
pub mod nomogram;
pub mod octahedral;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{SectError, SectResult};
use crate::materials::{ConcreteMaterial, ConfinedConcrete, SteelMaterial};
use crate::section::rebar::bar_area;
use crate::section::ColumnSection;

/// Effective lateral confinement of a column core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveConfinement {
    /// Effective-confinement coefficient ke = Ae/Acc
    pub ke: f64,
    /// Lateral confining stress across the X direction (kg/cm²)
    pub flx: f64,
    /// Lateral confining stress across the Y direction (kg/cm²)
    pub fly: f64,
    /// Volumetric transverse-reinforcement ratio ρs
    pub rho_s: f64,
}

/// Compute the effective confinement of an oriented column section.
///
/// The ineffective area between restrained bars is taken as parabolic
/// wedges of area w²/6 per clear span w; the wedge width uses the corner
/// and edge bar diameters separately (the self-consistent form of the
/// source formulas).
pub fn effective_confinement(
    section: &ColumnSection,
    steel: &SteelMaterial,
) -> SectResult<EffectiveConfinement> {
    let bc = section.core_width();
    let dc = section.core_height();
    let de = section.tie_dia;
    let spacing = section.tie_spacing;
    if bc <= 0.0 || dc <= 0.0 {
        return Err(SectError::invalid_parameter(
            "cover",
            section.cover.to_string(),
            "no confined core remains inside the cover",
        ));
    }
    let clear_spacing = spacing - de;

    // clear span between restrained bars along each face
    let legs_x = section.legs_x as f64;
    let legs_y = section.legs_y as f64;
    let wx = (bc - de - 2.0 * section.corner_dia - (legs_x - 2.0) * section.edge_dia)
        / (legs_x - 1.0);
    let wy = (dc - de - 2.0 * section.corner_dia - (legs_y - 2.0) * section.edge_dia)
        / (legs_y - 1.0);
    let ineffective =
        2.0 * (legs_x - 1.0) * wx * wx / 6.0 + 2.0 * (legs_y - 1.0) * wy * wy / 6.0;

    let effective = (bc * dc - ineffective)
        * (1.0 - clear_spacing / (2.0 * bc))
        * (1.0 - clear_spacing / (2.0 * dc));

    // longitudinal steel inside the core: 4 corner bars + the edge bars
    let n_edge = section.total_bars().saturating_sub(4) as f64;
    let as_long = 4.0 * bar_area(section.corner_dia) + n_edge * bar_area(section.edge_dia);
    let rho_cc = as_long / ((dc - de) * (bc - de));
    let acc = bc * dc * (1.0 - rho_cc);
    let ke = effective / acc;

    // transverse steel ratios per direction, and the volumetric ratio
    let tie = bar_area(de);
    let rho_sx = section.legs_x as f64 * tie / (dc * spacing);
    let rho_sy = section.legs_y as f64 * tie / (bc * spacing);
    let rho_s = tie * (section.legs_x as f64 * dc + section.legs_y as f64 * bc)
        / (dc * bc * spacing);

    let confinement = EffectiveConfinement {
        ke,
        flx: ke * rho_sx * steel.fy,
        fly: ke * rho_sy * steel.fy,
        rho_s,
    };
    debug!(
        "effective confinement: ke={:.4}, flx={:.2}, fly={:.2}, rho_s={:.4}",
        confinement.ke, confinement.flx, confinement.fly, confinement.rho_s
    );
    Ok(confinement)
}

/// How the confined peak stress is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PeakStressMethod {
    /// Fixed point on the five-parameter octahedral failure surface
    #[default]
    OctahedralFixedPoint,
    /// Two-stage interpolation of the Mander design chart
    DesignChart,
}

/// Confinement solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfinementSolver {
    pub method: PeakStressMethod,
}

impl Default for ConfinementSolver {
    fn default() -> Self {
        ConfinementSolver {
            method: PeakStressMethod::OctahedralFixedPoint,
        }
    }
}

impl ConfinementSolver {
    /// Solve the full confined constitutive law for an oriented column.
    ///
    /// Fails with `ConfinementSolve` when the peak stress cannot be
    /// determined and `UltimateStrainSolve` when the energy balance has no
    /// root; both are fatal to the confined pipeline only.
    pub fn confined_concrete(
        &self,
        concrete: &ConcreteMaterial,
        steel: &SteelMaterial,
        section: &ColumnSection,
    ) -> SectResult<ConfinedConcrete> {
        let lateral = effective_confinement(section, steel)?;
        let fcc = self.peak_stress(concrete, &lateral)?;
        let eps_cu = energy::confined_ultimate_strain(concrete, steel, fcc, lateral.rho_s)?;
        info!(
            "confined concrete: fcc={:.2} ({:.3}·fc0), eps_cu={:.4}",
            fcc,
            fcc / concrete.fc0,
            eps_cu
        );
        Ok(ConfinedConcrete::new(concrete, fcc, eps_cu))
    }

    /// Confined peak stress by the configured method.
    pub fn peak_stress(
        &self,
        concrete: &ConcreteMaterial,
        lateral: &EffectiveConfinement,
    ) -> SectResult<f64> {
        match self.method {
            PeakStressMethod::OctahedralFixedPoint => {
                octahedral::confined_peak_stress(concrete.fc0, lateral.flx, lateral.fly)
            }
            PeakStressMethod::DesignChart => {
                let ratio = nomogram::peak_ratio(
                    lateral.flx / concrete.fc0,
                    lateral.fly / concrete.fc0,
                )
                .map_err(|e| SectError::ConfinementSolve {
                    reason: e.to_string(),
                })?;
                Ok(ratio * concrete.fc0)
            }
        }
    }
}
