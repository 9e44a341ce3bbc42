//! # Moment-Curvature Pipelines
//!
//! A fixed sweep of 100 curvature values over [0, θf) with θf defaulting
//! to 0.004 (1/cm). Every step solves axial equilibrium for the
//! neutral-axis depth — step 0 is the degenerate zero-strain plane and is
//! emitted as M = 0 without solving — and accumulates the moment about the
//! neutral axis. Steps after the first warm-start the solver from the
//! previous solution.
//!
//! The pipelines differ only in which constitutive law(s) and fiber sets
//! feed the shared driver:
//!
//! - beam / column, Hognestad, gross mesh
//! - beam / column, Mander unconfined, gross mesh
//! - column, Mander confined core + unconfined Mander cover, split mesh
//!
//! Pipelines are independent: running several for one section produces
//! comparative curves, and one failing never aborts the others. Output is
//! curvature in 1/m against moment in tf·m.

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::curve::ResultCurve;
use crate::confinement::ConfinementSolver;
use crate::errors::SectResult;
use crate::materials::{ConcreteMaterial, SteelMaterial};
use crate::section::{fibers::FiberMesh, rebar, BeamSection, ColumnSection, Direction};
use crate::solver::{ConcreteLaw, EquilibriumSolver, FiberSection};
use crate::units::{KgCm, PerCentimetre, PerMetre, TonneMetre};

/// Unconfined concrete law selector for the gross-mesh pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnconfinedModel {
    Hognestad,
    Mander,
}

/// Driver configuration shared by every pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentCurvatureConfig {
    /// Number of curvature stations
    pub steps: usize,
    /// Curvature sweep ceiling θf (1/cm); stations cover [0, θf)
    pub theta_f: f64,
    /// Target net axial force (kgf); 0 for pure moment-curvature
    pub target_axial: f64,
    /// Height strips in the fiber mesh
    pub mesh_strips: usize,
    /// Neutral-axis search tolerance (cm)
    pub tolerance: f64,
}

impl Default for MomentCurvatureConfig {
    fn default() -> Self {
        MomentCurvatureConfig {
            steps: 100,
            theta_f: 0.004,
            target_axial: 0.0,
            mesh_strips: 100,
            tolerance: 1e-3,
        }
    }
}

impl MomentCurvatureConfig {
    fn solver(&self) -> EquilibriumSolver {
        EquilibriumSolver {
            tolerance: self.tolerance,
            ..EquilibriumSolver::default()
        }
    }
}

/// Shared sweep: solve each curvature station and convert to field units.
fn sweep(
    section: &FiberSection<'_>,
    height: f64,
    config: &MomentCurvatureConfig,
) -> SectResult<ResultCurve> {
    let solver = config.solver();
    let d_theta = config.theta_f / config.steps as f64;

    let mut curvatures = Vec::with_capacity(config.steps);
    let mut moments = Vec::with_capacity(config.steps);
    let mut warm: Option<f64> = None;

    for step in 0..config.steps {
        let theta = d_theta * step as f64;
        let moment_kgcm = if step == 0 {
            // zero-strain plane: equilibrium is degenerate, moment is zero
            KgCm(0.0)
        } else {
            let solved = solver.solve(
                section,
                theta.tan(),
                config.target_axial,
                height,
                warm,
                step,
            )?;
            warm = Some(solved.c);
            KgCm(solved.moment)
        };
        let curvature: PerMetre = PerCentimetre(theta).into();
        let moment: TonneMetre = moment_kgcm.into();
        curvatures.push(curvature.0);
        moments.push(moment.0);
    }
    Ok(ResultCurve::from_parts(curvatures, moments))
}

/// Moment-curvature of a beam with an unconfined concrete law.
pub fn beam_curve(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &BeamSection,
    model: UnconfinedModel,
    config: &MomentCurvatureConfig,
) -> SectResult<ResultCurve> {
    let interface = section.cover + section.tie_dia / 2.0;
    let mesh = FiberMesh::gross(section.width, section.height, interface, config.mesh_strips);
    let rows = rebar::beam_rows(section);
    let law = match model {
        UnconfinedModel::Hognestad => ConcreteLaw::Hognestad(concrete),
        UnconfinedModel::Mander => ConcreteLaw::ManderUnconfined(concrete),
    };
    let fiber_section = FiberSection {
        cover: &mesh.cover,
        cover_law: law,
        core: &[],
        core_law: None,
        rebar: &rows,
        steel,
    };
    info!("beam moment-curvature ({model:?}): {} stations", config.steps);
    sweep(&fiber_section, section.height, config)
}

/// Moment-curvature of a column with an unconfined concrete law.
pub fn column_curve(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &ColumnSection,
    direction: Direction,
    model: UnconfinedModel,
    config: &MomentCurvatureConfig,
) -> SectResult<ResultCurve> {
    let oriented = section.oriented(direction);
    let interface = oriented.cover + oriented.tie_dia / 2.0;
    let mesh = FiberMesh::gross(oriented.width, oriented.height, interface, config.mesh_strips);
    let rows = rebar::column_rows(&oriented);
    let law = match model {
        UnconfinedModel::Hognestad => ConcreteLaw::Hognestad(concrete),
        UnconfinedModel::Mander => ConcreteLaw::ManderUnconfined(concrete),
    };
    let fiber_section = FiberSection {
        cover: &mesh.cover,
        cover_law: law,
        core: &[],
        core_law: None,
        rebar: &rows,
        steel,
    };
    info!(
        "column moment-curvature ({model:?}, {direction:?}): {} stations",
        config.steps
    );
    sweep(&fiber_section, oriented.height, config)
}

/// Moment-curvature of a column with a Mander-confined core and an
/// unconfined Mander cover shell.
pub fn column_confined_curve(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &ColumnSection,
    direction: Direction,
    confinement: &ConfinementSolver,
    config: &MomentCurvatureConfig,
) -> SectResult<ResultCurve> {
    let oriented = section.oriented(direction);
    let confined = confinement.confined_concrete(concrete, steel, &oriented)?;
    let interface = oriented.cover + oriented.tie_dia / 2.0;
    let mesh = FiberMesh::split(oriented.width, oriented.height, interface, config.mesh_strips);
    let rows = rebar::column_rows(&oriented);
    let fiber_section = FiberSection {
        cover: &mesh.cover,
        cover_law: ConcreteLaw::ManderUnconfined(concrete),
        core: &mesh.core,
        core_law: Some(ConcreteLaw::ManderConfined(&confined)),
        rebar: &rows,
        steel,
    };
    info!(
        "column confined moment-curvature ({direction:?}): fcc = {:.2}, {} stations",
        confined.fcc, config.steps
    );
    sweep(&fiber_section, oriented.height, config)
}

/// The comparative column pipelines, labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pipeline {
    Hognestad,
    ManderUnconfined,
    ManderConfined,
}

/// Run all column pipelines for one section. Failures stay per-pipeline:
/// one failed curve never suppresses its siblings.
pub fn column_suite(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &ColumnSection,
    direction: Direction,
    confinement: &ConfinementSolver,
    config: &MomentCurvatureConfig,
) -> Vec<(Pipeline, SectResult<ResultCurve>)> {
    vec![
        (
            Pipeline::Hognestad,
            column_curve(
                concrete,
                steel,
                section,
                direction,
                UnconfinedModel::Hognestad,
                config,
            ),
        ),
        (
            Pipeline::ManderUnconfined,
            column_curve(
                concrete,
                steel,
                section,
                direction,
                UnconfinedModel::Mander,
                config,
            ),
        ),
        (
            Pipeline::ManderConfined,
            column_confined_curve(concrete, steel, section, direction, confinement, config),
        ),
    ]
}

/// Run both beam pipelines for one section.
pub fn beam_suite(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    section: &BeamSection,
    config: &MomentCurvatureConfig,
) -> Vec<(Pipeline, SectResult<ResultCurve>)> {
    vec![
        (
            Pipeline::Hognestad,
            beam_curve(concrete, steel, section, UnconfinedModel::Hognestad, config),
        ),
        (
            Pipeline::ManderUnconfined,
            beam_curve(concrete, steel, section, UnconfinedModel::Mander, config),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn concrete() -> ConcreteMaterial {
        ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.0038).unwrap()
    }

    fn steel() -> SteelMaterial {
        SteelMaterial::new(4200.0, 6300.0, 2.1e6, 0.002, 0.008, 0.10).unwrap()
    }

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

    fn small_config() -> MomentCurvatureConfig {
        MomentCurvatureConfig {
            steps: 20,
            mesh_strips: 40,
            ..MomentCurvatureConfig::default()
        }
    }

    #[test]
    fn test_moment_starts_at_zero() {
        let curve = beam_curve(
            &concrete(),
            &steel(),
            &beam(),
            UnconfinedModel::Hognestad,
            &small_config(),
        )
        .unwrap();
        assert_eq!(curve.x()[0], 0.0);
        assert_eq!(curve.y()[0], 0.0);
        assert_eq!(curve.len(), 20);
    }

    #[test]
    fn test_curvature_stations_cover_half_open_sweep() {
        let config = small_config();
        let curve = beam_curve(
            &concrete(),
            &steel(),
            &beam(),
            UnconfinedModel::Mander,
            &config,
        )
        .unwrap();
        // stations are i·θf/m in 1/cm, reported in 1/m
        let d = config.theta_f / config.steps as f64 * 100.0;
        assert_relative_eq!(curve.x()[1], d, max_relative = 1e-12);
        let last = curve.x()[curve.len() - 1];
        assert!(last < config.theta_f * 100.0);
    }

    #[test]
    fn test_beam_moment_positive_and_bounded() {
        let curve = beam_curve(
            &concrete(),
            &steel(),
            &beam(),
            UnconfinedModel::Hognestad,
            &small_config(),
        )
        .unwrap();
        assert!(curve.y()[1..].iter().all(|&m| m > 0.0));
        // a 30x50 beam with 3φ16 bottom steel yields well under 100 tf·m
        assert!(curve.y().iter().all(|&m| m < 100.0));
    }

    #[test]
    fn test_determinism() {
        let a = column_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            UnconfinedModel::Mander,
            &small_config(),
        )
        .unwrap();
        let b = column_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            UnconfinedModel::Mander,
            &small_config(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_square_column_direction_invariant() {
        let x = column_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::X,
            UnconfinedModel::Hognestad,
            &small_config(),
        )
        .unwrap();
        let y = column_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            UnconfinedModel::Hognestad,
            &small_config(),
        )
        .unwrap();
        for (my, mx) in y.y().iter().zip(x.y()) {
            assert_relative_eq!(my, mx, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_column_suite_runs_all_pipelines() {
        let results = column_suite(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            &ConfinementSolver::default(),
            &small_config(),
        );
        assert_eq!(results.len(), 3);
        for (pipeline, result) in &results {
            assert!(result.is_ok(), "{pipeline:?} failed: {result:?}");
        }
    }

    #[test]
    fn test_confined_curve_carries_more_moment_late() {
        let config = small_config();
        let unconfined = column_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            UnconfinedModel::Mander,
            &config,
        )
        .unwrap();
        let confined = column_confined_curve(
            &concrete(),
            &steel(),
            &column(),
            Direction::Y,
            &ConfinementSolver::default(),
            &config,
        )
        .unwrap();
        let last = config.steps - 1;
        assert!(confined.y()[last] > 0.0);
        assert!(unconfined.y()[last] > 0.0);
    }
}
