//! # Axial Equilibrium Solver
//!
//! Given a strain plane slope (tan θ) and a target net axial force, finds
//! the neutral-axis depth c at which the section's resultant axial force
//! matches the target. Strain at height y is tanθ·(y − c); fiber and rebar
//! stresses come from the injected constitutive laws; N and M are
//! area-weighted sums about the neutral axis.
//!
//! The bracket policy is an explicit two-state retry: warm-started steps
//! first search a narrow window around the previous solution, then fall
//! back once to the full-section bracket; if that also fails the step
//! fails, and the owning pipeline stops (no value is substituted).

use log::debug;

use crate::errors::{SectError, SectResult};
use crate::materials::{ConcreteMaterial, ConfinedConcrete, SteelMaterial};
use crate::section::{Fiber, RebarPoint};
use crate::solver::brent::{brent, Bracket, RootError};

/// A concrete stress-strain law selected per fiber region.
#[derive(Debug, Clone, Copy)]
pub enum ConcreteLaw<'a> {
    Hognestad(&'a ConcreteMaterial),
    ManderUnconfined(&'a ConcreteMaterial),
    ManderConfined(&'a ConfinedConcrete),
}

impl ConcreteLaw<'_> {
    /// Compressive stress at `strain`.
    pub fn stress(&self, strain: f64) -> f64 {
        match self {
            ConcreteLaw::Hognestad(m) => m.hognestad(strain),
            ConcreteLaw::ManderUnconfined(m) => m.mander_unconfined(strain),
            ConcreteLaw::ManderConfined(m) => m.stress(strain),
        }
    }
}

/// A discretized section bound to its constitutive laws, ready for
/// resultant evaluation. Borrowed data only; building one is free.
#[derive(Clone, Copy)]
pub struct FiberSection<'a> {
    /// Cover fibers and their law
    pub cover: &'a [Fiber],
    pub cover_law: ConcreteLaw<'a>,
    /// Core fibers and their law (empty slice for unconfined analyses)
    pub core: &'a [Fiber],
    pub core_law: Option<ConcreteLaw<'a>>,
    /// Reinforcement rows, Park steel law
    pub rebar: &'a [RebarPoint],
    pub steel: &'a SteelMaterial,
}

impl FiberSection<'_> {
    /// Resultant (N, M) about the neutral axis for the plane (tanθ, c).
    /// N in kgf, M in kgf·cm; compression positive.
    pub fn resultants(&self, tan_theta: f64, c: f64) -> (f64, f64) {
        let mut n = 0.0;
        let mut m = 0.0;

        let mut add_fibers = |fibers: &[Fiber], law: &ConcreteLaw<'_>| {
            for fiber in fibers {
                let arm = fiber.y - c;
                let stress = law.stress(tan_theta * arm);
                n += stress * fiber.area;
                m += stress * fiber.area * arm;
            }
        };
        add_fibers(self.cover, &self.cover_law);
        if let Some(core_law) = &self.core_law {
            add_fibers(self.core, core_law);
        }

        for row in self.rebar {
            let arm = row.y - c;
            let stress = self.steel.park_stress(tan_theta * arm);
            n += stress * row.area;
            m += stress * row.area * arm;
        }
        (n, m)
    }
}

/// One converged curvature step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedStep {
    /// Neutral-axis depth (cm)
    pub c: f64,
    /// Moment about the neutral axis (kgf·cm)
    pub moment: f64,
}

/// Bracket retry states, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BracketAttempt {
    Narrow(Bracket),
    Full(Bracket),
}

/// Neutral-axis search configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumSolver {
    /// Absolute tolerance on c (cm)
    pub tolerance: f64,
    /// Narrow-bracket half-width as a fraction of the section height
    pub narrow_fraction: f64,
}

impl Default for EquilibriumSolver {
    fn default() -> Self {
        EquilibriumSolver {
            tolerance: 1e-3,
            narrow_fraction: 0.01,
        }
    }
}

impl EquilibriumSolver {
    /// Solve for the neutral-axis depth at one curvature step.
    ///
    /// `warm_start` is the previous step's solution; when present the
    /// narrow bracket is tried first. `step` and `tan_theta` only label
    /// the error when every bracket fails.
    pub fn solve(
        &self,
        section: &FiberSection<'_>,
        tan_theta: f64,
        target_axial: f64,
        height: f64,
        warm_start: Option<f64>,
        step: usize,
    ) -> SectResult<SolvedStep> {
        let full = Bracket::new(0.0, height);
        let mut attempt = match warm_start {
            Some(c_prev) => {
                let half = self.narrow_fraction * height;
                BracketAttempt::Narrow(
                    Bracket::new(c_prev - half, c_prev + half).clamp_to(&full),
                )
            }
            None => BracketAttempt::Full(full),
        };

        loop {
            let bracket = match attempt {
                BracketAttempt::Narrow(b) | BracketAttempt::Full(b) => b,
            };
            let residual = |c: f64| section.resultants(tan_theta, c).0 - target_axial;
            match brent(residual, bracket, self.tolerance) {
                Ok(c) => {
                    let (_, moment) = section.resultants(tan_theta, c);
                    return Ok(SolvedStep { c, moment });
                }
                Err(err) => match attempt {
                    BracketAttempt::Narrow(_) => {
                        debug!(
                            "step {step}: narrow bracket [{:.4}, {:.4}] missed the root ({err:?}), retrying full section",
                            bracket.lo, bracket.hi
                        );
                        attempt = BracketAttempt::Full(full);
                    }
                    BracketAttempt::Full(_) => {
                        return Err(SectError::EquilibriumSolve {
                            step,
                            curvature: tan_theta,
                            c_min: bracket.lo,
                            c_max: bracket.hi,
                        });
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::FiberMesh;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn concrete() -> ConcreteMaterial {
        ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.0038).unwrap()
    }

    fn steel() -> SteelMaterial {
        SteelMaterial::new(4200.0, 6300.0, 2.1e6, 0.002, 0.008, 0.10).unwrap()
    }

    fn symmetric_rebar() -> Vec<RebarPoint> {
        vec![
            RebarPoint { area: 6.0, y: 6.0 },
            RebarPoint { area: 6.0, y: 44.0 },
        ]
    }

    #[test]
    fn test_zero_plane_has_zero_resultants() {
        let mesh = FiberMesh::gross(30.0, 50.0, 4.5, 50);
        let con = concrete();
        let ste = steel();
        let rebar = symmetric_rebar();
        let section = FiberSection {
            cover: &mesh.cover,
            cover_law: ConcreteLaw::Hognestad(&con),
            core: &[],
            core_law: None,
            rebar: &rebar,
            steel: &ste,
        };
        let (n, m) = section.resultants(0.0, 25.0);
        assert_eq!(n, 0.0);
        assert_eq!(m, 0.0);
    }

    #[test]
    fn test_solved_c_is_interior_and_balanced() {
        let mesh = FiberMesh::gross(30.0, 50.0, 4.5, 100);
        let con = concrete();
        let ste = steel();
        let rebar = symmetric_rebar();
        let section = FiberSection {
            cover: &mesh.cover,
            cover_law: ConcreteLaw::Hognestad(&con),
            core: &[],
            core_law: None,
            rebar: &rebar,
            steel: &ste,
        };
        let solver = EquilibriumSolver::default();
        let solved = solver
            .solve(&section, 4.0e-5, 0.0, 50.0, None, 1)
            .unwrap();
        assert!(solved.c > 0.0 && solved.c < 50.0);
        let (n, _) = section.resultants(4.0e-5, solved.c);
        // residual should be small relative to the concrete block force
        assert_abs_diff_eq!(n, 0.0, epsilon = 50.0);
    }

    #[test]
    fn test_warm_start_matches_cold_solution() {
        let mesh = FiberMesh::gross(30.0, 50.0, 4.5, 100);
        let con = concrete();
        let ste = steel();
        let rebar = symmetric_rebar();
        let section = FiberSection {
            cover: &mesh.cover,
            cover_law: ConcreteLaw::Hognestad(&con),
            core: &[],
            core_law: None,
            rebar: &rebar,
            steel: &ste,
        };
        let solver = EquilibriumSolver::default();
        let cold = solver.solve(&section, 5.0e-5, 0.0, 50.0, None, 1).unwrap();
        let warm = solver
            .solve(&section, 5.2e-5, 0.0, 50.0, Some(cold.c), 2)
            .unwrap();
        let cold2 = solver.solve(&section, 5.2e-5, 0.0, 50.0, None, 2).unwrap();
        assert_relative_eq!(warm.c, cold2.c, max_relative = 1e-2);
    }

    #[test]
    fn test_unreachable_target_fails_with_context() {
        let mesh = FiberMesh::gross(30.0, 50.0, 4.5, 20);
        let con = concrete();
        let ste = steel();
        let rebar = symmetric_rebar();
        let section = FiberSection {
            cover: &mesh.cover,
            cover_law: ConcreteLaw::Hognestad(&con),
            core: &[],
            core_law: None,
            rebar: &rebar,
            steel: &ste,
        };
        let solver = EquilibriumSolver::default();
        // far beyond the squash load: no c can balance it
        let err = solver
            .solve(&section, 1.0e-4, 1.0e9, 50.0, Some(25.0), 7)
            .unwrap_err();
        assert_eq!(err.error_code(), "EQUILIBRIUM_SOLVE");
        assert!(err.to_string().contains("step 7"));
    }
}
