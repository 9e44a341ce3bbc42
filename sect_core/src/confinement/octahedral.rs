//! # Octahedral Fixed Point
//!
//! Confined peak stress from the lateral confining pressures by iterating
//! on the three principal stresses against a five-parameter
//! (Willam–Warnke) failure surface.
//!
//! The lateral pressures fix σ1 and σ2 (compression negative); σ3 is the
//! unknown axial strength. Each pass evaluates two independent estimates
//! of the octahedral shear stress — directly from the principal stresses,
//! and from the failure surface's tension/compression meridians blended at
//! the current Lode angle — then back-solves σ3 from the surface estimate
//! via the quadratic closed form. Converged when the two estimates agree
//! and σ3 is stable; fcc = −σ3.

use log::debug;

use crate::errors::{SectError, SectResult};

/// Iteration cap for the fixed point
const MAX_ITERATIONS: usize = 1000;

/// Convergence tolerance on both the shear-estimate mismatch and the
/// σ3 update (kg/cm²)
const TOLERANCE: f64 = 1e-6;

/// Tension-meridian polynomial τ_oct/fc0 in x = σ_oct/fc0.
fn tension_meridian(x: f64) -> f64 {
    0.069_232 - 0.661_091 * x - 0.049_350 * x * x
}

/// Compression-meridian polynomial τ_oct/fc0 in x = σ_oct/fc0.
fn compression_meridian(x: f64) -> f64 {
    0.122_965 - 1.150_502 * x - 0.315_545 * x * x
}

/// Octahedral shear stress from the principal stresses.
fn octahedral_shear(s1: f64, s2: f64, s3: f64) -> f64 {
    ((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s3 - s1).powi(2)).sqrt() / 3.0
}

/// Willam–Warnke elliptic blend of the meridian radii at cos θ.
fn surface_shear(rt: f64, rc: f64, cos_theta: f64) -> f64 {
    let d = 4.0 * (rc * rc - rt * rt) * cos_theta * cos_theta + (rc - 2.0 * rt).powi(2);
    let radicand =
        4.0 * (rc * rc - rt * rt) * cos_theta * cos_theta + 5.0 * rt * rt - 4.0 * rt * rc;
    (2.0 * rc * (rc * rc - rt * rt) * cos_theta
        + rc * (2.0 * rt - rc) * radicand.max(0.0).sqrt())
        / d
}

/// Solve for the confined peak stress fcc.
///
/// `flx`/`fly` are the (non-negative) effective lateral pressures. With
/// both zero the surface is calibrated so the uniaxial strength fc0 is
/// returned on the first pass.
pub fn confined_peak_stress(fc0: f64, flx: f64, fly: f64) -> SectResult<f64> {
    let s1 = -flx.min(fly);
    let s2 = -flx.max(fly);
    let mut s3 = -fc0;
    let mut last_update = f64::INFINITY;

    for iteration in 0..MAX_ITERATIONS {
        let oct_normal = (s1 + s2 + s3) / 3.0;
        let x = oct_normal / fc0;
        let rt = fc0 * tension_meridian(x);
        let rc = fc0 * compression_meridian(x);

        let tau_direct = octahedral_shear(s1, s2, s3);
        if tau_direct == 0.0 {
            // hydrostatic state; no deviatoric direction to follow
            break;
        }
        let cos_theta = (2.0 * s1 - s2 - s3) / (3.0 * std::f64::consts::SQRT_2 * tau_direct);
        let tau_surface = surface_shear(rt, rc, cos_theta.clamp(-1.0, 1.0));

        // converged when the two shear estimates agree at the current σ3
        // and the previous refinement no longer moved it
        if (tau_direct - tau_surface).abs() < TOLERANCE && last_update < TOLERANCE {
            debug!(
                "octahedral fixed point converged in {} iterations: fcc = {:.4}",
                iteration + 1,
                -s3
            );
            return Ok(-s3);
        }

        // back-solve σ3 from τ_oct(σ1, σ2, σ3) = τ_surface
        let rhs = 9.0 * tau_surface * tau_surface - (s1 - s2).powi(2);
        let sum = s1 + s2;
        let discriminant = sum * sum - 2.0 * (s1 * s1 + s2 * s2 - rhs);
        let s3_next = 0.5 * (sum - discriminant.max(0.0).sqrt());

        last_update = (s3_next - s3).abs();
        s3 = s3_next;
    }

    if flx == 0.0 && fly == 0.0 {
        return Ok(fc0);
    }
    Err(SectError::ConfinementSolve {
        reason: format!(
            "octahedral fixed point did not converge within {MAX_ITERATIONS} iterations \
             (flx={flx:.3}, fly={fly:.3})"
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_unconfined_recovers_uniaxial_strength() {
        let fcc = confined_peak_stress(210.0, 0.0, 0.0).unwrap();
        // the surface calibration reproduces uniaxial strength to ~1e-5
        assert_relative_eq!(fcc, 210.0, max_relative = 1e-4);
    }

    #[test]
    fn test_confinement_never_reduces_strength() {
        for fl in [2.0, 10.0, 20.0, 40.0] {
            let fcc = confined_peak_stress(210.0, fl, fl).unwrap();
            assert!(fcc >= 210.0, "fcc = {fcc} at fl = {fl}");
        }
    }

    #[test]
    fn test_equal_pressures_satisfy_surface() {
        // Scenario C: at the solution both shear estimates agree
        let fc0 = 210.0;
        let fl = 21.0;
        let fcc = confined_peak_stress(fc0, fl, fl).unwrap();
        let (s1, s2, s3) = (-fl, -fl, -fcc);
        let x = (s1 + s2 + s3) / 3.0 / fc0;
        let tau_direct = octahedral_shear(s1, s2, s3);
        let cos_theta = (2.0 * s1 - s2 - s3) / (3.0 * std::f64::consts::SQRT_2 * tau_direct);
        let tau_surface = surface_shear(
            fc0 * tension_meridian(x),
            fc0 * compression_meridian(x),
            cos_theta,
        );
        assert_abs_diff_eq!(tau_direct, tau_surface, epsilon = 1e-6);
    }

    #[test]
    fn test_more_confinement_more_strength() {
        let low = confined_peak_stress(210.0, 5.0, 5.0).unwrap();
        let high = confined_peak_stress(210.0, 25.0, 25.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_unequal_pressures_between_equal_bounds() {
        let fcc_low = confined_peak_stress(210.0, 10.0, 10.0).unwrap();
        let fcc_mixed = confined_peak_stress(210.0, 10.0, 20.0).unwrap();
        let fcc_high = confined_peak_stress(210.0, 20.0, 20.0).unwrap();
        assert!(fcc_mixed >= fcc_low && fcc_mixed <= fcc_high);
    }
}
