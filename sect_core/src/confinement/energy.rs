//! # Energy-Balance Ultimate Strain
//!
//! The confined ultimate strain is reached when the additional strain
//! energy stored in the confined core equals the energy the transverse
//! steel can absorb before fracturing: the residual
//!
//! ```text
//! g(ecu) = ∫₀^ecu σ_confined dε − ∫₀^esp σ_unconfined dε − ρs·∫₀^esu σ_steel dε
//! ```
//!
//! is driven to zero by a bracketed root search on ecu ∈ [0.002, 0.100].
//! Areas are Simpson-integrated over 100-point samples of each curve. A
//! residual that does not change sign across the interval is fatal to the
//! confined pipeline (`UltimateStrainSolve`).

use log::debug;

use crate::errors::{SectError, SectResult};
use crate::materials::{ConcreteMaterial, ConfinedConcrete, SteelMaterial};
use crate::solver::brent::{brent, Bracket};

/// Admissible confined ultimate strain interval
const STRAIN_LO: f64 = 0.002;
const STRAIN_HI: f64 = 0.100;

/// Sample count per quadrature
const SAMPLES: usize = 100;

/// Tolerance on the solved strain
const XTOL: f64 = 1e-6;

/// Composite Simpson quadrature over `n` uniformly spaced samples.
///
/// An odd interval count is handled with the 3/8 rule on the last three
/// intervals.
pub(crate) fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    assert!(n >= 4, "quadrature needs at least 4 samples");
    let intervals = n - 1;
    let h = (b - a) / intervals as f64;
    let sample = |i: usize| f(a + h * i as f64);

    let (simpson_intervals, tail) = if intervals % 2 == 0 {
        (intervals, 0.0)
    } else {
        // Simpson 3/8 on the final three intervals
        let k = intervals - 3;
        let tail = 3.0 * h / 8.0
            * (sample(k) + 3.0 * sample(k + 1) + 3.0 * sample(k + 2) + sample(k + 3));
        (k, tail)
    };

    let mut sum = 0.0;
    if simpson_intervals > 0 {
        sum += sample(0) + sample(simpson_intervals);
        for i in 1..simpson_intervals {
            sum += if i % 2 == 1 { 4.0 } else { 2.0 } * sample(i);
        }
        sum *= h / 3.0;
    }
    sum + tail
}

/// Solve the energy balance for the confined ultimate strain.
///
/// `rho_s` is the volumetric transverse-reinforcement ratio weighting the
/// steel energy term.
pub(crate) fn confined_ultimate_strain(
    concrete: &ConcreteMaterial,
    steel: &SteelMaterial,
    fcc: f64,
    rho_s: f64,
) -> SectResult<f64> {
    // confined law sampled out to the bracket top while searching
    let trial = ConfinedConcrete::new(concrete, fcc, STRAIN_HI);

    let unconfined_area = simpson(
        |e| concrete.mander_unconfined(e),
        0.0,
        concrete.eps_cu,
        SAMPLES,
    );
    let steel_area = simpson(|e| steel.park_stress(e), 0.0, steel.eps_su, SAMPLES);
    let capacity = unconfined_area + rho_s * steel_area;

    let residual =
        |ecu: f64| simpson(|e| trial.stress(e), 0.0, ecu, SAMPLES) - capacity;

    let ecu = brent(residual, Bracket::new(STRAIN_LO, STRAIN_HI), XTOL).map_err(|_| {
        SectError::UltimateStrainSolve {
            lo: STRAIN_LO,
            hi: STRAIN_HI,
        }
    })?;
    debug!("energy balance: ecu = {ecu:.5} (rho_s = {rho_s:.4})");
    Ok(ecu)
}
