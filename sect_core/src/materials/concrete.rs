//! # Concrete Constitutive Models
//!
//! Uniaxial compressive stress-strain laws for concrete: the Hognestad
//! parabola-plus-softening model and the Mander/Popovics model in its
//! unconfined and confined variants. Stresses are positive in compression,
//! in the same units as the peak stress input (kg/cm² throughout the rest
//! of the engine).
//!
//! Confined peak stress and ultimate strain are not computed here; the
//! confinement solver produces them and hands a [`ConfinedConcrete`] to the
//! fiber pipelines.

use serde::{Deserialize, Serialize};

use crate::errors::{SectError, SectResult};
use crate::params::ParameterMap;

/// Unconfined concrete material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fc": 210.0,
///   "ec": 218819.788,
///   "eps_c0": 0.002,
///   "eps_cu": 0.0038
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Peak compressive stress f'c (kg/cm²)
    pub fc0: f64,
    /// Elastic modulus Ec (kg/cm²)
    pub ec: f64,
    /// Strain at peak stress
    pub eps_c0: f64,
    /// Ultimate (spalling) strain of the unconfined material
    pub eps_cu: f64,
}

impl ConcreteMaterial {
    /// Create a material, checking the invariants fc0 > 0, Ec > Esec,
    /// 0 < eps_c0 < eps_cu.
    pub fn new(fc0: f64, ec: f64, eps_c0: f64, eps_cu: f64) -> SectResult<Self> {
        let material = ConcreteMaterial {
            fc0,
            ec,
            eps_c0,
            eps_cu,
        };
        material.validate()?;
        Ok(material)
    }

    /// Read the material from its parameter map.
    ///
    /// Keys: `fc`, `ec`, `eps_c0`, `eps_cu`.
    pub fn from_map(map: &ParameterMap) -> SectResult<Self> {
        ConcreteMaterial::new(
            map.require("fc")?,
            map.require("ec")?,
            map.require("eps_c0")?,
            map.require("eps_cu")?,
        )
    }

    fn validate(&self) -> SectResult<()> {
        if self.fc0 <= 0.0 {
            return Err(SectError::invalid_parameter(
                "fc",
                self.fc0.to_string(),
                "peak stress must be positive",
            ));
        }
        if !(0.0 < self.eps_c0 && self.eps_c0 < self.eps_cu) {
            return Err(SectError::invalid_parameter(
                "eps_c0",
                self.eps_c0.to_string(),
                "strains must satisfy 0 < eps_c0 < eps_cu",
            ));
        }
        // The Popovics shape parameter r = Ec/(Ec - Esec) blows up as Ec
        // approaches the secant modulus fc/eps_c0.
        if self.ec <= self.secant_modulus() {
            return Err(SectError::invalid_parameter(
                "ec",
                self.ec.to_string(),
                "elastic modulus must exceed the secant modulus fc/eps_c0",
            ));
        }
        Ok(())
    }

    /// Secant modulus at peak, Esec = fc0/eps_c0.
    pub fn secant_modulus(&self) -> f64 {
        self.fc0 / self.eps_c0
    }

    /// Popovics curve-shape parameter r = Ec/(Ec - Esec).
    pub fn popovics_r(&self) -> f64 {
        self.ec / (self.ec - self.secant_modulus())
    }

    /// Hognestad model: ascending parabola to (eps_c0, fc0), then linear
    /// softening to 0.85·fc0 at eps_cu. Zero outside [0, eps_cu].
    pub fn hognestad(&self, strain: f64) -> f64 {
        if strain < 0.0 || strain > self.eps_cu {
            return 0.0;
        }
        if strain <= self.eps_c0 {
            let x = strain / self.eps_c0;
            self.fc0 * (2.0 * x - x * x)
        } else {
            self.fc0 * (1.0 - 0.15 * (strain - self.eps_c0) / (self.eps_cu - self.eps_c0))
        }
    }

    /// Unconfined Mander model (Popovics form): peak fc0 at eps_c0,
    /// valid to 2·eps_c0, then a linear tail to zero at the spalling
    /// strain eps_cu. Clipped at zero; zero outside [0, eps_cu].
    pub fn mander_unconfined(&self, strain: f64) -> f64 {
        if strain < 0.0 || strain > self.eps_cu {
            return 0.0;
        }
        let r = self.popovics_r();
        let knee = 2.0 * self.eps_c0;
        if strain <= knee {
            let x = strain / self.eps_c0;
            self.fc0 * (x * r) / (r - 1.0 + x.powf(r))
        } else {
            let at_knee = self.fc0 * (2.0 * r) / (r - 1.0 + 2.0f64.powf(r));
            (at_knee * (1.0 - (strain - knee) / (self.eps_cu - knee))).max(0.0)
        }
    }

    /// Sample the Hognestad curve at `n` uniform strains over [0, eps_cu].
    pub fn hognestad_curve(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        sample_curve(0.0, self.eps_cu, n, |e| self.hognestad(e))
    }

    /// Sample the unconfined Mander curve at `n` uniform strains over [0, eps_cu].
    pub fn mander_curve(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        sample_curve(0.0, self.eps_cu, n, |e| self.mander_unconfined(e))
    }
}

/// Confined concrete, produced by the confinement solver.
///
/// Same Popovics functional form as the unconfined Mander model, evaluated
/// with the confined peak stress fcc and confined strain at peak ecc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfinedConcrete {
    /// Confined peak stress fcc (kg/cm²)
    pub fcc: f64,
    /// Strain at confined peak, ecc = eps_c0·(1 + 5(fcc/fc0 - 1))
    pub ecc: f64,
    /// Confined ultimate strain
    pub eps_cu: f64,
    /// Popovics shape parameter computed from (fcc, ecc)
    r: f64,
}

impl ConfinedConcrete {
    /// Build the confined law from the parent material and the solved
    /// confined peak stress / ultimate strain.
    pub fn new(base: &ConcreteMaterial, fcc: f64, eps_cu: f64) -> Self {
        let ecc = base.eps_c0 * (1.0 + 5.0 * (fcc / base.fc0 - 1.0));
        let esec = fcc / ecc;
        ConfinedConcrete {
            fcc,
            ecc,
            eps_cu,
            r: base.ec / (base.ec - esec),
        }
    }

    /// Confined Mander stress. Zero outside [0, eps_cu].
    pub fn stress(&self, strain: f64) -> f64 {
        if strain < 0.0 || strain > self.eps_cu {
            return 0.0;
        }
        let x = strain / self.ecc;
        self.fcc * (x * self.r) / (self.r - 1.0 + x.powf(self.r))
    }

    /// Sample the confined curve at `n` uniform strains over [0, eps_cu].
    pub fn curve(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        sample_curve(0.0, self.eps_cu, n, |e| self.stress(e))
    }
}

/// Uniform sampling helper shared by the curve methods.
pub(crate) fn sample_curve(
    lo: f64,
    hi: f64,
    n: usize,
    f: impl Fn(f64) -> f64,
) -> (Vec<f64>, Vec<f64>) {
    let step = if n > 1 { (hi - lo) / (n - 1) as f64 } else { 0.0 };
    let strains: Vec<f64> = (0..n).map(|i| lo + step * i as f64).collect();
    let stresses: Vec<f64> = strains.iter().map(|&e| f(e)).collect();
    (strains, stresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn scenario_a() -> ConcreteMaterial {
        ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.0038).unwrap()
    }

    #[test]
    fn test_hognestad_origin_and_peak() {
        let c = scenario_a();
        assert_eq!(c.hognestad(0.0), 0.0);
        assert_abs_diff_eq!(c.hognestad(0.002), 210.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hognestad_softening_endpoint() {
        let c = scenario_a();
        assert_relative_eq!(c.hognestad(c.eps_cu), 0.85 * 210.0, max_relative = 1e-12);
    }

    #[test]
    fn test_hognestad_never_negative() {
        let c = scenario_a();
        let (_, stresses) = c.hognestad_curve(100);
        assert!(stresses.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_hognestad_zero_outside_range() {
        let c = scenario_a();
        assert_eq!(c.hognestad(-1e-4), 0.0);
        assert_eq!(c.hognestad(0.0039), 0.0);
    }

    #[test]
    fn test_mander_unconfined_peak() {
        let c = scenario_a();
        // Popovics form: x = 1 gives fc0·r/(r-1+1) = fc0
        assert_abs_diff_eq!(c.mander_unconfined(0.002), 210.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mander_unconfined_clipped_non_negative() {
        let c = ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.006).unwrap();
        let (_, stresses) = c.mander_curve(100);
        assert!(stresses.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_confined_peak_at_ecc() {
        let base = scenario_a();
        let confined = ConfinedConcrete::new(&base, 280.0, 0.015);
        assert_relative_eq!(confined.ecc, 0.002 * (1.0 + 5.0 * (280.0 / 210.0 - 1.0)));
        assert_abs_diff_eq!(confined.stress(confined.ecc), 280.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_modulus_rejected() {
        // Secant modulus is 210/0.002 = 105000; an Ec below that is invalid.
        let err = ConcreteMaterial::new(210.0, 100_000.0, 0.002, 0.0038).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_from_map_reads_keys() {
        let map: ParameterMap =
            serde_json::from_str(r#"{"fc": "210", "ec": 218819.788, "eps_c0": 0.002, "eps_cu": 0.0038}"#)
                .unwrap();
        let c = ConcreteMaterial::from_map(&map).unwrap();
        assert_eq!(c.fc0, 210.0);
    }
}
