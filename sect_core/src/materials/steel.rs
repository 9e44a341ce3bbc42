//! # Steel Constitutive Models
//!
//! Reinforcing-steel stress-strain laws. The fiber pipelines use the Park
//! hardening law; the interaction diagram uses the simpler bilinear
//! elastic-plastic law, as is conventional for strength-design sweeps.
//! Both are odd-symmetric: tension positive, compression negative.

use serde::{Deserialize, Serialize};

use crate::errors::{SectError, SectResult};
use crate::params::ParameterMap;

/// Reinforcing steel material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fy": 4200.0,
///   "fsu": 6300.0,
///   "es": 2100000.0,
///   "eps_y": 0.002,
///   "eps_sh": 0.008,
///   "eps_su": 0.10
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Yield stress fy (kg/cm²)
    pub fy: f64,
    /// Ultimate stress fsu (kg/cm²)
    pub fsu: f64,
    /// Elastic modulus Es (kg/cm²)
    pub es: f64,
    /// Yield strain
    pub eps_y: f64,
    /// Hardening-onset strain
    pub eps_sh: f64,
    /// Ultimate strain
    pub eps_su: f64,
}

impl SteelMaterial {
    /// Create a material, checking fsu >= fy and eps_su > eps_sh > eps_y > 0.
    pub fn new(
        fy: f64,
        fsu: f64,
        es: f64,
        eps_y: f64,
        eps_sh: f64,
        eps_su: f64,
    ) -> SectResult<Self> {
        let material = SteelMaterial {
            fy,
            fsu,
            es,
            eps_y,
            eps_sh,
            eps_su,
        };
        material.validate()?;
        Ok(material)
    }

    /// Read the material from its parameter map.
    ///
    /// Keys: `fy`, `fsu`, `es`, `eps_y`, `eps_sh`, `eps_su`.
    pub fn from_map(map: &ParameterMap) -> SectResult<Self> {
        SteelMaterial::new(
            map.require("fy")?,
            map.require("fsu")?,
            map.require("es")?,
            map.require("eps_y")?,
            map.require("eps_sh")?,
            map.require("eps_su")?,
        )
    }

    fn validate(&self) -> SectResult<()> {
        if self.fy <= 0.0 || self.fsu < self.fy {
            return Err(SectError::invalid_parameter(
                "fsu",
                self.fsu.to_string(),
                "stresses must satisfy 0 < fy <= fsu",
            ));
        }
        if !(0.0 < self.eps_y && self.eps_y < self.eps_sh && self.eps_sh < self.eps_su) {
            return Err(SectError::invalid_parameter(
                "eps_sh",
                self.eps_sh.to_string(),
                "strains must satisfy 0 < eps_y < eps_sh < eps_su",
            ));
        }
        Ok(())
    }

    /// Hardening-zone length r = eps_su - eps_sh.
    fn hardening_range(&self) -> f64 {
        self.eps_su - self.eps_sh
    }

    /// Park hardening coefficient
    /// m = [(fsu/fy)(30r+1)² - 60r - 1] / (15r²).
    fn park_m(&self) -> f64 {
        let r = self.hardening_range();
        ((self.fsu / self.fy) * (30.0 * r + 1.0).powi(2) - 60.0 * r - 1.0) / (15.0 * r * r)
    }

    /// Park law: elastic to eps_y, yield plateau to eps_sh, then a smooth
    /// rational hardening blend reaching fsu at eps_su. Odd-symmetric.
    ///
    /// The model is undefined beyond |eps_su|; queries there return 0 and
    /// callers are expected not to drive the section that far.
    pub fn park_stress(&self, strain: f64) -> f64 {
        let abs_e = strain.abs();
        let sign = if strain < 0.0 { -1.0 } else { 1.0 };
        if abs_e <= self.eps_y {
            self.es * strain
        } else if abs_e <= self.eps_sh {
            sign * self.fy
        } else if abs_e <= self.eps_su {
            let r = self.hardening_range();
            let m = self.park_m();
            let de = abs_e - self.eps_sh;
            let blend = (m * de + 2.0) / (60.0 * de + 2.0)
                + de * (60.0 - m) / (2.0 * (30.0 * r + 1.0).powi(2));
            sign * self.fy * blend
        } else {
            0.0
        }
    }

    /// Bilinear elastic-plastic law (no hardening): Es·e clamped at ±fy.
    /// Used by the interaction-diagram sweep.
    pub fn bilinear_stress(&self, strain: f64) -> f64 {
        if strain.abs() <= self.eps_y {
            self.es * strain
        } else {
            self.fy * strain.signum()
        }
    }

    /// Sample the Park curve at `n` uniform strains over [-eps_su, eps_su].
    pub fn park_curve(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        super::concrete::sample_curve(-self.eps_su, self.eps_su, n, |e| self.park_stress(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn grade60() -> SteelMaterial {
        SteelMaterial::new(4200.0, 6300.0, 2.1e6, 0.002, 0.008, 0.10).unwrap()
    }

    #[test]
    fn test_zero_at_origin() {
        assert_eq!(grade60().park_stress(0.0), 0.0);
    }

    #[test]
    fn test_continuity_at_yield() {
        let s = grade60();
        assert_abs_diff_eq!(s.park_stress(s.eps_y), s.fy, epsilon = 1e-6);
    }

    #[test]
    fn test_odd_symmetry() {
        let s = grade60();
        for e in [0.001, 0.002, 0.005, 0.02, 0.08] {
            assert_relative_eq!(s.park_stress(-e), -s.park_stress(e), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_hardening_reaches_fsu() {
        let s = grade60();
        assert_relative_eq!(s.park_stress(s.eps_su), s.fsu, max_relative = 1e-6);
    }

    #[test]
    fn test_plateau_holds_fy() {
        let s = grade60();
        assert_eq!(s.park_stress(0.005), s.fy);
        assert_eq!(s.park_stress(-0.005), -s.fy);
    }

    #[test]
    fn test_bilinear_clamp() {
        let s = grade60();
        assert_eq!(s.bilinear_stress(0.001), 2.1e6 * 0.001);
        assert_eq!(s.bilinear_stress(0.01), s.fy);
        assert_eq!(s.bilinear_stress(-0.01), -s.fy);
    }

    #[test]
    fn test_invalid_strain_order_rejected() {
        let err = SteelMaterial::new(4200.0, 6300.0, 2.1e6, 0.002, 0.001, 0.10).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }
}
