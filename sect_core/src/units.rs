//! # Unit Types
//!
//! Lightweight newtype wrappers for the CGS-engineering unit system the
//! engine computes in: centimetres, kg/cm² stresses, kilogram-force section
//! resultants. Curve outputs are reported in the field units engineers read
//! (tonne-force, tonne-force·metre, 1/m), so the only conversions here are
//! the ones the formulas explicitly perform:
//!
//! - bar diameters are entered in millimetres, geometry runs in centimetres
//! - resultant forces: kgf → tf (1 tf = 1000 kgf)
//! - resultant moments: kgf·cm → tf·m (1 tf·m = 100_000 kgf·cm)
//! - curvatures: 1/cm → 1/m (×100)
//!
//! JSON serialization stays clean (just numbers) via `serde(transparent)`.

use serde::{Deserialize, Serialize};

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimetres(pub f64);

/// Length in millimetres (bar diameters as entered)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

impl From<Millimetres> for Centimetres {
    fn from(mm: Millimetres) -> Self {
        Centimetres(mm.0 / 10.0)
    }
}

/// Force in kilogram-force (internal resultants)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgForce(pub f64);

/// Force in tonne-force (reported)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonneForce(pub f64);

impl From<KgForce> for TonneForce {
    fn from(kgf: KgForce) -> Self {
        TonneForce(kgf.0 / 1.0e3)
    }
}

/// Moment in kgf·cm (internal resultants)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgCm(pub f64);

/// Moment in tf·m (reported)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonneMetre(pub f64);

impl From<KgCm> for TonneMetre {
    fn from(kgcm: KgCm) -> Self {
        TonneMetre(kgcm.0 / 1.0e5)
    }
}

/// Curvature in 1/cm (internal strain plane)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerCentimetre(pub f64);

/// Curvature in 1/m (reported)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerMetre(pub f64);

impl From<PerCentimetre> for PerMetre {
    fn from(k: PerCentimetre) -> Self {
        PerMetre(k.0 * 100.0)
    }
}
