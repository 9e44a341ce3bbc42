//! # Error Types
//!
//! Structured error types for sect_core. Every failure is scoped to a single
//! pipeline/curve: one pipeline failing must never abort sibling pipelines
//! computed for the same section, so conveniences that run several pipelines
//! collect one `SectResult` per pipeline instead of short-circuiting.
//!
//! ## Example
//!
//! ```rust
//! use sect_core::errors::{SectError, SectResult};
//!
//! fn lookup(map: &std::collections::HashMap<String, f64>, key: &str) -> SectResult<f64> {
//!     map.get(key)
//!         .copied()
//!         .ok_or_else(|| SectError::missing_parameter(key))
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sect_core operations
pub type SectResult<T> = Result<T, SectError>;

/// Structured error type for section analysis.
///
/// Each variant carries enough context (key, step, bracket, iteration count)
/// for the caller to report a clear diagnostic.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SectError {
    /// A required input key is missing from its parameter map
    #[error("Missing required parameter: {key}")]
    MissingParameter { key: String },

    /// An input key is present but not numeric, or violates a material invariant
    #[error("Invalid parameter '{key}': {value} - {reason}")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },

    /// Confined peak stress could not be determined: the octahedral
    /// fixed-point iteration did not converge within its cap, or the
    /// design-chart lookup had no answer for the confinement ratios
    #[error("Confinement solve failed: {reason}")]
    ConfinementSolve { reason: String },

    /// The energy-balance residual for confined ultimate strain has no
    /// root inside the admissible strain interval
    #[error("Ultimate-strain solve failed: energy balance not bracketed in [{lo}, {hi}]")]
    UltimateStrainSolve { lo: f64, hi: f64 },

    /// Axial equilibrium has no root inside the bracket, even after the
    /// full-bracket retry; the owning pipeline stops at this step
    #[error("Equilibrium solve failed at step {step} (curvature {curvature:e}): no root in [{c_min}, {c_max}]")]
    EquilibriumSolve {
        step: usize,
        curvature: f64,
        c_min: f64,
        c_max: f64,
    },

    /// The ASCE classification tuple matches no modeling-parameter rule
    /// ("not permitted" / missing information); not retryable
    #[error("Modeling parameters unavailable: {reason}")]
    ModelingParameter { reason: String },
}

impl SectError {
    /// Create a MissingParameter error
    pub fn missing_parameter(key: impl Into<String>) -> Self {
        SectError::MissingParameter { key: key.into() }
    }

    /// Create an InvalidParameter error
    pub fn invalid_parameter(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SectError::InvalidParameter {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ModelingParameter error
    pub fn modeling_parameter(reason: impl Into<String>) -> Self {
        SectError::ModelingParameter {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SectError::MissingParameter { .. } => "MISSING_PARAMETER",
            SectError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SectError::ConfinementSolve { .. } => "CONFINEMENT_SOLVE",
            SectError::UltimateStrainSolve { .. } => "ULTIMATE_STRAIN_SOLVE",
            SectError::EquilibriumSolve { .. } => "EQUILIBRIUM_SOLVE",
            SectError::ModelingParameter { .. } => "MODELING_PARAMETER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SectError::invalid_parameter("fc", "abc", "not numeric");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SectError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SectError::missing_parameter("fc").error_code(),
            "MISSING_PARAMETER"
        );
        assert_eq!(
            SectError::UltimateStrainSolve { lo: 0.002, hi: 0.1 }.error_code(),
            "ULTIMATE_STRAIN_SOLVE"
        );
    }

    #[test]
    fn test_display_carries_context() {
        let error = SectError::EquilibriumSolve {
            step: 17,
            curvature: 6.8e-4,
            c_min: 0.0,
            c_max: 40.0,
        };
        let text = error.to_string();
        assert!(text.contains("step 17"));
        assert!(text.contains("40"));
    }
}
