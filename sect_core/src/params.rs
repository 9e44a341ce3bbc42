//! # Parameter Maps
//!
//! The engine's only input contract with its callers (GUI, project files,
//! scripts) is a set of plain key-value maps, one per category: concrete
//! material, steel material, section geometry/reinforcement, fiber-mesh
//! resolution, and ASCE classification parameters.
//!
//! Values arrive as JSON: numbers, or numeric strings (front ends store raw
//! text-field content). Anything else is an error at lookup time; range and
//! format validation beyond "is it a number" belongs to the caller.
//!
//! ## Example
//!
//! ```rust
//! use sect_core::params::ParameterMap;
//!
//! let map: ParameterMap = serde_json::from_str(r#"{"fc": 210.0, "ec": "218819.788"}"#).unwrap();
//! assert_eq!(map.require("fc").unwrap(), 210.0);
//! assert_eq!(map.require("ec").unwrap(), 218819.788);
//! assert!(map.require("missing").is_err());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{SectError, SectResult};

/// A flat key-value map of named scalar parameters.
///
/// Thin wrapper over a JSON object so whole maps round-trip unchanged
/// through project snapshots owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ParameterMap(pub HashMap<String, Value>);

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        ParameterMap(HashMap::new())
    }

    /// Insert a numeric parameter (mostly useful in tests and builders).
    pub fn set(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(key.into(), Value::from(value));
        self
    }

    /// Fetch a required scalar.
    ///
    /// Accepts JSON numbers and numeric strings; a missing key is
    /// `MissingParameter`, a present but non-numeric value is
    /// `InvalidParameter` naming the offending key.
    pub fn require(&self, key: &str) -> SectResult<f64> {
        let value = self
            .0
            .get(key)
            .ok_or_else(|| SectError::missing_parameter(key))?;
        parse_scalar(value)
            .ok_or_else(|| SectError::invalid_parameter(key, value.to_string(), "not numeric"))
    }

    /// Fetch a required scalar and round it to the nearest integer count.
    ///
    /// Bar and leg counts arrive as free-form numeric text; the original
    /// front end normalized them with `int(float(...))`.
    pub fn require_count(&self, key: &str) -> SectResult<usize> {
        let raw = self.require(key)?;
        if raw < 0.0 {
            return Err(SectError::invalid_parameter(
                key,
                raw.to_string(),
                "count cannot be negative",
            ));
        }
        Ok(raw.round() as usize)
    }

    /// Fetch an optional scalar, falling back to a default when absent.
    /// A present but non-numeric value is still an error.
    pub fn get_or(&self, key: &str, default: f64) -> SectResult<f64> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => parse_scalar(value).ok_or_else(|| {
                SectError::invalid_parameter(key, value.to_string(), "not numeric")
            }),
        }
    }
}

fn parse_scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
