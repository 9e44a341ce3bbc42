//! # Analysis Pipelines
//!
//! The curve generators built on the discretization and solver layers:
//!
//! - [`moment_curvature`] — fiber-integrated moment-curvature sweeps
//!   (Hognestad / Mander unconfined / Mander confined)
//! - [`interaction`] — rectangular-stress-block P-M interaction surface
//! - [`asce`] — empirical moment-rotation/curvature backbones
//!
//! Each pipeline is a pure function of its inputs producing a write-once
//! [`curve::ResultCurve`] (or a small result struct of sequences), so
//! callers may evaluate independent pipelines in parallel without any
//! coordination.

pub mod asce;
pub mod curve;
pub mod interaction;
pub mod moment_curvature;

pub use asce::{
    AsceBackbone, AsceBeamParams, AsceColumnParams, BeamCondition, ColumnCondition,
    ModelingParams,
};
pub use curve::ResultCurve;
pub use interaction::{interaction_diagram, InteractionDiagram};
pub use moment_curvature::{
    beam_curve, beam_suite, column_confined_curve, column_curve, column_suite,
    MomentCurvatureConfig, Pipeline, UnconfinedModel,
};
