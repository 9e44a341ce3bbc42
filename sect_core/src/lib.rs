//! # sect_core - Reinforced-Concrete Section Analysis Engine
//!
//! `sect_core` computes the nonlinear structural response of reinforced-
//! concrete cross-sections: moment-curvature curves, axial-load-moment
//! interaction surfaces, and empirical moment-rotation backbones, used to
//! assess beam and column ductility and capacity.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every pipeline is a pure function of its inputs
//! - **JSON-First**: inputs are plain key-value parameter maps; outputs
//!   are paired numeric sequences; everything serializes cleanly
//! - **Rich Errors**: structured error types scoped to one pipeline, not
//!   just strings
//! - **One constitutive module**: every pipeline shares the same
//!   Hognestad / Mander / Park implementations
//!
//! ## Quick Start
//!
//! ```rust
//! use sect_core::analysis::{beam_curve, MomentCurvatureConfig, UnconfinedModel};
//! use sect_core::materials::{ConcreteMaterial, SteelMaterial};
//! use sect_core::section::BeamSection;
//!
//! let concrete = ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.0038).unwrap();
//! let steel = SteelMaterial::new(4200.0, 6300.0, 2.1e6, 0.002, 0.008, 0.10).unwrap();
//! let section = BeamSection {
//!     width: 30.0,
//!     height: 50.0,
//!     cover: 4.0,
//!     tie_dia: 1.0,
//!     tie_spacing: 15.0,
//!     bottom_bars: 3,
//!     bottom_dia: 1.6,
//!     top_bars: 2,
//!     top_dia: 1.2,
//! };
//!
//! let curve = beam_curve(
//!     &concrete,
//!     &steel,
//!     &section,
//!     UnconfinedModel::Hognestad,
//!     &MomentCurvatureConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(curve.len(), 100);
//! assert_eq!(curve.y()[0], 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`params`] - key-value parameter maps, the engine's input contract
//! - [`materials`] - concrete and steel constitutive models
//! - [`confinement`] - confined peak stress, ultimate strain, design chart
//! - [`section`] - geometry, fiber meshes, rebar layout
//! - [`solver`] - Brent root finder and the axial-equilibrium solver
//! - [`analysis`] - the curve-generation pipelines
//! - [`units`] - the explicit unit conversions of the output contract
//! - [`errors`] - structured error types

pub mod analysis;
pub mod confinement;
pub mod errors;
pub mod materials;
pub mod params;
pub mod section;
pub mod solver;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{AsceBackbone, InteractionDiagram, ResultCurve};
pub use errors::{SectError, SectResult};
pub use materials::{ConcreteMaterial, ConfinedConcrete, SteelMaterial};
pub use params::ParameterMap;
pub use section::{BeamSection, ColumnSection, Direction};
