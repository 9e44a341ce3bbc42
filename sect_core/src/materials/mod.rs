//! # Materials
//!
//! Material definitions and constitutive (stress-strain) models for
//! reinforced-concrete section analysis. The pipelines all share these
//! models; there is exactly one implementation of each law.
//!
//! ## Models
//!
//! - **Concrete**: unconfined Hognestad, unconfined Mander (Popovics form),
//!   confined Mander (Popovics form with confined peak stress/strain)
//! - **Steel**: Park hardening law for fiber analysis, bilinear
//!   elastic-plastic law for the interaction diagram
//!
//! ## Example
//!
//! ```rust
//! use sect_core::materials::ConcreteMaterial;
//!
//! let concrete = ConcreteMaterial::new(210.0, 218_819.788, 0.002, 0.0038).unwrap();
//! let at_peak = concrete.hognestad(0.002);
//! assert!((at_peak - 210.0).abs() < 1e-9);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{ConcreteMaterial, ConfinedConcrete};
pub use steel::SteelMaterial;
