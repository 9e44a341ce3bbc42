//! # Nonlinear Solvers
//!
//! The small numerical toolbox behind the curve drivers: a bracketed Brent
//! root finder and the axial-equilibrium solver that finds the neutral-axis
//! depth for a given strain plane.

pub mod brent;
pub mod equilibrium;

pub use brent::{brent, Bracket, RootError};
pub use equilibrium::{ConcreteLaw, EquilibriumSolver, FiberSection, SolvedStep};
