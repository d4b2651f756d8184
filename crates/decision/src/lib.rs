//! This crate provides a [Dempster-Shafer](https://en.wikipedia.org/wiki/Dempster%E2%80%93Shafer_theory)
//! evidence fusion engine over an arbitrary finite [`Frame`] of discernment.
//!
//! Independent sources express their evidence as [`MassFunction`]s. Sources are fused with one of the
//! [`CombinationRule`]s, and the fused result can be queried for [`BeliefInterval`]s or collapsed into a
//! [`Pignistic`] probability distribution for a final decision.

mod belief;
mod combine;
mod errors;
mod frame;
mod mass;
mod pignistic;

pub use belief::*;
pub use combine::*;
pub use errors::*;
pub use frame::*;
pub use mass::*;
pub use pignistic::*;

/// The tolerance used when checking that masses sum to one and when detecting total conflict.
pub const MASS_TOLERANCE: f64 = 1e-6;

#[cfg(test)]
#[macro_use]
extern crate approx;
