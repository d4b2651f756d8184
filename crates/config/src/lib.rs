//! Provides dsfusion's evidence file configuration: the frame of discernment, the named sources of evidence
//! and the settings used to fuse them.

mod config;
mod errors;
pub mod toml;

pub use crate::config::*;
pub use crate::errors::*;

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
#[macro_use]
extern crate approx;
