//! Generational genetic programming with grammatical evolution and tree
//! representations.

pub mod config;
pub mod engines;
pub mod error;
pub mod grammar;
pub mod representation;

pub use error::{GpError, Result};
