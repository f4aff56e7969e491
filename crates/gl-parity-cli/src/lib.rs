//! gl-parity runner library.
//!
//! Argument handling and child-process setup for the `gl-parity` binary.
//! The binary itself is in main.rs.

#![warn(missing_docs)]

pub mod runner;

// Re-export commonly used types
pub use runner::{RunnerArgs, USAGE};
