//! Shared state types and stepping traits for the unicycle simulator.

pub mod traits;

pub use traits::*;
