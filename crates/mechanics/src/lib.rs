//! Kinematic models for the unicycle simulator.

pub mod unicycle;

pub use unicycle::*;
