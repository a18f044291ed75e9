//! Operator input handling for the unicycle simulator.
//!
//! Translates per-frame input samples into a running velocity command,
//! independent of any windowing or UI toolkit so the state machine tests
//! against synthetic input sequences.

pub mod input_mapper;

pub use input_mapper::*;
