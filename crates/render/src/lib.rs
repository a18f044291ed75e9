//! Render-side math for the unicycle simulator: the constrained perspective
//! camera and the model-matrix composer. Pure `nalgebra`, no graphics API
//! types, so everything here is unit-testable without a window.

pub mod camera;
pub mod transform;

pub use camera::*;
pub use transform::*;
