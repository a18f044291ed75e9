use serde::{Deserialize, Serialize};

/// The vehicle heading is clockwise-positive when viewed from above, while
/// the rotation primitives of the math stack treat positive angles as
/// counter-clockwise. Any component handing a heading to a counter-clockwise
/// primitive multiplies by this factor first, so the convention lives in one
/// place instead of as inline sign flips.
pub const HEADING_TO_CCW: f64 = -1.0;

// Kinematic State
/// 2D vehicle pose. Heading is in radians, clockwise-positive viewed from
/// above, with 0 pointing along +Y. The integrator keeps it in [0, 2*pi).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn origin() -> Self {
        Pose::default()
    }
}

/// Operator velocity command. Linear is in distance units per second,
/// angular in degrees per second (converted to radians inside the
/// integrator).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityCommand {
    pub linear: f64,
    pub angular: f64,
}

impl VelocityCommand {
    pub fn zero() -> Self {
        VelocityCommand::default()
    }
}

/// Physical footprint of the vehicle. Immutable after construction; the
/// caller is responsible for supplying non-negative components (violations
/// produce an undefined visual result, not an error).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleExtents {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl VehicleExtents {
    /// A 2D vehicle: height forced to 0 so the footprint lies in the ground
    /// plane.
    pub fn planar(length: f64, width: f64) -> Self {
        VehicleExtents {
            length,
            width,
            height: 0.0,
        }
    }
}

// General Traits
#[derive(Debug, Clone, Copy, Default)]
pub struct SimState {
    pub pose: Pose,
    pub command: VelocityCommand,
}

#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}

pub trait KinematicsModel: Model {
    fn step_kinematics(&mut self, ctx: SimContext, state: &mut SimState);
}
