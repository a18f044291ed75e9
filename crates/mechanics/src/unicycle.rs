use simcore::{KinematicsModel, Model, Pose, SimContext, SimState, VelocityCommand};
use std::f64::consts::TAU;

/// Per-step angular increments below this magnitude take the straight-line
/// branch. The signed turning radius v/w blows up as w -> 0, and the Taylor
/// expansion of the arc-chord formulas reduces to the straight-line update
/// there anyway, so the two branches agree to floating-point tolerance at
/// the boundary.
pub const STRAIGHT_LINE_THRESHOLD: f64 = 1e-5;

/// Unicycle (differential-drive) kinematics: advances a 2D pose from
/// independent linear and angular velocity commands, ignoring wheel-level
/// dynamics.
///
/// Conventions: heading 0 points along +Y, positive rotation is clockwise
/// viewed from above, so a forward-moving vehicle with positive angular
/// velocity curves toward +X.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicycleKinematics;

impl UnicycleKinematics {
    /// One integration step as a pure function of the inputs.
    ///
    /// Away from w = 0 this is the exact closed-form arc update for constant
    /// angular velocity over the step, not an Euler approximation. Defined
    /// for all finite inputs; the returned heading is normalized into
    /// [0, 2*pi).
    pub fn integrate(pose: Pose, command: VelocityCommand, dt: f64) -> Pose {
        let w = command.angular.to_radians() * dt;
        let v = command.linear * dt;

        let mut next = pose;
        if w.abs() < STRAIGHT_LINE_THRESHOLD {
            next.x += v * pose.heading.sin();
            next.y += v * pose.heading.cos();
        } else {
            // Signed turning radius; arc-chord identities give the chord
            // displacement between the old and new heading.
            let r = v / w;
            let heading = pose.heading + w;
            next.x += -r * (heading.cos() - pose.heading.cos());
            next.y += r * (heading.sin() - pose.heading.sin());
            next.heading = heading;
        }
        next.heading = normalize_heading(next.heading);
        next
    }
}

/// Fold a heading into [0, 2*pi). A single correction is enough because the
/// per-step rotation is bounded well below a full turn by the fixed timestep
/// and the command magnitudes the mapper produces.
fn normalize_heading(heading: f64) -> f64 {
    if heading >= TAU {
        heading - TAU
    } else if heading < 0.0 {
        heading + TAU
    } else {
        heading
    }
}

impl Model for UnicycleKinematics {
    fn reset(&mut self) {
        // Stateless; the pose lives in SimState.
    }
}

impl KinematicsModel for UnicycleKinematics {
    fn step_kinematics(&mut self, ctx: SimContext, state: &mut SimState) {
        state.pose = Self::integrate(state.pose, state.command, ctx.dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn pose(x: f64, y: f64, heading: f64) -> Pose {
        Pose { x, y, heading }
    }

    fn command(linear: f64, angular_deg: f64) -> VelocityCommand {
        VelocityCommand {
            linear,
            angular: angular_deg,
        }
    }

    #[test]
    fn test_straight_step_moves_along_heading() {
        // Zero angular velocity: displacement is exactly (v sin h, v cos h)
        // for any heading, heading unchanged.
        for i in 0..16 {
            let h = i as f64 * TAU / 16.0;
            let next = UnicycleKinematics::integrate(pose(0.0, 0.0, h), command(2.0, 0.0), 0.5);
            assert_relative_eq!(next.x, h.sin(), epsilon = 1e-12);
            assert_relative_eq!(next.y, h.cos(), epsilon = 1e-12);
            assert_relative_eq!(next.heading, h, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_forward_from_zero_heading_moves_plus_y() {
        let next = UnicycleKinematics::integrate(Pose::origin(), command(1.0, 0.0), 1.0);
        assert_relative_eq!(next.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(next.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(next.heading, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pure_rotation_in_place() {
        // v = 0 on the arc branch: r = 0, so the vehicle spins without
        // translating. 90 deg/s for 1 s lands on heading pi/2.
        let next = UnicycleKinematics::integrate(Pose::origin(), command(0.0, 90.0), 1.0);
        assert_relative_eq!(next.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(next.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(next.heading, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_angular_turns_clockwise() {
        // Heading 0 faces +Y; a clockwise turn while driving forward must
        // curve toward +X.
        let next = UnicycleKinematics::integrate(Pose::origin(), command(1.0, 45.0), 0.1);
        assert!(next.x > 0.0);
        assert!(next.y > 0.0);
        assert!(next.heading > 0.0);
    }

    #[test]
    fn test_arc_branch_continuous_with_straight_branch() {
        // Just above the threshold the arc formula must agree with the
        // straight-line formula to a tolerance that shrinks with w.
        let start = pose(1.0, -2.0, 0.7);
        let dt = 1.0;
        let v = 1.3;
        // w = 1e-6 rad after dt: below threshold, straight branch.
        let straight =
            UnicycleKinematics::integrate(start, command(v, 1e-6_f64.to_degrees()), dt);
        // w = 2e-5 rad: above threshold, arc branch.
        let arc = UnicycleKinematics::integrate(start, command(v, 2e-5_f64.to_degrees()), dt);
        assert_relative_eq!(straight.x, arc.x, epsilon = 1e-4);
        assert_relative_eq!(straight.y, arc.y, epsilon = 1e-4);
    }

    #[test]
    fn test_heading_normalized_after_wraparound() {
        // Step across 2*pi from just below it.
        let next =
            UnicycleKinematics::integrate(pose(0.0, 0.0, TAU - 1e-3), command(0.0, 90.0), 0.1);
        assert!(next.heading >= 0.0 && next.heading < TAU);
        assert_relative_eq!(
            next.heading,
            TAU - 1e-3 + (PI / 2.0) * 0.1 - TAU,
            epsilon = 1e-12
        );

        // Step across 0 going the other way.
        let next = UnicycleKinematics::integrate(pose(0.0, 0.0, 1e-3), command(0.0, -90.0), 0.1);
        assert!(next.heading >= 0.0 && next.heading < TAU);
        assert_relative_eq!(
            next.heading,
            1e-3 - (PI / 2.0) * 0.1 + TAU,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_step_kinematics_reads_command_from_state() {
        let mut model = UnicycleKinematics;
        let mut state = SimState {
            pose: Pose::origin(),
            command: command(1.0, 0.0),
        };
        model.step_kinematics(SimContext { dt: 0.01, t: 0.0 }, &mut state);
        assert_relative_eq!(state.pose.y, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let start = pose(0.3, 0.4, 5.0);
        let cmd = command(0.7, -30.0);
        let a = UnicycleKinematics::integrate(start, cmd, 0.01);
        let b = UnicycleKinematics::integrate(start, cmd, 0.01);
        assert_eq!(a, b);
    }
}
