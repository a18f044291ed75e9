use simcore::{Model, VelocityCommand};

/// One frame's worth of input, already reduced to the fixed key set the
/// simulator cares about. `*_pressed` fields are edge queries (true only on
/// the frame the key went down), `*_held` fields are level queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub faster_pressed: bool,
    pub slower_pressed: bool,
    pub turn_left_held: bool,
    pub turn_right_held: bool,
    pub reset_pressed: bool,
    pub run_toggle_pressed: bool,
    /// Vertical scroll since last frame, feeds camera zoom.
    pub scroll_delta: f32,
}

/// Discrete actions the control loop must carry out this frame. The mapper
/// owns velocities but not the pose, so a reset is reported back to the
/// loop, which zeroes the pose and rebuilds the model matrix immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameActions {
    pub reset: bool,
}

/// Maps discrete input events to a running [`VelocityCommand`].
///
/// Linear velocity is edge-triggered: each press adds or subtracts a fixed
/// step, with no decay. Angular velocity is level-triggered: it is recomputed
/// from the held keys every frame and snaps to zero on release. The run
/// toggle gates the integrator; velocities remain settable while stopped.
#[derive(Debug, Clone)]
pub struct InputMapper {
    /// Linear velocity added/removed per press, in units/s.
    pub linear_step: f64,
    /// Angular velocity while a turn key is held, in deg/s.
    pub angular_step_deg: f64,
    command: VelocityCommand,
    running: bool,
}

impl InputMapper {
    pub fn new(linear_step: f64, angular_step_deg: f64) -> Self {
        InputMapper {
            linear_step,
            angular_step_deg,
            command: VelocityCommand::zero(),
            running: true,
        }
    }

    /// Feed one frame of input through the state machine.
    pub fn sample(&mut self, input: &InputSnapshot) -> FrameActions {
        if input.faster_pressed {
            self.command.linear += self.linear_step;
        }
        if input.slower_pressed {
            self.command.linear -= self.linear_step;
        }

        // Level-triggered: rebuilt from scratch every frame so releasing a
        // turn key snaps angular velocity back to zero. Right is evaluated
        // after left and therefore wins a simultaneous hold.
        self.command.angular = 0.0;
        if input.turn_left_held {
            self.command.angular = -self.angular_step_deg;
        }
        if input.turn_right_held {
            self.command.angular = self.angular_step_deg;
        }

        if input.run_toggle_pressed {
            self.toggle_running();
        }

        let mut actions = FrameActions::default();
        if input.reset_pressed {
            self.command = VelocityCommand::zero();
            actions.reset = true;
        }
        actions
    }

    pub fn command(&self) -> VelocityCommand {
        self.command
    }

    /// Whether the integrator should step this frame.
    pub fn running(&self) -> bool {
        self.running
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        log::debug!(
            "simulation {}",
            if self.running { "running" } else { "stopped" }
        );
    }
}

impl Model for InputMapper {
    fn reset(&mut self) {
        self.command = VelocityCommand::zero();
    }
}
