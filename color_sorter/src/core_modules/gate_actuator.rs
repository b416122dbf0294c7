//! A first-order lag model of the sorting gate.
//!
//! The gate never jumps: each `update` moves it one fixed step toward the commanded
//! end stop. When the remaining distance is within one step the position lands
//! exactly on the target, so repeated `0.1` increments cannot leave it hovering at
//! `0.9999…` or push it past `1.0`.

use serde::{Deserialize, Serialize};

/// Slack allowed when deciding that the next step reaches the target.
const SNAP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Position change per `update`, in (0, 1].
    pub step: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self { step: 0.1 }
    }
}

/// The two end stops the gate can be commanded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateCommand {
    #[default]
    Closed,
    Open,
}

impl GateCommand {
    pub fn target(self) -> f64 {
        match self {
            GateCommand::Closed => 0.0,
            GateCommand::Open => 1.0,
        }
    }
}

/// Direction of travel, derived from position vs. target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMotion {
    Opening,
    Closing,
    Holding,
}

/// Physical state of the gate: where it is and where it was told to go.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorState {
    /// 0.0 is fully closed, 1.0 fully open.
    pub position: f64,
    pub target: GateCommand,
}

impl ActuatorState {
    pub fn motion(&self) -> GateMotion {
        let target = self.target.target();
        if self.position < target {
            GateMotion::Opening
        } else if self.position > target {
            GateMotion::Closing
        } else {
            GateMotion::Holding
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GateActuator {
    config: GateConfig,
    state: ActuatorState,
}

impl GateActuator {
    /// A closed gate with no pending command.
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            state: ActuatorState::default(),
        }
    }

    /// Records the desired end stop. The position does not change until `update`.
    pub fn set_position(&mut self, command: GateCommand) {
        self.state.target = command;
    }

    /// Moves one step toward the target and returns the new position.
    pub fn update(&mut self) -> f64 {
        let target = self.state.target.target();
        let remaining = target - self.state.position;

        if remaining.abs() <= self.config.step + SNAP_TOLERANCE {
            self.state.position = target;
        } else {
            self.state.position += self.config.step.copysign(remaining);
        }
        self.state.position = self.state.position.clamp(0.0, 1.0);

        tracing::trace!(position = self.state.position, target = ?self.state.target, "gate stepped");
        self.state.position
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn motion(&self) -> GateMotion {
        self.state.motion()
    }
}
