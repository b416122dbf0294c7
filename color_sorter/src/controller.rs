// THEORY:
// The `controller` module is the top-level API of the sorter core. It encapsulates the
// classifier, the gate and the belt behind a single `tick` call, the way a PLC scan
// cycle reads inputs, decides, and writes outputs once per period.
//
// One tick, in order:
// 1.  Sense: classify the frame. A malformed frame aborts the tick before any state
//     is touched.
// 2.  Decide: a detection matching the target opens the gate and is tallied; anything
//     else (another color, or `Unknown`) closes it.
// 3.  Actuate: the gate takes one step.
// 4.  Transport: the belt takes one step.
// 5.  Report: a snapshot goes back to whoever is presenting the machine.
//
// All state lives on the `SortController` value itself, so independent controllers
// never interfere with each other.

use crate::config::SorterConfig;
use crate::core_modules::color::{ColorLabel, SortColor};
use crate::core_modules::color_classifier::ColorClassifier;
use crate::core_modules::conveyor::ConveyorModel;
use crate::core_modules::frame::Frame;
use crate::core_modules::gate_actuator::{GateActuator, GateCommand};
use crate::core_modules::tally::SortTally;
use crate::error::FrameError;

// Re-export key data structures for the public API.
pub use crate::core_modules::conveyor::ObjectToken;
pub use crate::core_modules::gate_actuator::GateMotion;

/// The snapshot produced by one tick, for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// 1-based number of this tick.
    pub tick: u64,
    /// What the classifier saw in this tick's frame.
    pub detected: ColorLabel,
    /// The target the detection was compared against.
    pub target: SortColor,
    /// Gate position after this tick's step.
    pub gate_position: f64,
    pub gate_motion: GateMotion,
    /// Tokens still on the belt after this tick's step, in insertion order.
    pub live_tokens: Vec<ObjectToken>,
    pub tally: SortTally,
}

impl TickReport {
    pub fn matched(&self) -> bool {
        self.detected == self.target
    }
}

/// The main, top-level struct for the sorter core.
#[derive(Debug, Clone)]
pub struct SortController {
    classifier: ColorClassifier,
    gate: GateActuator,
    conveyor: ConveyorModel,
    target: SortColor,
    tally: SortTally,
    ticks: u64,
}

impl Default for SortController {
    fn default() -> Self {
        Self::new(&SorterConfig::default())
    }
}

impl SortController {
    /// A fresh machine: empty tally, empty belt, closed gate.
    pub fn new(config: &SorterConfig) -> Self {
        Self {
            classifier: ColorClassifier::new(config.thresholds),
            gate: GateActuator::new(config.gate),
            conveyor: ConveyorModel::new(config.conveyor),
            target: config.initial_target,
            tally: SortTally::new(),
            ticks: 0,
        }
    }

    /// Runs one control cycle against `frame`.
    pub fn tick(&mut self, frame: &Frame) -> Result<TickReport, FrameError> {
        // Stage 1: Sense
        let detected = self.classifier.classify(frame)?;

        // Stage 2: Decide
        if detected == self.target {
            self.gate.set_position(GateCommand::Open);
            self.tally.record(detected);
        } else {
            self.gate.set_position(GateCommand::Closed);
        }

        // Stage 3: Actuate
        let gate_position = self.gate.update();

        // Stage 4: Transport
        let live_tokens = self.conveyor.update().to_vec();

        self.ticks += 1;
        tracing::debug!(
            tick = self.ticks,
            %detected,
            target = %self.target,
            gate_position,
            live = live_tokens.len(),
            "tick complete"
        );

        Ok(TickReport {
            tick: self.ticks,
            detected,
            target: self.target,
            gate_position,
            gate_motion: self.gate.motion(),
            live_tokens,
            tally: self.tally,
        })
    }

    /// Changes the color to sort. Takes effect on the next `tick`.
    pub fn set_target(&mut self, color: SortColor) {
        if color != self.target {
            tracing::info!(from = %self.target, to = %color, "sort target changed");
        }
        self.target = color;
    }

    /// Places a new object on the belt and returns its id.
    pub fn add_object(&mut self, color: ColorLabel) -> u64 {
        self.conveyor.add_object(color)
    }

    pub fn target(&self) -> SortColor {
        self.target
    }

    pub fn tally(&self) -> &SortTally {
        &self.tally
    }

    pub fn gate_position(&self) -> f64 {
        self.gate.position()
    }

    pub fn live_tokens(&self) -> &[ObjectToken] {
        self.conveyor.live_tokens()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
