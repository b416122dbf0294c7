// THEORY:
// The `simulation` module is the driving loop with the I/O taken out. It wires a
// `SortController` to a `FrameSource` and a `SpawnPolicy` and accepts operator
// `Command`s. The runner binary puts a timer and stdin in front of it; tests drive it
// directly with scripted frames and scripted spawns.
//
// Commands never interrupt a tick. Whoever owns the `Simulation` calls `apply`
// between `step`s, so a command always lands on a tick boundary.

use crate::camera::{FrameSource, SyntheticCamera};
use crate::config::SorterConfig;
use crate::controller::{SortController, TickReport};
use crate::core_modules::color::SortColor;
use crate::error::FrameError;
use crate::spawner::{RandomSpawner, SpawnPolicy};
use std::str::FromStr;

/// An operator instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTarget(SortColor),
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized command {0:?} (try r, g, b or q)")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();
        match word.as_str() {
            "q" | "quit" | "stop" => Ok(Command::Stop),
            _ => word
                .parse::<SortColor>()
                .map(Command::SetTarget)
                .map_err(|_| ParseCommandError(s.to_string())),
        }
    }
}

pub struct Simulation<F, S> {
    controller: SortController,
    frames: F,
    spawner: S,
    running: bool,
}

impl Simulation<SyntheticCamera, RandomSpawner> {
    /// The stock setup: synthetic camera plus random spawns, both seeded if asked.
    pub fn synthetic(config: &SorterConfig, seed: Option<u64>) -> Self {
        let (camera, spawner) = match seed {
            Some(seed) => (
                SyntheticCamera::seeded(config.frame_width, config.frame_height, seed),
                // Different stream from the camera's, same reproducibility.
                RandomSpawner::seeded(config.spawn_probability, seed.wrapping_add(1)),
            ),
            None => (
                SyntheticCamera::new(config.frame_width, config.frame_height),
                RandomSpawner::new(config.spawn_probability),
            ),
        };
        Self::new(SortController::new(config), camera, spawner)
    }
}

impl<F, S> Simulation<F, S>
where
    F: FrameSource,
    S: SpawnPolicy,
{
    pub fn new(controller: SortController, frames: F, spawner: S) -> Self {
        Self {
            controller,
            frames,
            spawner,
            running: true,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetTarget(color) => self.controller.set_target(color),
            Command::Stop => {
                tracing::info!(ticks = self.controller.ticks(), "stop requested");
                self.running = false;
            }
        }
    }

    /// Runs one tick, then gives the spawn policy its turn.
    ///
    /// A new object therefore first shows up in the *next* tick's report.
    pub fn step(&mut self) -> Result<TickReport, FrameError> {
        let frame = self.frames.next_frame();
        let report = self.controller.tick(&frame)?;

        if let Some(color) = self.spawner.next_spawn() {
            self.controller.add_object(color.into());
        }
        Ok(report)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controller(&self) -> &SortController {
        &self.controller
    }

    pub fn into_controller(self) -> SortController {
        self.controller
    }
}
