// THEORY:
// This file is the main entry point for the `color_sorter` library crate. It exposes
// the sorter core (`SortController` and the components it drives) plus the pieces a
// driving loop needs around it: a frame source, a spawn policy, configuration and
// the `Simulation` that ties them together.
//
// The components under `core_modules` are usable on their own (the classifier is
// handy without any belt at all), but most consumers only need `Simulation` or
// `SortController`.

pub mod camera;
pub mod config;
pub mod controller;
pub mod core_modules;
pub mod error;
pub mod simulation;
pub mod spawner;

pub use camera::{FrameSource, SyntheticCamera};
pub use config::SorterConfig;
pub use controller::{SortController, TickReport};
pub use core_modules::color::{ColorLabel, SortColor};
pub use core_modules::frame::Frame;
pub use error::{FrameError, SorterError};
pub use simulation::{Command, Simulation};
pub use spawner::{NeverSpawn, RandomSpawner, ScriptedSpawner, SpawnPolicy};
