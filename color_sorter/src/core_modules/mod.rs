pub mod color;
pub mod color_classifier;
pub mod conveyor;
pub mod frame;
pub mod gate_actuator;
pub mod pixel;
pub mod tally;
