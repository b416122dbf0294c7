use std::path::PathBuf;
use thiserror::Error;

// Main Library Error Type

#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),
    #[error("Failed to read config {1}: {0}")]
    ConfigRead(std::io::Error, PathBuf),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// Frame Error Type
//
// A frame that fails any of these checks is a caller bug: the tick is aborted and
// nothing is classified in its place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("expected 3 color channels, found {0}")]
    ChannelCount(u8),
    #[error("a {width}x{height} frame needs {expected} bytes, buffer holds {found}")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
    #[error("frame has zero area ({width}x{height})")]
    Empty { width: u32, height: u32 },
}
