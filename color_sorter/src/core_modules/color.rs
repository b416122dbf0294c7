use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discrete outcome of classifying a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Red,
    Green,
    Blue,
    Unknown,
}

impl ColorLabel {
    pub const ALL: [ColorLabel; 4] = [
        ColorLabel::Red,
        ColorLabel::Green,
        ColorLabel::Blue,
        ColorLabel::Unknown,
    ];

    /// Dense index used by per-label tables.
    pub fn index(self) -> usize {
        match self {
            ColorLabel::Red => 0,
            ColorLabel::Green => 1,
            ColorLabel::Blue => 2,
            ColorLabel::Unknown => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorLabel::Red => "RED",
            ColorLabel::Green => "GREEN",
            ColorLabel::Blue => "BLUE",
            ColorLabel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A color the sorter can be told to pick out, or that an object can carry.
///
/// `Unknown` has no counterpart here, so it can never become a sort target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColor {
    #[default]
    Red,
    Green,
    Blue,
}

impl SortColor {
    pub const ALL: [SortColor; 3] = [SortColor::Red, SortColor::Green, SortColor::Blue];

    /// The pure RGB color the synthetic camera paints for this color.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            SortColor::Red => [255, 0, 0],
            SortColor::Green => [0, 255, 0],
            SortColor::Blue => [0, 0, 255],
        }
    }
}

impl From<SortColor> for ColorLabel {
    fn from(color: SortColor) -> Self {
        match color {
            SortColor::Red => ColorLabel::Red,
            SortColor::Green => ColorLabel::Green,
            SortColor::Blue => ColorLabel::Blue,
        }
    }
}

impl PartialEq<SortColor> for ColorLabel {
    fn eq(&self, other: &SortColor) -> bool {
        *self == ColorLabel::from(*other)
    }
}

impl fmt::Display for SortColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ColorLabel::from(*self).fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort color {0:?} (expected red, green or blue)")]
pub struct ParseSortColorError(pub String);

impl FromStr for SortColor {
    type Err = ParseSortColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(SortColor::Red),
            "g" | "green" => Ok(SortColor::Green),
            "b" | "blue" => Ok(SortColor::Blue),
            _ => Err(ParseSortColorError(s.to_string())),
        }
    }
}
