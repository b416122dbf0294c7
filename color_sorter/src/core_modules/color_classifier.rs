// THEORY:
// The `ColorClassifier` turns one frame into one `ColorLabel`. It does no learning and
// keeps no history: it is a fixed bank of three HSV windows, one per sortable color,
// and a vote.
//
// 1.  **Per-pixel thresholding**: each pixel is converted to 8-bit HSV and tested
//     against every window. Windows are inclusive on both ends and may overlap, in
//     which case a pixel votes for each window it falls in.
// 2.  **Coverage count**: the number of pixels inside each window is the only signal.
// 3.  **Strict dominance**: a color wins only when its count is strictly greater than
//     both other counts. Ties of any kind, including "nothing matched", are `Unknown`.

use crate::core_modules::color::{ColorLabel, SortColor};
use crate::core_modules::frame::Frame;
use crate::core_modules::pixel::Hsv;
use crate::error::FrameError;
use serde::{Deserialize, Serialize};

/// An inclusive HSV box in 8-bit units.
///
/// When `hue_min > hue_max` the hue range wraps through 0, so `170..=10` covers both
/// ends of the hue circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvWindow {
    pub hue_min: u8,
    pub hue_max: u8,
    pub saturation_min: u8,
    pub saturation_max: u8,
    pub value_min: u8,
    pub value_max: u8,
}

impl HsvWindow {
    /// A hue band with the saturation and value floor used by the default windows.
    pub const fn hue_band(hue_min: u8, hue_max: u8) -> Self {
        Self {
            hue_min,
            hue_max,
            saturation_min: 100,
            saturation_max: 255,
            value_min: 100,
            value_max: 255,
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        let hue_ok = if self.hue_min <= self.hue_max {
            (self.hue_min..=self.hue_max).contains(&hsv.hue)
        } else {
            hsv.hue >= self.hue_min || hsv.hue <= self.hue_max
        };
        hue_ok
            && (self.saturation_min..=self.saturation_max).contains(&hsv.saturation)
            && (self.value_min..=self.value_max).contains(&hsv.value)
    }
}

/// The three windows the classifier votes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    pub red: HsvWindow,
    pub green: HsvWindow,
    pub blue: HsvWindow,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            red: HsvWindow::hue_band(0, 10),
            green: HsvWindow::hue_band(40, 80),
            blue: HsvWindow::hue_band(100, 140),
        }
    }
}

/// Per-window pixel counts for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCounts {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
}

impl ColorCounts {
    pub fn new(red: usize, green: usize, blue: usize) -> Self {
        Self { red, green, blue }
    }

    /// The label whose count strictly exceeds both others, else `Unknown`.
    pub fn dominant(&self) -> ColorLabel {
        let Self { red, green, blue } = *self;
        if red > green && red > blue {
            ColorLabel::Red
        } else if green > red && green > blue {
            ColorLabel::Green
        } else if blue > red && blue > green {
            ColorLabel::Blue
        } else {
            ColorLabel::Unknown
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    thresholds: ColorThresholds,
}

impl ColorClassifier {
    pub fn new(thresholds: ColorThresholds) -> Self {
        Self { thresholds }
    }

    /// Counts, for each window, how many pixels of `frame` fall inside it.
    pub fn count(&self, frame: &Frame) -> Result<ColorCounts, FrameError> {
        frame.validate()?;

        let mut counts = ColorCounts::default();
        for pixel in frame.pixels() {
            let hsv = pixel.to_hsv();
            if self.thresholds.red.contains(hsv) {
                counts.red += 1;
            }
            if self.thresholds.green.contains(hsv) {
                counts.green += 1;
            }
            if self.thresholds.blue.contains(hsv) {
                counts.blue += 1;
            }
        }
        Ok(counts)
    }

    pub fn classify(&self, frame: &Frame) -> Result<ColorLabel, FrameError> {
        Ok(self.count(frame)?.dominant())
    }
}
