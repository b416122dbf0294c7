// THEORY:
// Frame acquisition sits outside the sorter core. The controller only ever sees a
// `Frame`; where it came from is the business of a `FrameSource`. The one real source
// shipped here is a synthetic camera that paints a single solid rectangle of a pure
// color on a black background, which is enough to exercise every branch of the
// classifier and the gate logic without any hardware.

use crate::core_modules::color::SortColor;
use crate::core_modules::frame::Frame;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Margin, in pixels, between the frame border and the painted rectangle.
pub const RECT_INSET: u32 = 50;

/// Anything that can hand the controller one frame per tick.
pub trait FrameSource {
    fn next_frame(&mut self) -> Frame;
}

impl<F> FrameSource for F
where
    F: FnMut() -> Frame,
{
    fn next_frame(&mut self) -> Frame {
        self()
    }
}

/// Paints a filled rectangle of a randomly chosen pure color on a black frame.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    rng: StdRng,
    last_color: Option<SortColor>,
}

impl SyntheticCamera {
    /// A camera seeded from the OS, producing different frames every run.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    /// A camera whose frame sequence is fully determined by `seed`.
    pub fn seeded(width: u32, height: u32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: StdRng) -> Self {
        Self {
            width,
            height,
            rng,
            last_color: None,
        }
    }

    /// The color painted into the most recent frame.
    pub fn last_color(&self) -> Option<SortColor> {
        self.last_color
    }

    /// Renders the frame for a given color. The rectangle spans
    /// `RECT_INSET..=width - RECT_INSET` horizontally and likewise vertically.
    pub fn render(&self, color: SortColor) -> Frame {
        let right = self.width.saturating_sub(RECT_INSET);
        let bottom = self.height.saturating_sub(RECT_INSET);
        let fill = Rgb(color.rgb());

        let image = RgbImage::from_fn(self.width, self.height, |x, y| {
            let inside = (RECT_INSET..=right).contains(&x) && (RECT_INSET..=bottom).contains(&y);
            if inside { fill } else { Rgb([0, 0, 0]) }
        });
        image.into()
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Frame {
        let color = SortColor::ALL[self.rng.random_range(0..SortColor::ALL.len())];
        self.last_color = Some(color);
        self.render(color)
    }
}
