use crate::core_modules::pixel::{CHANNELS, Pixel};
use crate::error::FrameError;
use image::RgbImage;

/// An interleaved 8-bit image buffer handed to the classifier once per tick.
///
/// The frame is deliberately permissive at construction time: a source may hand us
/// any shape, and `validate` is what decides whether it can be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The width of the frame in pixels.
    pub width: u32,
    /// The height of the frame in pixels.
    pub height: u32,
    /// The number of interleaved channels per pixel. Must be 3 (RGB) to classify.
    pub channels: u8,
    /// Row-major pixel bytes.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// A frame where every pixel has the same RGB color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        RgbImage::from_pixel(width, height, image::Rgb(rgb)).into()
    }

    /// Checks that the buffer describes a non-empty RGB grid.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.channels as usize != CHANNELS {
            return Err(FrameError::ChannelCount(self.channels));
        }
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width as usize * self.height as usize * CHANNELS;
        if self.data.len() != expected {
            return Err(FrameError::BufferLength {
                width: self.width,
                height: self.height,
                expected,
                found: self.data.len(),
            });
        }
        Ok(())
    }

    /// Iterates over the pixels in row-major order.
    ///
    /// Callers are expected to have run `validate` first; a trailing partial pixel
    /// is ignored.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|bytes| Pixel::new(bytes[0], bytes[1], bytes[2]))
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, CHANNELS as u8, image.into_raw())
    }
}
