// THEORY (Single-Pixel Color Heuristics):
// The `Pixel` module is the most fundamental unit of the sorter's vision side. It is
// a "dumb" data container for one RGB pixel plus its conversion to the 8-bit HSV
// triple that threshold windows are written against: hue in half-degrees (0..180),
// saturation and value in 0..255. Nothing here looks at a neighbor or at another
// frame.
//
// The hue angle itself is computed in degrees from normalized sRGB channels and only
// then halved, so the familiar threshold numbers (e.g. "red is hue 0..10,
// saturation >= 100") can be used unchanged.

pub type Byte = u8;
pub type Channel = Byte;
pub type NormalizedChannel = f32;
pub type Hue = f32;
pub type Chroma = f32;

/// Number of interleaved bytes per pixel in the buffers this crate consumes.
pub const CHANNELS: usize = 3;

/// Half-degree hue scale used by 8-bit HSV: 360° maps onto 0..180.
pub const HUE_RANGE_8BIT: u16 = 180;

/// A "dumb" data container representing a single RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
}

/// An HSV triple in 8-bit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    /// Hue in half-degrees, 0..180.
    pub hue: u8,
    /// Saturation, 0..255.
    pub saturation: u8,
    /// Value (max channel), 0..255.
    pub value: u8,
}

impl Pixel {
    pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Pixel { red, green, blue }
    }

    fn normalized(&self) -> (NormalizedChannel, NormalizedChannel, NormalizedChannel) {
        (
            self.red as NormalizedChannel / 255.0,
            self.green as NormalizedChannel / 255.0,
            self.blue as NormalizedChannel / 255.0,
        )
    }

    /// Chroma (C): color purity = max(R,G,B) - min(R,G,B), normalized.
    pub fn chroma(&self) -> Chroma {
        let (red, green, blue) = self.normalized();
        red.max(green.max(blue)) - red.min(green.min(blue))
    }

    /// Hue angle in degrees [0, 360).
    ///
    /// - Uses normalized sRGB channels, no linearization.
    /// - Returns 0.0 for achromatic (gray) pixels.
    pub fn hue(&self) -> Hue {
        let (red, green, blue) = self.normalized();
        let maximum_channel = red.max(green.max(blue));
        let chroma = self.chroma();

        if chroma <= 1e-6 {
            return 0.0;
        }

        let inverse_chroma = 1.0 / chroma;

        let (base_difference, sector_offset) = if maximum_channel == red {
            (green - blue, 0.0)
        } else if maximum_channel == green {
            (blue - red, 2.0)
        } else {
            (red - green, 4.0)
        };

        let mut hue_degrees = (base_difference * inverse_chroma + sector_offset) * 60.0;
        if hue_degrees < 0.0 {
            hue_degrees += 360.0;
        }
        hue_degrees
    }

    /// Converts to 8-bit HSV.
    ///
    /// - Value is the raw max channel, so it is exact.
    /// - Saturation and hue are rounded to the nearest integer; a hue that rounds up
    ///   to 180 wraps back to 0.
    pub fn to_hsv(&self) -> Hsv {
        let maximum = self.red.max(self.green.max(self.blue));
        let minimum = self.red.min(self.green.min(self.blue));

        let saturation = if maximum == 0 {
            0
        } else {
            ((maximum - minimum) as f32 * 255.0 / maximum as f32).round() as u8
        };

        let half_degrees = (self.hue() / 2.0).round() as u16 % HUE_RANGE_8BIT;

        Hsv {
            hue: half_degrees as u8,
            saturation,
            value: maximum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_land_on_their_8bit_hues() {
        assert_eq!(Pixel::new(255, 0, 0).to_hsv(), Hsv { hue: 0, saturation: 255, value: 255 });
        assert_eq!(Pixel::new(0, 255, 0).to_hsv(), Hsv { hue: 60, saturation: 255, value: 255 });
        assert_eq!(Pixel::new(0, 0, 255).to_hsv(), Hsv { hue: 120, saturation: 255, value: 255 });
    }

    #[test]
    fn gray_and_black_are_achromatic() {
        assert_eq!(Pixel::new(0, 0, 0).to_hsv(), Hsv::default());
        let gray = Pixel::new(128, 128, 128).to_hsv();
        assert_eq!(gray.hue, 0);
        assert_eq!(gray.saturation, 0);
        assert_eq!(gray.value, 128);
    }

    #[test]
    fn hue_just_below_360_wraps_to_zero() {
        // 255,0,1 sits at roughly 359.8 degrees.
        let hsv = Pixel::new(255, 0, 1).to_hsv();
        assert_eq!(hsv.hue, 0);
    }

    #[test]
    fn half_saturated_pixel() {
        let hsv = Pixel::new(200, 100, 100).to_hsv();
        assert_eq!(hsv.value, 200);
        assert_eq!(hsv.saturation, 128);
        assert_eq!(hsv.hue, 0);
    }
}
