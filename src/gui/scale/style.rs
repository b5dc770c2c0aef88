use derive_more::From;
use palette::rgb::FromHexError;
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color written as `#rrggbb` (or `#rgb`) in config files.
#[derive(Debug, Clone, Copy, PartialEq, From, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(HexColor::from)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Visual parameters of the scale. Lengths are logical pixels.
///
/// Built once per widget instance and never mutated afterwards; override
/// individual fields with struct-update syntax:
///
/// ```
/// use weightpicker::gui::scale::ScaleStyle;
///
/// let style = ScaleStyle {
///     scale_width: 150.0,
///     ..ScaleStyle::default()
/// };
/// assert_eq!(style.radius, 110.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScaleStyle {
    pub radius: f64,
    pub scale_width: f64,
    pub normal_line_color: HexColor,
    pub five_step_line_color: HexColor,
    pub ten_step_line_color: HexColor,
    pub normal_line_length: f64,
    pub five_step_line_length: f64,
    pub ten_step_line_length: f64,
    pub text_size: f64,
}

impl Default for ScaleStyle {
    fn default() -> Self {
        Self {
            radius: 110.0,
            scale_width: 150.0,
            normal_line_color: HexColor::new(0xc8, 0xc8, 0xc8),
            five_step_line_color: HexColor::new(0x8c, 0x8c, 0x8c),
            ten_step_line_color: HexColor::new(0x00, 0x00, 0x00),
            normal_line_length: 15.0,
            five_step_line_length: 25.0,
            ten_step_line_length: 35.0,
            text_size: 18.0,
        }
    }
}

impl ScaleStyle {
    /// Distance from the dial center to the outer rim of the ring.
    pub fn outer_radius(&self) -> f64 {
        self.radius + self.scale_width / 2.0
    }
}
