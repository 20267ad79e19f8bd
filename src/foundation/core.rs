use std::fmt;

use crate::foundation::error::EncodeError;

pub use kurbo::{Affine, Rect};

/// Library asset identifier assigned by the host exporter. `0` denotes the stage root.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct AssetId(pub u32);

impl AssetId {
    /// The stage root.
    pub const STAGE: AssetId = AssetId(0);

    /// Whether this id refers to the stage root.
    pub fn is_stage(self) -> bool {
        self.0 == 0
    }
}

/// Display-list instance identifier, unique among currently placed objects of one timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// `placeAfterId` sentinel meaning "bottom of the display list".
    pub const BOTTOM: InstanceId = InstanceId(0);
}

/// Zero-based frame number on a timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameNumber(pub u32);

/// Straight-alpha 8-bit color as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from its RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Canonical `#RRGGBB` wire color (alpha is carried separately where it matters).
    pub fn hex(self) -> HexColor {
        let rgb = u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b);
        HexColor(rgb)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_fraction(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// RGB color serialized as an upper-case `#RRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(pub u32);

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl std::str::FromStr for HexColor {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| EncodeError::serde(format!("color '{s}' must start with '#'")))?;
        if digits.len() != 6 {
            return Err(EncodeError::serde(format!(
                "color '{s}' must have exactly 6 hex digits"
            )));
        }
        u32::from_str_radix(digits, 16)
            .map(HexColor)
            .map_err(|_| EncodeError::serde(format!("color '{s}' is not valid hex")))
    }
}

impl serde::Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter strength, serialized as a decimal string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Strength(pub i32);

impl serde::Serialize for Strength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Strength {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.trim()
            .parse::<i32>()
            .map(Strength)
            .map_err(serde::de::Error::custom)
    }
}

/// 4x5 row-major color transform matrix (RGBA rows, last column is the offset).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatrix(pub [[f64; 5]; 4]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    /// Matrix that leaves colors unchanged.
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        [1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 0.0],
    ]);

    /// Whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
