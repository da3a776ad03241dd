//! Content kinds and shared value types

use crate::error::GardenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Plant,
    Rainbow,
    Weather,
    Aurora,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Plant,
        ContentKind::Rainbow,
        ContentKind::Weather,
        ContentKind::Aurora,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Plant => "plant",
            ContentKind::Rainbow => "rainbow",
            ContentKind::Weather => "weather",
            ContentKind::Aurora => "aurora",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plant" | "plants" => Ok(ContentKind::Plant),
            "rainbow" => Ok(ContentKind::Rainbow),
            "weather" => Ok(ContentKind::Weather),
            "aurora" => Ok(ContentKind::Aurora),
            other => Err(GardenError::UnknownKind(other.to_string())),
        }
    }
}

/// An RGB colour with integer channels, serialized as `[r, g, b]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    /// Pack into a `0xRRGGBB` integer
    pub fn to_hex(&self) -> u32 {
        ((self.0[0] as u32) << 16) | ((self.0[1] as u32) << 8) | self.0[2] as u32
    }
}

/// A hue/saturation/brightness colour, serialized as `[h, s, b]`.
/// Hue is in degrees (0-360); saturation and brightness are percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsb(pub [f64; 3]);

impl Hsb {
    pub fn hue(&self) -> f64 {
        self.0[0]
    }

    pub fn saturation(&self) -> f64 {
        self.0[1]
    }

    pub fn brightness(&self) -> f64 {
        self.0[2]
    }

    /// Convert to RGB
    pub fn to_rgb(&self) -> Rgb {
        let h = self.hue().rem_euclid(360.0) / 60.0;
        let s = (self.saturation() / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness() / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |ch: f64| ((ch + m) * 255.0).round() as u8;
        Rgb([to_u8(r), to_u8(g), to_u8(b)])
    }
}

/// An inclusive `[min, max]` pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Span<T>(pub [T; 2]);

impl<T: Copy + PartialOrd> Span<T> {
    pub fn min(&self) -> T {
        self.0[0]
    }

    pub fn max(&self) -> T {
        self.0[1]
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.0[0] && value <= self.0[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_through_str() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>().unwrap(), kind);
        }
        assert!(matches!(
            "volcano".parse::<ContentKind>(),
            Err(GardenError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb([0xFF, 0x88, 0x44]).to_hex(), 0xFF8844);
    }

    #[test]
    fn test_hsb_to_rgb() {
        assert_eq!(Hsb([0.0, 100.0, 100.0]).to_rgb(), Rgb([255, 0, 0]));
        assert_eq!(Hsb([120.0, 100.0, 100.0]).to_rgb(), Rgb([0, 255, 0]));
        assert_eq!(Hsb([240.0, 100.0, 50.0]).to_rgb(), Rgb([0, 0, 128]));
        assert_eq!(Hsb([360.0, 0.0, 100.0]).to_rgb(), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_span_serializes_as_pair() {
        let span: Span<f64> = serde_json::from_str("[40, 70]").unwrap();
        assert_eq!(span.min(), 40.0);
        assert_eq!(span.max(), 70.0);
        assert!(span.contains(55.0));
        assert_eq!(serde_json::to_string(&span).unwrap(), "[40.0,70.0]");
    }
}
