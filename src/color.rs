//! RGB color value used for mood entries and gradient stops.

use crate::error::JournalError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest per-channel offset applied by [`jitter`].
pub const JITTER_RANGE: i32 = 15;

/// An RGB color with 8-bit channels.
///
/// Stored on disk as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional, hex digits in any case).
    pub fn from_hex(hex: &str) -> Result<Self, JournalError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(JournalError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| JournalError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from floating-point channels, truncating toward zero
    /// and clamping to [0, 255].
    pub fn from_f64_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_f64(r),
            g: clamp_f64(g),
            b: clamp_f64(b),
        }
    }

    /// Shift each channel by a signed offset, clamping to [0, 255].
    pub fn offset(&self, dr: i32, dg: i32, db: i32) -> Self {
        Self {
            r: clamp_i32(self.r as i32 + dr),
            g: clamp_i32(self.g as i32 + dg),
            b: clamp_i32(self.b as i32 + db),
        }
    }
}

fn clamp_i32(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

fn clamp_f64(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(0.0, 255.0) as u8
}

/// Perturb each channel by a uniform random offset in
/// [-[`JITTER_RANGE`], +[`JITTER_RANGE`]] so repeated moods in the same
/// bucket stay distinguishable in the gradient.
pub fn jitter<R: Rng>(color: Rgb, rng: &mut R) -> Rgb {
    let dr = rng.gen_range(-JITTER_RANGE..=JITTER_RANGE);
    let dg = rng.gen_range(-JITTER_RANGE..=JITTER_RANGE);
    let db = rng.gen_range(-JITTER_RANGE..=JITTER_RANGE);
    color.offset(dr, dg, db)
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = JournalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl From<Rgb> for egui::Color32 {
    fn from(color: Rgb) -> Self {
        egui::Color32::from_rgb(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_and_formats_hex() {
        let color = Rgb::from_hex("#70E000").unwrap();
        assert_eq!(color, Rgb::new(0x70, 0xe0, 0x00));
        assert_eq!(color.to_hex(), "#70e000");
        assert_eq!("d00000".parse::<Rgb>().unwrap(), Rgb::new(208, 0, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#12345g", "#1234567", "red"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Rgb = serde_json::from_str("\"#A3F07C\"").unwrap();
        assert_eq!(back, Rgb::new(0xa3, 0xf0, 0x7c));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }

    #[test]
    fn offset_clamps_at_both_ends() {
        let edges = [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(7, 128, 250),
        ];
        for color in edges {
            for d in -JITTER_RANGE..=JITTER_RANGE {
                let shifted = color.offset(d, -d, d);
                for (before, after, delta) in [
                    (color.r, shifted.r, d),
                    (color.g, shifted.g, -d),
                    (color.b, shifted.b, d),
                ] {
                    let expected = (before as i32 + delta).clamp(0, 255);
                    assert_eq!(after as i32, expected);
                }
            }
        }
    }

    #[test]
    fn float_channels_truncate_and_clamp() {
        let c = Rgb::from_f64_channels(254.99, -3.0, 300.0);
        assert_eq!(c, Rgb::new(254, 0, 255));
        assert_eq!(Rgb::from_f64_channels(f64::NAN, 0.4, 1.9), Rgb::new(0, 0, 1));
    }

    #[test]
    fn jitter_stays_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Rgb::new(0x70, 0xe0, 0x00);
        for _ in 0..500 {
            let varied = jitter(base, &mut rng);
            assert!((varied.r as i32 - base.r as i32).abs() <= JITTER_RANGE);
            assert!((varied.g as i32 - base.g as i32).abs() <= JITTER_RANGE);
            // Blue starts at 0 so it can only move up.
            assert!(varied.b as i32 <= JITTER_RANGE);
        }
    }

    #[test]
    fn jitter_is_reproducible_with_a_seed() {
        let base = Rgb::new(100, 100, 100);
        let a = jitter(base, &mut StdRng::seed_from_u64(42));
        let b = jitter(base, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn converts_to_egui_color() {
        let c: egui::Color32 = Rgb::new(1, 2, 3).into();
        assert_eq!(c, egui::Color32::from_rgb(1, 2, 3));
    }
}
