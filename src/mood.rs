//! Mood buckets and the score-to-color classifier.

use crate::color::Rgb;
use crate::sentiment::SentimentOracle;
use serde::{Deserialize, Serialize};

/// Discrete sentiment category for one mood entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodBucket {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl MoodBucket {
    /// Map a compound score to its bucket.
    ///
    /// The two positive bands are inclusive at their lower bound while the
    /// rest are exclusive, so -0.2 and -0.6 land in the more negative bucket.
    /// NaN falls through to `VeryNegative`.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            MoodBucket::VeryPositive
        } else if score >= 0.2 {
            MoodBucket::Positive
        } else if score > -0.2 {
            MoodBucket::Neutral
        } else if score > -0.6 {
            MoodBucket::Negative
        } else {
            MoodBucket::VeryNegative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodBucket::VeryPositive => "Very Positive 😄",
            MoodBucket::Positive => "Positive 🙂",
            MoodBucket::Neutral => "Neutral 😐",
            MoodBucket::Negative => "Negative 😕",
            MoodBucket::VeryNegative => "Very Negative 😔",
        }
    }

    pub fn quote(&self) -> &'static str {
        match self {
            MoodBucket::VeryPositive => "Keep shining! ✨",
            MoodBucket::Positive => "You’re doing amazing.",
            MoodBucket::Neutral => "Stillness is powerful.",
            MoodBucket::Negative => "It’s okay to not be okay.",
            MoodBucket::VeryNegative => "You’re not alone 💜",
        }
    }

    /// Link to a song that fits the mood.
    pub fn song_url(&self) -> &'static str {
        match self {
            MoodBucket::VeryPositive => "https://open.spotify.com/track/3KkXRkHbMCARz0aVfEt68P",
            MoodBucket::Positive => "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC",
            MoodBucket::Neutral => "https://open.spotify.com/track/2nLtzopw4rPReszdYBJU6h",
            MoodBucket::Negative => "https://open.spotify.com/track/5yY9lUy8nbvjM1Uyo1Uqoc",
            MoodBucket::VeryNegative => "https://open.spotify.com/track/3dYD57lRAUcMHufyqn9GcI",
        }
    }

    /// All buckets, most positive first
    pub fn all() -> &'static [MoodBucket] {
        &[
            MoodBucket::VeryPositive,
            MoodBucket::Positive,
            MoodBucket::Neutral,
            MoodBucket::Negative,
            MoodBucket::VeryNegative,
        ]
    }
}

/// Base color for each bucket. Overridable from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPalette {
    pub very_positive: Rgb,
    pub positive: Rgb,
    pub neutral: Rgb,
    pub negative: Rgb,
    pub very_negative: Rgb,
}

impl MoodPalette {
    pub const CANONICAL: MoodPalette = MoodPalette {
        very_positive: Rgb::new(0x70, 0xe0, 0x00),
        positive: Rgb::new(0xa3, 0xf0, 0x7c),
        neutral: Rgb::new(0xf3, 0xf3, 0xa1),
        negative: Rgb::new(0xf3, 0x8e, 0x7f),
        very_negative: Rgb::new(0xd0, 0x00, 0x00),
    };

    pub fn color_for(&self, bucket: MoodBucket) -> Rgb {
        match bucket {
            MoodBucket::VeryPositive => self.very_positive,
            MoodBucket::Positive => self.positive,
            MoodBucket::Neutral => self.neutral,
            MoodBucket::Negative => self.negative,
            MoodBucket::VeryNegative => self.very_negative,
        }
    }
}

impl Default for MoodPalette {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Outcome of classifying one piece of mood text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub bucket: MoodBucket,
    pub score: f64,
    pub base_color: Rgb,
}

/// Score `text` with the oracle and pick the bucket and its base color.
pub fn classify_mood(
    oracle: &dyn SentimentOracle,
    palette: &MoodPalette,
    text: &str,
) -> Classification {
    let score = oracle.score(text);
    let bucket = MoodBucket::from_score(score);
    Classification {
        bucket,
        score,
        base_color: palette.color_for(bucket),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_exact() {
        assert_eq!(MoodBucket::from_score(1.0), MoodBucket::VeryPositive);
        assert_eq!(MoodBucket::from_score(0.6), MoodBucket::VeryPositive);
        assert_eq!(MoodBucket::from_score(0.5999), MoodBucket::Positive);
        assert_eq!(MoodBucket::from_score(0.2), MoodBucket::Positive);
        assert_eq!(MoodBucket::from_score(0.1999), MoodBucket::Neutral);
        assert_eq!(MoodBucket::from_score(0.0), MoodBucket::Neutral);
        assert_eq!(MoodBucket::from_score(-0.1999), MoodBucket::Neutral);
        assert_eq!(MoodBucket::from_score(-0.2), MoodBucket::Negative);
        assert_eq!(MoodBucket::from_score(-0.5999), MoodBucket::Negative);
        assert_eq!(MoodBucket::from_score(-0.6), MoodBucket::VeryNegative);
        assert_eq!(MoodBucket::from_score(-1.0), MoodBucket::VeryNegative);
    }

    #[test]
    fn from_score_is_total() {
        for step in -1000..=1000 {
            let bucket = MoodBucket::from_score(step as f64 / 1000.0);
            assert!(MoodBucket::all().contains(&bucket));
        }
        assert_eq!(MoodBucket::from_score(f64::NAN), MoodBucket::VeryNegative);
    }

    #[test]
    fn classify_uses_oracle_score_and_palette() {
        let oracle = |_: &str| 0.8;
        let palette = MoodPalette::default();
        let result = classify_mood(&oracle, &palette, "I feel amazing today!");
        assert_eq!(result.bucket, MoodBucket::VeryPositive);
        assert_eq!(result.base_color, MoodPalette::CANONICAL.very_positive);
        assert_eq!(result.base_color.to_hex(), "#70e000");
        assert_eq!(result.score, 0.8);
    }

    #[test]
    fn custom_palette_overrides_base_color() {
        let palette = MoodPalette {
            neutral: Rgb::new(1, 2, 3),
            ..MoodPalette::default()
        };
        let oracle = |_: &str| 0.0;
        let result = classify_mood(&oracle, &palette, "meh");
        assert_eq!(result.bucket, MoodBucket::Neutral);
        assert_eq!(result.base_color, Rgb::new(1, 2, 3));
    }

    #[test]
    fn canonical_palette_hex_values() {
        let hexes: Vec<String> = MoodBucket::all()
            .iter()
            .map(|b| MoodPalette::CANONICAL.color_for(*b).to_hex())
            .collect();
        let expected = ["#70e000", "#a3f07c", "#f3f3a1", "#f38e7f", "#d00000"];
        assert_eq!(hexes, expected);
    }

    #[test]
    fn every_bucket_has_resources() {
        for bucket in MoodBucket::all() {
            assert!(!bucket.label().is_empty());
            assert!(!bucket.quote().is_empty());
            assert!(bucket.song_url().starts_with("https://open.spotify.com/track/"));
        }
    }
}
