//! Sentiment scoring.
//!
//! The journal only needs a single compound score in [-1.0, 1.0] per text.
//! [`SentimentOracle`] is the seam; [`VaderAnalyzer`] is the built-in
//! scorer, backed by the VADER lexicon and rule set.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores free text. Implementations must return a value in [-1.0, 1.0].
pub trait SentimentOracle {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentOracle for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// VADER compound polarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderAnalyzer;

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentOracle for VaderAnalyzer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        if compound.is_nan() {
            tracing::warn!("Sentiment score was NaN, treating as neutral");
            return 0.0;
        }
        compound.clamp(-1.0, 1.0)
    }
}
