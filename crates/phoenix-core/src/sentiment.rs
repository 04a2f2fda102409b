//! Compound sentiment scoring for chat messages.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Produces a single polarity value in `[-1, 1]` for a piece of text.
///
/// Implementations must be pure: the same text always yields the same score.
pub trait SentimentScorer: Send + Sync + 'static {
    fn score(&self, text: &str) -> f64;
}

/// Lexicon-based scorer backed by VADER's general-purpose lexicon.
///
/// The lexicon tables are process-wide statics inside `vader_sentiment`, so
/// building an analyzer per call only borrows them.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        let analyzer = SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}
