//! Static safety overrides applied before a message reaches the model.
//!
//! Matching is case-insensitive (the text is lower-cased first) and
//! whole-word. Risk patterns are tried in a fixed order and the first match
//! wins. A message containing the word "studies" skips every risk pattern.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Reply returned instead of a model answer when a risk pattern matches.
pub const SAFETY_MESSAGE: &str = "I'm really concerned about your safety. Please reach out \
immediately to a trusted friend or a counselor: 1800-599-0019";

/// Risk patterns in evaluation order.
const RISK_PATTERNS: [&str; 6] = [
    r"\b(suicide)\b",
    r"\b(end my life)\b",
    r"\b(kill myself)\b",
    r"\b(die)\b",
    r"\b(hurting myself)\b",
    r"\b(self-harm)\b",
];

static BYPASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(studies)\b").expect("bypass pattern compiles"));

static RISKS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RISK_PATTERNS
        .iter()
        .map(|p| (*p, Regex::new(p).expect("risk pattern compiles")))
        .collect()
});

/// Outcome of scanning one user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The message mentions "studies" and goes straight to the model.
    Bypass,
    /// A risk pattern matched; the message must not be forwarded.
    Flagged { pattern: &'static str },
    /// Nothing matched.
    Clear,
}

impl Verdict {
    /// `true` when the safety message replaces the model answer.
    pub fn intercepts(&self) -> bool {
        matches!(self, Verdict::Flagged { .. })
    }
}

/// Scan `text` against the bypass rule and then the ordered risk patterns.
pub fn classify(text: &str) -> Verdict {
    let lowered = text.to_lowercase();

    if BYPASS.is_match(&lowered) {
        debug!("message mentions 'studies'; skipping risk patterns");
        return Verdict::Bypass;
    }

    for (pattern, re) in RISKS.iter() {
        if re.is_match(&lowered) {
            debug!(pattern = %pattern, "safety override triggered");
            return Verdict::Flagged { pattern };
        }
    }

    Verdict::Clear
}

// ── Tests ──────────────────────────────────────────────────────────────────────
