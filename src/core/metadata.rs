/// Metadata derivation for consumed messages.

use chrono::Utc;

use crate::schema::event::{EventMetadata, Sentiment};

/// Keywords that mark a message as positive. Matched as lower-case
/// substrings, so "Amazing" and "amazingly" both count.
pub const POSITIVE_KEYWORDS: [&str; 6] = [
    "amazing",
    "breathtaking",
    "stunning",
    "magical",
    "unforgettable",
    "peaceful",
];

/// Classify `text` against [`POSITIVE_KEYWORDS`].
pub fn sentiment_of(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// Summarize a message. Total over every input, including the empty string.
pub fn derive_metadata(text: &str) -> EventMetadata {
    EventMetadata {
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
        sentiment: sentiment_of(text),
        timestamp: Utc::now(),
    }
}
