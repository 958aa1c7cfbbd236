//! Recovery of the original message embedded in a consumer response.
//!
//! Responses wrap the message in single quotes, e.g.
//! `Consumed: 'Just hiked a peak.' - Action: Logged`. This is a delimiter
//! convention, not a serialization format: the text between the first and
//! the last `'` is taken as the message, so an apostrophe outside the quoted
//! region shifts the boundaries.

/// Return the text strictly between the first and last single quote.
///
/// `None` when there is no quote, a single quote, or the quotes are adjacent.
pub fn extract_quoted(response: &str) -> Option<&str> {
    let start = response.find('\'')? + 1;
    let end = response.rfind('\'')?;
    if start < end {
        Some(&response[start..end])
    } else {
        None
    }
}
