use crate::error::RequestError;

/// Validate the text of a synthesis request.
///
/// Leading and trailing whitespace does not count: a whitespace-only text
/// is rejected the same as an empty one.
pub fn validate_text(text: &str, max_length: usize) -> Result<(), RequestError> {
    if text.trim().is_empty() {
        return Err(RequestError::EmptyText);
    }
    if text.len() > max_length {
        return Err(RequestError::TextTooLong(max_length));
    }
    Ok(())
}
