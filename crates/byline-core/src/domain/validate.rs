//! Field validators for authors and posts.
//!
//! Each validator is a pure function over a single candidate value: it either
//! accepts the value or returns a [`ValidationError`] naming the field and one
//! of the fixed reason messages. Validators are independent of each other and
//! order-insensitive; callers run every applicable validator before any write.

use crate::error::ValidationError;

/// Phrases of which at least one must appear in a post title
/// (case-sensitive substring match).
pub const CLICKBAIT_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];

/// The only categories a post may carry.
pub const CATEGORIES: [&str; 2] = ["Fiction", "Non-Fiction"];

/// Minimum post content length, in characters.
pub const MIN_CONTENT_LEN: usize = 250;

/// Maximum post summary length, in characters.
pub const MAX_SUMMARY_LEN: usize = 250;

/// An author name must be non-empty.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("name", "Name cannot be empty."));
    }
    Ok(())
}

/// A phone number must be exactly ten ASCII decimal digits, nothing else.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    // len() counts bytes, but ten ASCII digits are exactly ten bytes.
    let ten_digits =
        phone_number.len() == 10 && phone_number.bytes().all(|b| b.is_ascii_digit());
    if !ten_digits {
        return Err(ValidationError::new(
            "phone_number",
            "Phone number must be exactly ten digits.",
        ));
    }
    Ok(())
}

/// A post title must contain at least one of [`CLICKBAIT_PHRASES`].
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if !CLICKBAIT_PHRASES.iter().any(|phrase| title.contains(phrase)) {
        return Err(ValidationError::new(
            "title",
            "Post title must be sufficiently clickbait-y.",
        ));
    }
    Ok(())
}

/// Post content must be at least [`MIN_CONTENT_LEN`] characters long.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.chars().count() < MIN_CONTENT_LEN {
        return Err(ValidationError::new(
            "content",
            "Post content must be at least 250 characters long.",
        ));
    }
    Ok(())
}

/// A post summary must be at most [`MAX_SUMMARY_LEN`] characters long.
pub fn validate_summary(summary: &str) -> Result<(), ValidationError> {
    if summary.chars().count() > MAX_SUMMARY_LEN {
        return Err(ValidationError::new(
            "summary",
            "Post summary must be a maximum of 250 characters.",
        ));
    }
    Ok(())
}

/// A post category must be exactly one of [`CATEGORIES`].
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if !CATEGORIES.contains(&category) {
        return Err(ValidationError::new(
            "category",
            "Post category must be either Fiction or Non-Fiction.",
        ));
    }
    Ok(())
}
