//! Field rules shared by the form-backed entities.
//!
//! Used through `#[validate(custom(...))]` / `#[validate(regex(...))]` on
//! [`Owner`](crate::owner::Owner) and [`Visit`](crate::visit::Visit).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Number of digits in a clinic telephone number.
pub const TELEPHONE_DIGITS: usize = 10;

/// Exactly ten ASCII digits, nothing else.
pub static TELEPHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[0-9]{{{TELEPHONE_DIGITS}}}$")).expect("telephone pattern is valid")
});

/// Reject empty and whitespace-only values.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

pub fn is_valid_telephone(value: &str) -> bool {
    TELEPHONE_PATTERN.is_match(value)
}
