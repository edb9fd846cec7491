//! Contact form rules shared by the page controller and the `/contact` handler.

use std::sync::LazyLock;

use regex::Regex;

use crate::protocol::ContactRequest;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_BUSINESS_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

pub const NAME_ERROR: &str = "Please enter your name (at least 2 characters)";
pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const BUSINESS_ERROR: &str = "Business name must be at least 2 characters";
pub const MESSAGE_ERROR: &str = "Please enter a message (at least 10 characters)";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks every rule and returns the violations in field order.
///
/// An empty vector means the request may be submitted. Values are trimmed
/// before length checks; an empty `business` counts as absent.
pub fn validate(request: &ContactRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if char_len(&request.name) < MIN_NAME_CHARS {
        errors.push(NAME_ERROR.to_string());
    }

    if !is_valid_email(request.email.trim()) {
        errors.push(EMAIL_ERROR.to_string());
    }

    if let Some(business) = request.business.as_deref() {
        let len = char_len(business);
        if len > 0 && len < MIN_BUSINESS_CHARS {
            errors.push(BUSINESS_ERROR.to_string());
        }
    }

    if char_len(&request.message) < MIN_MESSAGE_CHARS {
        errors.push(MESSAGE_ERROR.to_string());
    }

    errors
}

/// Trims every field and drops a blank `business`.
pub fn normalize(request: ContactRequest) -> ContactRequest {
    let business = request
        .business
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());
    ContactRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        business,
        message: request.message.trim().to_string(),
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
