use super::*;

fn request(name: &str, email: &str, business: Option<&str>, message: &str) -> ContactRequest {
    ContactRequest {
        name: name.to_string(),
        email: email.to_string(),
        business: business.map(str::to_string),
        message: message.to_string(),
    }
}

#[test]
fn empty_name_is_rejected_with_name_error() {
    let errors = validate(&request("", "a@b.com", None, "hello world!"));
    assert_eq!(errors, vec![NAME_ERROR.to_string()]);
}

#[test]
fn malformed_email_is_rejected() {
    let errors = validate(&request("Jo", "not-an-email", None, "hello world!"));
    assert_eq!(errors, vec![EMAIL_ERROR.to_string()]);
}

#[test]
fn short_message_is_rejected() {
    let errors = validate(&request("Jo", "a@b.com", None, "hi"));
    assert_eq!(errors, vec![MESSAGE_ERROR.to_string()]);
}

#[test]
fn complete_request_passes() {
    let errors = validate(&request(
        "Jo",
        "a@b.com",
        Some("Acme"),
        "Hello, I need a site.",
    ));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn all_violations_are_collected_in_field_order() {
    let errors = validate(&request("J", "x@y", Some("A"), "short"));
    assert_eq!(
        errors,
        vec![
            NAME_ERROR.to_string(),
            EMAIL_ERROR.to_string(),
            BUSINESS_ERROR.to_string(),
            MESSAGE_ERROR.to_string(),
        ]
    );
}

#[test]
fn blank_business_counts_as_absent() {
    let errors = validate(&request("Jo", "a@b.com", Some("   "), "hello world!"));
    assert!(errors.is_empty());
}

#[test]
fn whitespace_only_name_is_too_short() {
    let errors = validate(&request("   ", "a@b.com", None, "hello world!"));
    assert_eq!(errors, vec![NAME_ERROR.to_string()]);
}

#[test]
fn email_pattern_needs_dot_after_at() {
    assert!(is_valid_email("someone@example.org"));
    assert!(!is_valid_email("someone@localhost"));
    assert!(!is_valid_email("some one@example.org"));
    assert!(!is_valid_email("@example.org"));
}

#[test]
fn normalize_trims_and_drops_blank_business() {
    let normalized = normalize(request(" Jo ", " a@b.com ", Some(" "), " hello world! "));
    assert_eq!(normalized.name, "Jo");
    assert_eq!(normalized.email, "a@b.com");
    assert_eq!(normalized.business, None);
    assert_eq!(normalized.message, "hello world!");
}
