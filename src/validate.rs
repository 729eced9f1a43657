//! Field validation for user payloads.
//!
//! Rules live in one ordered table. Every rule is evaluated, so the caller
//! gets all violations at once, Email rules before the Name rule.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::user::UserPayload;

/// `local@domain.tld`: no whitespace, a single `@`, at least one dot in the
/// domain and no empty domain labels.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email regex is valid")
});

struct Rule {
    field: fn(&UserPayload) -> Option<&str>,
    holds: fn(Option<&str>) -> bool,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule { field: email, holds: present, message: "Email is required." },
    Rule { field: email, holds: blank_or_email, message: "Email is not valid." },
    Rule { field: name, holds: present, message: "Name is required." },
];

/// Checks `payload` against every rule; `Err` carries the messages of the
/// rules that failed, in table order.
pub fn validate(payload: &UserPayload) -> Result<(), Vec<String>> {
    let errors: Vec<String> = RULES.iter()
        .filter(|rule| !(rule.holds)((rule.field)(payload)))
        .map(|rule| rule.message.to_owned())
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn email(p: &UserPayload) -> Option<&str> { p.email.as_deref() }
fn name(p: &UserPayload) -> Option<&str> { p.name.as_deref() }

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// A blank email is the "required" rule's business.
fn blank_or_email(value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => EMAIL_REGEX.is_match(v),
        _ => true,
    }
}
