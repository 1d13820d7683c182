//! Field validators for the contact form.
//!
//! Every validator returns `None` when the value is acceptable and a
//! human-readable message otherwise. Validators never fail; a message is the
//! only outcome of bad input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-zÀ-ž\s'-]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^3706\d{7}$").unwrap();
}

/// First name / surname: non-empty, letters (incl. Latin diacritics),
/// spaces, hyphens and apostrophes only.
pub fn validate_name(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("This field is required.".into());
    }
    if !NAME_RE.is_match(value) {
        return Some("Only letters and spaces are allowed.".into());
    }
    None
}

pub fn validate_email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email is required.".into());
    }
    if !EMAIL_RE.is_match(value) {
        return Some("Please enter a valid email.".into());
    }
    None
}

/// Validates an already-masked phone value by its digit content:
/// the fixed `3706` prefix followed by exactly seven digits.
pub fn validate_phone(value: &str) -> Option<String> {
    let digits = digits_of(value);
    if digits.is_empty() {
        return Some("Phone number is required.".into());
    }
    if !PHONE_RE.is_match(&digits) {
        return Some("Format must be like +370 6xx xxxxx.".into());
    }
    None
}

pub fn validate_address(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Address is required.".into());
    }
    if value.chars().count() < 5 {
        return Some("Address should be a bit more descriptive.".into());
    }
    None
}

/// Ratings accept any numeric value in `[1, 10]` inclusive.
pub fn validate_rating(value: &str) -> Option<String> {
    let num = match parse_rating(value) {
        Some(n) => n,
        None => return Some("Please provide a rating between 1 and 10.".into()),
    };
    if num < 1.0 || num > 10.0 {
        return Some("Rating must be between 1 and 10.".into());
    }
    None
}

/// Parses a rating field; empty input and non-numbers (NaN included) are `None`.
pub fn parse_rating(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Reformats free-text phone input into the canonical `+370 6xx xxxxx` shape.
///
/// All non-digits are stripped. A digit string that does not already carry
/// the `3706` country+operator prefix has one leading alternate prefix
/// (`370`, `86` or `0`) removed, keeps at most seven digits of the remainder
/// and gets the fixed prefix prepended; otherwise the string is cut at
/// eleven digits. The result is rendered as `+CCC F MM EEEEE`, skipping
/// empty groups.
pub fn mask_phone(raw: &str) -> String {
    let mut digits = digits_of(raw);
    if !digits.starts_with("3706") {
        let tail = strip_alternate_prefix(&digits);
        let keep = tail.len().min(7);
        digits = format!("3706{}", &tail[..keep]);
    } else {
        digits.truncate(11);
    }

    let country = &digits[..digits.len().min(3)];
    let first = &digits[3..digits.len().min(4)];
    let mid = &digits[4.min(digits.len())..digits.len().min(6)];
    let end = &digits[6.min(digits.len())..];

    let mut formatted = String::from("+");
    formatted.push_str(country);
    if !first.is_empty() {
        formatted.push(' ');
        formatted.push_str(first);
    }
    formatted.push_str(mid);
    if !end.is_empty() {
        formatted.push(' ');
        formatted.push_str(end);
    }
    formatted.trim().to_string()
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strips the first matching alternate prefix, longest-first (`370`, `86`, `0`).
fn strip_alternate_prefix(digits: &str) -> &str {
    for prefix in ["370", "86", "0"] {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return rest;
        }
    }
    digits
}
