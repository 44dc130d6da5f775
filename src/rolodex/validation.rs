//! Field checks applied to drafts before they reach the store.

use crate::error::{Result, RolodexError};
use once_cell::sync::Lazy;
use regex::Regex;

pub const PHONE_DIGITS: usize = 12;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid email regex")
});

/// Per-store validation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Require phones to be exactly [`PHONE_DIGITS`] digits. When off, any
    /// non-empty phone is accepted.
    pub strict_phone: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self { strict_phone: true }
    }
}

impl Rules {
    pub fn lenient() -> Self {
        Self {
            strict_phone: false,
        }
    }
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RolodexError::validation(field, "must not be empty"));
    }
    Ok(())
}

pub fn check_phone(phone: &str, rules: &Rules) -> Result<()> {
    require_non_empty("phone", phone)?;
    if rules.strict_phone && !PHONE_RE.is_match(phone) {
        return Err(RolodexError::validation(
            "phone",
            format!("must be exactly {} digits, got \"{}\"", PHONE_DIGITS, phone),
        ));
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(RolodexError::validation(
            "email",
            format!("\"{}\" is not of the form name@domain.tld", email),
        ));
    }
    Ok(())
}
