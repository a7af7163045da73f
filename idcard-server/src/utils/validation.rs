//! Input validation helpers
//!
//! Centralized text length constants and a violation accumulator.
//! Validation collects every bad field before failing, so the caller
//! gets the complete list in one response instead of fixing fields
//! one round-trip at a time.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person / organization / template names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers, blood group, color codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Violation accumulator ───────────────────────────────────────────

/// Collects field-level violations and converts the whole set into a
/// single [`AppError::Validation`].
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`
    pub fn add(&mut self, field: &str, problem: impl Into<String>) {
        self.items.push(format!("{field}: {}", problem.into()));
    }

    /// Require a non-empty string within the length limit
    pub fn require_text(&mut self, value: &str, field: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        } else if value.len() > max_len {
            self.add(field, format!("too long ({} chars, max {max_len})", value.len()));
        }
    }

    /// Check an optional string against the length limit
    pub fn check_optional_text(&mut self, value: &Option<String>, field: &str, max_len: usize) {
        if let Some(v) = value
            && v.len() > max_len
        {
            self.add(field, format!("too long ({} chars, max {max_len})", v.len()));
        }
    }

    /// Require a `YYYY-MM-DD` calendar date
    pub fn require_date(&mut self, value: &str, field: &str) {
        if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            self.add(field, "must be a valid YYYY-MM-DD date");
        }
    }

    /// Require a `#RRGGBB` hex color
    pub fn require_hex_color(&mut self, value: &str, field: &str) {
        let ok = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !ok {
            self.add(field, "must be a #RRGGBB hex color");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return `Ok(())` when nothing was recorded, otherwise one
    /// validation error enumerating every violation.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.items.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_violations_not_just_first() {
        let mut v = Violations::new();
        v.require_text("", "full_name", MAX_NAME_LEN);
        v.require_text("  ", "contact_number", MAX_SHORT_TEXT_LEN);
        v.require_date("15-01-2024", "joining_date");

        let err = v.into_result().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("full_name"));
        assert!(msg.contains("contact_number"));
        assert!(msg.contains("joining_date"));
    }

    #[test]
    fn valid_input_passes() {
        let mut v = Violations::new();
        v.require_text("Jane Doe", "full_name", MAX_NAME_LEN);
        v.require_date("2024-01-15", "joining_date");
        v.require_hex_color("#1a2b3c", "primary_color");
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn rejects_bad_hex_color() {
        let mut v = Violations::new();
        v.require_hex_color("red", "primary_color");
        assert!(v.into_result().is_err());
    }
}
