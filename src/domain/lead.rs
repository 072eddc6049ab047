//! Lead records and the contact-form validation pipeline.
//!
//! A [`Lead`] is created exactly once through [`Lead::try_new`], persisted
//! once, and never mutated afterwards; status changes happen downstream in
//! the spreadsheet, outside this system.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::sanitize;
use super::ValidationError;

/// Names must keep at least this many characters after sanitization.
const MIN_NAME_CHARS: usize = 2;
/// Upper bound on company and contact names.
const MAX_NAME_CHARS: usize = 100;
/// Upper bound on the optional free-text message.
const MAX_MESSAGE_CHARS: usize = 500;
/// A sanitized phone number is exactly this many digits.
const PHONE_DIGITS: usize = 10;
/// Mobile numbers in the target market always start with this digit.
const PHONE_LEADING_DIGIT: char = '3';

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

/// Unique identifier for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Creates a new random LeadId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag persisted with every lead.
///
/// This system only ever writes `New`; the later stages live in the
/// spreadsheet and are managed by humans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl LeadStatus {
    /// Returns the wire/storage form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw contact-form input, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadDraft {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A validated, sanitized contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub id: LeadId,
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: LeadStatus,
}

impl Lead {
    /// Runs the full validation/sanitization pipeline over a draft.
    ///
    /// Field rules:
    /// - `company`, `name`: non-empty after trim, at most 100 characters,
    ///   and at least 2 characters once sanitized.
    /// - `email`: whitespace removed, lowercased, `local@domain` shape.
    /// - `phone`: optional; when present it must reduce to exactly 10 digits
    ///   starting with `3`, otherwise the whole create fails - the field is
    ///   never silently dropped.
    /// - `message`: optional, at most 500 characters; a message that
    ///   sanitizes to nothing is stored as absent rather than rejected.
    pub fn try_new(draft: LeadDraft) -> Result<Self, ValidationError> {
        let company = required_name("company", &draft.company)?;
        let name = required_name("name", &draft.name)?;
        let email = valid_email(&draft.email)?;
        let phone = optional_phone(draft.phone.as_deref())?;
        let message = optional_message(draft.message.as_deref())?;

        Ok(Self {
            id: LeadId::new(),
            company,
            name,
            email,
            phone,
            message,
            created_at: Utc::now(),
            status: LeadStatus::New,
        })
    }
}

fn required_name(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid_field(field, "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::invalid_field(
            field,
            format!("must be at most {} characters", MAX_NAME_CHARS),
        ));
    }
    let sanitized = sanitize::sanitize_text(trimmed);
    if sanitized.chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::invalid_field(
            field,
            format!(
                "must keep at least {} characters after sanitization",
                MIN_NAME_CHARS
            ),
        ));
    }
    Ok(sanitized)
}

fn valid_email(raw: &str) -> Result<String, ValidationError> {
    let normalized = sanitize::sanitize_email(raw);
    if !EMAIL_SHAPE.is_match(&normalized) {
        return Err(ValidationError::invalid_field(
            "email",
            "is not a valid address",
        ));
    }
    Ok(normalized)
}

fn optional_phone(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        // Absent or blank is absence, not failure.
        _ => return Ok(None),
    };
    let digits = sanitize::sanitize_phone(raw).unwrap_or_default();
    if digits.chars().count() != PHONE_DIGITS {
        return Err(ValidationError::invalid_field(
            "phone",
            format!("must contain exactly {} digits", PHONE_DIGITS),
        ));
    }
    if !digits.starts_with(PHONE_LEADING_DIGIT) {
        return Err(ValidationError::invalid_field(
            "phone",
            format!("must start with {}", PHONE_LEADING_DIGIT),
        ));
    }
    Ok(Some(digits))
}

fn optional_message(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let raw = match raw {
        Some(r) => r,
        None => return Ok(None),
    };
    if raw.trim().chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::invalid_field(
            "message",
            format!("must be at most {} characters", MAX_MESSAGE_CHARS),
        ));
    }
    let sanitized = sanitize::sanitize_text(raw);
    if sanitized.is_empty() {
        Ok(None)
    } else {
        Ok(Some(sanitized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> LeadDraft {
        LeadDraft {
            company: "Acme Widgets".to_string(),
            name: "Juan Perez".to_string(),
            email: "juan@test.com".to_string(),
            phone: None,
            message: None,
        }
    }

    #[test]
    fn valid_draft_creates_new_lead() {
        let lead = Lead::try_new(draft()).unwrap();
        assert_eq!(lead.company, "Acme Widgets");
        assert_eq!(lead.name, "Juan Perez");
        assert_eq!(lead.email, "juan@test.com");
        assert_eq!(lead.status, LeadStatus::New);
        assert!(lead.phone.is_none());
        assert!(lead.message.is_none());
    }

    #[test]
    fn each_lead_gets_its_own_id() {
        let a = Lead::try_new(draft()).unwrap();
        let b = Lead::try_new(draft()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_company_is_rejected_with_field_detail() {
        let mut d = draft();
        d.company = "   ".to_string();
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "company");
    }

    #[test]
    fn company_reduced_below_minimum_by_sanitization_is_rejected() {
        let mut d = draft();
        d.company = "<script></script>a".to_string();
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "company");
    }

    #[test]
    fn company_names_are_sanitized() {
        let mut d = draft();
        d.company = "Acme'; DROP TABLE leads; --".to_string();
        let lead = Lead::try_new(d).unwrap();
        assert_eq!(lead.company, "Acme DROP TABLE leads");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut d = draft();
        d.name = "x".repeat(MAX_NAME_CHARS + 1);
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn email_is_normalized() {
        let mut d = draft();
        d.email = "  JUAN@Test.com ".to_string();
        let lead = Lead::try_new(d).unwrap();
        assert_eq!(lead.email, "juan@test.com");
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["not-an-email", "a@b", "@test.com", "juan@", "a b@c.com@d"] {
            let mut d = draft();
            d.email = bad.to_string();
            let err = Lead::try_new(d).unwrap_err();
            assert_eq!(err.field(), "email", "expected rejection for {:?}", bad);
        }
    }

    #[test]
    fn formatted_phone_is_accepted_and_normalized() {
        let mut d = draft();
        d.phone = Some("300-123-4567".to_string());
        let lead = Lead::try_new(d).unwrap();
        assert_eq!(lead.phone.as_deref(), Some("3001234567"));
    }

    #[test]
    fn phone_with_wrong_leading_digit_is_rejected() {
        let mut d = draft();
        d.phone = Some("123-456-7890".to_string());
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "phone");
    }

    #[test]
    fn phone_with_wrong_length_is_rejected() {
        let mut d = draft();
        d.phone = Some("12345".to_string());
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "phone");
    }

    #[test]
    fn phone_without_any_digits_is_rejected_not_dropped() {
        let mut d = draft();
        d.phone = Some("call me".to_string());
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "phone");
    }

    #[test]
    fn blank_phone_is_absence() {
        let mut d = draft();
        d.phone = Some("   ".to_string());
        let lead = Lead::try_new(d).unwrap();
        assert!(lead.phone.is_none());
    }

    #[test]
    fn message_is_sanitized() {
        let mut d = draft();
        d.message = Some("<b>Hello</b> there; more info please".to_string());
        let lead = Lead::try_new(d).unwrap();
        assert_eq!(lead.message.as_deref(), Some("Hello there more info please"));
    }

    #[test]
    fn message_sanitizing_to_nothing_becomes_absent() {
        let mut d = draft();
        d.message = Some("<script></script>".to_string());
        let lead = Lead::try_new(d).unwrap();
        assert!(lead.message.is_none());
    }

    #[test]
    fn overlong_message_is_rejected() {
        let mut d = draft();
        d.message = Some("x".repeat(MAX_MESSAGE_CHARS + 1));
        let err = Lead::try_new(d).unwrap_err();
        assert_eq!(err.field(), "message");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LeadStatus::New).unwrap(), "\"new\"");
        assert_eq!(LeadStatus::New.as_str(), "new");
    }
}
