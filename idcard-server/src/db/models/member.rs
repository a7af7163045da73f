//! Member Model

use super::serde_helpers;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, Violations};
use crate::utils::AppError;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Member ID type
pub type MemberId = RecordId;

/// Member role, fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Designation {
    Volunteer,
    Coordinator,
    Manager,
    Director,
    Staff,
}

impl std::fmt::Display for Designation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Designation::Volunteer => "volunteer",
            Designation::Coordinator => "coordinator",
            Designation::Manager => "manager",
            Designation::Director => "director",
            Designation::Staff => "staff",
        };
        write!(f, "{s}")
    }
}

/// Member model matching SurrealDB schema
///
/// `member_id` is the human-readable badge code (`ORG-<year>-<seq>`),
/// assigned once by the counter repository and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MemberId>,
    pub member_id: String,
    pub full_name: String,
    pub designation: Designation,
    /// Joining date, `YYYY-MM-DD`
    pub joining_date: String,
    pub contact_number: String,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_number: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    /// Unix millis, server-assigned
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub full_name: String,
    pub designation: Designation,
    pub joining_date: String,
    pub contact_number: String,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_number: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl MemberCreate {
    /// Validate required fields, collecting every violation at once
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        v.require_text(&self.full_name, "full_name", MAX_NAME_LEN);
        v.require_text(&self.contact_number, "contact_number", MAX_SHORT_TEXT_LEN);
        v.require_date(&self.joining_date, "joining_date");
        v.check_optional_text(&self.blood_group, "blood_group", MAX_SHORT_TEXT_LEN);
        v.check_optional_text(
            &self.emergency_contact_name,
            "emergency_contact_name",
            MAX_NAME_LEN,
        );
        v.check_optional_text(
            &self.emergency_contact_number,
            "emergency_contact_number",
            MAX_SHORT_TEXT_LEN,
        );
        v.check_optional_text(&self.photo_url, "photo_url", MAX_URL_LEN);
        v.into_result()
    }
}

/// Update member payload
///
/// `member_id` is intentionally absent: the badge code is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<Designation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MemberUpdate {
    /// Validate provided fields, collecting every violation at once
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        if let Some(name) = &self.full_name {
            v.require_text(name, "full_name", MAX_NAME_LEN);
        }
        if let Some(contact) = &self.contact_number {
            v.require_text(contact, "contact_number", MAX_SHORT_TEXT_LEN);
        }
        if let Some(date) = &self.joining_date {
            v.require_date(date, "joining_date");
        }
        v.check_optional_text(&self.blood_group, "blood_group", MAX_SHORT_TEXT_LEN);
        v.check_optional_text(
            &self.emergency_contact_name,
            "emergency_contact_name",
            MAX_NAME_LEN,
        );
        v.check_optional_text(
            &self.emergency_contact_number,
            "emergency_contact_number",
            MAX_SHORT_TEXT_LEN,
        );
        v.check_optional_text(&self.photo_url, "photo_url", MAX_URL_LEN);
        v.into_result()
    }
}

/// Active/inactive status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
}

/// Member list filter
///
/// At most one search mode is honored per call: free text, phone,
/// joining date, emergency name, emergency phone, checked in that
/// order. Designation and status compose over any search mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    /// Free-text search over name / member_id / designation / contact
    pub q: Option<String>,
    /// Phone substring search
    pub phone: Option<String>,
    /// Exact joining date (`YYYY-MM-DD`)
    pub joining_date: Option<String>,
    /// Emergency contact name substring search
    pub emergency_name: Option<String>,
    /// Emergency contact phone substring search
    pub emergency_phone: Option<String>,
    /// Exact designation filter (composable)
    pub designation: Option<Designation>,
    /// Active/inactive filter (composable)
    pub status: Option<StatusFilter>,
}

/// Dashboard member counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}
