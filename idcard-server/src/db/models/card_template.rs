//! Card Template Model
//!
//! 证卡视觉模板，全局最多一个处于激活状态

use super::serde_helpers;
use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, Violations};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Card layout style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    #[default]
    Classic,
    Modern,
    Compact,
}

/// Template color scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Primary color, `#RRGGBB`
    pub primary: String,
    /// Accent color, `#RRGGBB`
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#1e3a5f".to_string(),
            accent: "#c9a227".to_string(),
        }
    }
}

/// Card template entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub color_scheme: ColorScheme,
    pub font_family: String,
    pub layout: CardLayout,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            id: None,
            name: "Default".to_string(),
            color_scheme: ColorScheme::default(),
            font_family: "Arial, sans-serif".to_string(),
            layout: CardLayout::Classic,
            is_active: false,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Create card template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplateCreate {
    pub name: String,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default = "default_font")]
    pub font_family: String,
    #[serde(default)]
    pub layout: CardLayout,
}

fn default_font() -> String {
    "Arial, sans-serif".to_string()
}

impl CardTemplateCreate {
    /// Validate required fields, collecting every violation at once
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        v.require_text(&self.name, "name", MAX_NAME_LEN);
        v.require_hex_color(&self.color_scheme.primary, "color_scheme.primary");
        v.require_hex_color(&self.color_scheme.accent, "color_scheme.accent");
        v.require_text(&self.font_family, "font_family", MAX_NAME_LEN);
        v.into_result()
    }
}

/// Update card template payload
///
/// `is_active` is not updatable here: activation goes through the
/// dedicated activate operation that enforces mutual exclusion.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<CardLayout>,
}

impl CardTemplateUpdate {
    /// Validate provided fields, collecting every violation at once
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require_text(name, "name", MAX_NAME_LEN);
        }
        if let Some(scheme) = &self.color_scheme {
            v.require_hex_color(&scheme.primary, "color_scheme.primary");
            v.require_hex_color(&scheme.accent, "color_scheme.accent");
        }
        if let Some(font) = &self.font_family {
            v.require_text(font, "font_family", MAX_NAME_LEN);
        }
        v.into_result()
    }
}
