//! Organization Settings Model (Singleton)
//!
//! 发证组织信息，全局只有一条记录

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Organization settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSettings {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// 组织名称
    pub name: String,
    /// 组织地址
    pub address: String,
    /// 联系电话
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// 电子邮箱
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 官方网站
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Logo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// 授权签名图 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    /// 验证二维码 URL 模式，`{memberId}` 会被替换
    pub qr_url_pattern: String,
    /// 创建时间
    pub created_at: Option<i64>,
    /// 更新时间
    pub updated_at: Option<i64>,
}

impl Default for OrgSettings {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            address: String::new(),
            phone: None,
            email: None,
            website: None,
            logo_url: None,
            signature_url: None,
            qr_url_pattern: "https://example.org/verify/{memberId}".to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Update organization settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrgSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_url_pattern: Option<String>,
}

impl OrgSettingsUpdate {
    /// Validate provided fields, collecting every violation at once
    pub fn validate(&self) -> Result<(), crate::utils::AppError> {
        use crate::utils::validation::{
            MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
            Violations,
        };

        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require_text(name, "name", MAX_NAME_LEN);
        }
        v.check_optional_text(&self.address, "address", MAX_ADDRESS_LEN);
        v.check_optional_text(&self.phone, "phone", MAX_SHORT_TEXT_LEN);
        v.check_optional_text(&self.email, "email", MAX_EMAIL_LEN);
        v.check_optional_text(&self.website, "website", MAX_URL_LEN);
        v.check_optional_text(&self.logo_url, "logo_url", MAX_URL_LEN);
        v.check_optional_text(&self.signature_url, "signature_url", MAX_URL_LEN);
        v.check_optional_text(&self.qr_url_pattern, "qr_url_pattern", MAX_URL_LEN);
        v.into_result()
    }
}
