//! Organization Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{OrgSettings, OrgSettingsUpdate};
use crate::utils::now_millis;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "org_settings";
const SINGLETON_ID: &str = "main";

/// Merge shape for updates: provided fields plus a fresh updated_at
#[derive(Debug, Serialize)]
struct SettingsMerge {
    #[serde(flatten)]
    data: OrgSettingsUpdate,
    updated_at: i64,
}

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings record
    pub async fn get_or_create(&self) -> RepoResult<OrgSettings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let mut settings = OrgSettings::default();
        let now = now_millis();
        settings.created_at = Some(now);
        settings.updated_at = Some(now);

        let created: Option<OrgSettings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create org settings".to_string()))
    }

    /// Get the singleton settings record
    pub async fn get(&self) -> RepoResult<Option<OrgSettings>> {
        let settings: Option<OrgSettings> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Merge provided fields over the existing record, refreshing
    /// updated_at in the same write
    pub async fn update(&self, data: OrgSettingsUpdate) -> RepoResult<OrgSettings> {
        // Ensure singleton exists
        self.get_or_create().await?;

        let merge = SettingsMerge {
            data,
            updated_at: now_millis(),
        };
        let updated: Option<OrgSettings> = self
            .base
            .db()
            .update(RecordId::from_table_key(TABLE, SINGLETON_ID))
            .merge(merge)
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update org settings".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;

    #[tokio::test]
    async fn get_or_create_materializes_defaults_once() {
        let db = open_memory().await.unwrap();
        let repo = SettingsRepository::new(db);

        let first = repo.get_or_create().await.unwrap();
        assert!(first.qr_url_pattern.contains("{memberId}"));

        let second = repo.get_or_create().await.unwrap();
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_in_the_same_write() {
        let db = open_memory().await.unwrap();
        let repo = SettingsRepository::new(db);

        let before = repo.get_or_create().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let after = repo
            .update(OrgSettingsUpdate {
                name: Some("Helping Hands".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn update_merges_without_clearing_other_fields() {
        let db = open_memory().await.unwrap();
        let repo = SettingsRepository::new(db);

        repo.update(OrgSettingsUpdate {
            name: Some("Helping Hands".to_string()),
            phone: Some("+15550001111".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        let after = repo
            .update(OrgSettingsUpdate {
                logo_url: Some("/uploads/logo.png".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(after.name, "Helping Hands");
        assert_eq!(after.phone.as_deref(), Some("+15550001111"));
        assert_eq!(after.logo_url.as_deref(), Some("/uploads/logo.png"));
    }
}
