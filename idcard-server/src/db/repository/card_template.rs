//! Card Template Repository
//!
//! At most one template is active at a time. The invariant lives in
//! `set_active`, which deactivates the rest and activates the target in
//! one transaction, not in any storage constraint.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CardTemplate, CardTemplateCreate, CardTemplateUpdate};
use crate::utils::now_millis;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "card_template";

#[derive(Debug, Serialize)]
struct TemplateMerge {
    #[serde(flatten)]
    data: CardTemplateUpdate,
    updated_at: i64,
}

#[derive(Clone)]
pub struct CardTemplateRepository {
    base: BaseRepository,
}

impl CardTemplateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// List all templates, stable name order
    pub async fn list(&self) -> RepoResult<Vec<CardTemplate>> {
        let templates: Vec<CardTemplate> = self
            .base
            .db()
            .query("SELECT * FROM card_template ORDER BY name")
            .await?
            .take(0)?;
        Ok(templates)
    }

    /// Find template by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CardTemplate>> {
        let thing = Self::parse_id(id)?;
        let template: Option<CardTemplate> = self.base.db().select(thing).await?;
        Ok(template)
    }

    /// The currently active template, if any
    pub async fn find_active(&self) -> RepoResult<Option<CardTemplate>> {
        let templates: Vec<CardTemplate> = self
            .base
            .db()
            .query("SELECT * FROM card_template WHERE is_active = true LIMIT 1")
            .await?
            .take(0)?;
        Ok(templates.into_iter().next())
    }

    /// Create a template. The first template created becomes active.
    ///
    /// The emptiness check and the insert sit in one transaction, so
    /// two concurrent first creates cannot both observe an empty table
    /// and both come out active. Conflicting transactions are retried.
    pub async fn create(&self, data: CardTemplateCreate) -> RepoResult<CardTemplate> {
        let now = now_millis();
        let insert = TemplateInsert {
            name: data.name,
            color_scheme: data.color_scheme,
            font_family: data.font_family,
            layout: data.layout,
            is_active: false,
            created_at: now,
            updated_at: now,
        };

        super::retry_on_conflict(|| self.create_once(insert.clone())).await
    }

    async fn create_once(&self, insert: TemplateInsert) -> RepoResult<CardTemplate> {
        let mut result = self
            .base
            .db()
            .query(
                r#"BEGIN TRANSACTION;
                LET $existing = count(SELECT * FROM card_template);
                LET $created = CREATE card_template CONTENT $data;
                UPDATE $created[0].id SET is_active = ($existing == 0) RETURN AFTER;
                COMMIT TRANSACTION;"#,
            )
            .bind(("data", insert))
            .await?;
        let created: Option<CardTemplate> = result.take(2)?;
        created.ok_or_else(|| RepoError::Database("Failed to create card template".to_string()))
    }

    /// Merge-update visual fields, refreshing updated_at
    pub async fn update(&self, id: &str, data: CardTemplateUpdate) -> RepoResult<CardTemplate> {
        let thing = Self::parse_id(id)?;
        let merge = TemplateMerge {
            data,
            updated_at: now_millis(),
        };
        let updated: Option<CardTemplate> = self.base.db().update(thing).merge(merge).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Card template {} not found", id)))
    }

    /// Hard delete a template. Deleting the active one leaves no active
    /// template; rendering then falls back to built-in defaults.
    pub async fn delete(&self, id: &str) -> RepoResult<CardTemplate> {
        let thing = Self::parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Card template {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(existing)
    }

    /// Activate one template and deactivate every other, in a single
    /// transaction so no observer can see zero or two active templates.
    pub async fn set_active(&self, id: &str) -> RepoResult<CardTemplate> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Card template {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"BEGIN TRANSACTION;
                UPDATE card_template SET is_active = false WHERE is_active = true AND id != $thing;
                UPDATE $thing SET is_active = true, updated_at = $now RETURN AFTER;
                COMMIT TRANSACTION;"#,
            )
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;
        let activated: Option<CardTemplate> = result.take(1)?;
        activated.ok_or_else(|| RepoError::NotFound(format!("Card template {} not found", id)))
    }
}

/// Insert shape (no SurrealDB id); activation is decided in-transaction
#[derive(Debug, Clone, Serialize)]
struct TemplateInsert {
    name: String,
    color_scheme: crate::db::models::ColorScheme,
    font_family: String,
    layout: crate::db::models::CardLayout,
    is_active: bool,
    created_at: i64,
    updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CardLayout, ColorScheme};
    use crate::db::open_memory;

    fn sample(name: &str) -> CardTemplateCreate {
        CardTemplateCreate {
            name: name.to_string(),
            color_scheme: ColorScheme::default(),
            font_family: "Arial, sans-serif".to_string(),
            layout: CardLayout::Classic,
        }
    }

    #[tokio::test]
    async fn first_template_auto_activates() {
        let db = open_memory().await.unwrap();
        let repo = CardTemplateRepository::new(db);

        let first = repo.create(sample("Classic Blue")).await.unwrap();
        assert!(first.is_active);

        let second = repo.create(sample("Modern Gold")).await.unwrap();
        assert!(!second.is_active);
    }

    #[tokio::test]
    async fn concurrent_creates_activate_exactly_one() {
        let db = open_memory().await.unwrap();
        let repo = CardTemplateRepository::new(db);

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(sample(&format!("T{i}"))).await.unwrap() })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let active = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.is_active)
            .count();
        assert_eq!(active, 1);
    }

    #[tokio::test]
    async fn activation_is_mutually_exclusive() {
        let db = open_memory().await.unwrap();
        let repo = CardTemplateRepository::new(db);

        repo.create(sample("A")).await.unwrap();
        let b = repo.create(sample("B")).await.unwrap();
        let c = repo.create(sample("C")).await.unwrap();

        repo.set_active(&b.id.clone().unwrap().to_string()).await.unwrap();
        repo.set_active(&c.id.clone().unwrap().to_string()).await.unwrap();

        let active: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.is_active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "C");
    }

    #[tokio::test]
    async fn activating_missing_template_is_not_found() {
        let db = open_memory().await.unwrap();
        let repo = CardTemplateRepository::new(db);
        let err = repo.set_active("card_template:nope").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_active_template_leaves_none_active() {
        let db = open_memory().await.unwrap();
        let repo = CardTemplateRepository::new(db);

        let a = repo.create(sample("A")).await.unwrap();
        repo.create(sample("B")).await.unwrap();
        repo.delete(&a.id.clone().unwrap().to_string()).await.unwrap();

        assert!(repo.find_active().await.unwrap().is_none());
    }
}
