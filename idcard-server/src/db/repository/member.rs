//! Member Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Designation, Member, MemberCreate, MemberFilter, MemberStats, MemberUpdate, StatusFilter,
};
use crate::utils::now_millis;
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "member";

/// Insert shape (no SurrealDB id, server-assigned timestamps)
#[derive(Debug, Serialize)]
struct MemberInsert {
    member_id: String,
    full_name: String,
    designation: Designation,
    joining_date: String,
    contact_number: String,
    blood_group: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_number: Option<String>,
    photo_url: Option<String>,
    is_active: bool,
    created_at: i64,
    updated_at: i64,
}

/// Merge shape for updates: provided fields plus a fresh updated_at
#[derive(Debug, Serialize)]
struct MemberMerge {
    #[serde(flatten)]
    data: MemberUpdate,
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct StatsRow {
    total: u64,
    active: u64,
}

#[derive(Clone)]
pub struct MemberRepository {
    base: BaseRepository,
}

impl MemberRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// List members, newest first, applying at most one search mode plus
    /// the composable designation/status filters.
    ///
    /// Search modes are checked in a fixed order (free text, phone,
    /// joining date, emergency name, emergency phone) and the first one
    /// present wins, mirroring how the dashboard issues them.
    pub async fn list(&self, filter: MemberFilter) -> RepoResult<Vec<Member>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut text_bind: Option<(&str, String)> = None;

        if let Some(q) = &filter.q {
            conditions.push(
                "(string::contains(string::lowercase(full_name), $q) \
                 OR string::contains(string::lowercase(member_id), $q) \
                 OR string::contains(string::lowercase(<string> designation), $q) \
                 OR string::contains(contact_number, $q))",
            );
            text_bind = Some(("q", q.to_lowercase()));
        } else if let Some(phone) = &filter.phone {
            conditions.push("string::contains(contact_number, $phone)");
            text_bind = Some(("phone", phone.clone()));
        } else if let Some(date) = &filter.joining_date {
            conditions.push("joining_date = $joining_date");
            text_bind = Some(("joining_date", date.clone()));
        } else if let Some(name) = &filter.emergency_name {
            conditions.push(
                "string::contains(string::lowercase(emergency_contact_name ?? ''), $emergency_name)",
            );
            text_bind = Some(("emergency_name", name.to_lowercase()));
        } else if let Some(phone) = &filter.emergency_phone {
            conditions.push(
                "string::contains(emergency_contact_number ?? '', $emergency_phone)",
            );
            text_bind = Some(("emergency_phone", phone.clone()));
        }

        if filter.designation.is_some() {
            conditions.push("designation = $designation");
        }
        match filter.status {
            Some(StatusFilter::Active) => conditions.push("is_active = true"),
            Some(StatusFilter::Inactive) => conditions.push("is_active = false"),
            None => {}
        }

        let mut sql = format!("SELECT * FROM {TABLE}");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some((key, value)) = text_bind {
            query = query.bind((key, value));
        }
        if let Some(designation) = filter.designation {
            query = query.bind(("designation", designation));
        }

        let members: Vec<Member> = query.await?.take(0)?;
        Ok(members)
    }

    /// Find member by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Member>> {
        let thing = Self::parse_id(id)?;
        let member: Option<Member> = self.base.db().select(thing).await?;
        Ok(member)
    }

    /// Create a new member with a pre-issued badge code.
    ///
    /// The caller obtains `member_id` from the counter repository first;
    /// if that fails nothing is stored, so a member can never exist
    /// without a uniquely sequenced code.
    pub async fn create(&self, data: MemberCreate, member_id: String) -> RepoResult<Member> {
        let now = now_millis();
        let insert = MemberInsert {
            member_id,
            full_name: data.full_name,
            designation: data.designation,
            joining_date: data.joining_date,
            contact_number: data.contact_number,
            blood_group: data.blood_group,
            emergency_contact_name: data.emergency_contact_name,
            emergency_contact_number: data.emergency_contact_number,
            photo_url: data.photo_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut result = self
            .base
            .db()
            .query("CREATE member CONTENT $data RETURN AFTER")
            .bind(("data", insert))
            .await?;
        let created: Option<Member> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create member".to_string()))
    }

    /// Merge-update a member, refreshing updated_at
    pub async fn update(&self, id: &str, data: MemberUpdate) -> RepoResult<Member> {
        let thing = Self::parse_id(id)?;
        let merge = MemberMerge {
            data,
            updated_at: now_millis(),
        };
        let updated: Option<Member> = self.base.db().update(thing).merge(merge).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Member {} not found", id)))
    }

    /// Flip is_active in a single statement keyed on the durable record
    /// id, so concurrent toggles and updates cannot interleave a stale
    /// read-modify-write.
    pub async fn toggle_active(&self, id: &str) -> RepoResult<Member> {
        let thing = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = !is_active, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;
        let updated: Option<Member> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Member {} not found", id)))
    }

    /// Hard delete a member, returning the removed record for audit use
    pub async fn delete(&self, id: &str) -> RepoResult<Member> {
        let thing = Self::parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Member {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(existing)
    }

    /// Member counts for the dashboard.
    ///
    /// Both counts come from one statement so they reflect the same
    /// snapshot; `active` can never exceed `total`.
    pub async fn stats(&self) -> RepoResult<MemberStats> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total, count(is_active = true) AS active \
                 FROM member GROUP ALL",
            )
            .await?;
        let rows: Vec<StatsRow> = result.take(0)?;

        let (total, active) = rows.first().map(|r| (r.total, r.active)).unwrap_or((0, 0));
        Ok(MemberStats {
            total,
            active,
            inactive: total.saturating_sub(active),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;

    fn sample(name: &str, designation: Designation) -> MemberCreate {
        MemberCreate {
            full_name: name.to_string(),
            designation,
            joining_date: "2024-01-15".to_string(),
            contact_number: "+15551234567".to_string(),
            blood_group: None,
            emergency_contact_name: None,
            emergency_contact_number: None,
            photo_url: None,
        }
    }

    async fn seeded_repo() -> MemberRepository {
        let db = open_memory().await.unwrap();
        let repo = MemberRepository::new(db);
        repo.create(sample("Jane Doe", Designation::Volunteer), "ORG-2024-001".into())
            .await
            .unwrap();
        repo.create(
            MemberCreate {
                contact_number: "+34600111222".to_string(),
                emergency_contact_name: Some("John Doe".to_string()),
                emergency_contact_number: Some("+34600999888".to_string()),
                ..sample("Maria Garcia", Designation::Manager)
            },
            "ORG-2024-002".into(),
        )
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn create_defaults_active_and_keeps_member_id() {
        let repo = seeded_repo().await;
        let all = repo.list(MemberFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|m| m.is_active));
        assert!(all.iter().any(|m| m.member_id == "ORG-2024-001"));
    }

    #[tokio::test]
    async fn free_text_search_is_case_insensitive() {
        let repo = seeded_repo().await;
        let hits = repo
            .list(MemberFilter {
                q: Some("jane".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn free_text_matches_member_id_and_designation() {
        let repo = seeded_repo().await;
        let by_code = repo
            .list(MemberFilter {
                q: Some("org-2024-002".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].full_name, "Maria Garcia");

        let by_role = repo
            .list(MemberFilter {
                q: Some("manager".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_role.len(), 1);
    }

    #[tokio::test]
    async fn phone_and_emergency_search_modes() {
        let repo = seeded_repo().await;
        let by_phone = repo
            .list(MemberFilter {
                phone: Some("600111".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_phone.len(), 1);

        let by_emergency = repo
            .list(MemberFilter {
                emergency_name: Some("john".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_emergency.len(), 1);

        let by_emergency_phone = repo
            .list(MemberFilter {
                emergency_phone: Some("999".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_emergency_phone.len(), 1);
    }

    #[tokio::test]
    async fn status_filter_composes_with_search() {
        let repo = seeded_repo().await;
        let jane_id = repo
            .list(MemberFilter {
                q: Some("jane".to_string()),
                ..Default::default()
            })
            .await
            .unwrap()[0]
            .id
            .clone()
            .unwrap()
            .to_string();
        repo.toggle_active(&jane_id).await.unwrap();

        let active_janes = repo
            .list(MemberFilter {
                q: Some("jane".to_string()),
                status: Some(StatusFilter::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(active_janes.is_empty());

        let inactive = repo
            .list(MemberFilter {
                status: Some(StatusFilter::Inactive),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_state() {
        let repo = seeded_repo().await;
        let member = &repo.list(MemberFilter::default()).await.unwrap()[0];
        let id = member.id.clone().unwrap().to_string();
        let before = member.is_active;

        let once = repo.toggle_active(&id).await.unwrap();
        assert_eq!(once.is_active, !before);
        let twice = repo.toggle_active(&id).await.unwrap();
        assert_eq!(twice.is_active, before);
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at() {
        let repo = seeded_repo().await;
        let member = &repo.list(MemberFilter::default()).await.unwrap()[0];
        let id = member.id.clone().unwrap().to_string();

        let updated = repo
            .update(
                &id,
                MemberUpdate {
                    blood_group: Some("O+".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.blood_group.as_deref(), Some("O+"));
        assert_eq!(updated.full_name, member.full_name);
        assert!(updated.updated_at >= member.updated_at);
    }

    #[tokio::test]
    async fn delete_missing_member_is_not_found() {
        let repo = seeded_repo().await;
        let err = repo.delete("member:does_not_exist").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_on_empty_registry_are_zero() {
        let db = open_memory().await.unwrap();
        let repo = MemberRepository::new(db);

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.inactive, 0);
    }

    #[tokio::test]
    async fn stats_count_active_and_inactive() {
        let repo = seeded_repo().await;
        let member = &repo.list(MemberFilter::default()).await.unwrap()[0];
        let id = member.id.clone().unwrap().to_string();
        repo.toggle_active(&id).await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.inactive, 1);
    }
}
