//! 活动日志 SurrealDB 存储层
//!
//! Append-only 设计，没有任何删除/更新接口。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::types::{ActivityEvent, ActivityKind, ActivityRequest};
use crate::utils::now_millis;

/// 查询条数上限，仪表盘动态流不需要翻页
pub const MAX_LIST_LIMIT: usize = 25;

/// 默认查询条数
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// 存储错误
#[derive(Debug, Error)]
pub enum ActivityStorageError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for ActivityStorageError {
    fn from(err: surrealdb::Error) -> Self {
        ActivityStorageError::Database(err.to_string())
    }
}

pub type ActivityStorageResult<T> = Result<T, ActivityStorageError>;

/// SurrealDB 反序列化用（包含 SurrealDB record id）
#[derive(Debug, serde::Deserialize)]
struct ActivityRecord {
    #[allow(dead_code)]
    id: surrealdb::RecordId,
    timestamp: i64,
    kind: ActivityKind,
    actor: Option<String>,
    subject_id: Option<String>,
    subject_name: Option<String>,
}

impl From<ActivityRecord> for ActivityEvent {
    fn from(r: ActivityRecord) -> Self {
        ActivityEvent {
            timestamp: r.timestamp,
            kind: r.kind,
            actor: r.actor,
            subject_id: r.subject_id,
            subject_name: r.subject_name,
        }
    }
}

/// 插入用结构（不含 SurrealDB id）
#[derive(Debug, serde::Serialize)]
struct ActivityInsert {
    timestamp: i64,
    kind: ActivityKind,
    actor: Option<String>,
    subject_id: Option<String>,
    subject_name: Option<String>,
}

/// 活动日志存储 (SurrealDB)
///
/// 仅提供 `append` 和 `list_recent`，没有 delete/update 接口。
#[derive(Clone)]
pub struct ActivityStorage {
    db: Surreal<Db>,
}

impl ActivityStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// 追加一条活动记录，时间戳由服务端赋值
    pub async fn append(&self, req: ActivityRequest) -> ActivityStorageResult<ActivityEvent> {
        let timestamp = now_millis();
        let entry = ActivityEvent {
            timestamp,
            kind: req.kind,
            actor: req.actor.clone(),
            subject_id: req.subject_id.clone(),
            subject_name: req.subject_name.clone(),
        };

        let insert = ActivityInsert {
            timestamp,
            kind: req.kind,
            actor: req.actor,
            subject_id: req.subject_id,
            subject_name: req.subject_name,
        };

        let mut res = self
            .db
            .query("CREATE activity_event CONTENT $data")
            .bind(("data", insert))
            .await?;
        let _: Vec<ActivityRecord> = res.take(0)?;

        Ok(entry)
    }

    /// 查询最近的 `limit` 条记录，时间倒序。limit 被钳制到 1..=25。
    pub async fn list_recent(
        &self,
        limit: Option<usize>,
    ) -> ActivityStorageResult<Vec<ActivityEvent>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let mut res = self
            .db
            .query("SELECT * FROM activity_event ORDER BY timestamp DESC LIMIT $limit")
            .bind(("limit", limit as i64))
            .await?;
        let records: Vec<ActivityRecord> = res.take(0)?;
        Ok(records.into_iter().map(ActivityEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;

    #[tokio::test]
    async fn list_is_newest_first_and_bounded() {
        let db = open_memory().await.unwrap();
        let storage = ActivityStorage::new(db);

        for i in 0..30 {
            storage
                .append(
                    ActivityRequest::new(ActivityKind::MemberAdded)
                        .subject(format!("ORG-2024-{i:03}"), format!("Member {i}")),
                )
                .await
                .unwrap();
            // Distinct millis so ordering is deterministic
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let events = storage.list_recent(Some(100)).await.unwrap();
        assert_eq!(events.len(), MAX_LIST_LIMIT);
        assert!(events.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(events[0].subject_name.as_deref(), Some("Member 29"));
    }

    #[tokio::test]
    async fn limit_is_clamped_to_at_least_one() {
        let db = open_memory().await.unwrap();
        let storage = ActivityStorage::new(db);

        storage
            .append(ActivityRequest::new(ActivityKind::SettingsUpdated))
            .await
            .unwrap();

        let events = storage.list_recent(Some(0)).await.unwrap();
        assert_eq!(events.len(), 1);
    }
}
