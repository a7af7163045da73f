//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod card_template;
pub mod counter;
pub mod member;
pub mod settings;

// Re-exports
pub use card_template::CardTemplateRepository;
pub use counter::CounterRepository;
pub use member::MemberRepository;
pub use settings::SettingsRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Invalid(msg),
        }
    }
}

impl RepoError {
    /// Optimistic-concurrency commit conflict that the engine marks as
    /// safe to retry
    pub fn is_retryable_conflict(&self) -> bool {
        matches!(self, RepoError::Database(msg) if msg.contains("can be retried"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// 冲突重试上限
const MAX_CONFLICT_RETRIES: usize = 64;

/// Re-run `op` while it fails with a retryable commit conflict.
///
/// The embedded engine aborts one side of two overlapping write
/// transactions instead of blocking; the aborted side carries a
/// retryable error and succeeds on re-execution. Retries are bounded
/// and backed off so a persistent fault still surfaces.
pub(crate) async fn retry_on_conflict<T, F, Fut>(mut op: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = RepoResult<T>>,
{
    let mut delay = std::time::Duration::from_millis(1);
    let mut last = RepoError::Database("Conflict retries exhausted".to_string());
    for _ in 0..MAX_CONFLICT_RETRIES {
        match op().await {
            Err(e) if e.is_retryable_conflict() => {
                last = e;
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(std::time::Duration::from_millis(50));
            }
            other => return other,
        }
    }
    Err(last)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
