//! Member ID Counter Repository
//!
//! One `member_counter` record per calendar year holds the last issued
//! sequence number. The increment and the read-back happen in a single
//! UPSERT statement so concurrent creations never observe the same
//! value.

use super::{BaseRepository, RepoError, RepoResult};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "member_counter";

#[derive(Debug, serde::Deserialize)]
struct CounterRow {
    seq: i64,
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically claim the next sequence number for `year`.
    ///
    /// A missing counter record behaves as 0, so the first member of a
    /// year gets sequence 1. Overlapping increments abort one side with
    /// a retryable commit conflict; those are re-run, so every caller
    /// eventually receives a distinct value.
    pub async fn next_seq(&self, year: i32) -> RepoResult<i64> {
        super::retry_on_conflict(|| self.increment(year)).await
    }

    async fn increment(&self, year: i32) -> RepoResult<i64> {
        let id = RecordId::from_table_key(TABLE, year as i64);
        let mut result = self
            .base
            .db()
            .query("UPSERT $id SET seq += 1, year = $year RETURN AFTER")
            .bind(("id", id))
            .bind(("year", year))
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        rows.first()
            .map(|r| r.seq)
            .ok_or_else(|| RepoError::Database(format!("Counter upsert for {year} returned nothing")))
    }

    /// Issue the next human-readable member ID for `year`, e.g. `ORG-2024-001`.
    ///
    /// The numeric suffix is zero-padded to at least 3 digits and grows
    /// naturally past 999.
    pub async fn next_member_id(&self, prefix: &str, year: i32) -> RepoResult<String> {
        let seq = self.next_seq(year).await?;
        Ok(format!("{prefix}-{year}-{seq:03}"))
    }
}
