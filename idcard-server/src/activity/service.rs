//! 活动日志服务
//!
//! `ActivityService` 是活动日志的外观：
//! - 记录（通过 mpsc 通道异步写入，best-effort）
//! - 查询（直接读取 SurrealDB）
//!
//! 记录失败永远不会让触发它的 CRUD 操作失败。

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use super::storage::{ActivityStorage, ActivityStorageError};
use super::types::{ActivityEvent, ActivityRequest};

/// 活动日志服务
///
/// 通过 mpsc 通道把写入移出请求路径；查询直接走 storage。
#[derive(Clone)]
pub struct ActivityService {
    storage: ActivityStorage,
    tx: mpsc::Sender<ActivityRequest>,
}

impl std::fmt::Debug for ActivityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityService").finish_non_exhaustive()
    }
}

impl ActivityService {
    /// 创建服务和配套的接收端（交给 [`super::ActivityWorker`]）
    pub fn new(db: Surreal<Db>, buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<ActivityRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        let storage = ActivityStorage::new(db);
        (Arc::new(Self { storage, tx }), rx)
    }

    /// 记录一条活动（fire-and-forget）
    ///
    /// 通道满或已关闭时丢弃并告警，不向调用方传播错误。
    pub fn record(&self, req: ActivityRequest) {
        if let Err(e) = self.tx.try_send(req) {
            tracing::warn!("Activity event dropped: {e}");
        }
    }

    /// 查询最近活动，时间倒序，limit 钳制到 1..=25
    pub async fn list_recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityEvent>, ActivityStorageError> {
        self.storage.list_recent(limit).await
    }
}
