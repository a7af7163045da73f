//! 活动日志后台 Worker
//!
//! 从 mpsc 通道消费 ActivityRequest，写入 SurrealDB。
//! 通道关闭时自动退出。写入失败只记录日志，绝不影响主操作。

use super::storage::ActivityStorage;
use super::types::ActivityRequest;

/// 活动日志后台 Worker
pub struct ActivityWorker {
    storage: ActivityStorage,
}

impl ActivityWorker {
    pub fn new(storage: ActivityStorage) -> Self {
        Self { storage }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<ActivityRequest>) {
        tracing::info!("Activity log worker started");

        while let Some(req) = rx.recv().await {
            match self.storage.append(req).await {
                Ok(entry) => {
                    tracing::debug!(
                        kind = %entry.kind,
                        subject = entry.subject_id.as_deref().unwrap_or("-"),
                        "Activity recorded"
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to write activity event: {:?}", e);
                }
            }
        }

        tracing::info!("Activity log channel closed, worker stopping");
    }
}
