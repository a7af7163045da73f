//! Activity Log Module
//!
//! 只追加的管理操作事件流：类型、存储、后台 worker 和服务外观。
//! 写入是 best-effort 的，绝不阻塞或拖垮触发它的主操作。

pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use service::ActivityService;
pub use storage::{ActivityStorage, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use types::{ActivityEvent, ActivityKind, ActivityRequest};
pub use worker::ActivityWorker;
