//! 服务器状态
//!
//! [`ServerState`] 持有所有服务的共享引用，axum handler 通过
//! `State` 提取。Arc / SurrealDB 句柄浅拷贝，克隆成本极低。

use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::activity::{ActivityService, ActivityWorker};
use crate::badge::{AssetResolver, BadgeRenderer};
use crate::core::Config;
use crate::db::repository::{
    CardTemplateRepository, CounterRepository, MemberRepository, SettingsRepository,
};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | activity | 活动日志服务 |
/// | renderer | PDF 渲染器 |
/// | assets | 证卡资源解析器 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 活动日志服务
    pub activity: Arc<ActivityService>,
    /// 证卡 PDF 渲染器
    pub renderer: BadgeRenderer,
    /// 证卡资源解析器
    pub assets: AssetResolver,
}

impl ServerState {
    /// 初始化服务器状态：打开数据库、启动活动日志 worker
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = crate::db::open(&config.db_path()).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 用现有数据库句柄构造状态（测试用内存引擎）
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let (activity, rx) = ActivityService::new(db.clone(), config.activity_buffer_size);
        let worker = ActivityWorker::new(crate::activity::ActivityStorage::new(db.clone()));
        tokio::spawn(worker.run(rx));

        let renderer = BadgeRenderer::new(Duration::from_millis(config.render_timeout_ms));
        let assets = AssetResolver::new(config.public_dir());

        Self {
            config,
            db,
            activity,
            renderer,
            assets,
        }
    }

    // ── Repository accessors ────────────────────────────────────────

    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(self.db.clone())
    }

    pub fn counters(&self) -> CounterRepository {
        CounterRepository::new(self.db.clone())
    }

    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.db.clone())
    }

    pub fn card_templates(&self) -> CardTemplateRepository {
        CardTemplateRepository::new(self.db.clone())
    }
}
