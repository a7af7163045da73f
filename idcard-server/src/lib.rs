//! ID Card Server - 小型组织成员证卡管理后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储（成员、设置、模板、计数器）
//! - **证卡** (`badge`): HTML 模板构建 + 无头浏览器 PDF 渲染
//! - **活动日志** (`activity`): 只追加的管理操作事件流
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! idcard-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 操作者身份提取
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层（模型 + 仓储）
//! ├── activity/      # 活动日志
//! ├── badge/         # 证卡生成管线
//! └── utils/         # 错误、日志、校验
//! ```

pub mod activity;
pub mod api;
pub mod auth;
pub mod badge;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::CurrentActor;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：dotenv、工作目录、日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(config.log_dir())?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = config.log_dir();
    if config.environment == "production" {
        init_logger_with_file(log_level.as_deref(), Some(log_dir.as_str()));
    } else {
        init_logger_with_file(log_level.as_deref(), None);
    }

    Ok(())
}
