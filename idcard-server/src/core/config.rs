/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/idcard | 工作目录（数据库、上传文件、日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ORG_ID_PREFIX | ORG | 成员编号前缀 |
/// | RENDER_TIMEOUT_MS | 20000 | PDF 渲染页面加载超时(毫秒) |
/// | ACTIVITY_BUFFER_SIZE | 256 | 活动日志通道缓冲 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/idcard HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 成员编号前缀 (`<prefix>-<year>-<seq>`)
    pub org_id_prefix: String,
    /// PDF 渲染页面加载超时 (毫秒)
    pub render_timeout_ms: u64,
    /// 活动日志通道缓冲大小
    pub activity_buffer_size: usize,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/idcard".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            org_id_prefix: std::env::var("ORG_ID_PREFIX").unwrap_or_else(|_| "ORG".into()),
            render_timeout_ms: std::env::var("RENDER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20000),
            activity_buffer_size: std::env::var("ACTIVITY_BUFFER_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(256),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 数据库路径
    pub fn db_path(&self) -> String {
        format!("{}/db", self.work_dir)
    }

    /// 公共文件根目录（`/uploads/...` 相对于此目录）
    pub fn public_dir(&self) -> String {
        self.work_dir.clone()
    }

    /// 日志目录
    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
