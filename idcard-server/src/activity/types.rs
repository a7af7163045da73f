//! 活动日志类型定义
//!
//! 管理操作的只追加事件记录，用于仪表盘动态流。
//! 条目不可变、不可删除。

use serde::{Deserialize, Serialize};

/// 活动类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// 新增成员
    MemberAdded,
    /// 删除成员
    MemberDeleted,
    /// 成员激活
    MemberActivated,
    /// 成员停用
    MemberDeactivated,
    /// 证卡下载
    CardDownloaded,
    /// 组织设置变更
    SettingsUpdated,
    /// 证卡模板变更
    TemplateChanged,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 活动日志条目（不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// 时间戳（Unix 毫秒，服务端赋值）
    pub timestamp: i64,
    /// 活动类型
    pub kind: ActivityKind,
    /// 操作者（已验证的邮箱，可选）
    #[serde(default)]
    pub actor: Option<String>,
    /// 关联对象 ID（成员 member_id、模板 id 等）
    #[serde(default)]
    pub subject_id: Option<String>,
    /// 关联对象名称（用于删除后仍可读的展示）
    #[serde(default)]
    pub subject_name: Option<String>,
}

/// 发送到 ActivityService 的记录请求
#[derive(Debug)]
pub struct ActivityRequest {
    pub kind: ActivityKind,
    pub actor: Option<String>,
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
}

impl ActivityRequest {
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            actor: None,
            subject_id: None,
            subject_name: None,
        }
    }

    pub fn actor(mut self, actor: Option<String>) -> Self {
        self.actor = actor;
        self
    }

    pub fn subject(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self.subject_name = Some(name.into());
        self
    }
}
