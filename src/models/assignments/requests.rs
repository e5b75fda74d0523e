use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::double_option;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub deadline: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
}

/// 更新作业请求
///
/// `description` 与 `deadline` 缺省时保持不变，显式 `null` 清空。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub max_score: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,
}
