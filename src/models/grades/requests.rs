use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::double_option;

/// 创建评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}

/// 更新评分请求
///
/// `comment` 缺省时保持不变，显式 `null` 清空评语。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGradeRequest {
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
}

/// 评分列表查询参数
///
/// 学生身份下 `student_id` 会被访问策略改写为本人 ID。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GradeListQuery {
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
}

// 用于存储层的内部写入参数
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub assignment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub comment: Option<String>,
    pub graded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GradeChanges {
    pub score: Option<f64>,
    pub comment: Option<Option<String>>,
    pub graded_at: DateTime<Utc>,
}
