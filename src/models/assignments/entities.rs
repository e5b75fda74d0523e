use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 作业最高分数
    pub max_score: f64,
    // 作业截止时间
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    // 创建者（教师）ID
    pub created_by: i64,
    // 作业创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 带创建教师信息的作业
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub teacher: Option<User>,
}
