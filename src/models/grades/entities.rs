use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grade {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub comment: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 每次评分或改分都会刷新
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

/// 带作业与学生信息的评分
#[derive(Debug, Clone, Serialize)]
pub struct GradeDetail {
    #[serde(flatten)]
    pub grade: Grade,
    pub assignment: Option<Assignment>,
    pub student: Option<User>,
}
