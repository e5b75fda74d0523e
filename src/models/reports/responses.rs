use serde::Serialize;

use crate::models::grades::entities::GradeDetail;
use crate::models::users::entities::User;

/// 学生成绩报告（按需计算，不落库）
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub student: User,
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub average_score: f64,
    // 附带作业与学生信息
    pub grades: Vec<GradeDetail>,
}

/// 课程成绩报告
#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub total_students: usize,
    pub total_assignments: usize,
    pub average_score: f64,
    pub student_reports: Vec<StudentReport>,
}
