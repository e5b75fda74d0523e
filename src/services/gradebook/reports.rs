use super::{GradebookService, authorize, storage_failure};
use crate::errors::ServiceResult;
use crate::models::grades::requests::GradeListQuery;
use crate::models::reports::{CourseReport, StudentReport};
use crate::models::users::entities::UserRole;
use crate::policy::{Identity, Target, check_read};
use crate::reports;

impl GradebookService {
    /// 单个学生的成绩报告（仅教师）
    pub async fn student_report(&self, identity: &Identity, student_id: i64) -> ServiceResult<StudentReport> {
        authorize(identity, "student_report", check_read(identity, Target::Reports))?;

        let student = self.load_student(student_id, "student_report").await?;
        let assignments = self
            .storage
            .list_assignments()
            .await
            .map_err(storage_failure("student_report"))?;
        let grades = self
            .storage
            .list_grades(GradeListQuery {
                assignment_id: None,
                student_id: Some(student_id),
            })
            .await
            .map_err(storage_failure("student_report"))?;

        Ok(reports::student_report(student, &assignments, grades))
    }

    /// 全课程成绩报告（仅教师）
    pub async fn course_report(&self, identity: &Identity) -> ServiceResult<CourseReport> {
        authorize(identity, "course_report", check_read(identity, Target::Reports))?;

        let students = self
            .storage
            .list_users(Some(UserRole::Student))
            .await
            .map_err(storage_failure("course_report"))?;
        let assignments = self
            .storage
            .list_assignments()
            .await
            .map_err(storage_failure("course_report"))?;
        let grades = self
            .storage
            .list_grades(GradeListQuery::default())
            .await
            .map_err(storage_failure("course_report"))?;

        Ok(reports::course_report(
            students,
            &assignments,
            reports::group_by_student(grades),
        ))
    }
}
