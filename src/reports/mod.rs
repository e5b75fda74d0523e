//! 成绩统计
//!
//! 报告按需从评分与作业集合计算，不落库。

use std::collections::HashMap;

use crate::models::assignments::entities::Assignment;
use crate::models::grades::entities::{Grade, GradeDetail};
use crate::models::reports::{CourseReport, StudentReport};
use crate::models::users::entities::User;

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// 学生未取整的平均分，无评分时为 None
fn raw_average(grades: &[Grade]) -> Option<f64> {
    mean(grades.iter().map(|g| g.score))
}

/// 单个学生的成绩报告
///
/// `total_assignments` 为全局作业数，`completed_assignments` 为该学生的评分条数。
/// 每条评分附带所属作业（找不到时为 None）与学生本人。
pub fn student_report(student: User, assignments: &[Assignment], grades: Vec<Grade>) -> StudentReport {
    let average_score = raw_average(&grades).map(round2).unwrap_or(0.0);
    let completed_assignments = grades.len();
    let grades = grades
        .into_iter()
        .map(|grade| GradeDetail {
            assignment: assignments
                .iter()
                .find(|a| a.id == grade.assignment_id)
                .cloned(),
            student: Some(student.clone()),
            grade,
        })
        .collect();

    StudentReport {
        student,
        total_assignments: assignments.len(),
        completed_assignments,
        average_score,
        grades,
    }
}

/// 课程成绩报告
///
/// 课程平均分是有评分学生的平均分的平均（不按评分条数加权），
/// 参与计算的是各学生未取整的平均分。
pub fn course_report(
    students: Vec<User>,
    assignments: &[Assignment],
    mut grades_by_student: HashMap<i64, Vec<Grade>>,
) -> CourseReport {
    let total_students = students.len();
    let mut averages = Vec::new();
    let mut student_reports = Vec::with_capacity(total_students);

    for student in students {
        let grades = grades_by_student.remove(&student.id).unwrap_or_default();
        if let Some(avg) = raw_average(&grades) {
            averages.push(avg);
        }
        student_reports.push(student_report(student, assignments, grades));
    }

    CourseReport {
        total_students,
        total_assignments: assignments.len(),
        average_score: mean(averages).map(round2).unwrap_or(0.0),
        student_reports,
    }
}

/// 按学生 ID 分组评分
pub fn group_by_student(grades: Vec<Grade>) -> HashMap<i64, Vec<Grade>> {
    let mut grouped: HashMap<i64, Vec<Grade>> = HashMap::new();
    for grade in grades {
        grouped.entry(grade.student_id).or_default().push(grade);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::Utc;

    fn student(id: i64) -> User {
        User {
            id,
            email: format!("student{id}@example.com"),
            full_name: format!("Student {id}"),
            password_hash: String::new(),
            role: UserRole::Student,
            created_at: Utc::now(),
        }
    }

    fn assignment(id: i64) -> Assignment {
        Assignment {
            id,
            title: format!("Assignment {id}"),
            description: None,
            max_score: 100.0,
            deadline: None,
            created_by: 1,
            created_at: Utc::now(),
        }
    }

    fn grade(id: i64, assignment_id: i64, student_id: i64, score: f64) -> Grade {
        Grade {
            id,
            assignment_id,
            student_id,
            score,
            comment: None,
            submitted_at: Utc::now(),
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(85.0), 85.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_student_without_grades() {
        let assignments = vec![assignment(1), assignment(2)];
        let report = student_report(student(2), &assignments, Vec::new());
        assert_eq!(report.average_score, 0.0);
        assert_eq!(report.completed_assignments, 0);
        assert_eq!(report.total_assignments, 2);
        assert!(report.grades.is_empty());
    }

    #[test]
    fn test_student_average_is_rounded() {
        let assignments = vec![assignment(1), assignment(2), assignment(3)];
        let grades = vec![
            grade(1, 1, 2, 90.0),
            grade(2, 2, 2, 85.0),
            grade(3, 3, 2, 71.0),
        ];
        let report = student_report(student(2), &assignments, grades);
        assert_eq!(report.completed_assignments, 3);
        assert_eq!(report.average_score, 82.0);

        let grades = vec![grade(1, 1, 2, 100.0), grade(2, 2, 2, 100.0), grade(3, 3, 2, 0.0)];
        let report = student_report(student(2), &assignments, grades);
        assert_eq!(report.average_score, 66.67);
    }

    #[test]
    fn test_report_grades_carry_assignment() {
        let assignments = vec![assignment(1), assignment(2)];
        // 作业 9 已不存在
        let grades = vec![grade(1, 2, 5, 75.0), grade(2, 9, 5, 25.0)];
        let report = student_report(student(5), &assignments, grades);

        assert_eq!(report.completed_assignments, 2);
        assert_eq!(report.average_score, 50.0);
        let first = &report.grades[0];
        assert_eq!(first.grade.id, 1);
        assert_eq!(
            first.assignment.as_ref().map(|a| a.title.as_str()),
            Some("Assignment 2")
        );
        assert_eq!(first.student.as_ref().map(|s| s.id), Some(5));
        assert!(report.grades[1].assignment.is_none());
    }

    #[test]
    fn test_course_average_is_average_of_averages() {
        let assignments = vec![assignment(1), assignment(2)];
        let grades = vec![
            grade(1, 1, 2, 80.0),
            grade(2, 2, 2, 100.0),
            grade(3, 1, 3, 50.0),
        ];
        let report = course_report(
            vec![student(2), student(3)],
            &assignments,
            group_by_student(grades),
        );
        assert_eq!(report.total_students, 2);
        assert_eq!(report.total_assignments, 2);
        assert_eq!(report.average_score, 70.0);
        assert_eq!(report.student_reports[0].average_score, 90.0);
        assert_eq!(report.student_reports[1].average_score, 50.0);
    }

    #[test]
    fn test_course_average_skips_students_without_grades() {
        let assignments = vec![assignment(1)];
        let grades = vec![grade(1, 1, 2, 60.0)];
        let report = course_report(
            vec![student(2), student(3)],
            &assignments,
            group_by_student(grades),
        );
        assert_eq!(report.total_students, 2);
        assert_eq!(report.average_score, 60.0);
        assert_eq!(report.student_reports[1].completed_assignments, 0);
    }

    #[test]
    fn test_empty_course() {
        let report = course_report(Vec::new(), &[], HashMap::new());
        assert_eq!(report.total_students, 0);
        assert_eq!(report.average_score, 0.0);
        assert!(report.student_reports.is_empty());
    }
}
