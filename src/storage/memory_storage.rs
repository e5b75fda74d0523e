//! 内存存储
//!
//! `memory://` 数据库 URL 使用的后端，数据只存在于进程内。
//! 使用 tokio RwLock 保护，唯一约束与级联删除在写锁内完成。

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Storage;
use crate::errors::{GradebookError, Result};
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    grades::{
        entities::Grade,
        requests::{GradeChanges, GradeListQuery, NewGrade},
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

/// 内部表结构，ID 自增从 1 开始
#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    assignments: BTreeMap<i64, Assignment>,
    grades: BTreeMap<i64, Grade>,
    next_user_id: i64,
    next_assignment_id: i64,
    next_grade_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// 内存存储实现
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub const URL_SCHEME: &'static str = "memory://";

    pub fn new() -> Self {
        Self::default()
    }

    /// 该 URL 是否由内存存储处理
    pub fn handles(url: &str) -> bool {
        url.starts_with(Self::URL_SCHEME)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(GradebookError::constraint_violation(format!(
                "创建用户失败: 邮箱 {} 已存在",
                user.email
            )));
        }

        let id = next_id(&mut tables.next_user_id);
        let created = User {
            id,
            email: user.email,
            full_name: user.full_name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.tables.read().await.users.len() as u64)
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_assignment_id);
        let created = Assignment {
            id,
            title: req.title,
            description: req.description,
            max_score: req.max_score,
            deadline: req.deadline,
            created_by,
            created_at: Utc::now(),
        };
        tables.assignments.insert(id, created.clone());
        Ok(created)
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        Ok(self.tables.read().await.assignments.get(&id).cloned())
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self
            .tables
            .read()
            .await
            .assignments
            .values()
            .cloned()
            .collect())
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let mut tables = self.tables.write().await;
        let Some(assignment) = tables.assignments.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            assignment.title = title;
        }
        if let Some(description) = update.description {
            assignment.description = description;
        }
        if let Some(max_score) = update.max_score {
            assignment.max_score = max_score;
        }
        if let Some(deadline) = update.deadline {
            assignment.deadline = deadline;
        }

        Ok(Some(assignment.clone()))
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.assignments.remove(&id).is_none() {
            return Ok(false);
        }
        // 级联删除
        tables.grades.retain(|_, g| g.assignment_id != id);
        Ok(true)
    }

    async fn count_assignments(&self) -> Result<u64> {
        Ok(self.tables.read().await.assignments.len() as u64)
    }

    // 评分模块
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade> {
        let mut tables = self.tables.write().await;

        if tables
            .grades
            .values()
            .any(|g| g.assignment_id == grade.assignment_id && g.student_id == grade.student_id)
        {
            return Err(GradebookError::constraint_violation(format!(
                "创建评分失败: 作业 {} 学生 {} 已有评分",
                grade.assignment_id, grade.student_id
            )));
        }

        let id = next_id(&mut tables.next_grade_id);
        let created = Grade {
            id,
            assignment_id: grade.assignment_id,
            student_id: grade.student_id,
            score: grade.score,
            comment: grade.comment,
            submitted_at: grade.graded_at,
            graded_at: grade.graded_at,
        };
        tables.grades.insert(id, created.clone());
        Ok(created)
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        Ok(self.tables.read().await.grades.get(&id).cloned())
    }

    async fn find_grade_by_pair(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Grade>> {
        let tables = self.tables.read().await;
        Ok(tables
            .grades
            .values()
            .find(|g| g.assignment_id == assignment_id && g.student_id == student_id)
            .cloned())
    }

    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        let tables = self.tables.read().await;
        Ok(tables
            .grades
            .values()
            .filter(|g| query.assignment_id.is_none_or(|id| g.assignment_id == id))
            .filter(|g| query.student_id.is_none_or(|id| g.student_id == id))
            .cloned()
            .collect())
    }

    async fn update_grade(&self, id: i64, changes: GradeChanges) -> Result<Option<Grade>> {
        let mut tables = self.tables.write().await;
        let Some(grade) = tables.grades.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(score) = changes.score {
            grade.score = score;
        }
        if let Some(comment) = changes.comment {
            grade.comment = comment;
        }
        grade.graded_at = changes.graded_at;

        Ok(Some(grade.clone()))
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.grades.remove(&id).is_some())
    }
}
