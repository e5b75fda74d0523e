use std::collections::HashMap;

use chrono::Utc;

use super::{GradebookService, authorize, storage_failure, validated};
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::models::assignments::entities::Assignment;
use crate::models::grades::{
    entities::{Grade, GradeDetail},
    requests::{CreateGradeRequest, GradeChanges, GradeListQuery, NewGrade, UpdateGradeRequest},
};
use crate::models::users::entities::User;
use crate::policy::{Identity, Target, check_read, check_write, scope_grade_query};
use crate::validation::{GradeWrite, ValidationError, validate_grade};

impl GradebookService {
    /// 评分列表
    ///
    /// 学生的过滤条件在查询前被改写为本人，教师的过滤条件原样生效。
    pub async fn list_grades(
        &self,
        identity: &Identity,
        query: GradeListQuery,
    ) -> ServiceResult<Vec<GradeDetail>> {
        authorize(identity, "list_grades", check_read(identity, Target::Grades))?;

        let query = scope_grade_query(identity, query);
        let grades = self
            .storage
            .list_grades(query)
            .await
            .map_err(storage_failure("list_grades"))?;

        let mut assignments: HashMap<i64, Option<Assignment>> = HashMap::new();
        let mut students: HashMap<i64, Option<User>> = HashMap::new();
        let mut details = Vec::with_capacity(grades.len());
        for grade in grades {
            if !assignments.contains_key(&grade.assignment_id) {
                let assignment = self
                    .storage
                    .get_assignment_by_id(grade.assignment_id)
                    .await
                    .map_err(storage_failure("list_grades"))?;
                assignments.insert(grade.assignment_id, assignment);
            }
            if !students.contains_key(&grade.student_id) {
                let student = self
                    .storage
                    .get_user_by_id(grade.student_id)
                    .await
                    .map_err(storage_failure("list_grades"))?;
                students.insert(grade.student_id, student);
            }

            details.push(GradeDetail {
                assignment: assignments.get(&grade.assignment_id).cloned().flatten(),
                student: students.get(&grade.student_id).cloned().flatten(),
                grade,
            });
        }

        Ok(details)
    }

    /// 查看单条评分，学生只能查看自己的
    pub async fn get_grade(&self, identity: &Identity, id: i64) -> ServiceResult<GradeDetail> {
        // 没有不依赖记录的角色门槛，因此先查找：不存在的 ID 对任何人都是 404
        let grade = self.load_grade(id, "get_grade").await?;
        authorize(identity, "get_grade", check_read(identity, Target::Grade(&grade)))?;

        let assignment = self
            .storage
            .get_assignment_by_id(grade.assignment_id)
            .await
            .map_err(storage_failure("get_grade"))?;
        let student = self
            .storage
            .get_user_by_id(grade.student_id)
            .await
            .map_err(storage_failure("get_grade"))?;

        Ok(GradeDetail {
            grade,
            assignment,
            student,
        })
    }

    /// 创建评分
    ///
    /// 顺序：教师身份 -> 作业存在 -> 学生存在 -> 重复 -> 分数范围。
    pub async fn create_grade(
        &self,
        identity: &Identity,
        req: CreateGradeRequest,
    ) -> ServiceResult<Grade> {
        authorize(identity, "create_grade", check_write(identity, Target::Grades))?;

        let assignment = self.load_assignment(req.assignment_id, "create_grade").await?;
        self.load_student(req.student_id, "create_grade").await?;

        let existing = self
            .storage
            .find_grade_by_pair(req.assignment_id, req.student_id)
            .await
            .map_err(storage_failure("create_grade"))?;
        validated(
            "create_grade",
            validate_grade(
                assignment.max_score,
                existing.as_ref(),
                Some(req.score),
                GradeWrite::Create,
            ),
        )?;

        let new_grade = NewGrade {
            assignment_id: req.assignment_id,
            student_id: req.student_id,
            score: req.score,
            comment: req.comment,
            graded_at: Utc::now(),
        };

        let grade = match self.storage.create_grade(new_grade).await {
            Ok(grade) => grade,
            // 并发写入时由唯一约束兜底
            Err(err) if err.code() == "E004" => {
                tracing::info!(
                    assignment_id = req.assignment_id,
                    student_id = req.student_id,
                    "评分唯一约束冲突: {err}"
                );
                return Err(ValidationError::DuplicateGrade.into());
            }
            Err(err) => return Err(storage_failure("create_grade")(err)),
        };

        tracing::info!(
            grade_id = grade.id,
            assignment_id = grade.assignment_id,
            student_id = grade.student_id,
            teacher_id = identity.id,
            "评分已创建"
        );
        Ok(grade)
    }

    /// 修改评分，无论改了什么都会刷新 graded_at
    pub async fn update_grade(
        &self,
        identity: &Identity,
        id: i64,
        req: UpdateGradeRequest,
    ) -> ServiceResult<Grade> {
        authorize(identity, "update_grade", check_write(identity, Target::Grades))?;

        let existing = self.load_grade(id, "update_grade").await?;
        authorize(identity, "update_grade", check_write(identity, Target::Grade(&existing)))?;

        if req.score.is_some() {
            let assignment = self.load_assignment(existing.assignment_id, "update_grade").await?;
            validated(
                "update_grade",
                validate_grade(
                    assignment.max_score,
                    Some(&existing),
                    req.score,
                    GradeWrite::Update(id),
                ),
            )?;
        }

        let changes = GradeChanges {
            score: req.score,
            comment: req.comment,
            graded_at: Utc::now(),
        };

        self.storage
            .update_grade(id, changes)
            .await
            .map_err(storage_failure("update_grade"))?
            .ok_or(ServiceError::NotFound(EntityKind::Grade))
    }

    pub async fn delete_grade(&self, identity: &Identity, id: i64) -> ServiceResult<()> {
        authorize(identity, "delete_grade", check_write(identity, Target::Grades))?;

        let existing = self.load_grade(id, "delete_grade").await?;
        authorize(identity, "delete_grade", check_write(identity, Target::Grade(&existing)))?;

        let deleted = self
            .storage
            .delete_grade(id)
            .await
            .map_err(storage_failure("delete_grade"))?;
        if !deleted {
            return Err(ServiceError::NotFound(EntityKind::Grade));
        }
        Ok(())
    }

    async fn load_grade(&self, id: i64, operation: &'static str) -> ServiceResult<Grade> {
        self.storage
            .get_grade_by_id(id)
            .await
            .map_err(storage_failure(operation))?
            .ok_or(ServiceError::NotFound(EntityKind::Grade))
    }

    /// 查找学生，用户存在但不是学生时同样视为不存在
    pub(super) async fn load_student(&self, id: i64, operation: &'static str) -> ServiceResult<User> {
        self.storage
            .get_user_by_id(id)
            .await
            .map_err(storage_failure(operation))?
            .filter(User::is_student)
            .ok_or(ServiceError::NotFound(EntityKind::Student))
    }
}
