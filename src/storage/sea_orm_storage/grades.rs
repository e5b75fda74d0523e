//! 评分存储操作

use super::{SeaOrmStorage, map_write_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{GradebookError, Result};
use crate::models::grades::{
    entities::Grade,
    requests::{GradeChanges, GradeListQuery, NewGrade},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评分
    pub async fn create_grade_impl(&self, grade: NewGrade) -> Result<Grade> {
        let graded_at = grade.graded_at.timestamp_millis();

        let model = ActiveModel {
            assignment_id: Set(grade.assignment_id),
            student_id: Set(grade.student_id),
            score: Set(grade.score),
            comment: Set(grade.comment),
            submitted_at: Set(graded_at),
            graded_at: Set(graded_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, "创建评分失败"))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取评分
    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过作业与学生获取评分
    pub async fn find_grade_by_pair_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 列出评分
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        let mut select = Grades::find();

        // 作业筛选
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let grades = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 更新评分，graded_at 总是刷新
    pub async fn update_grade_impl(
        &self,
        id: i64,
        changes: GradeChanges,
    ) -> Result<Option<Grade>> {
        // 先检查评分是否存在
        let existing = self.get_grade_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            graded_at: Set(changes.graded_at.timestamp_millis()),
            ..Default::default()
        };

        if let Some(score) = changes.score {
            model.score = Set(score);
        }

        if let Some(comment) = changes.comment {
            model.comment = Set(comment);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新评分失败: {e}")))?;

        self.get_grade_by_id_impl(id).await
    }

    /// 删除评分
    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除评分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
