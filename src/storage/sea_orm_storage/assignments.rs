//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::errors::{GradebookError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            max_score: Set(req.max_score),
            deadline: Set(req.deadline.map(|dt| dt.timestamp_millis())),
            created_by: Set(created_by),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出作业
    pub async fn list_assignments_impl(&self) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        let mut changed = false;

        if let Some(title) = update.title {
            model.title = Set(title);
            changed = true;
        }

        if let Some(description) = update.description {
            model.description = Set(description);
            changed = true;
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
            changed = true;
        }

        if let Some(deadline) = update.deadline {
            model.deadline = Set(deadline.map(|dt| dt.timestamp_millis()));
            changed = true;
        }

        // 没有任何字段变化时直接返回原记录
        if !changed {
            return Ok(existing);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业，评分在同一事务内一并删除
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        Grades::delete_many()
            .filter(GradeColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除作业评分失败: {e}")))?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 作业总数
    pub async fn count_assignments_impl(&self) -> Result<u64> {
        Assignments::find()
            .count(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业总数失败: {e}")))
    }
}
