use std::collections::HashMap;

use super::{GradebookService, authorize, storage_failure, validated};
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::models::assignments::{
    entities::{Assignment, AssignmentDetail},
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use crate::models::users::entities::User;
use crate::policy::{Identity, Target, check_read, check_write};
use crate::validation::{ValidationError, validate_max_score};

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::invalid_field("title", "标题不能为空"));
    }
    Ok(())
}

impl GradebookService {
    /// 作业列表，附带创建教师信息
    pub async fn list_assignments(&self, identity: &Identity) -> ServiceResult<Vec<AssignmentDetail>> {
        authorize(identity, "list_assignments", check_read(identity, Target::Assignments))?;

        let assignments = self
            .storage
            .list_assignments()
            .await
            .map_err(storage_failure("list_assignments"))?;

        let mut teachers: HashMap<i64, Option<User>> = HashMap::new();
        let mut details = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let teacher = match teachers.get(&assignment.created_by) {
                Some(cached) => cached.clone(),
                None => {
                    let teacher = self
                        .storage
                        .get_user_by_id(assignment.created_by)
                        .await
                        .map_err(storage_failure("list_assignments"))?;
                    teachers.insert(assignment.created_by, teacher.clone());
                    teacher
                }
            };
            details.push(AssignmentDetail {
                assignment,
                teacher,
            });
        }

        Ok(details)
    }

    pub async fn get_assignment(&self, identity: &Identity, id: i64) -> ServiceResult<AssignmentDetail> {
        authorize(identity, "get_assignment", check_read(identity, Target::Assignments))?;

        let assignment = self.load_assignment(id, "get_assignment").await?;
        let teacher = self
            .storage
            .get_user_by_id(assignment.created_by)
            .await
            .map_err(storage_failure("get_assignment"))?;

        Ok(AssignmentDetail {
            assignment,
            teacher,
        })
    }

    pub async fn create_assignment(
        &self,
        identity: &Identity,
        req: CreateAssignmentRequest,
    ) -> ServiceResult<Assignment> {
        authorize(identity, "create_assignment", check_write(identity, Target::Assignments))?;
        validated("create_assignment", validate_title(&req.title))?;
        validated("create_assignment", validate_max_score(req.max_score))?;

        let assignment = self
            .storage
            .create_assignment(identity.id, req)
            .await
            .map_err(storage_failure("create_assignment"))?;

        tracing::info!(
            assignment_id = assignment.id,
            teacher_id = identity.id,
            "作业已创建"
        );
        Ok(assignment)
    }

    /// 更新作业，只有创建者本人可以修改
    pub async fn update_assignment(
        &self,
        identity: &Identity,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> ServiceResult<Assignment> {
        authorize(identity, "update_assignment", check_write(identity, Target::Assignments))?;

        let existing = self.load_assignment(id, "update_assignment").await?;
        authorize(
            identity,
            "update_assignment",
            check_write(identity, Target::Assignment(&existing)),
        )?;

        if let Some(title) = req.title.as_deref() {
            validated("update_assignment", validate_title(title))?;
        }
        if let Some(max_score) = req.max_score {
            validated("update_assignment", validate_max_score(max_score))?;
        }

        self.storage
            .update_assignment(id, req)
            .await
            .map_err(storage_failure("update_assignment"))?
            .ok_or(ServiceError::NotFound(EntityKind::Assignment))
    }

    /// 删除作业及其全部评分
    pub async fn delete_assignment(&self, identity: &Identity, id: i64) -> ServiceResult<()> {
        authorize(identity, "delete_assignment", check_write(identity, Target::Assignments))?;

        let existing = self.load_assignment(id, "delete_assignment").await?;
        authorize(
            identity,
            "delete_assignment",
            check_write(identity, Target::Assignment(&existing)),
        )?;

        let deleted = self
            .storage
            .delete_assignment(id)
            .await
            .map_err(storage_failure("delete_assignment"))?;
        if !deleted {
            return Err(ServiceError::NotFound(EntityKind::Assignment));
        }

        tracing::info!(assignment_id = id, teacher_id = identity.id, "作业已删除");
        Ok(())
    }

    pub(super) async fn load_assignment(
        &self,
        id: i64,
        operation: &'static str,
    ) -> ServiceResult<Assignment> {
        self.storage
            .get_assignment_by_id(id)
            .await
            .map_err(storage_failure(operation))?
            .ok_or(ServiceError::NotFound(EntityKind::Assignment))
    }
}
