use super::{GradebookService, authorize, storage_failure, validated};
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::models::users::entities::{User, UserRole};
use crate::policy::{Identity, Target, check_read};
use crate::validation::ValidationError;

/// 解析 `?role=` 过滤条件，空字符串视为不过滤
pub fn parse_role_filter(role: Option<&str>) -> Result<Option<UserRole>, ValidationError> {
    match role.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<UserRole>()
            .map(Some)
            .map_err(|_| ValidationError::invalid_field("role", "角色只能是 teacher 或 student")),
    }
}

impl GradebookService {
    /// 当前登录用户
    pub async fn current_user(&self, identity: &Identity) -> ServiceResult<User> {
        self.storage
            .get_user_by_id(identity.id)
            .await
            .map_err(storage_failure("current_user"))?
            .ok_or(ServiceError::NotFound(EntityKind::User))
    }

    pub async fn list_users(&self, identity: &Identity, role: Option<&str>) -> ServiceResult<Vec<User>> {
        authorize(identity, "list_users", check_read(identity, Target::Users))?;
        let role = validated("list_users", parse_role_filter(role))?;

        self.storage
            .list_users(role)
            .await
            .map_err(storage_failure("list_users"))
    }

    pub async fn list_students(&self, identity: &Identity) -> ServiceResult<Vec<User>> {
        authorize(identity, "list_students", check_read(identity, Target::Users))?;

        self.storage
            .list_users(Some(UserRole::Student))
            .await
            .map_err(storage_failure("list_students"))
    }

    pub async fn get_user(&self, identity: &Identity, id: i64) -> ServiceResult<User> {
        authorize(identity, "get_user", check_read(identity, Target::Users))?;

        self.storage
            .get_user_by_id(id)
            .await
            .map_err(storage_failure("get_user"))?
            .ok_or(ServiceError::NotFound(EntityKind::User))
    }
}
