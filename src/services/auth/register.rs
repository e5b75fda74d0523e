use crate::errors::{ServiceError, ServiceResult};
use crate::models::auth::RegisterRequest;
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_password};
use crate::validation::ValidationError;

use super::AuthService;

pub async fn handle_register(service: &AuthService, request: RegisterRequest) -> ServiceResult<User> {
    let storage = service.storage();

    // 1. 字段校验
    let email = request.email.trim().to_string();
    validate_email(&email).map_err(|msg| ValidationError::invalid_field("email", msg))?;
    validate_full_name(&request.full_name)
        .map_err(|msg| ValidationError::invalid_field("full_name", msg))?;
    validate_password(&request.password)
        .map_err(|msg| ValidationError::invalid_field("password", msg))?;
    let role = request
        .role
        .parse::<UserRole>()
        .map_err(|_| ValidationError::invalid_field("role", "角色只能是 teacher 或 student"))?;

    // 2. 检查邮箱是否已存在
    if storage.get_user_by_email(&email).await?.is_some() {
        tracing::info!("注册失败，邮箱已存在: {}", email);
        return Err(ServiceError::conflict("Email already registered"));
    }

    // 3. 哈希密码后创建用户
    let password_hash = hash_password(&request.password)?;
    let user = storage
        .create_user(CreateUserRequest {
            email,
            full_name: request.full_name.trim().to_string(),
            password_hash,
            role,
        })
        .await
        .map_err(|e| {
            // 并发注册同一邮箱
            if e.code() == "E004" {
                ServiceError::conflict("Email already registered")
            } else {
                tracing::error!("创建用户失败: {}", e);
                ServiceError::Storage(e)
            }
        })?;

    tracing::info!("User {} registered as {}", user.email, user.role);
    Ok(user)
}
