use crate::errors::{ServiceError, ServiceResult};
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

use super::AuthService;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

pub async fn handle_login(service: &AuthService, request: LoginRequest) -> ServiceResult<LoginResponse> {
    let storage = service.storage();

    // 1. 根据邮箱获取用户
    let Some(user) = storage.get_user_by_email(request.email.trim()).await? else {
        return Err(ServiceError::unauthenticated(BAD_CREDENTIALS));
    };

    // 2. 验证密码
    if !verify_password(&request.password, &user.password_hash) {
        tracing::info!("Login failed for {}", user.email);
        return Err(ServiceError::unauthenticated(BAD_CREDENTIALS));
    }

    // 3. 签发令牌
    let jwt = service.jwt();
    let access_token = jwt.generate_access_token(user.id, user.role).map_err(|e| {
        tracing::error!("Failed to generate JWT token: {}", e);
        ServiceError::Storage(e)
    })?;

    tracing::info!("User {} logged in successfully", user.email);

    Ok(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: jwt.access_token_expiry_secs(),
        user,
    })
}
