use crate::errors::{ServiceError, ServiceResult};
use crate::policy::Identity;

use super::AuthService;

/// 校验令牌签名与有效期，解析身份，并确认用户仍然存在
pub async fn handle_authenticate(service: &AuthService, token: &str) -> ServiceResult<Identity> {
    let claims = service.jwt().verify_access_token(token).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        ServiceError::unauthenticated("Invalid or expired token")
    })?;

    let identity = Identity::from_claims(&claims.sub, &claims.role)?;

    match service.storage().get_user_by_id(identity.id).await? {
        Some(user) if user.role == identity.role => Ok(identity),
        Some(_) => Err(ServiceError::unauthenticated("Token role does not match user")),
        None => Err(ServiceError::unauthenticated("User not found")),
    }
}
