//! 注册、登录与令牌认证

pub mod login;
pub mod register;
pub mod token;

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::errors::ServiceResult;
use crate::models::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::users::entities::User;
use crate::policy::Identity;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    jwt: JwtUtils,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, config: &JwtConfig) -> Self {
        Self {
            storage,
            jwt: JwtUtils::new(config),
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn jwt(&self) -> &JwtUtils {
        &self.jwt
    }

    // 用户注册
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        register::handle_register(self, request).await
    }

    // 登录验证
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        login::handle_login(self, request).await
    }

    // 将 Bearer 令牌解析为已认证身份
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        token::handle_authenticate(self, token).await
    }
}
