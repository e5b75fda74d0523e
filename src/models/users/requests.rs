use serde::Deserialize;

use super::entities::UserRole;

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
}

// 创建用户（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
}
