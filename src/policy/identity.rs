use crate::errors::ServiceError;
use crate::models::users::entities::{User, UserRole};

/// 已认证的调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub role: UserRole,
}

impl Identity {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn teacher(id: i64) -> Self {
        Self::new(id, UserRole::Teacher)
    }

    pub fn student(id: i64) -> Self {
        Self::new(id, UserRole::Student)
    }

    /// 从令牌声明中解析身份，角色只接受 teacher / student
    pub fn from_claims(sub: &str, role: &str) -> Result<Self, ServiceError> {
        let id = sub
            .parse::<i64>()
            .map_err(|_| ServiceError::unauthenticated("Invalid user ID in token"))?;
        let role = role
            .parse::<UserRole>()
            .map_err(|_| ServiceError::unauthenticated(format!("Malformed identity role: {role}")))?;
        Ok(Self { id, role })
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
