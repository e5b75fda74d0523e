//! 统一错误处理模块
//!
//! - `GradebookError`：基础设施错误（数据库、序列化、令牌签发等），使用宏自动生成错误代码和类型名称。
//! - `ServiceError`：业务层错误，区分未认证、拒绝访问、资源不存在、校验失败与冲突。

use std::fmt;

use crate::policy::Denial;
use crate::validation::ValidationError;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_gradebook_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GradebookError {
            $($variant(String),)*
        }

        impl GradebookError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradebookError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradebookError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradebookError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradebookError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradebookError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_gradebook_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    ConstraintViolation("E004", "Constraint Violation"),
    StorageBackendNotFound("E005", "Storage Backend Not Found"),
    FileOperation("E006", "File Operation Error"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    PasswordHash("E009", "Password Hash Error"),
    TokenIssue("E010", "Token Issue Error"),
}

impl GradebookError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GradebookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradebookError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradebookError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradebookError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GradebookError {
    fn from(err: std::io::Error) -> Self {
        GradebookError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GradebookError {
    fn from(err: serde_json::Error) -> Self {
        GradebookError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for GradebookError {
    fn from(err: chrono::ParseError) -> Self {
        GradebookError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;

/// 不存在的实体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Student,
    Assignment,
    Grade,
}

impl EntityKind {
    pub fn describe(&self) -> &'static str {
        match self {
            EntityKind::User => "用户不存在",
            EntityKind::Student => "学生不存在",
            EntityKind::Assignment => "作业不存在",
            EntityKind::Grade => "评分不存在",
        }
    }
}

/// 业务层错误
///
/// 所有业务错误都是同步、不可重试的，原样返回给调用方。
#[derive(Debug, Clone)]
pub enum ServiceError {
    Unauthenticated(String),
    Denied(Denial),
    NotFound(EntityKind),
    Validation(ValidationError),
    Conflict(String),
    Storage(GradebookError),
}

impl ServiceError {
    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        ServiceError::Unauthenticated(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ServiceError::Conflict(msg.into())
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, ServiceError::Denied(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unauthenticated(msg) => write!(f, "未认证: {msg}"),
            ServiceError::Denied(denial) => write!(f, "{denial}"),
            ServiceError::NotFound(kind) => write!(f, "{}", kind.describe()),
            ServiceError::Validation(err) => write!(f, "{err}"),
            ServiceError::Conflict(msg) => write!(f, "{msg}"),
            ServiceError::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<GradebookError> for ServiceError {
    fn from(err: GradebookError) -> Self {
        ServiceError::Storage(err)
    }
}

impl From<Denial> for ServiceError {
    fn from(denial: Denial) -> Self {
        ServiceError::Denied(denial)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradebookError::database_config("test").code(), "E001");
        assert_eq!(GradebookError::database_operation("test").code(), "E003");
        assert_eq!(GradebookError::constraint_violation("test").code(), "E004");
        assert_eq!(GradebookError::token_issue("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradebookError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(
            GradebookError::password_hash("test").error_type(),
            "Password Hash Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = GradebookError::database_operation("disk full");
        let formatted = err.format_simple();
        assert!(formatted.contains("Database Operation Error"));
        assert!(formatted.contains("disk full"));
    }

    #[test]
    fn test_service_error_conversions() {
        let err: ServiceError = ValidationError::DuplicateGrade.into();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DuplicateGrade)
        ));

        let err: ServiceError = Denial::NotOwner.into();
        assert!(err.is_denied());

        let err: ServiceError = GradebookError::database_operation("boom").into();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::NotFound(EntityKind::Grade);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "评分不存在");
    }
}
