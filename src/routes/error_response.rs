//! 业务错误到 HTTP 响应的映射

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::errors::{EntityKind, ServiceError};
use crate::models::{ApiResponse, ErrorCode};
use crate::validation::ValidationError;

impl ServiceError {
    /// 业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ServiceError::Unauthenticated(_) => ErrorCode::AuthFailed,
            ServiceError::Denied(_) => ErrorCode::Forbidden,
            ServiceError::NotFound(kind) => match kind {
                EntityKind::User => ErrorCode::NotFound,
                EntityKind::Student => ErrorCode::StudentNotFound,
                EntityKind::Assignment => ErrorCode::AssignmentNotFound,
                EntityKind::Grade => ErrorCode::GradeNotFound,
            },
            ServiceError::Validation(err) => match err {
                ValidationError::DuplicateGrade => ErrorCode::GradeAlreadyExists,
                ValidationError::ScoreOutOfRange { .. } => ErrorCode::GradeScoreOutOfRange,
                ValidationError::NonPositiveMaxScore => ErrorCode::AssignmentMaxScoreInvalid,
                ValidationError::InvalidField { field: "email", .. } => ErrorCode::UserEmailInvalid,
                ValidationError::InvalidField { field: "role", .. } => ErrorCode::UserRoleInvalid,
                ValidationError::InvalidField { .. } => ErrorCode::BadRequest,
            },
            ServiceError::Conflict(_) => ErrorCode::UserEmailAlreadyExists,
            ServiceError::Storage(_) => ErrorCode::InternalServerError,
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Denied(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 基础设施错误不向客户端暴露细节
        let message = match self {
            ServiceError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}
