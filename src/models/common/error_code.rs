use serde::Serialize;

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1005,

    // 认证相关
    AuthFailed = 2000,
    UserEmailInvalid = 2001,
    UserEmailAlreadyExists = 2002,
    UserRoleInvalid = 2003,

    // 作业相关
    AssignmentNotFound = 3000,
    AssignmentMaxScoreInvalid = 3001,

    // 评分相关
    GradeNotFound = 4000,
    GradeAlreadyExists = 4001,
    GradeScoreOutOfRange = 4002,
    StudentNotFound = 4003,
}
