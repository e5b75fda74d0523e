pub mod assignments;

pub mod auth;

pub mod error_response;

pub mod grades;

pub mod reports;

pub mod system;

pub mod users;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use grades::configure_grade_routes;
pub use reports::configure_report_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::HttpRequest;

use crate::errors::ServiceError;
use crate::middlewares::RequireJWT;
use crate::policy::Identity;

/// 从请求中取出 RequireJWT 写入的身份
pub(crate) fn identity(req: &HttpRequest) -> Result<Identity, ServiceError> {
    RequireJWT::extract_identity(req)
        .ok_or_else(|| ServiceError::unauthenticated("Authentication required"))
}

/// 注册全部路由
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_assignment_routes)
        .configure(configure_grade_routes)
        .configure(configure_report_routes);
}
