use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::users::requests::UserListParams;
use crate::services::GradebookService;

use super::identity;

pub async fn get_me(
    req: HttpRequest,
    service: web::Data<GradebookService>,
) -> ActixResult<HttpResponse> {
    let user = service.current_user(&identity(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "ok")))
}

pub async fn list_users(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    let users = service
        .list_users(&identity(&req)?, query.role.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users, "ok")))
}

pub async fn list_students(
    req: HttpRequest,
    service: web::Data<GradebookService>,
) -> ActixResult<HttpResponse> {
    let users = service.list_students(&identity(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users, "ok")))
}

pub async fn get_user(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    user_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = service
        .get_user(&identity(&req)?, user_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "ok")))
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_users))
            .route("/me", web::get().to(get_me))
            .route("/students", web::get().to(list_students))
            .route("/{id}", web::get().to(get_user)),
    );
}
