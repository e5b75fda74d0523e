use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::GradebookService;

use super::identity;

pub async fn student_report(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let report = service
        .student_report(&identity(&req)?, student_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "ok")))
}

pub async fn course_report(
    req: HttpRequest,
    service: web::Data<GradebookService>,
) -> ActixResult<HttpResponse> {
    let report = service.course_report(&identity(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "ok")))
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reports")
            .wrap(middlewares::RequireRole::new(UserRole::Teacher))
            .wrap(middlewares::RequireJWT)
            .route("/student/{id}", web::get().to(student_report))
            .route("/course", web::get().to(course_report)),
    );
}
