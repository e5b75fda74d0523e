use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::services::GradebookService;

use super::identity;

pub async fn list_assignments(
    req: HttpRequest,
    service: web::Data<GradebookService>,
) -> ActixResult<HttpResponse> {
    let assignments = service.list_assignments(&identity(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "ok")))
}

pub async fn get_assignment(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let assignment = service
        .get_assignment(&identity(&req)?, assignment_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "ok")))
}

pub async fn create_assignment(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let assignment = service
        .create_assignment(&identity(&req)?, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
}

pub async fn update_assignment(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    assignment_id: web::Path<i64>,
    data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let assignment = service
        .update_assignment(&identity(&req)?, assignment_id.into_inner(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
}

pub async fn delete_assignment(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service
        .delete_assignment(&identity(&req)?, assignment_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_assignments))
            .route("", web::post().to(create_assignment))
            .route("/{id}", web::get().to(get_assignment))
            .route("/{id}", web::put().to(update_assignment))
            .route("/{id}", web::delete().to(delete_assignment)),
    );
}
