use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use crate::services::GradebookService;

use super::identity;

pub async fn list_grades(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    let grades = service
        .list_grades(&identity(&req)?, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(grades, "ok")))
}

pub async fn get_grade(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    grade_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let grade = service
        .get_grade(&identity(&req)?, grade_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "ok")))
}

pub async fn create_grade(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    let grade = service
        .create_grade(&identity(&req)?, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(grade, "评分成功")))
}

pub async fn update_grade(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    grade_id: web::Path<i64>,
    data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    let grade = service
        .update_grade(&identity(&req)?, grade_id.into_inner(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "评分更新成功")))
}

pub async fn delete_grade(
    req: HttpRequest,
    service: web::Data<GradebookService>,
    grade_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service
        .delete_grade(&identity(&req)?, grade_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/grades")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}", web::put().to(update_grade))
            .route("/{id}", web::delete().to(delete_grade)),
    );
}
