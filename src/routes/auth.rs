use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::ApiResponse;
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::services::AuthService;

pub async fn register(
    auth: web::Data<AuthService>,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let user = auth.register(user_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
}

pub async fn login(
    auth: web::Data<AuthService>,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let response = auth.login(user_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}
