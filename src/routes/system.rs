use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::json;

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime};

pub async fn index(config: web::Data<AppConfig>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        json!({
            "name": config.app.system_name,
            "version": env!("CARGO_PKG_VERSION"),
        }),
        "ok",
    )))
}

pub async fn health(start_time: web::Data<AppStartTime>) -> ActixResult<HttpResponse> {
    let uptime = chrono::Utc::now() - start_time.start_datetime;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        json!({
            "status": "healthy",
            "uptime_seconds": uptime.num_seconds(),
        }),
        "ok",
    )))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health));
}
