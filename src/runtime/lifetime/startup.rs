use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::grades::requests::NewGrade;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::{AuthService, GradebookService};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub gradebook: GradebookService,
    pub auth: AuthService,
}

/// 写入演示数据
///
/// 仅在库中没有任何用户时执行：一名教师、两名学生、两份作业、两条评分。
/// 返回是否实际写入。
pub async fn seed_demo_data(storage: &Arc<dyn Storage>) -> Result<bool> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping demo data seed",
            count
        );
        return Ok(false);
    }

    info!("No users found in database, seeding demo data...");

    let teacher_hash = hash_password("teacher123")?;
    let student_hash = hash_password("student123")?;

    let teacher = storage
        .create_user(CreateUserRequest {
            email: "teacher@example.com".to_string(),
            full_name: "Иванов Иван Иванович".to_string(),
            password_hash: teacher_hash,
            role: UserRole::Teacher,
        })
        .await?;
    let student1 = storage
        .create_user(CreateUserRequest {
            email: "student1@example.com".to_string(),
            full_name: "Петров Петр Петрович".to_string(),
            password_hash: student_hash.clone(),
            role: UserRole::Student,
        })
        .await?;
    let student2 = storage
        .create_user(CreateUserRequest {
            email: "student2@example.com".to_string(),
            full_name: "Сидорова Мария Владимировна".to_string(),
            password_hash: student_hash,
            role: UserRole::Student,
        })
        .await?;

    let now = Utc::now();
    let assignment1 = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Лабораторная работа №1".to_string(),
                description: Some("Основы программирования на Python".to_string()),
                max_score: 100.0,
                deadline: Some(now + Duration::days(7)),
            },
        )
        .await?;
    storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Контрольная работа".to_string(),
                description: Some("Структуры данных и алгоритмы".to_string()),
                max_score: 100.0,
                deadline: Some(now + Duration::days(14)),
            },
        )
        .await?;

    for (student_id, score) in [(student1.id, 85.0), (student2.id, 92.0)] {
        storage
            .create_grade(NewGrade {
                assignment_id: assignment1.id,
                student_id,
                score,
                comment: None,
                graded_at: now,
            })
            .await?;
    }

    warn!("Demo data seeded: teacher@example.com / teacher123, student1@example.com / student123");
    Ok(true)
}

/// 准备服务器启动的上下文
/// 包括存储、业务服务与演示数据
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    if config.app.seed_demo_data {
        seed_demo_data(&storage).await?;
    }

    Ok(StartupContext {
        gradebook: GradebookService::new(storage.clone()),
        auth: AuthService::new(storage.clone(), &config.jwt),
        storage,
    })
}
