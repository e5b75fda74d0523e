use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    grades::{
        entities::Grade,
        requests::{GradeChanges, GradeListQuery, NewGrade},
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod memory_storage;
pub mod sea_orm_storage;

/// 持久化接口
///
/// 只负责读写，不做任何权限或业务校验。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户，可按角色筛选，按 ID 升序
    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出全部作业，按 ID 升序
    async fn list_assignments(&self) -> Result<Vec<Assignment>>;
    // 更新作业，只写入提供的字段
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业及其全部评分
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 作业总数
    async fn count_assignments(&self) -> Result<u64>;

    /// 评分管理方法
    // 创建评分，同一 (作业, 学生) 重复写入返回约束错误
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    // 通过ID获取评分
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    // 查找某学生在某作业下的评分
    async fn find_grade_by_pair(&self, assignment_id: i64, student_id: i64)
    -> Result<Option<Grade>>;
    // 按条件列出评分，按 ID 升序
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>>;
    // 更新评分
    async fn update_grade(&self, id: i64, changes: GradeChanges) -> Result<Option<Grade>>;
    // 删除评分
    async fn delete_grade(&self, id: i64) -> Result<bool>;
}

/// 根据数据库 URL 选择存储后端
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    if memory_storage::MemoryStorage::handles(&config.url) {
        tracing::warn!("使用内存存储，进程退出后数据不会保留");
        return Ok(Arc::new(memory_storage::MemoryStorage::new()));
    }

    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
