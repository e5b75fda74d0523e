//! 成绩簿业务编排
//!
//! 每个写操作依次经过：权限判定 -> 实体查找 -> 实体级权限 -> 校验 -> 持久化。
//! 任一环节失败即返回，不产生任何写入。

mod assignments;
mod grades;
mod reports;
mod users;

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::{GradebookError, ServiceError, ServiceResult};
use crate::policy::{Denial, Identity};
use crate::storage::Storage;
use crate::validation::ValidationError;

#[derive(Clone)]
pub struct GradebookService {
    storage: Arc<dyn Storage>,
}

impl GradebookService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// 权限判定结果转换为业务错误，拒绝时记录日志
fn authorize(identity: &Identity, operation: &str, decision: Result<(), Denial>) -> ServiceResult<()> {
    decision.map_err(|denial| {
        info!(
            user_id = identity.id,
            role = %identity.role,
            operation,
            "拒绝访问: {denial}"
        );
        ServiceError::Denied(denial)
    })
}

/// 校验结果转换为业务错误，失败时记录日志
fn validated<T>(operation: &str, result: Result<T, ValidationError>) -> ServiceResult<T> {
    result.map_err(|err| {
        info!(operation, "校验未通过: {err}");
        ServiceError::Validation(err)
    })
}

/// 存储错误记录后原样上抛
fn storage_failure(operation: &'static str) -> impl FnOnce(GradebookError) -> ServiceError {
    move |err| {
        error!(operation, "存储操作失败: {}", err.format_simple());
        ServiceError::Storage(err)
    }
}
