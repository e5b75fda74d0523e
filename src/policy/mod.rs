//! 访问控制策略
//!
//! 纯函数实现，不依赖存储或 Web 框架：
//! - `identity`：已认证的调用方（ID + 角色）
//! - `access`：读/写授权判定与评分查询改写

pub mod access;
pub mod identity;

pub use access::{
    Denial, ResourceKind, Target, can_read, can_write, check_read, check_write, owns,
    scope_grade_query,
};
pub use identity::Identity;
