use std::fmt;

use super::Identity;
use crate::models::assignments::entities::Assignment;
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::GradeListQuery;
use crate::models::users::entities::UserRole;

/// 资源种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Assignment,
    Grade,
    Report,
    User,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Assignment => write!(f, "assignment"),
            ResourceKind::Grade => write!(f, "grade"),
            ResourceKind::Report => write!(f, "report"),
            ResourceKind::User => write!(f, "user"),
        }
    }
}

/// 授权判定的目标：集合（列表/创建）或具体记录
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Assignments,
    Assignment(&'a Assignment),
    Grades,
    Grade(&'a Grade),
    Reports,
    Users,
}

impl Target<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::Assignments | Target::Assignment(_) => ResourceKind::Assignment,
            Target::Grades | Target::Grade(_) => ResourceKind::Grade,
            Target::Reports => ResourceKind::Report,
            Target::Users => ResourceKind::User,
        }
    }
}

/// 拒绝原因
///
/// 对外统一表现为 Forbidden，内部区分便于日志与测试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// 角色不符
    RoleMismatch { required: UserRole },
    /// 不是作业的创建者
    NotOwner,
    /// 学生访问他人的评分
    NotSubject,
    /// 该资源不可通过业务层写入
    ReadOnly(ResourceKind),
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::RoleMismatch { required } => write!(f, "需要 {required} 角色"),
            Denial::NotOwner => write!(f, "只能修改自己创建的作业"),
            Denial::NotSubject => write!(f, "只能查看自己的评分"),
            Denial::ReadOnly(kind) => write!(f, "{kind} 资源不可写"),
        }
    }
}

fn require_teacher(identity: &Identity) -> Result<(), Denial> {
    if identity.is_teacher() {
        Ok(())
    } else {
        Err(Denial::RoleMismatch {
            required: UserRole::Teacher,
        })
    }
}

/// 作业归属判定：只比较调用方 ID 与创建者 ID
pub fn owns(identity: &Identity, created_by: i64) -> bool {
    identity.id == created_by
}

/// 读权限判定
pub fn check_read(identity: &Identity, target: Target<'_>) -> Result<(), Denial> {
    match target {
        // 任何已登录用户都可以查看作业
        Target::Assignments | Target::Assignment(_) => Ok(()),
        // 列表总是允许，学生的结果集由 scope_grade_query 限定
        Target::Grades => Ok(()),
        Target::Grade(grade) => match identity.role {
            UserRole::Teacher => Ok(()),
            UserRole::Student if grade.student_id == identity.id => Ok(()),
            UserRole::Student => Err(Denial::NotSubject),
        },
        Target::Reports => require_teacher(identity),
        Target::Users => Ok(()),
    }
}

/// 写权限判定
///
/// 作业需要创建者本人；评分任何教师都可以写。
pub fn check_write(identity: &Identity, target: Target<'_>) -> Result<(), Denial> {
    match target {
        Target::Assignments => require_teacher(identity),
        Target::Assignment(assignment) => {
            require_teacher(identity)?;
            if owns(identity, assignment.created_by) {
                Ok(())
            } else {
                Err(Denial::NotOwner)
            }
        }
        Target::Grades | Target::Grade(_) => require_teacher(identity),
        Target::Reports | Target::Users => Err(Denial::ReadOnly(target.kind())),
    }
}

pub fn can_read(identity: &Identity, target: Target<'_>) -> bool {
    check_read(identity, target).is_ok()
}

pub fn can_write(identity: &Identity, target: Target<'_>) -> bool {
    check_write(identity, target).is_ok()
}

/// 在查询到达存储层之前改写评分过滤条件
///
/// 学生只能看到自己的评分，忽略请求中的 student_id；教师的过滤条件原样保留。
pub fn scope_grade_query(identity: &Identity, requested: GradeListQuery) -> GradeListQuery {
    match identity.role {
        UserRole::Student => GradeListQuery {
            assignment_id: requested.assignment_id,
            student_id: Some(identity.id),
        },
        UserRole::Teacher => requested,
    }
}
