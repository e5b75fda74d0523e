//! 评分与作业的写入前校验
//!
//! 纯函数，不访问存储；调用方负责先查出同一 (作业, 学生) 下已有的评分。

use std::fmt;

use crate::models::grades::entities::Grade;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 该学生在该作业下已有评分
    DuplicateGrade,
    /// 分数不在 [0, max_score] 内
    ScoreOutOfRange { max_score: f64 },
    /// 作业最高分必须大于 0
    NonPositiveMaxScore,
    /// 请求字段不合法（邮箱、密码、角色等）
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid_field<T: Into<String>>(field: &'static str, reason: T) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateGrade => write!(f, "该学生在此作业下已有评分"),
            ValidationError::ScoreOutOfRange { max_score } => {
                write!(f, "分数必须在 0 到 {max_score} 之间")
            }
            ValidationError::NonPositiveMaxScore => write!(f, "作业最高分必须大于 0"),
            ValidationError::InvalidField { field, reason } => write!(f, "{field}: {reason}"),
        }
    }
}

/// 评分写入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeWrite {
    Create,
    /// 修改指定 ID 的评分
    Update(i64),
}

/// 校验分数范围，NaN 与无穷大同样视为越界
pub fn check_score(max_score: f64, score: f64) -> Result<(), ValidationError> {
    if score.is_finite() && score >= 0.0 && score <= max_score {
        Ok(())
    } else {
        Err(ValidationError::ScoreOutOfRange { max_score })
    }
}

/// 校验一次评分写入
///
/// - `existing`：同一 (作业, 学生) 已存在的评分
/// - `proposed`：新分数，更新时未提供分数则跳过范围检查
///
/// 先判重复，再判范围。
pub fn validate_grade(
    max_score: f64,
    existing: Option<&Grade>,
    proposed: Option<f64>,
    write: GradeWrite,
) -> Result<(), ValidationError> {
    if let Some(existing) = existing {
        let same_record = matches!(write, GradeWrite::Update(id) if id == existing.id);
        if !same_record {
            return Err(ValidationError::DuplicateGrade);
        }
    }

    match proposed {
        Some(score) => check_score(max_score, score),
        None => Ok(()),
    }
}

pub fn validate_max_score(max_score: f64) -> Result<(), ValidationError> {
    if max_score.is_finite() && max_score > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveMaxScore)
    }
}
