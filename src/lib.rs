//! Gradebook - 按角色授权的课程成绩簿后端服务
//!
//! 教师创建作业并评分，学生查看自己的成绩，统计报告按需计算。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `policy`: 访问控制策略（纯函数）
//! - `reports`: 成绩统计
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务编排层
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数
//! - `validation`: 评分与作业写入前校验

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policy;
pub mod reports;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;
