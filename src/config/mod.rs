//! 配置管理
//!
//! 配置文件 -> 环境配置文件 -> `GRADEBOOK_*` 环境变量 -> 常用环境变量覆盖。

mod r#impl;
mod structs;

pub use structs::*;
