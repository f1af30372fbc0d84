//! 核心模块 - 运行配置与业务规则
//!
//! # 模块结构
//!
//! - [`Config`] - 进程配置 (环境变量)
//! - [`RulesConfig`] - 等级表、积分规则、服务组合规则

pub mod config;
pub mod rules;

pub use config::Config;
pub use rules::*;
