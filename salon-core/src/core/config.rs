use std::path::PathBuf;

use shared::error::AppResult;

use super::RulesConfig;

/// 运行配置 - 规则引擎宿主进程的配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | 是否输出 JSON 日志 |
/// | LOG_DIR | (无) | 日志目录，未设置时只输出到控制台 |
/// | SALON_RULES_PATH | (无) | 会员/组合规则 JSON 文件，未设置时使用内置默认规则 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// SALON_RULES_PATH=/etc/salon/rules.json LOG_JSON=true ./salon
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 日志级别 (trace | debug | info | warn | error)
    pub log_level: String,
    /// JSON 格式日志 (生产环境)
    pub log_json: bool,
    /// 日志目录
    pub log_dir: Option<PathBuf>,
    /// 规则文件路径
    pub rules_path: Option<PathBuf>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 先读取 `.env` 文件 (如存在)，未设置的项使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            rules_path: std::env::var("SALON_RULES_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用指定规则文件覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_rules_path(rules_path: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.rules_path = Some(rules_path.into());
        config
    }

    /// 加载业务规则
    ///
    /// 未配置规则文件时返回内置默认规则；文件存在但无效时返回错误
    pub fn load_rules(&self) -> AppResult<RulesConfig> {
        match &self.rules_path {
            Some(path) => RulesConfig::from_file(path),
            None => {
                tracing::info!("No rules file configured, using built-in rules");
                Ok(RulesConfig::default())
            }
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
