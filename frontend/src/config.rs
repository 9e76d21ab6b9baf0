//! 运行时配置模块
//!
//! 配置来源（优先级从低到高）：
//! 1. 内置默认值
//! 2. 编译期环境变量（`EXPENSE_MANAGER_*`）
//! 3. `index.html` 中的 `<script id="app-config" type="application/json">` 配置块

use leptos::prelude::*;
use log::Level;
use serde::Deserialize;
use std::str::FromStr;

/// 配置块的 DOM 元素 ID
pub const CONFIG_ELEMENT_ID: &str = "app-config";

const DEFAULT_APP_NAME: &str = "Expense Manager";
const DEFAULT_LOADING_MESSAGE: &str = "Loading your financial dashboard...";
const DEFAULT_TOKEN_STORAGE_KEY: &str = "expense_manager_token";
const DEFAULT_LOG_LEVEL: &str = "info";

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置块解析失败: {0}")]
    Parse(#[from] serde_json_wasm::de::Error),
    #[error("未知日志级别: {0}")]
    LogLevel(String),
    #[error("日志初始化失败: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 应用名称（加载屏标题与文档标题）
    pub app_name: String,
    /// 认证解析期间显示的提示
    pub loading_message: String,
    /// 会话令牌在 LocalStorage 中的键
    pub token_storage_key: String,
    /// 控制台日志级别
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            token_storage_key: option_env!("EXPENSE_MANAGER_TOKEN_KEY")
                .unwrap_or(DEFAULT_TOKEN_STORAGE_KEY)
                .to_string(),
            log_level: option_env!("EXPENSE_MANAGER_LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文本解析配置，缺失字段使用默认值
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json_wasm::from_str(json)?;
        config.level()?;
        Ok(config)
    }

    /// 从页面配置块加载
    ///
    /// 配置块不存在时使用默认值；配置块无效时返回错误，由调用方决定回退。
    pub fn load() -> Result<Self, ConfigError> {
        let block = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match block {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }

    /// 解析日志级别
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// 按配置的级别安装浏览器控制台日志
    ///
    /// 级别无效时不安装日志器。
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let level = self.level()?;
        console_log::init_with_level(level)?;
        Ok(())
    }
}

/// 从 Context 获取应用配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}
