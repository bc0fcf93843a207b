// ==========================================
// 缺陷分派系统 - 配置管理器
// ==========================================
// 职责: 配置加载与多级覆写
// 优先级（低 -> 高）:
// 1) 内置默认值
// 2) 配置文件（显式路径, 或 <config_dir>/pest-control/config.json）
// 3) 环境变量
// 4) 命令行参数（由入口层直接改写 TriageConfig）
// ==========================================

use crate::config::triage_config::TriageConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 环境变量键
pub mod config_keys {
    pub const REPORT_PATH: &str = "PEST_CONTROL_REPORT_PATH";
    pub const REPORT_FORMAT: &str = "PEST_CONTROL_REPORT_FORMAT";
    pub const SKIP_INVALID: &str = "PEST_CONTROL_SKIP_INVALID";
    pub const TIMESTAMP_CHECK: &str = "PEST_CONTROL_TIMESTAMP_CHECK";
}

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置来源（用于日志与诊断）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TriageConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 显式指定的配置文件; 指定但不存在时报错
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let mut manager = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::defaults(),
            },
        };

        manager.apply_overrides(|key| std::env::var(key).ok())?;

        info!(source = ?manager.source, config = ?manager.config, "配置加载完成");
        Ok(manager)
    }

    /// 仅使用内置默认值
    pub fn defaults() -> Self {
        Self {
            config: TriageConfig::default(),
            source: ConfigSource::Defaults,
        }
    }

    /// 从 JSON 配置文件加载（缺省字段使用默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: TriageConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "已读取配置文件");
        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// 默认配置文件位置: <config_dir>/pest-control/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pest-control").join("config.json"))
    }

    /// 应用覆写
    ///
    /// # 参数
    /// - lookup: 按键取值（生产环境为环境变量, 测试可注入）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(config_keys::REPORT_PATH) {
            if !value.trim().is_empty() {
                self.config.report_path = PathBuf::from(value.trim());
            }
        }

        if let Some(value) = lookup(config_keys::REPORT_FORMAT) {
            self.config.report_format =
                value
                    .parse()
                    .map_err(|message| ConfigError::InvalidValue {
                        key: config_keys::REPORT_FORMAT.to_string(),
                        value: value.clone(),
                        message,
                    })?;
        }

        if let Some(value) = lookup(config_keys::SKIP_INVALID) {
            self.config.skip_invalid_rows = is_true(&value);
        }

        if let Some(value) = lookup(config_keys::TIMESTAMP_CHECK) {
            self.config.timestamp_check =
                value
                    .parse()
                    .map_err(|message| ConfigError::InvalidValue {
                        key: config_keys::TIMESTAMP_CHECK.to_string(),
                        value: value.clone(),
                        message,
                    })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TriageConfig {
        &mut self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn into_config(self) -> TriageConfig {
        self.config
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
