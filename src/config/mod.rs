// ==========================================
// 缺陷分派系统 - 配置层
// ==========================================
// 职责: 运行配置管理, 支持多级覆写
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod config_manager;
pub mod triage_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult, ConfigSource};
pub use triage_config::{ReportFormat, TimestampCheck, TriageConfig, TriageConfigReader};
