// ==========================================
// 缺陷分派系统 - 运行配置
// ==========================================
// 职责: 定义配置项及其默认值, 以及只读接口
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ==========================================
// 报告格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
    Xml,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "xml" => Ok(ReportFormat::Xml),
            other => Err(format!("不支持的报告格式: {}（仅支持 json/csv/xml）", other)),
        }
    }
}

// ==========================================
// 时间戳格式检查级别
// ==========================================
// Off: 不检查; Warn: 记录告警但保留; Strict: 拒绝该行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampCheck {
    Off,
    #[default]
    Warn,
    Strict,
}

impl FromStr for TimestampCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(TimestampCheck::Off),
            "warn" => Ok(TimestampCheck::Warn),
            "strict" => Ok(TimestampCheck::Strict),
            other => Err(format!("不支持的时间戳检查级别: {}（仅支持 off/warn/strict）", other)),
        }
    }
}

// ==========================================
// TriageConfig - 配置项全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// 报告输出路径
    pub report_path: PathBuf,

    /// 报告格式
    pub report_format: ReportFormat,

    /// 导入时跳过无法映射的行（否则整批失败）
    pub skip_invalid_rows: bool,

    /// 创建时间格式检查级别
    pub timestamp_check: TimestampCheck,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("report.json"),
            report_format: ReportFormat::Json,
            skip_invalid_rows: false,
            timestamp_check: TimestampCheck::Warn,
        }
    }
}

// ==========================================
// TriageConfigReader Trait
// ==========================================
// 用途: 导入层/编排层所需的只读配置接口
// 实现者: TriageConfig
pub trait TriageConfigReader {
    fn report_path(&self) -> &Path;

    fn report_format(&self) -> ReportFormat;

    fn skip_invalid_rows(&self) -> bool;

    fn timestamp_check(&self) -> TimestampCheck;
}

impl TriageConfigReader for TriageConfig {
    fn report_path(&self) -> &Path {
        &self.report_path
    }

    fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    fn skip_invalid_rows(&self) -> bool {
        self.skip_invalid_rows
    }

    fn timestamp_check(&self) -> TimestampCheck {
        self.timestamp_check
    }
}
