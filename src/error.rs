// ==========================================
// 缺陷分派系统 - 统一错误类型
// ==========================================
// 职责: 汇总各层错误, 供入口层统一处理退出码
// ==========================================

use crate::config::ConfigError;
use crate::engine::AssignError;
use crate::importer::ImportError;
use crate::report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("分派失败: {0}")]
    Assign(#[from] AssignError),

    #[error("报告输出失败: {0}")]
    Report(#[from] ReportError),
}

/// Result 类型别名
pub type TriageResult<T> = Result<T, TriageError>;
