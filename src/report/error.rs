// ==========================================
// 缺陷分派系统 - 报告模块错误类型
// ==========================================

use thiserror::Error;

/// 报告输出错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报告文件写入失败 ({path}): {message}")]
    WriteFailed { path: String, message: String },

    #[error("报告序列化失败: {0}")]
    SerializeFailed(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::SerializeFailed(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::SerializeFailed(err.to_string())
    }
}

impl From<quick_xml::Error> for ReportError {
    fn from(err: quick_xml::Error) -> Self {
        ReportError::SerializeFailed(err.to_string())
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
