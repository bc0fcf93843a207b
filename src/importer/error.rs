// ==========================================
// 缺陷分派系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.json/.xml/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("XML 解析失败: {0}")]
    XmlParseError(String),

    // ===== 数据映射错误 =====
    #[error("字段映射失败 (记录 {row}): {message}")]
    FieldMappingError { row: usize, message: String },

    #[error("严重度无法识别 (记录 {row}): {value}（仅支持 high/medium/low）")]
    UnknownSeverity { row: usize, value: String },

    // ===== 数据质量错误 =====
    #[error("主键缺失 (记录 {0}): id 为空")]
    PrimaryKeyMissing(usize),

    #[error("缺陷 id 重复 (记录 {row}): {id}")]
    DuplicateId { row: usize, id: String },

    #[error("创建时间格式错误 (记录 {row}): 期望 YYYY-MM-DD[THH:MM:SS]，实际 {value}")]
    TimestampFormat { row: usize, value: String },
}

impl ImportError {
    /// 是否为单条记录级错误（可按配置跳过该行）
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ImportError::FieldMappingError { .. }
                | ImportError::UnknownSeverity { .. }
                | ImportError::PrimaryKeyMissing(_)
                | ImportError::DuplicateId { .. }
                | ImportError::TimestampFormat { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ImportError {
    fn from(err: quick_xml::Error) -> Self {
        ImportError::XmlParseError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
