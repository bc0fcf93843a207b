// ==========================================
// 缺陷分派系统 - 导入层
// ==========================================
// 职责: 外部缺陷数据导入, 生成缺陷积压
// 支持: CSV, JSON, Excel
// ==========================================

// 模块声明
pub mod bug_importer;
pub mod bug_loader_trait;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use bug_importer::BugImporter;
pub use dq_validator::{is_sortable_timestamp, DqValidator};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser, XmlParser};

// 重导出 Trait 接口
pub use bug_loader_trait::{
    BugLoader, DqViolation, FileParser, ImportOutcome, ImportSummary, RawRecord,
};
