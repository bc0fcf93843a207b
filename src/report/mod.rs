// ==========================================
// 缺陷分派系统 - 报告层
// ==========================================
// 职责: 将分派结果与剩余积压输出为结构化报告
// ==========================================

pub mod error;
pub mod model;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use model::{BugEntry, DeveloperEntry, TriageReport};
pub use writer::{
    writer_for, CsvReportWriter, JsonReportWriter, ReportWriter, XmlReportWriter, CSV_HEADER,
};
