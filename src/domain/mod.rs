// ==========================================
// 缺陷分派系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型与排序规则
// 红线: 不含文件读写逻辑, 不含分派逻辑
// ==========================================

pub mod bug;
pub mod developer;
pub mod types;

// 重导出核心类型
pub use bug::{Bug, BugTree, SeverityOrder};
pub use developer::{Bundle, Developer};
pub use types::Severity;
