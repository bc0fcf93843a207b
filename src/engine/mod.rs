// ==========================================
// 缺陷分派系统 - 引擎层
// ==========================================
// 职责: 分派规则与流程编排
// 红线: 引擎不读写文件, 输入输出经由导入层/报告层
// ==========================================

pub mod assigner;
pub mod error;
pub mod orchestrator;

// 重导出核心引擎
pub use assigner::{BugAssigner, TierCounts};
pub use error::{AssignError, AssignResult};
pub use orchestrator::{TriageOrchestrator, TriageSummary};
