// ==========================================
// 缺陷分派系统 - 核心库
// ==========================================
// 流程: 导入缺陷 -> 按 严重度/创建时间 排序 -> 每位开发者分派 高/中/低 各一个
//       -> 输出分派结果与剩余缺陷
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 容器层 - 泛型有序容器与顺序列表
pub mod collections;

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分派规则与编排
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 报告层 - 结果输出
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 统一错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 容器
pub use collections::{Comparator, NaturalOrder, OrderedTree, SequentialList};

// 领域实体
pub use domain::{Bug, BugTree, Bundle, Developer, Severity, SeverityOrder};

// 引擎
pub use engine::{AssignError, BugAssigner, TierCounts, TriageOrchestrator, TriageSummary};

// 导入 / 报告 / 配置
pub use config::{ConfigManager, ReportFormat, TriageConfig};
pub use error::{TriageError, TriageResult};
pub use importer::{BugImporter, BugLoader, ImportError};
pub use report::{ReportWriter, TriageReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Pest Control 缺陷分派系统";
