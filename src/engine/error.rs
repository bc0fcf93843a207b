// ==========================================
// 缺陷分派系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 前置条件不满足时整体失败, 不输出不完整的任务包
// ==========================================

use crate::domain::Severity;
use thiserror::Error;

/// 分派引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// 某一严重度的缺陷数量不足以给每位开发者各分一个
    #[error("{severity} 级缺陷不足: 需要 {required} 个, 现有 {available} 个")]
    InsufficientBugs {
        severity: Severity,
        required: usize,
        available: usize,
    },

    /// 刚遍历到的缺陷在删除时找不到（容器与遍历结果不一致）
    #[error("积压容器不一致: 无法删除缺陷 {bug_id}")]
    BacklogOutOfSync { bug_id: String },
}

/// Result 类型别名
pub type AssignResult<T> = Result<T, AssignError>;
