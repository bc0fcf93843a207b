// ==========================================
// 缺陷分派系统 - 缺陷领域模型
// ==========================================
// 用途: 导入层创建, 引擎层只读, 报告层输出
// 红线: 创建后不可变
// ==========================================

use crate::collections::{Comparator, OrderedTree};
use crate::domain::types::Severity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// Bug - 缺陷记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bug {
    pub id: String,          // 缺陷唯一标识
    pub description: String, // 描述
    #[serde(rename = "impact")]
    pub severity: Severity, // 严重度
    pub created: String,     // 创建时间（可按字典序比较的 ISO 字符串）
}

impl Bug {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        created: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity,
            created: created.into(),
        }
    }
}

// ==========================================
// SeverityOrder - 分派排序规则
// ==========================================
// 排序键:
// 1) 严重度降序 (High 在前)
// 2) 创建时间升序 (早创建在前)
// 两条记录比较相等 当且仅当 严重度与创建时间都相同; id 不参与比较
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityOrder;

impl Comparator<Bug> for SeverityOrder {
    fn compare(&self, a: &Bug, b: &Bug) -> Ordering {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then_with(|| a.created.cmp(&b.created))
    }
}

/// 缺陷积压（按分派顺序组织的有序容器）
pub type BugTree = OrderedTree<Bug, SeverityOrder>;
