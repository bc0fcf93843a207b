// ==========================================
// 缺陷分派系统 - 分派报告模型
// ==========================================
// 内容:
// - 每位开发者的三个缺陷（按 高/中/低 顺序, 标注严重度）
// - 剩余缺陷（按分派顺序: 严重度降序, 创建时间升序）
// ==========================================

use crate::collections::SequentialList;
use crate::domain::{Bug, BugTree, Developer, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 报告中的单个缺陷条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugEntry {
    pub id: String,
    pub description: String,
    pub impact: Severity,
    pub created: String,
}

impl From<&Bug> for BugEntry {
    fn from(bug: &Bug) -> Self {
        Self {
            id: bug.id.clone(),
            description: bug.description.clone(),
            impact: bug.severity,
            created: bug.created.clone(),
        }
    }
}

/// 报告中的开发者条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperEntry {
    pub id: usize,
    pub bugs: Vec<BugEntry>,
}

impl From<&Developer> for DeveloperEntry {
    fn from(developer: &Developer) -> Self {
        Self {
            id: developer.id,
            bugs: developer
                .bundle
                .iter()
                .map(|(_, bug)| BugEntry::from(bug))
                .collect(),
        }
    }
}

// ==========================================
// TriageReport - 分派报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageReport {
    /// 本次运行标识
    pub run_id: Uuid,

    /// 生成时间 (UTC)
    pub generated_at: DateTime<Utc>,

    /// 开发者数量
    pub developer_count: usize,

    /// 分派结果（按开发者编号）
    pub developers: Vec<DeveloperEntry>,

    /// 剩余未分派缺陷（按分派顺序）
    pub remaining: Vec<BugEntry>,
}

impl TriageReport {
    /// 由分派结果与剩余积压构建报告
    pub fn build(developers: &SequentialList<Developer>, residual: &BugTree) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            developer_count: developers.len(),
            developers: developers.iter().map(DeveloperEntry::from).collect(),
            remaining: residual.iter().map(BugEntry::from).collect(),
        }
    }

    /// 已分派缺陷总数
    pub fn assigned_count(&self) -> usize {
        self.developers.iter().map(|d| d.bugs.len()).sum()
    }
}
