// ==========================================
// 缺陷分派系统 - 开发者与任务包
// ==========================================
// 红线: 每个开发者恰好三个缺陷, 高/中/低各一个
// ==========================================

use crate::domain::bug::Bug;
use crate::domain::types::Severity;
use serde::{Deserialize, Serialize};

// ==========================================
// Bundle - 任务包
// ==========================================
// 三个固定槽位, 元数是领域不变式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub high: Bug,
    pub medium: Bug,
    pub low: Bug,
}

impl Bundle {
    pub fn new(high: Bug, medium: Bug, low: Bug) -> Self {
        Self { high, medium, low }
    }

    /// 按严重度取槽位
    pub fn get(&self, severity: Severity) -> &Bug {
        match severity {
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }

    /// 按 高 -> 中 -> 低 顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &Bug)> + '_ {
        Severity::ALL
            .into_iter()
            .map(move |severity| (severity, self.get(severity)))
    }

    pub fn contains_id(&self, bug_id: &str) -> bool {
        self.iter().any(|(_, bug)| bug.id == bug_id)
    }
}

// ==========================================
// Developer - 开发者分派结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub id: usize, // 从 1 开始的顺序编号
    pub bundle: Bundle,
}

impl Developer {
    pub fn new(id: usize, bundle: Bundle) -> Self {
        Self { id, bundle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> Bundle {
        Bundle::new(
            Bug::new("H1", "", Severity::High, "2024-01-01"),
            Bug::new("M1", "", Severity::Medium, "2024-01-02"),
            Bug::new("L1", "", Severity::Low, "2024-01-03"),
        )
    }

    #[test]
    fn test_bundle_iterates_high_to_low() {
        let bundle = sample_bundle();
        let order: Vec<(Severity, &str)> =
            bundle.iter().map(|(s, b)| (s, b.id.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (Severity::High, "H1"),
                (Severity::Medium, "M1"),
                (Severity::Low, "L1")
            ]
        );
    }

    #[test]
    fn test_bundle_lookup() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get(Severity::Medium).id, "M1");
        assert!(bundle.contains_id("L1"));
        assert!(!bundle.contains_id("X9"));
    }
}
