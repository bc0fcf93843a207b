// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use pest_control::{Bug, BugTree, Severity};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==========================================
// Bug 构建器
// ==========================================

pub struct BugBuilder {
    id: String,
    description: String,
    severity: Severity,
    created: String,
}

impl BugBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            description: format!("{} 描述", id),
            severity: Severity::Low,
            created: "2024-01-01".to_string(),
        }
    }

    pub fn high(mut self) -> Self {
        self.severity = Severity::High;
        self
    }

    pub fn medium(mut self) -> Self {
        self.severity = Severity::Medium;
        self
    }

    pub fn low(mut self) -> Self {
        self.severity = Severity::Low;
        self
    }

    pub fn created(mut self, created: &str) -> Self {
        self.created = created.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn build(self) -> Bug {
        Bug::new(self.id, self.description, self.severity, self.created)
    }
}

// ==========================================
// 积压构建
// ==========================================

/// 按给定顺序插入, 构建缺陷积压
pub fn backlog_of(bugs: impl IntoIterator<Item = Bug>) -> BugTree {
    let mut backlog = BugTree::default();
    backlog.extend(bugs);
    backlog
}

/// 简写: (id, 严重度, 创建时间)
pub fn bugs(rows: &[(&str, Severity, &str)]) -> Vec<Bug> {
    rows.iter()
        .map(|(id, severity, created)| Bug::new(*id, format!("{} 描述", id), *severity, *created))
        .collect()
}

/// 积压中序遍历的 id 序列
pub fn ids(backlog: &BugTree) -> Vec<String> {
    backlog.iter().map(|bug| bug.id.clone()).collect()
}

// ==========================================
// 文件工具
// ==========================================

/// 在临时目录中写出缺陷 CSV（表头: id,description,impact,created）
pub fn write_backlog_csv(dir: &TempDir, name: &str, bugs: &[Bug]) -> PathBuf {
    let path = dir.path().join(name);
    let mut writer = csv::Writer::from_path(&path).expect("创建 CSV 失败");
    writer
        .write_record(["id", "description", "impact", "created"])
        .expect("写表头失败");
    for bug in bugs {
        writer
            .write_record([
                bug.id.as_str(),
                bug.description.as_str(),
                bug.severity.as_str(),
                bug.created.as_str(),
            ])
            .expect("写记录失败");
    }
    writer.flush().expect("刷新 CSV 失败");
    path
}

/// 在临时目录中写出任意文本文件
pub fn write_text(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("写文件失败");
    path
}

pub fn read_text(path: &Path) -> String {
    fs::read_to_string(path).expect("读文件失败")
}

// ==========================================
// 标准场景
// ==========================================

/// 场景 A: 1 位开发者, 分派后剩余 H2
pub fn scenario_a() -> Vec<Bug> {
    bugs(&[
        ("H1", Severity::High, "2024-01-01"),
        ("H2", Severity::High, "2024-02-01"),
        ("M1", Severity::Medium, "2024-01-05"),
        ("L1", Severity::Low, "2024-01-10"),
    ])
}

/// 场景 B: 2 高 / 1 中 / 1 低, 不足以分派 2 位开发者
pub fn scenario_b() -> Vec<Bug> {
    bugs(&[
        ("H1", Severity::High, "2024-01-01"),
        ("H2", Severity::High, "2024-01-02"),
        ("M1", Severity::Medium, "2024-01-03"),
        ("L1", Severity::Low, "2024-01-04"),
    ])
}

/// 混合积压: 乱序插入, 2 位开发者分派后剩余 H3 / L2
pub fn mixed_backlog() -> Vec<Bug> {
    bugs(&[
        ("H2", Severity::High, "2024-03-02"),
        ("L1", Severity::Low, "2024-01-09"),
        ("M1", Severity::Medium, "2024-02-01"),
        ("H1", Severity::High, "2024-01-15"),
        ("L2", Severity::Low, "2024-02-20"),
        ("M2", Severity::Medium, "2024-02-11"),
        ("H3", Severity::High, "2024-04-01"),
        ("L3", Severity::Low, "2024-01-01"),
    ])
}
