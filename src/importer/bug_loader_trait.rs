// ==========================================
// 缺陷分派系统 - 缺陷导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::BugTree;
use crate::importer::error::ImportResult;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// 原始记录: 表头 -> 单元格文本
pub type RawRecord = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser, JsonParser
pub trait FileParser {
    /// 解析文件为原始记录列表（跳过完全空白的行）
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// BugLoader Trait
// ==========================================
// 用途: 导入主接口, 产出按分派顺序组织的缺陷积压
// 实现者: BugImporter
pub trait BugLoader {
    /// 从文件加载缺陷
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 缺陷积压 + 导入汇总
    /// - Err: 文件不可读、格式错误, 或（未开启跳过时）记录级错误
    fn load(&self, file_path: &Path) -> ImportResult<ImportOutcome>;
}

/// 数据质量告警（不阻断导入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DqViolation {
    pub row: usize,
    pub bug_id: Option<String>,
    pub message: String,
}

/// 导入汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub source: String,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub warnings: Vec<DqViolation>,
}

/// 导入结果
#[derive(Debug)]
pub struct ImportOutcome {
    pub backlog: BugTree,
    pub summary: ImportSummary,
}
