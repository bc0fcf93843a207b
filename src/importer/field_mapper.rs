// ==========================================
// 缺陷分派系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射 + 类型转换
// 表头不区分大小写, 支持常见别名
// ==========================================

use crate::domain::{Bug, Severity};
use crate::importer::bug_loader_trait::RawRecord;
use crate::importer::error::{ImportError, ImportResult};

// 标准字段 → 可接受的表头别名
const ID_ALIASES: &[&str] = &["id", "bug_id", "bugid"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "desc", "summary"];
const SEVERITY_ALIASES: &[&str] = &["impact", "severity", "tier"];
const CREATED_ALIASES: &[&str] = &["created", "created_at", "date"];

pub struct FieldMapper;

impl FieldMapper {
    /// 将一条原始记录映射为缺陷
    ///
    /// # 参数
    /// - row: 记录序号（从 1 开始, 用于错误定位）
    /// - record: 原始记录
    pub fn map_to_bug(&self, row: usize, record: &RawRecord) -> ImportResult<Bug> {
        let id = self
            .get_string(record, ID_ALIASES)
            .ok_or(ImportError::PrimaryKeyMissing(row))?;

        let severity_raw =
            self.get_string(record, SEVERITY_ALIASES)
                .ok_or_else(|| ImportError::FieldMappingError {
                    row,
                    message: format!("缺少严重度字段（{}）", SEVERITY_ALIASES.join("/")),
                })?;
        let severity: Severity =
            severity_raw
                .parse()
                .map_err(|_| ImportError::UnknownSeverity {
                    row,
                    value: severity_raw.clone(),
                })?;

        let created =
            self.get_string(record, CREATED_ALIASES)
                .ok_or_else(|| ImportError::FieldMappingError {
                    row,
                    message: format!("缺少创建时间字段（{}）", CREATED_ALIASES.join("/")),
                })?;

        // 描述允许为空
        let description = self
            .get_string(record, DESCRIPTION_ALIASES)
            .unwrap_or_default();

        Ok(Bug::new(id, description, severity, created))
    }

    /// 按别名取非空字段值
    fn get_string(&self, record: &RawRecord, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            record
                .iter()
                .find(|(header, _)| header.trim().eq_ignore_ascii_case(alias))
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    }
}
