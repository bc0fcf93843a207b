// ==========================================
// 缺陷分派系统 - 数据质量校验器实现
// ==========================================
// 职责: 主键唯一性 + 创建时间格式校验
// 规则:
// - id 重复: 错误（同批次内 id 必须唯一）
// - 创建时间不可按字典序比较: 按配置 忽略 / 告警 / 拒绝
// ==========================================

use crate::config::TimestampCheck;
use crate::domain::Bug;
use crate::importer::bug_loader_trait::DqViolation;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

pub struct DqValidator {
    timestamp_check: TimestampCheck,
    seen_ids: HashSet<String>,
}

impl DqValidator {
    pub fn new(timestamp_check: TimestampCheck) -> Self {
        Self {
            timestamp_check,
            seen_ids: HashSet::new(),
        }
    }

    /// 校验一条已映射的缺陷
    ///
    /// # 返回
    /// - Ok(None): 通过
    /// - Ok(Some(violation)): 告警, 缺陷仍可导入
    /// - Err: 该记录不可导入
    pub fn validate(&mut self, row: usize, bug: &Bug) -> ImportResult<Option<DqViolation>> {
        if self.seen_ids.contains(&bug.id) {
            return Err(ImportError::DuplicateId {
                row,
                id: bug.id.clone(),
            });
        }

        let mut warning = None;
        if self.timestamp_check != TimestampCheck::Off && !is_sortable_timestamp(&bug.created) {
            if self.timestamp_check == TimestampCheck::Strict {
                return Err(ImportError::TimestampFormat {
                    row,
                    value: bug.created.clone(),
                });
            }
            warning = Some(DqViolation {
                row,
                bug_id: Some(bug.id.clone()),
                message: format!("创建时间不是标准格式, 排序按字典序进行: {}", bug.created),
            });
        }

        self.seen_ids.insert(bug.id.clone());
        Ok(warning)
    }
}

/// 创建时间是否为可按字典序排序的 ISO 形式
///
/// 接受: YYYY-MM-DD / YYYY-MM-DDTHH:MM:SS[.f] / YYYY-MM-DD HH:MM:SS[.f] / RFC 3339
pub fn is_sortable_timestamp(value: &str) -> bool {
    let v = value.trim();

    // chrono 接受不补零的月日, 这里先卡住固定宽度的日期前缀
    let bytes = v.as_bytes();
    let padded_date = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit);
    if !padded_date {
        return false;
    }

    NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || DateTime::parse_from_rfc3339(v).is_ok()
}
