// ==========================================
// 缺陷分派系统 - 缺陷导入器实现
// ==========================================
// 导入流程:
// 1. 文件读取与解析（FileParser）
// 2. 字段映射与类型转换（FieldMapper）
// 3. 数据质量校验（DqValidator）
// 4. 写入缺陷积压（BugTree）
// ==========================================

use crate::config::{TimestampCheck, TriageConfigReader};
use crate::domain::BugTree;
use crate::importer::bug_loader_trait::{
    BugLoader, FileParser, ImportOutcome, ImportSummary, RawRecord,
};
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub struct BugImporter<P: FileParser = UniversalFileParser> {
    parser: P,
    mapper: FieldMapper,
    skip_invalid_rows: bool,
    timestamp_check: TimestampCheck,
}

impl BugImporter<UniversalFileParser> {
    /// 按配置创建导入器（按扩展名自动选择解析器）
    pub fn from_config<C: TriageConfigReader + ?Sized>(config: &C) -> Self {
        Self::with_parser(UniversalFileParser, config)
    }
}

impl<P: FileParser> BugImporter<P> {
    /// 使用指定解析器创建导入器
    pub fn with_parser<C: TriageConfigReader + ?Sized>(parser: P, config: &C) -> Self {
        Self {
            parser,
            mapper: FieldMapper,
            skip_invalid_rows: config.skip_invalid_rows(),
            timestamp_check: config.timestamp_check(),
        }
    }

    /// 从已解析的原始记录构建缺陷积压
    ///
    /// # 参数
    /// - source: 数据来源描述（写入汇总）
    /// - records: 原始记录
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 缺陷积压 + 导入汇总
    /// - Err: 未开启跳过时, 遇到的第一条记录级错误
    pub fn import_records(
        &self,
        source: &str,
        records: Vec<RawRecord>,
    ) -> ImportResult<ImportOutcome> {
        let mut backlog = BugTree::default();
        let mut validator = DqValidator::new(self.timestamp_check);
        let mut summary = ImportSummary {
            source: source.to_string(),
            total_rows: records.len(),
            ..ImportSummary::default()
        };

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;

            let checked = self.mapper.map_to_bug(row, record).and_then(|bug| {
                let warning = validator.validate(row, &bug)?;
                Ok((bug, warning))
            });

            match checked {
                Ok((bug, warning)) => {
                    if let Some(violation) = warning {
                        warn!(row, bug_id = %bug.id, "{}", violation.message);
                        summary.warnings.push(violation);
                    }
                    backlog.insert(bug);
                    summary.imported += 1;
                }
                Err(e) if self.skip_invalid_rows && e.is_row_level() => {
                    warn!(row, error = %e, "跳过无效记录");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            source = %summary.source,
            total_rows = summary.total_rows,
            imported = summary.imported,
            skipped = summary.skipped,
            warnings = summary.warnings.len(),
            "缺陷导入完成"
        );

        Ok(ImportOutcome { backlog, summary })
    }
}

impl<P: FileParser> BugLoader for BugImporter<P> {
    #[instrument(skip(self), fields(file = %file_path.display()))]
    fn load(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        debug!("阶段 0: 文件读取与解析");
        let records = self.parser.parse_to_raw_records(file_path)?;
        debug!(records = records.len(), "文件解析完成");

        self.import_records(&file_path.display().to_string(), records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriageConfig;
    use crate::domain::Severity;
    use crate::importer::error::ImportError;

    fn record(id: &str, impact: &str, created: &str) -> RawRecord {
        RawRecord::from([
            ("id".to_string(), id.to_string()),
            ("description".to_string(), format!("bug {}", id)),
            ("impact".to_string(), impact.to_string()),
            ("created".to_string(), created.to_string()),
        ])
    }

    fn importer(skip_invalid_rows: bool) -> BugImporter {
        let config = TriageConfig {
            skip_invalid_rows,
            ..TriageConfig::default()
        };
        BugImporter::from_config(&config)
    }

    #[test]
    fn test_import_orders_backlog() {
        let records = vec![
            record("L1", "low", "2024-01-01"),
            record("H1", "high", "2024-03-01"),
            record("M1", "medium", "2024-02-01"),
            record("H0", "high", "2024-01-15"),
        ];

        let outcome = importer(false).import_records("memory", records).unwrap();

        let ids: Vec<&str> = outcome.backlog.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["H0", "H1", "M1", "L1"]);
        assert_eq!(outcome.summary.imported, 4);
        assert_eq!(outcome.summary.skipped, 0);
    }

    #[test]
    fn test_invalid_row_aborts_by_default() {
        let records = vec![
            record("B1", "high", "2024-01-01"),
            record("B2", "urgent", "2024-01-01"),
        ];
        let err = importer(false).import_records("memory", records).unwrap_err();
        assert!(matches!(err, ImportError::UnknownSeverity { row: 2, .. }));
    }

    #[test]
    fn test_invalid_rows_skipped_when_enabled() {
        let records = vec![
            record("B1", "high", "2024-01-01"),
            record("B2", "urgent", "2024-01-01"),
            record("B1", "low", "2024-01-02"),
            record("B3", "low", "2024-01-03"),
        ];
        let outcome = importer(true).import_records("memory", records).unwrap();
        assert_eq!(outcome.summary.total_rows, 4);
        assert_eq!(outcome.summary.imported, 2);
        assert_eq!(outcome.summary.skipped, 2);
        assert_eq!(outcome.backlog.len(), 2);
    }

    #[test]
    fn test_timestamp_warning_recorded() {
        let records = vec![record("B1", "medium", "Jan 5th")];
        let outcome = importer(false).import_records("memory", records).unwrap();
        assert_eq!(outcome.summary.warnings.len(), 1);
        assert_eq!(outcome.backlog.first().map(|b| b.severity), Some(Severity::Medium));
    }

    #[test]
    fn test_missing_file_is_error_even_when_skipping() {
        let result = importer(true).load(Path::new("/nonexistent/bugs.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
