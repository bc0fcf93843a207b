// ==========================================
// 缺陷分派系统 - 引擎编排器
// ==========================================
// 用途: 串联 导入 -> 分派 -> 报告 三个阶段
// 红线: 任一阶段失败即整体失败, 不输出部分报告
// ==========================================

use crate::engine::assigner::BugAssigner;
use crate::error::TriageResult;
use crate::importer::{BugLoader, ImportSummary};
use crate::report::{ReportWriter, TriageReport};
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// TriageSummary - 运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct TriageSummary {
    pub import: ImportSummary,
    pub developers: usize,
    pub assigned_bugs: usize,
    pub remaining_bugs: usize,
    pub report: TriageReport,
}

// ==========================================
// TriageOrchestrator - 引擎编排器
// ==========================================
pub struct TriageOrchestrator<L, W>
where
    L: BugLoader,
    W: ReportWriter,
{
    loader: L,
    writer: W,
    assigner: BugAssigner,
}

impl<L, W> TriageOrchestrator<L, W>
where
    L: BugLoader,
    W: ReportWriter,
{
    pub fn new(loader: L, writer: W) -> Self {
        Self {
            loader,
            writer,
            assigner: BugAssigner::new(),
        }
    }

    /// 执行完整分派流程
    ///
    /// # 参数
    /// - developer_count: 开发者数量
    /// - input: 缺陷数据文件
    ///
    /// # 返回
    /// 运行结果（含已写出的报告）
    pub fn run(&self, developer_count: usize, input: &Path) -> TriageResult<TriageSummary> {
        info!(
            developer_count,
            input = %input.display(),
            target = %self.writer.target().display(),
            "开始执行缺陷分派流程"
        );

        // ==========================================
        // 步骤1: 导入缺陷
        // ==========================================
        debug!("步骤1: 导入缺陷");
        let outcome = self.loader.load(input)?;
        let mut backlog = outcome.backlog;

        // ==========================================
        // 步骤2: 分派
        // ==========================================
        debug!("步骤2: 分派缺陷");
        let developers = self.assigner.assign(developer_count, &mut backlog)?;

        // ==========================================
        // 步骤3: 输出报告
        // ==========================================
        debug!("步骤3: 输出报告");
        let report = TriageReport::build(&developers, &backlog);
        self.writer.write(&report)?;

        let summary = TriageSummary {
            import: outcome.summary,
            developers: developers.len(),
            assigned_bugs: report.assigned_count(),
            remaining_bugs: report.remaining.len(),
            report,
        };

        info!(
            developers = summary.developers,
            assigned_bugs = summary.assigned_bugs,
            remaining_bugs = summary.remaining_bugs,
            "缺陷分派流程完成"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bug, BugTree, Severity};
    use crate::engine::AssignError;
    use crate::error::TriageError;
    use crate::importer::{ImportOutcome, ImportResult};
    use crate::report::ReportResult;
    use std::cell::RefCell;
    use std::path::PathBuf;

    // 内存数据源
    struct FixedLoader(Vec<Bug>);

    impl BugLoader for FixedLoader {
        fn load(&self, _file_path: &Path) -> ImportResult<ImportOutcome> {
            let mut backlog = BugTree::default();
            backlog.extend(self.0.iter().cloned());
            Ok(ImportOutcome {
                backlog,
                summary: ImportSummary {
                    source: "fixed".to_string(),
                    total_rows: self.0.len(),
                    imported: self.0.len(),
                    ..ImportSummary::default()
                },
            })
        }
    }

    // 记录写出的报告
    #[derive(Default)]
    struct CapturingWriter {
        path: PathBuf,
        written: RefCell<Vec<TriageReport>>,
    }

    impl ReportWriter for CapturingWriter {
        fn write(&self, report: &TriageReport) -> ReportResult<()> {
            self.written.borrow_mut().push(report.clone());
            Ok(())
        }

        fn target(&self) -> &Path {
            &self.path
        }
    }

    fn scenario_bugs() -> Vec<Bug> {
        vec![
            Bug::new("H1", "", Severity::High, "2024-01-01"),
            Bug::new("H2", "", Severity::High, "2024-02-01"),
            Bug::new("M1", "", Severity::Medium, "2024-01-05"),
            Bug::new("L1", "", Severity::Low, "2024-01-10"),
        ]
    }

    #[test]
    fn test_run_writes_report() {
        let orchestrator =
            TriageOrchestrator::new(FixedLoader(scenario_bugs()), CapturingWriter::default());

        let summary = orchestrator.run(1, Path::new("unused")).unwrap();

        assert_eq!(summary.developers, 1);
        assert_eq!(summary.assigned_bugs, 3);
        assert_eq!(summary.remaining_bugs, 1);
        let written = orchestrator.writer.written.borrow();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].remaining[0].id, "H2");
    }

    #[test]
    fn test_allocation_failure_writes_nothing() {
        let orchestrator =
            TriageOrchestrator::new(FixedLoader(scenario_bugs()), CapturingWriter::default());

        let err = orchestrator.run(2, Path::new("unused")).unwrap_err();

        assert!(matches!(
            err,
            TriageError::Assign(AssignError::InsufficientBugs { .. })
        ));
        assert!(orchestrator.writer.written.borrow().is_empty());
    }
}
