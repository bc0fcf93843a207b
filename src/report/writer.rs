// ==========================================
// 缺陷分派系统 - 报告输出
// ==========================================
// 支持: JSON（结构化） / CSV（扁平表） / XML（报告文档）
// ==========================================

use crate::config::ReportFormat;
use crate::report::error::{ReportError, ReportResult};
use crate::report::model::{BugEntry, TriageReport};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// ReportWriter Trait
// ==========================================
pub trait ReportWriter {
    /// 输出报告
    fn write(&self, report: &TriageReport) -> ReportResult<()>;

    /// 输出目标（用于日志）
    fn target(&self) -> &Path;
}

// 打开输出文件, 必要时创建父目录
fn create_output(path: &Path) -> ReportResult<BufWriter<File>> {
    let write_failed = |e: std::io::Error| ReportError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    File::create(path).map(BufWriter::new).map_err(write_failed)
}

// ==========================================
// JSON 报告
// ==========================================
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, report: &TriageReport) -> ReportResult<()> {
        let mut out = create_output(&self.path)?;
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)
            .and_then(|_| out.flush())
            .map_err(|e| ReportError::WriteFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %self.path.display(), "JSON 报告已写出");
        Ok(())
    }

    fn target(&self) -> &Path {
        &self.path
    }
}

// ==========================================
// CSV 报告
// ==========================================
// 列: section,developer_id,id,description,impact,created
// section: assigned（已分派） / remaining（剩余, developer_id 为空）
pub struct CsvReportWriter {
    path: PathBuf,
}

pub const CSV_HEADER: [&str; 6] = [
    "section",
    "developer_id",
    "id",
    "description",
    "impact",
    "created",
];

impl CsvReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn row<'a>(section: &'a str, developer_id: &'a str, bug: &'a BugEntry) -> [&'a str; 6] {
        [
            section,
            developer_id,
            &bug.id,
            &bug.description,
            bug.impact.as_str(),
            &bug.created,
        ]
    }
}

impl ReportWriter for CsvReportWriter {
    fn write(&self, report: &TriageReport) -> ReportResult<()> {
        let mut writer = csv::Writer::from_writer(create_output(&self.path)?);
        writer.write_record(CSV_HEADER)?;

        for developer in &report.developers {
            let developer_id = developer.id.to_string();
            for bug in &developer.bugs {
                writer.write_record(Self::row("assigned", &developer_id, bug))?;
            }
        }

        for bug in &report.remaining {
            writer.write_record(Self::row("remaining", "", bug))?;
        }

        writer.flush().map_err(|e| ReportError::WriteFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %self.path.display(), "CSV 报告已写出");
        Ok(())
    }

    fn target(&self) -> &Path {
        &self.path
    }
}

// ==========================================
// XML 报告
// ==========================================
// <report>
//   <developer id="1"><bug id="..">..</bug> x3</developer>
//   <remaining><bug id="..">..</bug>...</remaining>
// </report>
pub struct XmlReportWriter {
    path: PathBuf,
}

impl XmlReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_bug<W: Write>(writer: &mut Writer<W>, bug: &BugEntry) -> quick_xml::Result<()> {
        writer
            .create_element("bug")
            .with_attribute(("id", bug.id.as_str()))
            .write_inner_content(|w| {
                w.create_element("description")
                    .write_text_content(BytesText::new(&bug.description))?;
                w.create_element("impact")
                    .write_text_content(BytesText::new(bug.impact.as_str()))?;
                w.create_element("created")
                    .write_text_content(BytesText::new(&bug.created))?;
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    }

    fn write_document<W: Write>(writer: &mut Writer<W>, report: &TriageReport) -> quick_xml::Result<()> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.create_element("report").write_inner_content(|w| {
            for developer in &report.developers {
                let developer_id = developer.id.to_string();
                w.create_element("developer")
                    .with_attribute(("id", developer_id.as_str()))
                    .write_inner_content(|w| {
                        for bug in &developer.bugs {
                            Self::write_bug(w, bug)?;
                        }
                        Ok::<(), quick_xml::Error>(())
                    })?;
            }
            w.create_element("remaining").write_inner_content(|w| {
                for bug in &report.remaining {
                    Self::write_bug(w, bug)?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;
        Ok(())
    }
}

impl ReportWriter for XmlReportWriter {
    fn write(&self, report: &TriageReport) -> ReportResult<()> {
        let mut writer = Writer::new_with_indent(create_output(&self.path)?, b'\t', 1);
        Self::write_document(&mut writer, report)?;

        let mut out = writer.into_inner();
        writeln!(out)
            .and_then(|_| out.flush())
            .map_err(|e| ReportError::WriteFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %self.path.display(), "XML 报告已写出");
        Ok(())
    }

    fn target(&self) -> &Path {
        &self.path
    }
}

/// 按格式选择报告输出
pub fn writer_for(format: ReportFormat, path: impl Into<PathBuf>) -> Box<dyn ReportWriter> {
    match format {
        ReportFormat::Json => Box::new(JsonReportWriter::new(path)),
        ReportFormat::Csv => Box::new(CsvReportWriter::new(path)),
        ReportFormat::Xml => Box::new(XmlReportWriter::new(path)),
    }
}

impl<W: ReportWriter + ?Sized> ReportWriter for Box<W> {
    fn write(&self, report: &TriageReport) -> ReportResult<()> {
        (**self).write(report)
    }

    fn target(&self) -> &Path {
        (**self).target()
    }
}
