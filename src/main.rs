// ==========================================
// 缺陷分派系统 - 命令行入口
// ==========================================
// 用法: pest-control <DEVELOPERS> <INPUT> [选项]
// 退出码: 0 成功; 1 配置/导入/分派/输出任一失败
// ==========================================

use anyhow::Context;
use clap::Parser;
use pest_control::config::{ConfigManager, ReportFormat, TimestampCheck};
use pest_control::importer::BugImporter;
use pest_control::report::writer_for;
use pest_control::{logging, TriageOrchestrator};
use std::path::PathBuf;
use std::process::ExitCode;

/// 按严重度与创建时间, 为每位开发者分派 高/中/低 各一个缺陷
#[derive(Debug, Parser)]
#[command(name = "pest-control", version, about)]
struct Cli {
    /// 开发者数量
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    developers: u32,

    /// 缺陷数据文件（.csv / .json / .xml / .xlsx / .xls）
    input: PathBuf,

    /// 报告输出路径
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 报告格式（json / csv / xml）; 未指定时按输出文件扩展名推断
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// 配置文件路径（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 跳过无法映射的记录, 而不是整批失败
    #[arg(long)]
    skip_invalid: bool,

    /// 创建时间格式检查级别（off / warn / strict）
    #[arg(long)]
    timestamp_check: Option<TimestampCheck>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut manager =
        ConfigManager::load(cli.config.as_deref()).context("无法加载配置")?;

    // 命令行参数优先级最高
    let config = manager.config_mut();
    if let Some(output) = cli.output {
        if cli.format.is_none() {
            if let Some(format) = output
                .extension()
                .and_then(|e| e.to_str())
                .and_then(|e| e.parse::<ReportFormat>().ok())
            {
                config.report_format = format;
            }
        }
        config.report_path = output;
    }
    if let Some(format) = cli.format {
        config.report_format = format;
    }
    if cli.skip_invalid {
        config.skip_invalid_rows = true;
    }
    if let Some(level) = cli.timestamp_check {
        config.timestamp_check = level;
    }

    let config = manager.into_config();
    let importer = BugImporter::from_config(&config);
    let writer = writer_for(config.report_format, config.report_path.clone());
    let orchestrator = TriageOrchestrator::new(importer, writer);

    let summary = orchestrator
        .run(cli.developers as usize, &cli.input)
        .with_context(|| format!("处理 {} 失败", cli.input.display()))?;

    println!(
        "已为 {} 位开发者分派 {} 个缺陷, 剩余 {} 个; 报告: {}",
        summary.developers,
        summary.assigned_bugs,
        summary.remaining_bugs,
        config.report_path.display()
    );
    if summary.import.skipped > 0 || !summary.import.warnings.is_empty() {
        println!(
            "导入: 跳过 {} 条, 告警 {} 条",
            summary.import.skipped,
            summary.import.warnings.len()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_default("warn");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "缺陷分派失败");
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
