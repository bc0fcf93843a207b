// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成缺陷积压测试数据集 CSV 文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::Writer;
use std::error::Error;
use std::fs::{self, File};

// CSV 表头
const CSV_HEADER: &[&str] = &["id", "description", "impact", "created"];

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

const SEVERITIES: [&str; 3] = ["high", "medium", "low"];

const SUMMARIES: [&str; 6] = [
    "保存时崩溃",
    "登录页样式错位",
    "导出报表数据缺失",
    "偶发超时",
    "拼写错误",
    "权限校验遗漏",
];

// 缺陷记录结构
#[derive(Clone)]
struct BugRecord {
    id: String,
    description: String,
    impact: String,
    created: String,
}

impl BugRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.description.clone(),
            self.impact.clone(),
            self.created.clone(),
        ]
    }
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

// 生成正常缺陷记录
fn generate_normal_record(index: usize) -> BugRecord {
    // 打散创建时间, 使文件顺序与分派顺序不同
    let offset_hours = ((index * 37) % 500) as i64;
    let created = base_time() + Duration::hours(offset_hours);

    BugRecord {
        id: format!("BUG{:06}", index + 1),
        description: SUMMARIES[index % SUMMARIES.len()].to_string(),
        impact: SEVERITIES[index % 3].to_string(),
        created: created.format("%Y-%m-%dT%H:%M:%S").to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 生成正常数据 (30条, 每个等级10条)
    generate_normal_data()?;

    // 2. 生成大数据集 (3000条)
    generate_large_dataset()?;

    // 3. 生成同等级同时间的并列数据
    generate_tied_records()?;

    // 4. 生成某一等级不足的数据
    generate_insufficient_tier()?;

    // 5. 生成含无效记录的数据
    generate_invalid_rows()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn write_dataset(name: &str, records: &[BugRecord]) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", OUTPUT_DIR, name);
    let file = File::create(&path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} ({}条)", name, records.len());
    Ok(())
}

fn generate_normal_data() -> Result<(), Box<dyn Error>> {
    let records: Vec<BugRecord> = (0..30).map(generate_normal_record).collect();
    write_dataset("01_normal_data.csv", &records)
}

fn generate_large_dataset() -> Result<(), Box<dyn Error>> {
    let records: Vec<BugRecord> = (0..3000)
        .map(|i| generate_normal_record(i + 10000))
        .collect();
    write_dataset("02_large_dataset.csv", &records)
}

fn generate_tied_records() -> Result<(), Box<dyn Error>> {
    let mut records: Vec<BugRecord> = (0..9)
        .map(|i| generate_normal_record(i + 20000))
        .collect();

    // 3 条低等级缺陷共享同一创建时间
    for i in 0..3 {
        records.push(BugRecord {
            id: format!("TIE{:03}", i + 1),
            description: "并列缺陷".to_string(),
            impact: "low".to_string(),
            created: "2024-03-01T00:00:00".to_string(),
        });
    }

    write_dataset("03_tied_records.csv", &records)
}

fn generate_insufficient_tier() -> Result<(), Box<dyn Error>> {
    // 10 高 / 10 中 / 仅 2 低
    let records: Vec<BugRecord> = (0..30)
        .map(|i| generate_normal_record(i + 30000))
        .filter(|r| r.impact != "low")
        .chain((0..2).map(|i| BugRecord {
            impact: "low".to_string(),
            ..generate_normal_record(i * 3 + 30002)
        }))
        .collect();

    write_dataset("04_insufficient_tier.csv", &records)
}

fn generate_invalid_rows() -> Result<(), Box<dyn Error>> {
    let mut records: Vec<BugRecord> = (0..12)
        .map(|i| generate_normal_record(i + 40000))
        .collect();

    // 缺失 id
    let mut missing_id = generate_normal_record(40100);
    missing_id.id = "".to_string();
    records.push(missing_id);

    // 未知严重度
    let mut unknown = generate_normal_record(40101);
    unknown.impact = "critical".to_string();
    records.push(unknown);

    // 重复 id
    records.push(generate_normal_record(40000));

    // 非标准时间格式
    let mut odd_time = generate_normal_record(40102);
    odd_time.created = "03/01/2024".to_string();
    records.push(odd_time);

    write_dataset("05_invalid_rows.csv", &records)
}
