// ==========================================
// 缺陷分派系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: CSV (.csv) / JSON (.json) / XML (.xml) / Excel (.xlsx/.xls)
// ==========================================

use crate::importer::bug_loader_trait::{FileParser, RawRecord};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use quick_xml::events::{BytesStart, Event};
use serde_json::Value;
use std::fs::{self, File};
use std::path::Path;

// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// 检查扩展名（不区分大小写）
fn ensure_extension(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// 跳过完全空白的行
fn is_blank(record: &RawRecord) -> bool {
    record.values().all(|v| v.is_empty())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        ensure_extension(file_path, &["csv"])?;

        // 打开 CSV 文件
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = RawRecord::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            if is_blank(&row_map) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 接受两种形状:
// - 顶层数组: [{"id": ...}, ...]
// - 顶层对象: {"bugs": [{"id": ...}, ...]}
pub struct JsonParser;

impl JsonParser {
    fn cell_text(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// 解析已读入内存的 JSON 文本
    pub fn parse_str(&self, content: &str) -> ImportResult<Vec<RawRecord>> {
        let root: Value = serde_json::from_str(content)?;

        let items = match root {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("bugs") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ImportError::JsonParseError(
                        "顶层对象缺少 bugs 数组".to_string(),
                    ))
                }
            },
            _ => {
                return Err(ImportError::JsonParseError(
                    "顶层必须是数组或包含 bugs 数组的对象".to_string(),
                ))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let Value::Object(fields) = item else {
                return Err(ImportError::JsonParseError(format!(
                    "第 {} 个元素不是对象",
                    idx + 1
                )));
            };

            let row_map: RawRecord = fields
                .iter()
                .filter_map(|(key, value)| {
                    Self::cell_text(value).map(|text| (key.trim().to_string(), text))
                })
                .collect();

            if is_blank(&row_map) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        ensure_extension(file_path, &["json"])?;

        let content = fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }
}

// ==========================================
// XML Parser 实现
// ==========================================
// 文档形状:
// <bugs>
//   <bug id="B1">
//     <description>...</description>
//     <impact>high</impact>
//     <created>2024-01-01</created>
//   </bug>
// </bugs>
// 只读取根元素下的 <bug>; id 取自属性, 其余字段取自同名子元素
pub struct XmlParser;

impl XmlParser {
    fn element_name(start: &BytesStart) -> String {
        String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
    }

    fn bug_record<B>(start: &BytesStart, reader: &quick_xml::Reader<B>) -> ImportResult<RawRecord> {
        let mut record = RawRecord::new();
        let id = start
            .try_get_attribute("id")
            .map_err(|e| ImportError::XmlParseError(e.to_string()))?;
        if let Some(attr) = id {
            record.insert("id".to_string(), attr.decode_and_unescape_value(reader)?.trim().to_string());
        }
        Ok(record)
    }

    /// 解析已读入内存的 XML 文本
    pub fn parse_str(&self, content: &str) -> ImportResult<Vec<RawRecord>> {
        let mut reader = quick_xml::Reader::from_str(content);
        reader.trim_text(true);

        let mut records = Vec::new();
        let mut depth = 0usize;
        let mut current: Option<RawRecord> = None;
        let mut field: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    depth += 1;
                    let name = Self::element_name(&start);
                    if depth == 2 && name == "bug" {
                        current = Some(Self::bug_record(&start, &reader)?);
                    } else if depth == 3 && current.is_some() {
                        field = Some(name);
                    }
                }
                Event::Empty(start) => {
                    // <bug id="..."/>: 仅有 id 的记录, 交给字段映射报错
                    if depth == 1 && Self::element_name(&start) == "bug" {
                        let record = Self::bug_record(&start, &reader)?;
                        if !is_blank(&record) {
                            records.push(record);
                        }
                    }
                }
                Event::Text(text) => {
                    if let (Some(record), Some(name)) = (current.as_mut(), field.as_ref()) {
                        record.insert(name.clone(), text.unescape()?.trim().to_string());
                    }
                }
                Event::CData(data) => {
                    if let (Some(record), Some(name)) = (current.as_mut(), field.as_ref()) {
                        let text = String::from_utf8_lossy(&data.into_inner()).trim().to_string();
                        record.insert(name.clone(), text);
                    }
                }
                Event::End(_) => {
                    match depth {
                        3 => field = None,
                        2 => {
                            if let Some(record) = current.take() {
                                if !is_blank(&record) {
                                    records.push(record);
                                }
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(ImportError::XmlParseError("文档未正确闭合".to_string()));
        }

        Ok(records)
    }
}

impl FileParser for XmlParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        ensure_extension(file_path, &["xml"])?;

        let content = fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格文本; 日期单元格转为 ISO 形式, 以便按字典序比较
    pub fn cell_text(cell: &Data) -> String {
        match cell {
            Data::DateTime(value) => value
                .as_datetime()
                .map(Self::iso_text)
                .unwrap_or_else(|| cell.to_string()),
            Data::DateTimeIso(text) => text.trim().to_string(),
            other => other.to_string().trim().to_string(),
        }
    }

    // 零点只保留日期部分
    fn iso_text(datetime: NaiveDateTime) -> String {
        if datetime.time() == NaiveTime::MIN {
            datetime.format("%Y-%m-%d").to_string()
        } else {
            datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        ensure_extension(file_path, &["xlsx", "xls"])?;

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRecord::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_text(cell));
                }
            }

            if is_blank(&row_map) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(file_path),
            "json" => JsonParser.parse_to_raw_records(file_path),
            "xml" => XmlParser.parse_to_raw_records(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(file_path),
            _ => {
                ensure_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(ext))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_with_suffix(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "id,description,impact,created").unwrap();
        writeln!(temp_file, "B001, Login fails ,high,2024-01-01").unwrap();
        writeln!(temp_file, "B002,Typo,low,2024-01-02").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some(&"B001".to_string()));
        assert_eq!(records[0].get("description"), Some(&"Login fails".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "id,impact").unwrap();
        writeln!(temp_file, "B001,high").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "B002,low").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_json_parser_array_and_wrapped_forms() {
        let array = r#"[{"id": "B1", "impact": "high", "created": "2024-01-01", "points": 3}]"#;
        let records = JsonParser.parse_str(array).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("points"), Some(&"3".to_string()));

        let wrapped = r#"{"bugs": [{"id": "B1"}, {"id": null}, {"id": "B2"}]}"#;
        let records = JsonParser.parse_str(wrapped).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_json_parser_rejects_bad_shape() {
        assert!(matches!(
            JsonParser.parse_str(r#"{"items": []}"#),
            Err(ImportError::JsonParseError(_))
        ));
        assert!(matches!(
            JsonParser.parse_str("[1, 2]"),
            Err(ImportError::JsonParseError(_))
        ));
        assert!(matches!(
            JsonParser.parse_str("not json"),
            Err(ImportError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_universal_parser_dispatches_by_extension() {
        let mut temp_file = temp_with_suffix(".json");
        writeln!(temp_file, r#"[{{"id": "B1"}}]"#).unwrap();
        let records = UniversalFileParser
            .parse_to_raw_records(temp_file.path())
            .unwrap();
        assert_eq!(records.len(), 1);

        let mut xml = temp_with_suffix(".xml");
        writeln!(xml, r#"<bugs><bug id="B9"><impact>low</impact></bug></bugs>"#).unwrap();
        let records = UniversalFileParser.parse_to_raw_records(xml.path()).unwrap();
        assert_eq!(records[0].get("id"), Some(&"B9".to_string()));

        let txt = temp_with_suffix(".txt");
        let result = UniversalFileParser.parse_to_raw_records(txt.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_xml_parser_reads_bug_elements() {
        let content = r#"<?xml version="1.0" encoding="UTF-8" ?>
<bugs>
    <bug id="B001">
        <description>Crash &amp; burn</description>
        <impact>high</impact>
        <created>2024-01-01</created>
    </bug>
    <note>ignored</note>
    <bug id="B002">
        <description><![CDATA[<b>markup</b>]]></description>
        <impact>low</impact>
        <created>2024-01-02</created>
    </bug>
</bugs>"#;

        let records = XmlParser.parse_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some(&"B001".to_string()));
        assert_eq!(records[0].get("description"), Some(&"Crash & burn".to_string()));
        assert_eq!(records[0].get("impact"), Some(&"high".to_string()));
        assert_eq!(records[0].get("created"), Some(&"2024-01-01".to_string()));
        assert_eq!(records[1].get("description"), Some(&"<b>markup</b>".to_string()));
    }

    #[test]
    fn test_xml_parser_rejects_malformed_document() {
        assert!(matches!(
            XmlParser.parse_str("<bugs><bug id=\"B1\"><impact>high</bug></bugs>"),
            Err(ImportError::XmlParseError(_))
        ));
        assert!(matches!(
            XmlParser.parse_str("<bugs><bug id=\"B1\">"),
            Err(ImportError::XmlParseError(_))
        ));
    }

    #[test]
    fn test_excel_date_cells_become_iso_text() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        // 45296 = 2024-01-05（1900 日期系统）
        let date = Data::DateTime(ExcelDateTime::new(45296.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(ExcelParser::cell_text(&date), "2024-01-05");

        let noon = Data::DateTime(ExcelDateTime::new(45296.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(ExcelParser::cell_text(&noon), "2024-01-05T12:00:00");

        let iso = Data::DateTimeIso(" 2024-01-05T08:30:00 ".to_string());
        assert_eq!(ExcelParser::cell_text(&iso), "2024-01-05T08:30:00");

        assert_eq!(ExcelParser::cell_text(&Data::String(" high ".to_string())), "high");
    }
}
