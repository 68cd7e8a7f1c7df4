// ==========================================
// 炉温排程编辑器 - CSV 行读写
// ==========================================
// 列顺序: Type, Start, End, Time, Notes（与编辑器表格一致）
// 说明:
// - 首行为表头
// - 缺列按空串处理；空行保留，由条目收集器跳过
// ==========================================

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::schedule::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_source::RowSource;

/// CSV 表头
pub const CSV_HEADERS: [&str; 5] = ["Type", "Start", "End", "Time", "Notes"];

// ==========================================
// CsvRowSource - CSV 行来源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CsvRowSource {
    rows: Vec<RawRow>,
}

impl CsvRowSource {
    /// 从文件读取
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// 从任意 Reader 读取
    pub fn from_reader<R: Read>(reader: R) -> ImportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let field = |i: usize| record.get(i).unwrap_or("").to_string();
            rows.push(RawRow::new(field(0), field(1), field(2), field(3), field(4)));
        }

        tracing::debug!("CSV 读取完成: {} 行", rows.len());
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSource for CsvRowSource {
    fn rows(&self) -> Vec<RawRow> {
        self.rows.clone()
    }
}

/// 将行写出为 CSV（含表头）
pub fn write_rows_csv<W: Write>(rows: &[RawRow], writer: W) -> ImportResult<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    for row in rows {
        writer
            .write_record([
                &row.cycle_type,
                &row.start_temp,
                &row.end_temp,
                &row.duration,
                &row.notes,
            ])
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_in_order_with_missing_columns() {
        let data = "Type,Start,End,Time,Notes\n\
                    Ramp,20,600,01:30:00,heat up\n\
                    Soak,600,600,2:00:00\n\
                    ,,,,\n";
        let source = CsvRowSource::from_reader(data.as_bytes()).unwrap();
        let rows = source.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RawRow::from(("Ramp", "20", "600", "01:30:00", "heat up")));
        assert_eq!(rows[1].notes, "");
        assert!(rows[2].is_incomplete());
    }

    #[test]
    fn test_missing_file() {
        let err = CsvRowSource::from_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_write_then_read_back() {
        let rows = vec![RawRow::from(("Soak", "300", "300", "0:30:0", "a, b"))];
        let mut buf = Vec::new();
        write_rows_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("Type,Start,End,Time,Notes"));
        assert_eq!(CsvRowSource::from_reader(buf.as_slice()).unwrap().rows(), rows);
    }
}
