// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时数据库、原始行构造等功能
// ==========================================

#![allow(dead_code)]

use furnace_schedule::domain::RawRow;
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();
    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(Connection::open(db_path)?)
}

/// 以旧版编辑器的方式建表并写入（无 schedule_catalog 记录）
pub fn create_legacy_schedule(
    conn: &Connection,
    name: &str,
    rows: &[(&str, i32, i32, &str, Option<&str>)],
) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {name} (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Cycle INTEGER NOT NULL,
            CycleType TEXT NOT NULL,
            StartTemp INTEGER NOT NULL,
            EndTemp INTEGER NOT NULL,
            CycleTime TEXT NOT NULL,
            Notes TEXT
        )
        "#
    ))?;
    for (i, (cycle_type, start, end, time, notes)) in rows.iter().enumerate() {
        conn.execute(
            &format!(
                "INSERT INTO {name} (Cycle, CycleType, StartTemp, EndTemp, CycleTime, Notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ),
            rusqlite::params![(i + 1) as i64, cycle_type, start, end, time, notes],
        )?;
    }
    Ok(())
}

/// 由元组批量构造原始行
pub fn raw_rows(data: &[(&str, &str, &str, &str, &str)]) -> Vec<RawRow> {
    data.iter().map(|t| RawRow::from(*t)).collect()
}

/// 典型退火曲线：升温 → 保温 → 降温 + 末尾空行
pub fn anneal_rows() -> Vec<RawRow> {
    raw_rows(&[
        ("Ramp", "20", "850", "02:00:00", "heat up"),
        ("Soak", "850", "850", "1:30:00", ""),
        ("Ramp", "850", "20", "04:00:00", "furnace cool"),
        ("", "", "", "", ""),
    ])
}
