// ==========================================
// 炉温排程编辑器 - 排程仓储
// ==========================================
// 职责:
// - 每个排程对应一张独立表（表名 = 排程名）
// - schedule_catalog 记录排程清单（供菜单/列表刷新）
// 约束:
// - 表名必须先过白名单再加引号拼接，其余取值一律参数绑定
// - 每次调用独立打开连接，返回前释放（含错误路径）
// - save 为单事务：全部写入或全部回滚
// ==========================================

use rusqlite::{params, Connection, Result as SqliteResult};
use serde::{Deserialize, Serialize};

use crate::db::{open_sqlite_connection, quote_identifier, table_exists, CATALOG_TABLE};
use crate::domain::schedule::{ScheduleEntry, ScheduleSummary};
use crate::domain::types::CycleType;
use crate::engine::validators::{validate_schedule_name, validate_time};
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// SaveMode - 写入模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveMode {
    /// 先清空已有条目再写入（覆盖）
    Replace,
    /// 保留已有条目，序号接续 MAX(Cycle) 追加
    Append,
}

// ==========================================
// ScheduleRepository - 排程仓储
// ==========================================
pub struct ScheduleRepository {
    db_path: String,
}

impl ScheduleRepository {
    /// 创建仓储并确保清单表存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let repo = Self {
            db_path: db_path.to_string(),
        };
        repo.ensure_catalog()?;
        Ok(repo)
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn open_conn(&self) -> RepositoryResult<Connection> {
        open_sqlite_connection(&self.db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))
    }

    fn ensure_catalog(&self) -> RepositoryResult<()> {
        let conn = self.open_conn()?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {CATALOG_TABLE} (
              name TEXT PRIMARY KEY COLLATE NOCASE,
              cycle_count INTEGER NOT NULL DEFAULT 0,
              created_at TEXT NOT NULL DEFAULT (datetime('now')),
              updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#
        ))?;
        Ok(())
    }

    /// 校验排程名并返回可拼接的表标识符
    fn checked_table(name: &str) -> RepositoryResult<String> {
        validate_schedule_name(name).map_err(|source| RepositoryError::InvalidScheduleName {
            name: name.to_string(),
            source,
        })?;
        Ok(quote_identifier(name))
    }

    fn create_table_sql(table: &str) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
              Id INTEGER PRIMARY KEY AUTOINCREMENT,
              Cycle INTEGER NOT NULL,
              CycleType TEXT NOT NULL CHECK(CycleType IN ('Ramp', 'Soak')),
              StartTemp INTEGER NOT NULL,
              EndTemp INTEGER NOT NULL,
              CycleTime TEXT NOT NULL,
              Notes TEXT
            );
            "#
        )
    }

    /// 保存排程
    ///
    /// # 参数
    /// - name: 排程名（即表名）
    /// - entries: 有序条目；写入时按顺序重新分配 Cycle
    /// - mode: Replace 覆盖 / Append 追加
    ///
    /// # 返回
    /// - Ok(usize): 本次写入条目数
    /// - Err(RepositoryError): 名称非法、条目非法或存储失败（事务已回滚）
    pub fn save(
        &self,
        name: &str,
        entries: &[ScheduleEntry],
        mode: SaveMode,
    ) -> RepositoryResult<usize> {
        let table = Self::checked_table(name)?;
        if entries.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "排程 {} 没有可写入的条目",
                name
            )));
        }

        let mut conn = self.open_conn()?;
        let tx = conn.transaction()?;

        tx.execute_batch(&Self::create_table_sql(&table))?;

        let base_cycle: i64 = match mode {
            SaveMode::Replace => {
                let removed = tx.execute(&format!("DELETE FROM {table}"), [])?;
                if removed > 0 {
                    tracing::debug!("排程 {} 覆盖写入，清除旧条目 {} 条", name, removed);
                }
                0
            }
            SaveMode::Append => tx.query_row(
                &format!("SELECT COALESCE(MAX(Cycle), 0) FROM {table}"),
                [],
                |row| row.get(0),
            )?,
        };

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (Cycle, CycleType, StartTemp, EndTemp, CycleTime, Notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ))?;

            for (i, entry) in entries.iter().enumerate() {
                // 条目逐个校验，失败时事务随 tx 析构回滚
                if !validate_time(&entry.duration) {
                    return Err(RepositoryError::FieldValueError {
                        field: "CycleTime".to_string(),
                        message: format!("第 {} 个条目时长非法: {}", i + 1, entry.duration),
                    });
                }

                stmt.execute(params![
                    base_cycle + i as i64 + 1,
                    entry.cycle_type.as_str(),
                    entry.start_temp,
                    entry.end_temp,
                    entry.duration,
                    entry.notes,
                ])?;
            }
        }

        let cycle_count: i64 =
            tx.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;

        tx.execute(
            &format!(
                r#"
                INSERT INTO {CATALOG_TABLE} (name, cycle_count)
                VALUES (?1, ?2)
                ON CONFLICT(name) DO UPDATE SET
                  cycle_count = excluded.cycle_count,
                  updated_at = datetime('now')
                "#
            ),
            params![name, cycle_count],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!(
            "排程 {} 保存成功: 写入 {} 条, 共 {} 条 ({:?})",
            name,
            entries.len(),
            cycle_count,
            mode
        );
        Ok(entries.len())
    }

    /// 读取排程（按 Cycle 升序）
    ///
    /// # 返回
    /// - Ok(Vec<ScheduleEntry>): 有序条目
    /// - Err(RepositoryError::NotFound): 排程不存在
    pub fn load(&self, name: &str) -> RepositoryResult<Vec<ScheduleEntry>> {
        let table = Self::checked_table(name)?;
        let conn = self.open_conn()?;

        if !table_exists(&conn, name)? {
            return Err(RepositoryError::NotFound {
                entity: "Schedule".to_string(),
                id: name.to_string(),
            });
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT Cycle, CycleType, StartTemp, EndTemp, CycleTime, Notes
             FROM {table}
             ORDER BY Cycle ASC, Id ASC"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredRow {
                    cycle: row.get(0)?,
                    cycle_type: row.get(1)?,
                    start_temp: row.get(2)?,
                    end_temp: row.get(3)?,
                    duration: row.get(4)?,
                    notes: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let entries = rows
            .into_iter()
            .map(row_to_entry)
            .collect::<RepositoryResult<Vec<_>>>()?;

        tracing::info!("排程 {} 读取成功: {} 条", name, entries.len());
        Ok(entries)
    }

    /// 排程是否存在
    pub fn exists(&self, name: &str) -> RepositoryResult<bool> {
        Self::checked_table(name)?;
        let conn = self.open_conn()?;
        Ok(table_exists(&conn, name)?)
    }

    /// 列出全部排程（按名称排序）
    pub fn list(&self) -> RepositoryResult<Vec<ScheduleSummary>> {
        let conn = self.open_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT name, cycle_count, created_at, updated_at
            FROM {CATALOG_TABLE}
            ORDER BY name COLLATE NOCASE ASC
            "#
        ))?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(ScheduleSummary {
                    name: row.get(0)?,
                    cycle_count: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(summaries)
    }

    /// 删除排程（删表 + 清单记录，单事务）
    pub fn delete(&self, name: &str) -> RepositoryResult<()> {
        let table = Self::checked_table(name)?;
        let mut conn = self.open_conn()?;
        let tx = conn.transaction()?;

        let had_table = table_exists(&tx, name)?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
        let removed = tx.execute(
            &format!("DELETE FROM {CATALOG_TABLE} WHERE name = ?1"),
            params![name],
        )?;

        if !had_table && removed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Schedule".to_string(),
                id: name.to_string(),
            });
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        tracing::info!("排程 {} 已删除", name);
        Ok(())
    }
}

// ==========================================
// 行映射
// ==========================================

/// 排程表中的一行（未经领域校验）
struct StoredRow {
    cycle: i64,
    cycle_type: String,
    start_temp: i32,
    end_temp: i32,
    duration: String,
    notes: Option<String>,
}

fn row_to_entry(row: StoredRow) -> RepositoryResult<ScheduleEntry> {
    let cycle_index = u32::try_from(row.cycle).map_err(|_| RepositoryError::FieldValueError {
        field: "Cycle".to_string(),
        message: format!("非法序号: {}", row.cycle),
    })?;
    let cycle_type =
        CycleType::parse(&row.cycle_type).ok_or_else(|| RepositoryError::FieldValueError {
            field: "CycleType".to_string(),
            message: format!("未知周期类型: {}", row.cycle_type),
        })?;

    Ok(ScheduleEntry::new(
        cycle_index,
        cycle_type,
        row.start_temp,
        row.end_temp,
        row.duration,
        row.notes,
    ))
}
