// ==========================================
// 炉温排程编辑器 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::furnace_config::{
    FurnaceConfig, DEFAULT_MAX_TEMP, DEFAULT_MIN_TEMP, DEFAULT_TEMP, DEFAULT_TIME,
};
use crate::db::{open_sqlite_connection, CONFIG_TABLE};
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 配置键
pub mod config_keys {
    pub const MIN_TEMP: &str = "furnace/min_temp";
    pub const MAX_TEMP: &str = "furnace/max_temp";
    pub const DEFAULT_TEMP: &str = "furnace/default_temp";
    pub const DEFAULT_TIME: &str = "furnace/default_time";
}

const GLOBAL_SCOPE: &str = "global";

fn upsert_sql() -> String {
    format!(
        r#"
        INSERT INTO {CONFIG_TABLE} (scope_id, key, value)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(scope_id, key) DO UPDATE SET
          value = excluded.value,
          updated_at = datetime('now')
        "#
    )
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {CONFIG_TABLE} (
              scope_id TEXT NOT NULL DEFAULT 'global',
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scope_id, key)
            );
            "#
        ))?;
        Ok(())
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            &format!("SELECT value FROM {CONFIG_TABLE} WHERE scope_id = ?1 AND key = ?2"),
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(&upsert_sql(), params![GLOBAL_SCOPE, key, value])?;
        tracing::debug!("配置已更新: {} = {}", key, value);
        Ok(())
    }

    fn get_i32_or_default(&self, key: &str, default: i32) -> RepositoryResult<i32> {
        match self.get_config_value(key)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| RepositoryError::FieldValueError {
                    field: key.to_string(),
                    message: format!("不是整数: {}", raw),
                }),
            None => Ok(default),
        }
    }

    /// 加载炉子参数配置（缺省键使用内置默认值）并校验
    pub fn load_furnace_config(&self) -> RepositoryResult<FurnaceConfig> {
        let config = FurnaceConfig {
            min_temp: self.get_i32_or_default(config_keys::MIN_TEMP, DEFAULT_MIN_TEMP)?,
            max_temp: self.get_i32_or_default(config_keys::MAX_TEMP, DEFAULT_MAX_TEMP)?,
            default_temp: self.get_i32_or_default(config_keys::DEFAULT_TEMP, DEFAULT_TEMP)?,
            default_time: self
                .get_config_value(config_keys::DEFAULT_TIME)?
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| DEFAULT_TIME.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// 保存炉子参数配置（先校验，全部键一次写入）
    pub fn save_furnace_config(&self, config: &FurnaceConfig) -> RepositoryResult<()> {
        config.validate()?;
        self.restore_entries(&[
            (config_keys::MIN_TEMP, config.min_temp.to_string()),
            (config_keys::MAX_TEMP, config.max_temp.to_string()),
            (config_keys::DEFAULT_TEMP, config.default_temp.to_string()),
            (config_keys::DEFAULT_TIME, config.default_time.clone()),
        ])
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT key, value FROM {CONFIG_TABLE} WHERE scope_id = ?1 ORDER BY key"
        ))?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&config_map)
            .map_err(|e| RepositoryError::InternalError(format!("配置快照序列化失败: {}", e)))
    }

    /// 从配置快照恢复配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> RepositoryResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)
            .map_err(|e| RepositoryError::ValidationError(format!("配置快照解析失败: {}", e)))?;

        let entries: Vec<(&str, String)> = config_map
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        self.restore_entries(&entries)?;
        Ok(entries.len())
    }

    fn restore_entries(&self, entries: &[(&str, String)]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let sql = upsert_sql();
        for (key, value) in entries {
            tx.execute(&sql, params![GLOBAL_SCOPE, key, value])?;
        }
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}
