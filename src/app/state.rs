// ==========================================
// 炉温排程编辑器 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::collaborators::{NoopNotifier, ScheduleNotifier};
use crate::api::error::{ApiError, ApiResult};
use crate::api::schedule_api::ScheduleApi;
use crate::config::config_manager::ConfigManager;
use crate::config::furnace_config::FurnaceConfig;
use crate::repository::error::RepositoryError;
use crate::repository::schedule_repo::ScheduleRepository;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "FURNACE_SCHEDULE_DB_PATH";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "SmartFurnace.db";

/// 应用状态
///
/// 包含API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 炉子参数配置（启动时加载）
    pub furnace_config: FurnaceConfig,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 排程API
    pub schedule_api: Arc<ScheduleApi>,
}

impl AppState {
    /// 创建新的AppState实例（无列表订阅者）
    pub fn new(db_path: String) -> ApiResult<Self> {
        Self::with_notifier(db_path, Arc::new(NoopNotifier))
    }

    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - notifier: 排程变更通知（菜单/列表刷新）
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 加载并校验炉子参数配置
    /// 2. 初始化排程仓储（确保清单表存在）
    /// 3. 创建API实例
    pub fn with_notifier(
        db_path: String,
        notifier: Arc<dyn ScheduleNotifier>,
    ) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let config_manager = Arc::new(ConfigManager::new(&db_path)?);
        let furnace_config = config_manager
            .load_furnace_config()
            .map_err(|e| match e {
                RepositoryError::FieldValueError { field, message } => {
                    ApiError::InvalidConfig(format!("{}: {}", field, message))
                }
                other => ApiError::from(other),
            })?;
        tracing::info!(
            "炉子参数: 温度区间 {}, 默认温度 {}, 默认时长 {}",
            furnace_config.bounds(),
            furnace_config.default_temp,
            furnace_config.default_time
        );

        let schedule_repo = Arc::new(ScheduleRepository::new(&db_path)?);
        let schedule_api = Arc::new(ScheduleApi::new(
            schedule_repo,
            furnace_config.clone(),
            notifier,
        ));

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path,
            furnace_config,
            config_manager,
            schedule_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 FURNACE_SCHEDULE_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DEFAULT_DB_FILE));

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("smart-furnace");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DEFAULT_DB_FILE);
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_manager::config_keys;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_loads_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        ConfigManager::new(&db_path)
            .unwrap()
            .set_config_value(config_keys::MAX_TEMP, "900")
            .unwrap();

        let state = AppState::new(db_path).unwrap();
        assert_eq!(state.furnace_config.max_temp, 900);
        assert_eq!(state.schedule_api.config().max_temp, 900);
    }

    #[test]
    fn test_app_state_rejects_bad_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        ConfigManager::new(&db_path)
            .unwrap()
            .set_config_value(config_keys::MIN_TEMP, "2000")
            .unwrap();

        assert!(matches!(
            AppState::new(db_path),
            Err(ApiError::InvalidConfig(_))
        ));
    }
}
