// ==========================================
// 炉温排程编辑器 - 排程 API
// ==========================================
// 职责: 排程列表、读取、删除，以及编辑会话的创建入口
// ==========================================

use std::sync::Arc;

use crate::api::collaborators::ScheduleNotifier;
use crate::api::error::{ApiError, ApiResult};
use crate::api::schedule_session::ScheduleSession;
use crate::config::furnace_config::FurnaceConfig;
use crate::domain::schedule::{Schedule, ScheduleSummary};
use crate::repository::schedule_repo::ScheduleRepository;

// ==========================================
// ScheduleApi - 排程 API
// ==========================================

/// 排程API
///
/// 职责：
/// 1. 排程清单查询（菜单刷新）
/// 2. 按名称读取 / 删除
/// 3. 创建新建或编辑会话
pub struct ScheduleApi {
    repo: Arc<ScheduleRepository>,
    config: FurnaceConfig,
    notifier: Arc<dyn ScheduleNotifier>,
}

impl ScheduleApi {
    /// 创建新的ScheduleApi实例
    pub fn new(
        repo: Arc<ScheduleRepository>,
        config: FurnaceConfig,
        notifier: Arc<dyn ScheduleNotifier>,
    ) -> Self {
        Self {
            repo,
            config,
            notifier,
        }
    }

    pub fn config(&self) -> &FurnaceConfig {
        &self.config
    }

    /// 查询全部排程
    pub fn list_schedules(&self) -> ApiResult<Vec<ScheduleSummary>> {
        Ok(self.repo.list()?)
    }

    /// 按名称读取排程
    ///
    /// # 返回
    /// - Ok(Schedule): 按 cycle 升序的排程
    /// - Err(ApiError::NotFound): 排程不存在
    pub fn get_schedule(&self, name: &str) -> ApiResult<Schedule> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::NotFound(String::new()));
        }
        let entries = self.repo.load(name)?;
        Ok(Schedule {
            name: name.to_string(),
            entries,
        })
    }

    /// 删除排程，成功后通知列表刷新
    pub fn delete_schedule(&self, name: &str) -> ApiResult<()> {
        let name = name.trim();
        self.repo.delete(name)?;
        self.notifier.schedules_changed(name);
        Ok(())
    }

    /// 新建排程会话
    pub fn new_session(&self) -> ScheduleSession {
        ScheduleSession::new_schedule(
            self.repo.clone(),
            self.config.clone(),
            self.notifier.clone(),
        )
    }

    /// 打开已有排程的编辑会话
    pub fn open_session(&self, name: &str) -> ApiResult<ScheduleSession> {
        ScheduleSession::open(
            self.repo.clone(),
            self.config.clone(),
            self.notifier.clone(),
            name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::collaborators::{FixedName, NoopNotifier};
    use crate::domain::schedule::RawRow;
    use tempfile::NamedTempFile;

    fn api() -> (NamedTempFile, ScheduleApi) {
        let temp_file = NamedTempFile::new().unwrap();
        let repo = ScheduleRepository::new(temp_file.path().to_str().unwrap()).unwrap();
        let api = ScheduleApi::new(
            Arc::new(repo),
            FurnaceConfig::default(),
            Arc::new(NoopNotifier),
        );
        (temp_file, api)
    }

    #[test]
    fn test_session_lifecycle_through_api() {
        let (_tmp, api) = api();
        let rows = vec![RawRow::from(("Ramp", "20", "300", "0:30:00", ""))];

        api.new_session()
            .save_as(&rows, &mut FixedName::new("Quench"))
            .unwrap();

        let list = api.list_schedules().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Quench");
        assert_eq!(list[0].cycle_count, 1);

        let schedule = api.get_schedule("Quench").unwrap();
        assert_eq!(schedule.to_raw_rows(), rows);

        let session = api.open_session("Quench").unwrap();
        assert_eq!(session.initial_rows(), rows.as_slice());

        api.delete_schedule("Quench").unwrap();
        assert!(api.list_schedules().unwrap().is_empty());
        assert!(matches!(
            api.get_schedule("Quench"),
            Err(ApiError::NotFound(_))
        ));
    }
}
