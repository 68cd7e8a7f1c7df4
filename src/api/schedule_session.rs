// ==========================================
// 炉温排程编辑器 - 排程编辑会话
// ==========================================
// 职责: 编排「条目收集器 + 排程仓储」完成三种用例
// - 新建（另存为）: 询问名称 → 收集 → 写入新表
// - 更新: 名称固定为当前打开的排程 → 收集 → 覆盖写入
// - 另存为: 编辑已有排程时以新名称写入
// 状态机: Editing → Validating → {Persisting → Closed} | Editing
// 说明: 任何失败都回到 Editing，表格内容由 UI 保留以便修正重试
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::api::collaborators::{NamePrompt, ScheduleNotifier};
use crate::api::error::{ApiError, ApiResult};
use crate::config::furnace_config::FurnaceConfig;
use crate::domain::schedule::{RawRow, Schedule, ScheduleEntry};
use crate::domain::types::CycleType;
use crate::engine::entry_collector::EntryCollector;
use crate::engine::validators::validate_schedule_name;
use crate::importer::row_source::RowSource;
use crate::repository::schedule_repo::{SaveMode, ScheduleRepository};

// ==========================================
// SessionState - 会话状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Editing,
    Validating,
    Persisting,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Editing => write!(f, "EDITING"),
            SessionState::Validating => write!(f, "VALIDATING"),
            SessionState::Persisting => write!(f, "PERSISTING"),
            SessionState::Closed => write!(f, "CLOSED"),
        }
    }
}

// ==========================================
// SessionMode - 会话模式
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// 新建排程（仅可另存为）
    Create,
    /// 编辑已有排程（可更新或另存为）
    Edit { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveIntent {
    NewSchedule,
    Overwrite,
}

// ==========================================
// ScheduleSession - 编辑会话
// ==========================================
pub struct ScheduleSession {
    repo: Arc<ScheduleRepository>,
    collector: EntryCollector,
    config: FurnaceConfig,
    notifier: Arc<dyn ScheduleNotifier>,
    mode: SessionMode,
    state: SessionState,
    initial_rows: Vec<RawRow>,
}

impl ScheduleSession {
    /// 新建排程会话（表格初始为一行空行）
    pub fn new_schedule(
        repo: Arc<ScheduleRepository>,
        config: FurnaceConfig,
        notifier: Arc<dyn ScheduleNotifier>,
    ) -> Self {
        Self {
            repo,
            collector: EntryCollector::new(config.bounds()),
            config,
            notifier,
            mode: SessionMode::Create,
            state: SessionState::Editing,
            initial_rows: vec![RawRow::default()],
        }
    }

    /// 打开已有排程
    ///
    /// # 返回
    /// - Ok(ScheduleSession): 编辑模式会话，initial_rows 为已保存条目
    /// - Err(ApiError::NotFound): 排程不存在
    pub fn open(
        repo: Arc<ScheduleRepository>,
        config: FurnaceConfig,
        notifier: Arc<dyn ScheduleNotifier>,
        name: &str,
    ) -> ApiResult<Self> {
        let name = name.trim();
        validate_schedule_name(name).map_err(|reason| ApiError::InvalidScheduleName {
            name: name.to_string(),
            reason,
        })?;

        let entries = repo.load(name)?;
        tracing::info!("打开排程 {}: {} 条", name, entries.len());

        let mut session = Self::new_schedule(repo, config, notifier);
        session.mode = SessionMode::Edit {
            name: name.to_string(),
        };
        session.initial_rows = entries.iter().map(ScheduleEntry::to_raw_row).collect();
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// 当前打开的排程名（新建模式为 None）
    pub fn schedule_name(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Edit { name } => Some(name.as_str()),
            SessionMode::Create => None,
        }
    }

    /// 供 UI 填充表格的初始行
    pub fn initial_rows(&self) -> &[RawRow] {
        &self.initial_rows
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// 首行自动填充：选择 Ramp/Soak 后给出默认起始温度与时长
    ///
    /// 其他取值返回 None（UI 不做改动）
    pub fn default_first_row(&self, cycle_type: &str) -> Option<RawRow> {
        let cycle_type = CycleType::parse(cycle_type)?;
        Some(RawRow {
            cycle_type: cycle_type.to_string(),
            start_temp: self.config.default_temp.to_string(),
            duration: self.config.default_time.clone(),
            ..RawRow::default()
        })
    }

    /// 仅校验不保存（不改变会话状态）
    pub fn preview(&self, source: &dyn RowSource) -> ApiResult<Vec<ScheduleEntry>> {
        Ok(self.collector.collect(&source.rows())?)
    }

    /// 更新当前排程（覆盖写入）
    pub fn update(&mut self, source: &dyn RowSource) -> ApiResult<Schedule> {
        self.ensure_editing("update")?;
        let name = match &self.mode {
            SessionMode::Edit { name } => name.clone(),
            SessionMode::Create => {
                return Err(ApiError::NoScheduleOpen {
                    action: "update".to_string(),
                })
            }
        };
        self.persist(&name, &source.rows(), SaveIntent::Overwrite)
    }

    /// 另存为（新建模式下的「保存」亦走此路径）
    ///
    /// 名称为空或用户取消时返回 Cancelled，会话保持 Editing
    pub fn save_as(
        &mut self,
        source: &dyn RowSource,
        prompt: &mut dyn NamePrompt,
    ) -> ApiResult<Schedule> {
        self.ensure_editing("save_as")?;

        let name = match prompt.prompt_name() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                tracing::debug!("另存为已取消");
                return Err(ApiError::Cancelled);
            }
        };

        self.persist(&name, &source.rows(), SaveIntent::NewSchedule)
    }

    /// 取消编辑（对话框关闭）
    pub fn cancel(&mut self) {
        if self.state != SessionState::Closed {
            tracing::debug!("编辑会话已取消");
            self.state = SessionState::Closed;
        }
    }

    fn ensure_editing(&self, action: &str) -> ApiResult<()> {
        if self.state != SessionState::Editing {
            return Err(ApiError::InvalidState {
                state: self.state.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn persist(&mut self, name: &str, rows: &[RawRow], intent: SaveIntent) -> ApiResult<Schedule> {
        self.state = SessionState::Validating;

        match self.validate_and_store(name, rows, intent) {
            Ok(schedule) => {
                self.state = SessionState::Closed;
                Ok(schedule)
            }
            Err(err) => {
                self.state = SessionState::Editing;
                if err.is_rejection() {
                    tracing::warn!("排程 {} 未通过校验: {}", name, err);
                } else {
                    tracing::error!("排程 {} 保存失败: {}", name, err);
                }
                Err(err)
            }
        }
    }

    fn validate_and_store(
        &mut self,
        name: &str,
        rows: &[RawRow],
        intent: SaveIntent,
    ) -> ApiResult<Schedule> {
        validate_schedule_name(name).map_err(|reason| ApiError::InvalidScheduleName {
            name: name.to_string(),
            reason,
        })?;

        let entries = self.collector.collect(rows)?;

        if intent == SaveIntent::NewSchedule && self.repo.exists(name)? {
            return Err(ApiError::ScheduleAlreadyExists(name.to_string()));
        }

        self.state = SessionState::Persisting;
        self.repo
            .save(name, &entries, SaveMode::Replace)
            .map_err(|e| ApiError::from(e).in_save())?;
        self.notifier.schedules_changed(name);

        Ok(Schedule::new(name, entries))
    }
}
