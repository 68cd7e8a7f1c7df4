// ==========================================
// 炉温排程编辑器 - API 层
// ==========================================
// 职责: 提供排程业务接口,供 UI / CLI 调用
// ==========================================

pub mod collaborators;
pub mod error;
pub mod schedule_api;
pub mod schedule_session;

// 重导出核心类型
pub use collaborators::{FixedName, NamePrompt, NoopNotifier, ScheduleNotifier};
pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
pub use schedule_session::{ScheduleSession, SessionMode, SessionState};
