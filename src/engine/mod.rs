// ==========================================
// 炉温排程编辑器 - 校验引擎层
// ==========================================
// 职责: 字段校验与条目收集
// 红线: 引擎不访问数据库
// ==========================================

pub mod entry_collector;
pub mod validators;

// 重导出核心引擎
pub use entry_collector::{EntryCollector, RejectionReason};
pub use validators::{
    validate_schedule_name, validate_temperature, validate_time, NameError,
    MAX_SCHEDULE_NAME_LEN,
};
