// ==========================================
// 炉温排程编辑器 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 红线: 不含数据访问逻辑,不含校验引擎逻辑
// ==========================================

pub mod schedule;
pub mod types;

// 重导出核心类型
pub use schedule::{RawRow, Schedule, ScheduleEntry, ScheduleSummary};
pub use types::{CycleType, TemperatureBounds};
