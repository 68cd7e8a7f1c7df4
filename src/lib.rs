// ==========================================
// 炉温排程编辑器 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 热处理排程（Ramp/Soak 周期序列）的校验与持久化核心
//           UI 作为外部协作者，通过 RowSource / NamePrompt / ScheduleNotifier 接入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 字段校验与条目收集
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 行数据来源
pub mod importer;

// 配置层 - 炉子参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CycleType, RawRow, Schedule, ScheduleEntry, ScheduleSummary, TemperatureBounds};

// 引擎
pub use engine::{EntryCollector, RejectionReason};

// 仓储
pub use repository::{SaveMode, ScheduleRepository};

// API
pub use api::{ApiError, ApiResult, ScheduleApi, ScheduleSession, SessionState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Smart Furnace 排程编辑器";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
