// ==========================================
// 炉温排程编辑器 - 应用层
// ==========================================
// 职责: 组装配置、仓储与API，供前端 / CLI 使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
