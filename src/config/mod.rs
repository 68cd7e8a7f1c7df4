// ==========================================
// 炉温排程编辑器 - 配置层
// ==========================================
// 职责: 炉子参数配置（温度上下限、首行默认值）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod furnace_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use furnace_config::FurnaceConfig;
