// ==========================================
// 炉温排程编辑器 - 炉子参数配置
// ==========================================
// 职责: 温度上下限、首行默认温度/时长
// 说明: 默认值仅在 config_kv 缺失对应键时使用
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::TemperatureBounds;
use crate::engine::validators::validate_time;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 默认最低温度 (°C)
pub const DEFAULT_MIN_TEMP: i32 = 0;
/// 默认最高温度 (°C)
pub const DEFAULT_MAX_TEMP: i32 = 1300;
/// 首行默认起始温度 (°C)
pub const DEFAULT_TEMP: i32 = 25;
/// 首行默认时长
pub const DEFAULT_TIME: &str = "00:00:00";

/// 炉子参数配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceConfig {
    pub min_temp: i32,
    pub max_temp: i32,
    pub default_temp: i32,
    pub default_time: String,
}

impl Default for FurnaceConfig {
    fn default() -> Self {
        Self {
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            default_temp: DEFAULT_TEMP,
            default_time: DEFAULT_TIME.to_string(),
        }
    }
}

impl FurnaceConfig {
    pub fn bounds(&self) -> TemperatureBounds {
        TemperatureBounds::new(self.min_temp, self.max_temp)
    }

    /// 校验配置自洽性
    ///
    /// - min_temp <= max_temp
    /// - default_temp 在区间内
    /// - default_time 通过时长校验
    pub fn validate(&self) -> RepositoryResult<()> {
        let bounds = self.bounds();
        if !bounds.is_well_formed() {
            return Err(RepositoryError::FieldValueError {
                field: "max_temp".to_string(),
                message: format!("温度上限 {} 低于下限 {}", self.max_temp, self.min_temp),
            });
        }
        if !bounds.contains(self.default_temp) {
            return Err(RepositoryError::FieldValueError {
                field: "default_temp".to_string(),
                message: format!("默认温度 {} 不在 {} 内", self.default_temp, bounds),
            });
        }
        if !validate_time(&self.default_time) {
            return Err(RepositoryError::FieldValueError {
                field: "default_time".to_string(),
                message: format!("默认时长格式错误: {}", self.default_time),
            });
        }
        Ok(())
    }
}
