// ==========================================
// 炉温排程编辑器 - 领域类型定义
// ==========================================
// 职责: 周期类型、温度区间等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 周期类型 (Cycle Type)
// ==========================================
// 文本形式与数据库 CycleType 列一致: "Ramp" / "Soak"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleType {
    Ramp, // 升/降温
    Soak, // 保温
}

impl CycleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleType::Ramp => "Ramp",
            CycleType::Soak => "Soak",
        }
    }

    /// 严格解析（区分大小写，仅去除首尾空白）
    ///
    /// 空串或其他取值返回 None
    pub fn parse(s: &str) -> Option<CycleType> {
        match s.trim() {
            "Ramp" => Some(CycleType::Ramp),
            "Soak" => Some(CycleType::Soak),
            _ => None,
        }
    }

    pub fn all() -> [CycleType; 2] {
        [CycleType::Ramp, CycleType::Soak]
    }
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 温度区间 (Temperature Bounds)
// ==========================================
// 闭区间 [min, max]，单位 °C，来源于配置层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBounds {
    pub min: i32,
    pub max: i32,
}

impl TemperatureBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// 边界值视为合法
    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }
}

impl fmt::Display for TemperatureBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_type_parse() {
        assert_eq!(CycleType::parse("Ramp"), Some(CycleType::Ramp));
        assert_eq!(CycleType::parse(" Soak "), Some(CycleType::Soak));
        assert_eq!(CycleType::parse("ramp"), None);
        assert_eq!(CycleType::parse(""), None);
        assert_eq!(CycleType::parse("Hold"), None);
    }

    #[test]
    fn test_cycle_type_display_matches_storage_text() {
        for ct in CycleType::all() {
            assert_eq!(CycleType::parse(&ct.to_string()), Some(ct));
        }
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = TemperatureBounds::new(0, 1300);
        assert!(bounds.contains(0));
        assert!(bounds.contains(1300));
        assert!(!bounds.contains(-1));
        assert!(!bounds.contains(1301));
        assert!(bounds.is_well_formed());
        assert!(!TemperatureBounds::new(10, 5).is_well_formed());
    }
}
