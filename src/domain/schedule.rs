// ==========================================
// 炉温排程编辑器 - 排程实体
// ==========================================
// 职责: 定义排程条目、原始编辑行、排程及摘要
// 红线: cycle_index 恒等于条目在排程中的 1 基位置
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::CycleType;

// ==========================================
// ScheduleEntry - 排程条目（一个热处理周期）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 周期序号（1 基，由存储顺序决定）
    pub cycle_index: u32,
    pub cycle_type: CycleType,
    /// 起始温度 (°C)
    pub start_temp: i32,
    /// 结束温度 (°C)
    pub end_temp: i32,
    /// 周期时长，文本形式 H(H):M(M):S(S)
    pub duration: String,
    pub notes: Option<String>,
}

impl ScheduleEntry {
    pub fn new(
        cycle_index: u32,
        cycle_type: CycleType,
        start_temp: i32,
        end_temp: i32,
        duration: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            cycle_index,
            cycle_type,
            start_temp,
            end_temp,
            duration: duration.into(),
            // 空备注统一为 None
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }

    /// 转换为编辑器行（回填 UI 用）
    pub fn to_raw_row(&self) -> RawRow {
        RawRow {
            cycle_type: self.cycle_type.to_string(),
            start_temp: self.start_temp.to_string(),
            end_temp: self.end_temp.to_string(),
            duration: self.duration.clone(),
            notes: self.notes.clone().unwrap_or_default(),
        }
    }
}

// ==========================================
// RawRow - 编辑器原始行
// ==========================================
// 五个字段均为用户输入的原始文本，按显示顺序提供
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cycle_type: String,
    pub start_temp: String,
    pub end_temp: String,
    pub duration: String,
    pub notes: String,
}

impl RawRow {
    pub fn new(
        cycle_type: impl Into<String>,
        start_temp: impl Into<String>,
        end_temp: impl Into<String>,
        duration: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            cycle_type: cycle_type.into(),
            start_temp: start_temp.into(),
            end_temp: end_temp.into(),
            duration: duration.into(),
            notes: notes.into(),
        }
    }

    /// 必填字段（类型/起始温度/结束温度/时长）任一为空即视为空行
    pub fn is_incomplete(&self) -> bool {
        [
            &self.cycle_type,
            &self.start_temp,
            &self.end_temp,
            &self.duration,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

impl From<(&str, &str, &str, &str, &str)> for RawRow {
    fn from(t: (&str, &str, &str, &str, &str)) -> Self {
        RawRow::new(t.0, t.1, t.2, t.3, t.4)
    }
}

// ==========================================
// Schedule - 命名排程
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// 创建排程并按位置重新编号 cycle_index
    pub fn new(name: impl Into<String>, mut entries: Vec<ScheduleEntry>) -> Self {
        renumber(&mut entries);
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 编号是否连续（1..N 无缺口）
    pub fn is_contiguous(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.cycle_index as usize == i + 1)
    }

    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.entries.iter().map(ScheduleEntry::to_raw_row).collect()
    }
}

/// 按位置重写 cycle_index（1 基）
pub fn renumber(entries: &mut [ScheduleEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.cycle_index = (i + 1) as u32;
    }
}

// ==========================================
// ScheduleSummary - 排程列表摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub name: String,
    pub cycle_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
