// ==========================================
// 炉温排程编辑器 - 条目收集器
// ==========================================
// 职责: 将编辑器原始行转换为有序的合法排程条目
// 策略: 快速失败，第一个非法行即终止，后续行不再检查
// 约束: 纯函数（仅 debug 日志），警告展示由 UI 负责
// ==========================================

use std::num::IntErrorKind;

use thiserror::Error;

use crate::domain::schedule::{RawRow, ScheduleEntry};
use crate::domain::types::{CycleType, TemperatureBounds};
use crate::engine::validators::{validate_temperature, validate_time};

// ==========================================
// RejectionReason - 拒绝原因
// ==========================================
// row 为 0 基行号（与编辑器表格行号一致）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("第 {row} 行时长格式错误（应为 HH:MM:SS）")]
    InvalidTime { row: usize },

    #[error("第 {row} 行周期类型无效（仅支持 Ramp/Soak）")]
    InvalidCycleType { row: usize },

    #[error("第 {row} 行温度不是整数")]
    InvalidTemperatureFormat { row: usize },

    #[error("第 {row} 行温度超出允许范围")]
    InvalidTemperature { row: usize },

    #[error("没有可保存的有效条目")]
    NoValidEntries,
}

impl RejectionReason {
    /// 出错行（0 基），NoValidEntries 无行号
    pub fn row(&self) -> Option<usize> {
        match self {
            RejectionReason::InvalidTime { row }
            | RejectionReason::InvalidCycleType { row }
            | RejectionReason::InvalidTemperatureFormat { row }
            | RejectionReason::InvalidTemperature { row } => Some(*row),
            RejectionReason::NoValidEntries => None,
        }
    }

    /// 对应的国际化消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            RejectionReason::InvalidTime { .. } => "schedule.invalid_time",
            RejectionReason::InvalidCycleType { .. } => "schedule.invalid_cycle_type",
            RejectionReason::InvalidTemperatureFormat { .. } => {
                "schedule.invalid_temperature_format"
            }
            RejectionReason::InvalidTemperature { .. } => "schedule.invalid_temperature",
            RejectionReason::NoValidEntries => "schedule.no_valid_entries",
        }
    }
}

// ==========================================
// EntryCollector - 条目收集器
// ==========================================

/// 条目收集器
///
/// 处理规则（按行顺序）：
/// 1. 必填字段任一为空 → 静默跳过，不占用序号
/// 2. 时长非法 → InvalidTime
/// 3. 周期类型非法 → InvalidCycleType
/// 4. 起止温度任一非整数 → InvalidTemperatureFormat（先于区间检查）；
///    越界 → InvalidTemperature
/// 5. 全部跳过 → NoValidEntries
#[derive(Debug, Clone, Copy)]
pub struct EntryCollector {
    bounds: TemperatureBounds,
}

impl EntryCollector {
    pub fn new(bounds: TemperatureBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> TemperatureBounds {
        self.bounds
    }

    /// 收集并校验全部行
    pub fn collect(&self, rows: &[RawRow]) -> Result<Vec<ScheduleEntry>, RejectionReason> {
        let mut entries = Vec::with_capacity(rows.len());

        for (row, raw) in rows.iter().enumerate() {
            if raw.is_incomplete() {
                tracing::debug!(row, "跳过空行");
                continue;
            }

            let cycle_index = (entries.len() + 1) as u32;
            let entry = self.collect_row(row, raw, cycle_index)?;
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(RejectionReason::NoValidEntries);
        }

        tracing::debug!("收集完成: {} 行输入, {} 个有效条目", rows.len(), entries.len());
        Ok(entries)
    }

    fn collect_row(
        &self,
        row: usize,
        raw: &RawRow,
        cycle_index: u32,
    ) -> Result<ScheduleEntry, RejectionReason> {
        let duration = raw.duration.trim();
        if !validate_time(duration) {
            return Err(RejectionReason::InvalidTime { row });
        }

        let cycle_type = CycleType::parse(&raw.cycle_type)
            .ok_or(RejectionReason::InvalidCycleType { row })?;

        // 先确认两端均为整数，再做区间检查
        let start = parse_integer(row, &raw.start_temp)?;
        let end = parse_integer(row, &raw.end_temp)?;
        let start_temp = self.check_temperature(row, start)?;
        let end_temp = self.check_temperature(row, end)?;

        let notes = raw.notes.trim();
        Ok(ScheduleEntry::new(
            cycle_index,
            cycle_type,
            start_temp,
            end_temp,
            duration,
            (!notes.is_empty()).then(|| notes.to_string()),
        ))
    }

    fn check_temperature(&self, row: usize, value: i64) -> Result<i32, RejectionReason> {
        i32::try_from(value)
            .ok()
            .filter(|v| validate_temperature(*v, &self.bounds))
            .ok_or_else(|| {
                tracing::debug!(row, value, bounds = %self.bounds, "温度越界");
                RejectionReason::InvalidTemperature { row }
            })
    }
}

/// 解析整数温度；超出 i64 的整数按越界处理（饱和到边界值）
fn parse_integer(row: usize, text: &str) -> Result<i64, RejectionReason> {
    match text.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(RejectionReason::InvalidTemperatureFormat { row }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> EntryCollector {
        EntryCollector::new(TemperatureBounds::new(0, 1300))
    }

    fn rows(data: &[(&str, &str, &str, &str, &str)]) -> Vec<RawRow> {
        data.iter().map(|t| RawRow::from(*t)).collect()
    }

    #[test]
    fn test_trailing_blank_row_is_skipped() {
        let input = rows(&[
            ("Ramp", "20", "200", "01:30:00", ""),
            ("", "", "", "", ""),
        ]);
        let entries = collector().collect(&input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cycle_index, 1);
        assert_eq!(entries[0].cycle_type, CycleType::Ramp);
        assert_eq!(entries[0].start_temp, 20);
        assert_eq!(entries[0].end_temp, 200);
        assert_eq!(entries[0].duration, "01:30:00");
        assert_eq!(entries[0].notes, None);
    }

    #[test]
    fn test_skipped_rows_do_not_consume_index() {
        let input = rows(&[
            ("", "", "", "", ""),
            ("Ramp", "20", "500", "1:00:00", "heat"),
            ("Soak", "500", "", "2:00:00", "missing end"),
            ("Soak", "500", "500", "2:00:00", "hold"),
        ]);
        let entries = collector().collect(&input).unwrap();
        let indices: Vec<u32> = entries.iter().map(|e| e.cycle_index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(entries[0].notes.as_deref(), Some("heat"));
        assert_eq!(entries[1].notes.as_deref(), Some("hold"));
    }

    #[test]
    fn test_invalid_time_rejected_with_row() {
        let input = rows(&[("Soak", "20", "200", "bad-time", "")]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidTime { row: 0 })
        );
    }

    #[test]
    fn test_temperature_format_and_range() {
        let input = rows(&[
            ("Ramp", "20", "200", "01:00:00", ""),
            ("Ramp", "20.5", "200", "01:00:00", ""),
        ]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidTemperatureFormat { row: 1 })
        );

        let input = rows(&[("Ramp", "20", "1301", "01:00:00", "")]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidTemperature { row: 0 })
        );

        let input = rows(&[("Ramp", "0", "1300", "01:00:00", "")]);
        assert!(collector().collect(&input).is_ok());
    }

    #[test]
    fn test_both_temperatures_parsed_before_range_check() {
        // 起始温度越界但终止温度非整数：格式错误优先
        let input = rows(&[("Ramp", "5000", "abc", "01:00:00", "")]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidTemperatureFormat { row: 0 })
        );
    }

    #[test]
    fn test_oversized_integer_is_out_of_range() {
        for big in ["99999999999", "-99999999999", "99999999999999999999999"] {
            let input = rows(&[("Ramp", big, "200", "01:00:00", "")]);
            assert_eq!(
                collector().collect(&input),
                Err(RejectionReason::InvalidTemperature { row: 0 }),
                "{} 应判为越界",
                big
            );
        }
    }

    #[test]
    fn test_unknown_cycle_type_rejected() {
        let input = rows(&[("Hold", "20", "200", "01:00:00", "")]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidCycleType { row: 0 })
        );
    }

    #[test]
    fn test_fail_fast_reports_first_invalid_row_only() {
        let input = rows(&[
            ("Ramp", "20", "200", "01:00:00", ""),
            ("Ramp", "abc", "200", "01:00:00", ""),
            ("Ramp", "20", "200", "bad", ""),
        ]);
        let err = collector().collect(&input).unwrap_err();
        assert_eq!(err, RejectionReason::InvalidTemperatureFormat { row: 1 });
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_time_checked_before_temperature() {
        let input = rows(&[("Ramp", "abc", "200", "99:99:99", "")]);
        assert_eq!(
            collector().collect(&input),
            Err(RejectionReason::InvalidTime { row: 0 })
        );
    }

    #[test]
    fn test_no_valid_entries() {
        assert_eq!(collector().collect(&[]), Err(RejectionReason::NoValidEntries));
        let input = rows(&[("", "", "", "", ""), ("Ramp", "", "", "", "note only")]);
        let err = collector().collect(&input).unwrap_err();
        assert_eq!(err, RejectionReason::NoValidEntries);
        assert_eq!(err.row(), None);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let input = rows(&[(" Soak ", " 300 ", "300 ", " 0:45:00 ", "  ")]);
        let entries = collector().collect(&input).unwrap();
        assert_eq!(entries[0].cycle_type, CycleType::Soak);
        assert_eq!(entries[0].start_temp, 300);
        assert_eq!(entries[0].duration, "0:45:00");
        assert_eq!(entries[0].notes, None);
    }
}
