// ==========================================
// 炉温排程编辑器 - 字段校验器
// ==========================================
// 职责: 单字段合法性判定（时长、温度、排程名）
// 约束: 纯函数，无副作用；全系统唯一的时长格式校验入口
// ==========================================

use thiserror::Error;

use crate::db::{CATALOG_TABLE, CONFIG_TABLE};
use crate::domain::types::TemperatureBounds;

/// 排程名最大长度
pub const MAX_SCHEDULE_NAME_LEN: usize = 64;

/// 内部保留表名，排程不得占用
pub const RESERVED_TABLE_NAMES: &[&str] = &[CATALOG_TABLE, CONFIG_TABLE];

// 时长各段上限: 时 / 分 / 秒
const TIME_FIELD_LIMITS: [u32; 3] = [99, 59, 59];

// ==========================================
// 时长校验
// ==========================================

/// 校验时长文本 `H(H):M(M):S(S)`
///
/// 规则:
/// - 按 `:` 切分后必须恰好 3 段
/// - 每段 1~2 位 ASCII 数字
/// - 时 0~99，分/秒 0~59
///
/// # 示例
/// ```
/// use furnace_schedule::engine::validators::validate_time;
/// assert!(validate_time("01:30:00"));
/// assert!(validate_time("5:5:5"));
/// assert!(!validate_time("00:60:00"));
/// ```
pub fn validate_time(text: &str) -> bool {
    if text.is_empty() {
        tracing::debug!("时长为空");
        return false;
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != TIME_FIELD_LIMITS.len() {
        tracing::debug!("时长 '{}' 段数不符: {}", text, parts.len());
        return false;
    }

    let ok = parts
        .iter()
        .zip(TIME_FIELD_LIMITS)
        .all(|(part, limit)| parse_time_field(part).is_some_and(|v| v <= limit));

    if !ok {
        tracing::debug!("时长 '{}' 格式或取值越界", text);
    }
    ok
}

fn parse_time_field(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

// ==========================================
// 温度校验
// ==========================================

/// 温度是否落在配置区间内（闭区间）
pub fn validate_temperature(value: i32, bounds: &TemperatureBounds) -> bool {
    bounds.contains(value)
}

// ==========================================
// 排程名校验
// ==========================================
// 排程名会直接作为 SQLite 表名，必须先过白名单

/// 排程名错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("排程名不能为空")]
    Empty,

    #[error("排程名过长: {len} > {max}")]
    TooLong { len: usize, max: usize },

    #[error("排程名含非法字符: {0:?}")]
    InvalidCharacter(char),

    #[error("排程名不能以数字开头")]
    LeadingDigit,

    #[error("排程名为系统保留: {0}")]
    Reserved(String),
}

/// 校验排程名
///
/// 白名单: ASCII 字母、数字、下划线；不得以数字开头；
/// 不得以 `sqlite_` 开头；不得与内部表重名（不区分大小写）
pub fn validate_schedule_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let len = name.chars().count();
    if len > MAX_SCHEDULE_NAME_LEN {
        return Err(NameError::TooLong {
            len,
            max: MAX_SCHEDULE_NAME_LEN,
        });
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(NameError::InvalidCharacter(c));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(NameError::LeadingDigit);
    }

    let lower = name.to_ascii_lowercase();
    if lower.starts_with("sqlite_") || RESERVED_TABLE_NAMES.contains(&lower.as_str()) {
        return Err(NameError::Reserved(name.to_string()));
    }

    Ok(())
}
