// ==========================================
// 炉温排程编辑器 - 日志系统
// ==========================================
// 工具: tracing + tracing-subscriber
// 输出: stderr（stdout 留给 CLI 的列表/CSV 输出）
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量（text / json）
pub const LOG_FORMAT_ENV: &str = "FURNACE_SCHEDULE_LOG_FORMAT";

/// 未设置 RUST_LOG 时的过滤器：本 crate info，其余 warn
pub const DEFAULT_FILTER: &str = "warn,furnace_schedule=info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名，无法识别时回退为 Text
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or(LogFormat::Text)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: warn,furnace_schedule=info）
///   例如: RUST_LOG=furnace_schedule::engine=debug 查看逐行校验
/// - FURNACE_SCHEDULE_LOG_FORMAT: json 时输出结构化日志
///
/// # 示例
/// ```no_run
/// use furnace_schedule::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_format(LogFormat::from_env());
}

/// 按指定格式初始化日志系统
pub fn init_with_format(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    // 重复初始化（如嵌入到宿主程序）时保留已有订阅者
    let result = match format {
        LogFormat::Text => builder
            .with_target(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if result.is_err() {
        tracing::debug!("日志系统已初始化，忽略重复调用");
    }
}

/// 初始化测试环境的日志系统
///
/// 使用 debug 级别，便于查看逐行校验过程
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
