// ==========================================
// 炉温排程编辑器 - 国际化 (i18n)
// ==========================================
// 工具: rust-i18n（locales/zh-CN.yml 为默认，locales/en.yml）
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 界面语言环境变量
pub const LOCALE_ENV: &str = "FURNACE_SCHEDULE_LANG";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// 不支持的语言代码返回 false，当前语言不变
pub fn set_locale(locale: &str) -> bool {
    match normalize_locale(locale) {
        Some(code) => {
            rust_i18n::set_locale(code);
            true
        }
        None => {
            tracing::warn!("不支持的语言: {}", locale);
            false
        }
    }
}

/// 按 FURNACE_SCHEDULE_LANG 设置语言（未设置时保持默认）
pub fn init_from_env() {
    if let Ok(locale) = std::env::var(LOCALE_ENV) {
        set_locale(&locale);
    }
}

/// 归一化语言代码：按主语言匹配 SUPPORTED_LOCALES（en_US.UTF-8 → en，zh_CN → zh-CN）
fn normalize_locale(locale: &str) -> Option<&'static str> {
    let lang = locale
        .trim()
        .split(['.', '_', '-'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    if lang.is_empty() {
        return None;
    }
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|code| code.split('-').next() == Some(lang.as_str()))
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use furnace_schedule::i18n::t;
/// let msg = t("schedule.save_success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带 %{name} 占位符）
///
/// # 示例
/// ```no_run
/// use furnace_schedule::i18n::t_with_args;
/// let msg = t_with_args("schedule.invalid_time", &[("row", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |msg, (k, v)| {
        msg.replace(&format!("%{{{}}}", k), v)
    })
}
