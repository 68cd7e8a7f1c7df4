// ==========================================
// 炉温排程编辑器 - 会话协作者接口
// ==========================================
// 职责: 会话与外部（UI）之间的边界
// - NamePrompt: 另存为时询问排程名
// - ScheduleNotifier: 保存/更新/删除成功后通知列表刷新
// ==========================================

/// 排程名询问
pub trait NamePrompt {
    /// 返回 None 表示用户取消
    fn prompt_name(&mut self) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn prompt_name(&mut self) -> Option<String> {
        self()
    }
}

/// 固定名称（CLI / 测试用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedName(pub Option<String>);

impl FixedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn cancelled() -> Self {
        Self(None)
    }
}

impl NamePrompt for FixedName {
    fn prompt_name(&mut self) -> Option<String> {
        self.0.clone()
    }
}

/// 排程变更通知
pub trait ScheduleNotifier: Send + Sync {
    fn schedules_changed(&self, name: &str);
}

/// 空通知（无依赖列表时使用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ScheduleNotifier for NoopNotifier {
    fn schedules_changed(&self, name: &str) {
        tracing::trace!("排程 {} 已变更（无订阅者）", name);
    }
}
