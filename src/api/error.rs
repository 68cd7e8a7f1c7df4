// ==========================================
// 炉温排程编辑器 - API层错误类型
// ==========================================
// 职责: 统一的错误通道（校验拒绝 / 名称 / 存储 / 会话状态）
//       并把 Repository 错误转换为调用方可展示的错误
// ==========================================

use thiserror::Error;

use crate::engine::entry_collector::RejectionReason;
use crate::engine::validators::NameError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 校验错误（可就地修正后重试）
    // ==========================================
    #[error("排程校验未通过: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("非法排程名 '{name}': {reason}")]
    InvalidScheduleName { name: String, reason: NameError },

    #[error("排程已存在: {0}")]
    ScheduleAlreadyExists(String),

    // ==========================================
    // 会话错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("用户取消保存")]
    Cancelled,

    #[error("无效的会话状态: state={state}, action={action}")]
    InvalidState { state: String, action: String },

    #[error("未打开排程，无法执行: {action}")]
    NoScheduleOpen { action: String },

    // ==========================================
    // 配置与存储错误
    // ==========================================
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    #[error("排程保存失败: {0}")]
    SaveFailed(String),

    #[error("存储失败: {0}")]
    StorageFailure(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为校验类错误（用户可修正表格后重试）
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::Rejected(_)
                | ApiError::InvalidScheduleName { .. }
                | ApiError::ScheduleAlreadyExists(_)
        )
    }

    /// 面向用户的本地化消息
    ///
    /// 行号按 1 基展示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(reason) => match reason.row() {
                Some(row) => {
                    t_with_args(reason.message_key(), &[("row", &(row + 1).to_string())])
                }
                None => t(reason.message_key()),
            },
            ApiError::InvalidScheduleName { name, .. } => {
                t_with_args("schedule.invalid_name", &[("name", name)])
            }
            ApiError::ScheduleAlreadyExists(name) => {
                t_with_args("schedule.already_exists", &[("name", name)])
            }
            ApiError::NotFound(name) => t_with_args("schedule.not_found", &[("name", name)]),
            ApiError::Cancelled => t("schedule.cancelled"),
            ApiError::InvalidState { .. } => t("schedule.invalid_state"),
            ApiError::NoScheduleOpen { .. } => t("schedule.no_schedule_open"),
            ApiError::InvalidConfig(detail) => {
                t_with_args("schedule.invalid_config", &[("detail", detail)])
            }
            ApiError::SaveFailed(_) => t("schedule.save_failed"),
            ApiError::ImportError(detail) => {
                t_with_args("schedule.import_failed", &[("detail", detail)])
            }
            ApiError::StorageFailure(_) | ApiError::Other(_) => t("schedule.storage_failed"),
        }
    }

    /// 保存路径上的存储失败归为 SaveFailed，其余错误不变
    pub fn in_save(self) -> Self {
        match self {
            ApiError::StorageFailure(detail) => ApiError::SaveFailed(detail),
            ApiError::Other(err) => ApiError::SaveFailed(err.to_string()),
            other => other,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 存储层的技术错误统一收敛为 StorageFailure
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id, .. } => ApiError::NotFound(id),
            RepositoryError::InvalidScheduleName { name, source } => {
                ApiError::InvalidScheduleName {
                    name,
                    reason: source,
                }
            }
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::StorageFailure(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
