// ==========================================
// 炉温排程编辑器 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

use crate::engine::validators::NameError;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    // ===== 标识符错误 =====
    #[error("非法排程名 '{name}': {source}")]
    InvalidScheduleName {
        name: String,
        #[source]
        source: NameError,
    },

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// rusqlite 错误按 SQLite 错误码归类
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        let rusqlite::Error::SqliteFailure(failure, msg) = &err else {
            return RepositoryError::DatabaseQueryError(err.to_string());
        };
        let detail = msg.clone().unwrap_or_else(|| failure.to_string());

        match failure.code {
            ErrorCode::CannotOpen | ErrorCode::NotADatabase => {
                RepositoryError::DatabaseConnectionError(detail)
            }
            // busy_timeout 耗尽后仍被占用
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                RepositoryError::LockError(detail)
            }
            ErrorCode::ConstraintViolation if detail.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(detail)
            }
            // CycleType 的 CHECK 约束
            ErrorCode::ConstraintViolation => RepositoryError::ValidationError(detail),
            _ => RepositoryError::DatabaseQueryError(detail),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
