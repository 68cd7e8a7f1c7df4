// ==========================================
// 炉温排程编辑器 - 导入层
// ==========================================
// 职责: 外部行数据来源（编辑器表格 / CSV）
// ==========================================

pub mod error;
pub mod file_parser;
pub mod row_source;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{write_rows_csv, CsvRowSource, CSV_HEADERS};
pub use row_source::RowSource;
