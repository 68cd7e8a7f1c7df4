// ==========================================
// 炉温排程编辑器 - 行来源 Trait
// ==========================================
// 职责: 按显示顺序提供编辑器原始行
// 实现者: 编辑器表格（外部）、CsvRowSource、内存行列表
// ==========================================

use crate::domain::schedule::RawRow;

// ==========================================
// RowSource Trait
// ==========================================
// 核心只通过该接口读取行，不直接接触 UI 控件
pub trait RowSource {
    /// 返回全部原始行（含空行，按显示顺序）
    fn rows(&self) -> Vec<RawRow>;
}

impl RowSource for [RawRow] {
    fn rows(&self) -> Vec<RawRow> {
        self.to_vec()
    }
}

impl RowSource for Vec<RawRow> {
    fn rows(&self) -> Vec<RawRow> {
        self.clone()
    }
}
