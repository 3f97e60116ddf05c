//! 表格单元格清洗工具
//! 统一处理缺失值标记、编码规范化

/// 表格缺失值的字面标记（pandas 导出的 CSV 中空值写作 nan）
pub const MISSING_VALUE_MARKER: &str = "nan";

/// 单元格清洗工具
pub struct CellCleaner;

impl CellCleaner {
    /// 单元格是否视为缺失（空、纯空白或缺失值标记）
    pub fn is_missing(cell: &str) -> bool {
        let trimmed = cell.trim();
        trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MISSING_VALUE_MARKER)
    }

    /// 清洗可选文本字段：缺失时返回空串，否则返回去除首尾空白的文本
    pub fn optional_text(cell: Option<&str>) -> String {
        match cell {
            Some(v) if !Self::is_missing(v) => v.trim().to_string(),
            _ => String::new(),
        }
    }

    /// 编码规范化：去空白、去点号、转大写
    pub fn normalize_code(raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| *c != '.' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase()
    }
}
