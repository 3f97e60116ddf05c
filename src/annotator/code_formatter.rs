//! 诊断编码格式化
//! 将行内裸编码（如 I25110）替换为带中英文名称的显示形式

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::{CodeDictionary, CodeEntry};
use crate::utils::{CellCleaner, MISSING_VALUE_MARKER};

/// 编码模式：一个字母 + 1~6 位数字 + 可选（点 + 1~3 位数字），仅限 ASCII
static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][0-9]{1,6}(?:\.[0-9]{1,3})?").unwrap()
});

/// 编码格式化工具
pub struct CodeFormatter;

impl CodeFormatter {
    /// 替换单行中的所有编码；编码两侧紧贴 ASCII 字母或数字时视为普通文本
    pub fn substitute_line(line: &str, dictionary: &CodeDictionary) -> String {
        let mut output = String::with_capacity(line.len());
        let mut last = 0;

        for matched in CODE_PATTERN.find_iter(line) {
            if !Self::is_token_boundary(line, matched.start(), matched.end()) {
                continue;
            }
            output.push_str(&line[last..matched.start()]);
            output.push_str(&Self::render(matched.as_str(), dictionary));
            last = matched.end();
        }

        output.push_str(&line[last..]);
        output
    }

    /// 渲染单个编码：规范化、查字典、补点号、追加名称
    pub fn render(raw_code: &str, dictionary: &CodeDictionary) -> String {
        let normalized = CellCleaner::normalize_code(raw_code);
        let mut display = Self::display_code(&normalized);

        if let Some(CodeEntry { english, chinese }) = dictionary.lookup(&normalized) {
            if Self::has_name(english) {
                display.push_str(" - ");
                display.push_str(english.trim());
            }
            if Self::has_name(chinese) {
                display.push_str(" (");
                display.push_str(chinese.trim());
                display.push(')');
            }
        }

        display
    }

    /// ICD 显示形式：超过三位时在第三位后插入点号（I25110 -> I25.110）
    pub fn display_code(normalized: &str) -> String {
        if normalized.len() > 3 && normalized.is_char_boundary(3) {
            format!("{}.{}", &normalized[..3], &normalized[3..])
        } else {
            normalized.to_string()
        }
    }

    fn has_name(name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && name != MISSING_VALUE_MARKER
    }

    fn is_token_boundary(line: &str, start: usize, end: usize) -> bool {
        let before = line[..start].chars().next_back();
        let after = line[end..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    }
}
