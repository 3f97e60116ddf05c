//! 文字脚本检测
//! 判断文本是否包含中日韩统一表意文字

/// 脚本检测工具
pub struct ScriptDetector;

impl ScriptDetector {
    /// 字符是否位于 CJK 统一表意文字区（U+4E00..=U+9FFF）
    pub fn is_cjk_ideograph(c: char) -> bool {
        ('\u{4e00}'..='\u{9fff}').contains(&c)
    }

    /// 文本中是否至少含有一个 CJK 表意文字
    pub fn contains_cjk(text: &str) -> bool {
        text.chars().any(Self::is_cjk_ideograph)
    }
}
