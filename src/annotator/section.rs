//! 段落状态机
//! 按段落标题切换 CAD 判断结果区 / 一般区，并定义各状态的行处理函数

use crate::rule::CodeDictionary;
use super::code_formatter::CodeFormatter;

/// CAD 判断结果段落标题
pub const CAD_RESULT_HEADER: &str = "【CAD 判斷結果】";
/// 一般 ICD 推荐段落标题（模型输出中的原始写法）
pub const GENERAL_ICD_HEADER: &str = "【一般 ICD 推薦】";
/// 一般 ICD 推荐段落替换后的标题
pub const GENERAL_ICD_TITLE: &str = "一般 ICD-10 診斷推薦（含中英文名稱）";

const BANNER_CHAR: char = '=';
const BANNER_WIDTH: usize = 104;

/// 装饰分隔线
pub fn banner() -> String {
    BANNER_CHAR.to_string().repeat(BANNER_WIDTH)
}

/// 单行分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// 空行或纯空白行
    Blank,
    /// CAD 判断结果标题，附带标题去除后的剩余文本
    CadHeader { remainder: String },
    /// 一般 ICD 推荐标题（仅在 CAD 区之外识别，原行丢弃）
    GeneralIcdHeader,
    /// 普通内容行（已去除首尾空白）
    Content(&'a str),
}

impl<'a> LineEvent<'a> {
    /// 按当前状态对单行分类；CAD 标题在任何状态下都优先识别，
    /// CAD 区内的其余行（包括一般标题）一律按内容行处理
    pub fn classify(line: &'a str, state: SectionState) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineEvent::Blank;
        }
        if trimmed.contains(CAD_RESULT_HEADER) {
            let remainder = trimmed.replace(CAD_RESULT_HEADER, "").trim().to_string();
            return LineEvent::CadHeader { remainder };
        }
        if state == SectionState::OutsideCadSection && trimmed.contains(GENERAL_ICD_HEADER) {
            return LineEvent::GeneralIcdHeader;
        }
        LineEvent::Content(trimmed)
    }
}

/// 段落状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionState {
    #[default]
    OutsideCadSection,
    InsideCadSection,
}

impl SectionState {
    /// 状态转移：只有 CAD 标题会进入 CAD 区，进入后不再离开
    pub fn transition(self, event: &LineEvent<'_>) -> Self {
        match event {
            LineEvent::CadHeader { .. } => SectionState::InsideCadSection,
            LineEvent::GeneralIcdHeader | LineEvent::Blank | LineEvent::Content(_) => self,
        }
    }

    /// 当前状态下的内容行处理
    pub fn render_content(self, line: &str, dictionary: &CodeDictionary) -> String {
        match self {
            // CAD 结果区的理由行也会引用编码，统一走编码替换
            SectionState::InsideCadSection => CodeFormatter::substitute_line(line, dictionary),
            SectionState::OutsideCadSection => CodeFormatter::substitute_line(line, dictionary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        let outside = SectionState::OutsideCadSection;
        assert_eq!(LineEvent::classify("   ", outside), LineEvent::Blank);
        assert_eq!(
            LineEvent::classify("【CAD 判斷結果】", outside),
            LineEvent::CadHeader { remainder: String::new() }
        );
        assert_eq!(
            LineEvent::classify("【CAD 判斷結果】 是否主診為 CAD：是", outside),
            LineEvent::CadHeader { remainder: "是否主診為 CAD：是".to_string() }
        );
        assert_eq!(LineEvent::classify(" 【一般 ICD 推薦】 ", outside), LineEvent::GeneralIcdHeader);
        assert_eq!(LineEvent::classify("  1. I10  ", outside), LineEvent::Content("1. I10"));
    }

    #[test]
    fn test_general_header_is_content_inside_cad_section() {
        let inside = SectionState::InsideCadSection;
        assert_eq!(
            LineEvent::classify(" 【一般 ICD 推薦】 ", inside),
            LineEvent::Content("【一般 ICD 推薦】")
        );
        // CAD 标题在 CAD 区内仍然识别
        assert_eq!(
            LineEvent::classify("【CAD 判斷結果】", inside),
            LineEvent::CadHeader { remainder: String::new() }
        );
    }

    #[test]
    fn test_transitions() {
        let state = SectionState::default();
        assert_eq!(state, SectionState::OutsideCadSection);
        assert_eq!(state.transition(&LineEvent::GeneralIcdHeader), SectionState::OutsideCadSection);

        let state = state.transition(&LineEvent::CadHeader { remainder: String::new() });
        assert_eq!(state, SectionState::InsideCadSection);
        assert_eq!(state.transition(&LineEvent::Content("x")), SectionState::InsideCadSection);
        assert_eq!(state.transition(&LineEvent::Blank), SectionState::InsideCadSection);

        // 重复的 CAD 标题保持在 CAD 区
        let state = state.transition(&LineEvent::CadHeader { remainder: String::new() });
        assert_eq!(state, SectionState::InsideCadSection);

        // 一般标题在 CAD 区内按内容行处理，不离开 CAD 区
        let event = LineEvent::classify("【一般 ICD 推薦】", state);
        assert_eq!(state.transition(&event), SectionState::InsideCadSection);
    }

    #[test]
    fn test_banner_width() {
        let line = banner();
        assert_eq!(line.chars().count(), 104);
        assert!(line.chars().all(|c| c == '='));
    }
}
