//! 文本标注器核心：逐行驱动段落状态机，输出标注后的报告文本

use tracing::debug;

use super::section::{banner, LineEvent, SectionState, CAD_RESULT_HEADER, GENERAL_ICD_TITLE};
use crate::rule::CodeDictionary;

/// 文本标注器（无状态，可并发使用）
#[derive(Debug, Clone, Copy)]
pub struct TextAnnotator<'d> {
    dictionary: &'d CodeDictionary,
}

impl<'d> TextAnnotator<'d> {
    pub fn new(dictionary: &'d CodeDictionary) -> Self {
        Self { dictionary }
    }

    /// 标注模型输出；对任意 UTF-8 文本都返回结果，不会失败
    pub fn annotate(&self, text: &str) -> String {
        let mut output: Vec<String> = Vec::new();
        let mut state = SectionState::default();

        for line in text.trim().split('\n') {
            let event = LineEvent::classify(line, state);
            state = state.transition(&event);

            match event {
                LineEvent::Blank => output.push(String::new()),
                LineEvent::CadHeader { remainder } => {
                    output.push(banner());
                    output.push(CAD_RESULT_HEADER.to_string());
                    output.push(banner());
                    // 标题行去掉标题后的剩余部分，独占一行时为空行
                    output.push(state.render_content(&remainder, self.dictionary));
                }
                LineEvent::GeneralIcdHeader => {
                    output.push(String::new());
                    output.push(banner());
                    output.push(GENERAL_ICD_TITLE.to_string());
                    output.push(banner());
                }
                LineEvent::Content(content) => {
                    output.push(state.render_content(content, self.dictionary));
                }
            }
        }

        debug!("模型输出标注完成，输出{}行", output.len());
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CodeEntry;

    fn dictionary() -> CodeDictionary {
        [
            (
                "I25110".to_string(),
                CodeEntry {
                    english: "Atherosclerotic heart disease".to_string(),
                    chinese: "冠狀動脈粥樣硬化性心臟病".to_string(),
                },
            ),
            (
                "I5020".to_string(),
                CodeEntry {
                    english: "Unspecified systolic (congestive) heart failure".to_string(),
                    chinese: "未明示收縮性(充血性)心臟衰竭".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_full_model_output() {
        let raw = "\
【CAD 判斷結果】
是否主診為 CAD：是
關鍵證據：
1. 胸痛伴 ST 段變化，符合 I25110

【一般 ICD 推薦】
1. I25.110 - placeholder
   原因：冠狀動脈造影
2. I5020
";
        let dict = dictionary();
        let out = TextAnnotator::new(&dict).annotate(raw);
        let bar = banner();
        let expected = vec![
            bar.as_str(),
            "【CAD 判斷結果】",
            bar.as_str(),
            "",
            "是否主診為 CAD：是",
            "關鍵證據：",
            "1. 胸痛伴 ST 段變化，符合 I25.110 - Atherosclerotic heart disease (冠狀動脈粥樣硬化性心臟病)",
            "",
            "【一般 ICD 推薦】",
            "1. I25.110 - Atherosclerotic heart disease (冠狀動脈粥樣硬化性心臟病) - placeholder",
            "原因：冠狀動脈造影",
            "2. I50.20 - Unspecified systolic (congestive) heart failure (未明示收縮性(充血性)心臟衰竭)",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_header_with_trailing_text() {
        let dict = dictionary();
        let out = TextAnnotator::new(&dict).annotate("【CAD 判斷結果】 主診斷 I25110");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], CAD_RESULT_HEADER);
        assert!(lines[3].starts_with("主診斷 I25.110 - "));
    }

    #[test]
    fn test_header_alone_keeps_empty_remainder_line() {
        let dict = dictionary();
        let out = TextAnnotator::new(&dict).annotate("【CAD 判斷結果】");
        let bar = banner();
        assert_eq!(out, format!("{bar}\n{CAD_RESULT_HEADER}\n{bar}\n"));
        assert_eq!(out.split('\n').count(), 4);
    }

    #[test]
    fn test_general_header_inside_cad_section_is_substituted_line() {
        let dict = dictionary();
        let out = TextAnnotator::new(&dict).annotate("【CAD 判斷結果】\nx\n【一般 ICD 推薦】\n1. I25110");
        let bar = banner();
        let expected = [
            bar.as_str(),
            CAD_RESULT_HEADER,
            bar.as_str(),
            "",
            "x",
            "【一般 ICD 推薦】",
            "1. I25.110 - Atherosclerotic heart disease (冠狀動脈粥樣硬化性心臟病)",
        ]
        .join("\n");
        assert_eq!(out, expected);
        assert!(!out.contains(GENERAL_ICD_TITLE));
    }

    #[test]
    fn test_general_header_outside_cad_section_gets_banner() {
        let dict = dictionary();
        let out = TextAnnotator::new(&dict).annotate("【一般 ICD 推薦】\n1. I25110");
        let bar = banner();
        let expected = [
            "",
            bar.as_str(),
            GENERAL_ICD_TITLE,
            bar.as_str(),
            "1. I25.110 - Atherosclerotic heart disease (冠狀動脈粥樣硬化性心臟病)",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_plain_text_round_trips() {
        let dict = dictionary();
        let text = "病人病情穩定\n\n建議門診追蹤";
        assert_eq!(TextAnnotator::new(&dict).annotate(text), text);
    }

    #[test]
    fn test_whitespace_only_lines_become_blank() {
        let dict = CodeDictionary::default();
        let out = TextAnnotator::new(&dict).annotate("a\n   \t\nb");
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_empty_input() {
        let dict = CodeDictionary::default();
        assert_eq!(TextAnnotator::new(&dict).annotate(""), "");
    }
}
