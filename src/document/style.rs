//! 摘要排版样式
//! 字体按文字脚本选择，三个字体槽（ascii / hAnsi / eastAsia）统一登记

use quick_xml::escape::escape;

use crate::utils::ScriptDetector;

/// 中文显示字体
pub const CJK_TYPEFACE: &str = "標楷體";
/// 西文衬线字体
pub const LATIN_TYPEFACE: &str = "Times New Roman";
/// 摘要标题
pub const SUMMARY_TITLE: &str = "【產生報告總結及建議】";

const TITLE_SIZE_PT: u32 = 16;
const BODY_SIZE_PT: u32 = 12;
/// 1.5 倍行距（单位 1/240 行）
const LINE_SPACING_1_5: u32 = 360;
/// 段后 6 磅（单位 twip）
const BODY_SPACE_AFTER_TWIPS: u32 = 6 * 20;

/// 三个字体槽
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSlots {
    pub ascii: &'static str,
    pub h_ansi: &'static str,
    pub east_asia: &'static str,
}

/// 文字块样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    /// 主字体；与 eastAsia 槽相同时标记 w:hint="eastAsia"
    pub typeface: &'static str,
    pub slots: FontSlots,
    pub size_pt: u32,
    pub bold: bool,
}

impl RunStyle {
    /// 标题：粗体、16 磅、三个槽都用中文字体
    pub fn title() -> Self {
        Self {
            typeface: CJK_TYPEFACE,
            slots: FontSlots {
                ascii: CJK_TYPEFACE,
                h_ansi: CJK_TYPEFACE,
                east_asia: CJK_TYPEFACE,
            },
            size_pt: TITLE_SIZE_PT,
            bold: true,
        }
    }

    /// 主字体是否落在 eastAsia 槽
    pub fn prefers_east_asia(&self) -> bool {
        self.typeface == self.slots.east_asia
    }

    /// 生成 w:r 标记
    pub fn run_xml(&self, text: &str) -> String {
        let hint = if self.prefers_east_asia() { r#" w:hint="eastAsia""# } else { "" };
        let bold = if self.bold { "<w:b/>" } else { "" };
        format!(
            r#"<w:r><w:rPr><w:rFonts w:ascii="{ascii}" w:hAnsi="{h_ansi}" w:eastAsia="{east_asia}"{hint}/>{bold}<w:sz w:val="{size}"/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#,
            ascii = self.slots.ascii,
            h_ansi = self.slots.h_ansi,
            east_asia = self.slots.east_asia,
            size = self.size_pt * 2,
            text = escape(text),
        )
    }
}

/// 正文文字块样式：含 CJK 表意文字用中文字体，否则用西文衬线字体
pub fn style_run(text: &str) -> RunStyle {
    let has_cjk = ScriptDetector::contains_cjk(text);
    RunStyle {
        typeface: if has_cjk { CJK_TYPEFACE } else { LATIN_TYPEFACE },
        slots: FontSlots {
            ascii: LATIN_TYPEFACE,
            h_ansi: LATIN_TYPEFACE,
            east_asia: CJK_TYPEFACE,
        },
        size_pt: BODY_SIZE_PT,
        bold: false,
    }
}

/// 段落格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphStyle {
    pub line_spacing: u32,
    pub space_after_twips: Option<u32>,
}

impl ParagraphStyle {
    pub fn title() -> Self {
        Self {
            line_spacing: LINE_SPACING_1_5,
            space_after_twips: None,
        }
    }

    pub fn body() -> Self {
        Self {
            line_spacing: LINE_SPACING_1_5,
            space_after_twips: Some(BODY_SPACE_AFTER_TWIPS),
        }
    }

    /// 生成单一文字块的 w:p 标记
    pub fn paragraph_xml(&self, run: &RunStyle, text: &str) -> String {
        let after = self
            .space_after_twips
            .map(|twips| format!(r#" w:after="{}""#, twips))
            .unwrap_or_default();
        format!(
            r#"<w:p><w:pPr><w:spacing{after} w:line="{line}" w:lineRule="auto"/></w:pPr>{run}</w:p>"#,
            line = self.line_spacing,
            run = run.run_xml(text),
        )
    }
}

/// 分页符段落
pub fn page_break_xml() -> &'static str {
    r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#
}

/// 摘要块：标题段落 + 每个非空行一个正文段落（插入与追加两条路径共用）
pub fn summary_block_xml(summary: &str) -> String {
    let mut block = ParagraphStyle::title().paragraph_xml(&RunStyle::title(), SUMMARY_TITLE);
    let body = ParagraphStyle::body();
    for line in summary.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        block.push_str(&body.paragraph_xml(&style_run(line), line));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_run_by_script() {
        let cjk = style_run("病人病情穩定");
        assert_eq!(cjk.typeface, CJK_TYPEFACE);
        assert!(cjk.prefers_east_asia());

        let latin = style_run("AM-Line1");
        assert_eq!(latin.typeface, LATIN_TYPEFACE);
        assert!(!latin.prefers_east_asia());

        // 两种文字块都登记全部三个字体槽
        for style in [cjk, latin] {
            assert_eq!(style.slots.ascii, LATIN_TYPEFACE);
            assert_eq!(style.slots.h_ansi, LATIN_TYPEFACE);
            assert_eq!(style.slots.east_asia, CJK_TYPEFACE);
            assert_eq!(style.size_pt, 12);
        }
    }

    #[test]
    fn test_primary_typeface_drives_hint() {
        let cjk = style_run("病人病情穩定").run_xml("病人病情穩定");
        assert!(cjk.contains(r#"w:eastAsia="標楷體" w:hint="eastAsia"/>"#));

        let latin = style_run("AM-Line1").run_xml("AM-Line1");
        assert!(latin.contains(r#"w:eastAsia="標楷體"/>"#));
        assert!(!latin.contains("w:hint"));

        // 主字体改为西文时不再提示 eastAsia
        let mut forced = style_run("病人");
        forced.typeface = LATIN_TYPEFACE;
        assert!(!forced.run_xml("病人").contains("w:hint"));
    }

    #[test]
    fn test_title_run_xml() {
        let xml = RunStyle::title().run_xml(SUMMARY_TITLE);
        assert!(xml.contains(r#"w:ascii="標楷體" w:hAnsi="標楷體" w:eastAsia="標楷體""#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = style_run("a < b & c").run_xml("a < b & c");
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_summary_block_skips_blank_lines() {
        let block = summary_block_xml("第一行\n\n   \n  second  \n");
        assert_eq!(block.matches("<w:p>").count(), 3);
        assert!(block.contains(">second</w:t>"));
        assert_eq!(block.matches(r#"w:after="120""#).count(), 2);
        assert_eq!(block.matches(r#"w:line="360""#).count(), 3);
    }
}
