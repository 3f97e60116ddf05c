//! 文档文本读取：按正文段落提取纯文本，作为模型输入

use std::path::Path;

use super::package::DocxPackage;
use super::paragraph::BodyLayout;
use crate::error::CoderResult;

/// 文档文本读取器
pub struct DocumentReader;

impl DocumentReader {
    /// 提取非空正文段落文本，以换行连接
    pub fn extract_text(document: &Path) -> CoderResult<String> {
        let package = DocxPackage::open(document)?;
        Self::extract_from_xml(package.document_xml())
    }

    pub fn extract_from_xml(document_xml: &str) -> CoderResult<String> {
        let layout = BodyLayout::scan(document_xml)?;
        let lines: Vec<String> = layout
            .paragraphs
            .into_iter()
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::package::test_support::*;
    use tempfile::tempdir;

    #[test]
    fn test_extract_text_skips_blank_paragraphs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("case.docx");
        let body = format!(
            "{}<w:p/>{}{}",
            text_paragraph("主訴：胸痛三天"),
            text_paragraph("   "),
            text_paragraph("Troponin I 升高")
        );
        write_docx(&path, &document_xml(&body));

        let text = DocumentReader::extract_text(&path).unwrap();
        assert_eq!(text, "主訴：胸痛三天\nTroponin I 升高");
    }
}
