//! 正文段落扫描
//! 基于 quick-xml 事件流定位 w:body 直属段落的字节区间，供原位替换使用

use std::ops::Range;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{CoderError, CoderResult};

/// 正文直属段落在 document.xml 中的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpan {
    /// 整个段落（含起止标签）
    pub range: Range<usize>,
    /// 起始标签 `<w:p ...>` 的区间；自闭合段落与 range 相同
    pub open_tag: Range<usize>,
    /// 段落属性 w:pPr 的区间
    pub properties: Option<Range<usize>>,
    /// 段落纯文本（w:t / w:tab / w:br）
    pub text: String,
}

impl ParagraphSpan {
    pub fn is_self_closing(&self) -> bool {
        self.open_tag == self.range
    }

    /// 段落原始标记
    pub fn markup<'a>(&self, xml: &'a str) -> &'a str {
        &xml[self.range.clone()]
    }

    /// 清空段落内容，仅保留起止标签与段落属性
    pub fn cleared_markup(&self, xml: &str) -> String {
        if self.is_self_closing() {
            return self.markup(xml).to_string();
        }
        let mut cleared = xml[self.open_tag.clone()].to_string();
        if let Some(props) = &self.properties {
            cleared.push_str(&xml[props.clone()]);
        }
        cleared.push_str("</w:p>");
        cleared
    }
}

/// 正文结构
#[derive(Debug, Clone, Default)]
pub struct BodyLayout {
    pub paragraphs: Vec<ParagraphSpan>,
    /// 追加内容的位置：末尾 w:sectPr 之前，否则 </w:body> 之前
    pub append_at: usize,
}

impl BodyLayout {
    /// 扫描 document.xml
    pub fn scan(xml: &str) -> CoderResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut scanner = Scanner::default();

        loop {
            let event = reader.read_event()?;
            let after = reader.buffer_position() as usize;
            match event {
                Event::Start(e) => {
                    let start = tag_start(xml, after)?;
                    scanner.on_start(&e, start..after);
                }
                Event::Empty(e) => {
                    let start = tag_start(xml, after)?;
                    scanner.on_empty(&e, start..after);
                }
                Event::End(e) => {
                    let start = tag_start(xml, after)?;
                    scanner.on_end(e.local_name().as_ref(), start..after);
                }
                Event::Text(t) => {
                    if scanner.in_text_node() {
                        let text = t
                            .unescape()
                            .map_err(|e| CoderError::InvalidInput(format!("文本实体解析失败：{}", e)))?;
                        scanner.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        scanner.finish()
    }

    /// 第一个原始标记包含标记字符串的段落
    pub fn find_marker(&self, xml: &str, marker: &str) -> Option<&ParagraphSpan> {
        self.paragraphs.iter().find(|p| p.markup(xml).contains(marker))
    }
}

/// 查找当前标签起始的 '<'（属性值中不会出现未转义的 '<'）
fn tag_start(xml: &str, after: usize) -> CoderResult<usize> {
    xml.get(..after)
        .and_then(|head| head.rfind('<'))
        .ok_or_else(|| CoderError::InvalidInput("XML 标签位置异常".to_string()))
}

#[derive(Default)]
struct OpenParagraph {
    start: usize,
    open_tag: Range<usize>,
    depth: usize,
    properties_start: Option<usize>,
    properties: Option<Range<usize>>,
    text: String,
}

#[derive(Default)]
struct Scanner {
    depth: usize,
    body_depth: Option<usize>,
    body_end: Option<usize>,
    sect_pr_start: Option<usize>,
    paragraph: Option<OpenParagraph>,
    text_depth: Option<usize>,
    paragraphs: Vec<ParagraphSpan>,
}

impl Scanner {
    fn at_body_level(&self) -> bool {
        self.body_depth.is_some_and(|d| self.depth == d + 1)
    }

    fn in_properties(&self) -> bool {
        self.paragraph.as_ref().is_some_and(|p| p.properties_start.is_some())
    }

    fn in_text_node(&self) -> bool {
        self.text_depth.is_some()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.text.push_str(text);
        }
    }

    fn on_start(&mut self, e: &BytesStart<'_>, tag: Range<usize>) {
        self.depth += 1;
        let name = e.local_name();
        match name.as_ref() {
            b"body" if self.body_depth.is_none() => self.body_depth = Some(self.depth),
            b"p" if self.paragraph.is_none() && self.at_body_level() => {
                self.sect_pr_start = None;
                self.paragraph = Some(OpenParagraph {
                    start: tag.start,
                    open_tag: tag,
                    depth: self.depth,
                    ..Default::default()
                });
            }
            b"pPr" => {
                let depth = self.depth;
                if let Some(p) = self.paragraph.as_mut().filter(|p| depth == p.depth + 1) {
                    p.properties_start = Some(tag.start);
                }
            }
            b"t" if self.paragraph.is_some() => self.text_depth = Some(self.depth),
            b"sectPr" if self.at_body_level() => self.sect_pr_start = Some(tag.start),
            _ => {
                if self.at_body_level() {
                    self.sect_pr_start = None;
                }
            }
        }
    }

    fn on_empty(&mut self, e: &BytesStart<'_>, tag: Range<usize>) {
        let name = e.local_name();
        // 自闭合元素相当于深度 +1 后立即关闭
        self.depth += 1;
        match name.as_ref() {
            b"p" if self.paragraph.is_none() && self.at_body_level() => {
                self.sect_pr_start = None;
                self.paragraphs.push(ParagraphSpan {
                    range: tag.clone(),
                    open_tag: tag,
                    properties: None,
                    text: String::new(),
                });
            }
            b"pPr" => {
                let depth = self.depth;
                if let Some(p) = self.paragraph.as_mut().filter(|p| depth == p.depth + 1) {
                    p.properties = Some(tag);
                }
            }
            // 段落属性中的 w:tabs/w:tab 是制表位定义，不是文本
            b"tab" if !self.in_properties() => self.push_text("\t"),
            b"br" | b"cr" if !self.in_properties() => self.push_text("\n"),
            b"sectPr" if self.at_body_level() => self.sect_pr_start = Some(tag.start),
            _ => {
                if self.at_body_level() {
                    self.sect_pr_start = None;
                }
            }
        }
        self.depth -= 1;
    }

    fn on_end(&mut self, name: &[u8], tag: Range<usize>) {
        match name {
            b"t" if self.text_depth == Some(self.depth) => self.text_depth = None,
            b"pPr" => {
                let depth = self.depth;
                if let Some(p) = self.paragraph.as_mut().filter(|p| depth == p.depth + 1) {
                    if let Some(start) = p.properties_start.take() {
                        p.properties = Some(start..tag.end);
                    }
                }
            }
            b"p" if self.paragraph.as_ref().is_some_and(|p| p.depth == self.depth) => {
                if let Some(p) = self.paragraph.take() {
                    self.paragraphs.push(ParagraphSpan {
                        range: p.start..tag.end,
                        open_tag: p.open_tag,
                        properties: p.properties,
                        text: p.text,
                    });
                }
            }
            b"body" if self.body_depth == Some(self.depth) => {
                self.body_end = Some(tag.start);
            }
            _ => {}
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> CoderResult<BodyLayout> {
        let body_end = self
            .body_end
            .ok_or_else(|| CoderError::InvalidInput("document.xml 缺少 w:body".to_string()))?;

        Ok(BodyLayout {
            paragraphs: self.paragraphs,
            append_at: self.sect_pr_start.unwrap_or(body_end),
        })
    }
}
