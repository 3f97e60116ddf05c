//! 文档组装器：在标记段落处插入摘要，找不到标记时分页后追加到文末

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::package::DocxPackage;
use super::paragraph::BodyLayout;
use super::style::{page_break_xml, summary_block_xml};
use crate::error::{CoderError, CoderResult};

/// 组装结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOutcome {
    pub path: PathBuf,
    pub marker_found: bool,
}

/// 文档组装器
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// 插入摘要并返回写出的路径；未指定输出路径时覆盖源文档
    pub fn insert_at_marker(
        document: &Path,
        summary: &str,
        marker: &str,
        output: Option<&Path>,
    ) -> CoderResult<PathBuf> {
        Self::assemble(document, summary, marker, output).map(|outcome| outcome.path)
    }

    /// 同 insert_at_marker，额外报告是否找到标记
    pub fn assemble(
        document: &Path,
        summary: &str,
        marker: &str,
        output: Option<&Path>,
    ) -> CoderResult<AssemblyOutcome> {
        let mut package = DocxPackage::open(document).map_err(|e| {
            CoderError::document(marker, false, format!("无法读取文档 {}：{}", document.display(), e))
        })?;

        let (document_xml, marker_found) = Self::render(package.document_xml(), summary, marker)?;

        let target = output.unwrap_or(document).to_path_buf();
        package.save_with(&document_xml, &target).map_err(|e| {
            CoderError::document(marker, !marker_found, format!("写出文档失败 {}：{}", target.display(), e))
        })?;

        info!(
            "摘要已写入文档：{}（{}）",
            target.display(),
            if marker_found { "标记处插入" } else { "文末追加" }
        );
        Ok(AssemblyOutcome {
            path: target,
            marker_found,
        })
    }

    /// 纯函数：返回组装后的 document.xml 以及是否命中标记
    pub fn render(document_xml: &str, summary: &str, marker: &str) -> CoderResult<(String, bool)> {
        let layout = BodyLayout::scan(document_xml)
            .map_err(|e| CoderError::document(marker, false, format!("正文解析失败：{}", e)))?;
        let block = summary_block_xml(summary);

        if let Some(target) = layout.find_marker(document_xml, marker) {
            debug!("在第 {} 字节处找到标记段落：{}", target.range.start, marker);
            let mut assembled = String::with_capacity(document_xml.len() + block.len());
            assembled.push_str(&document_xml[..target.range.start]);
            assembled.push_str(&block);
            assembled.push_str(&target.cleared_markup(document_xml));
            assembled.push_str(&document_xml[target.range.end..]);
            return Ok((assembled, true));
        }

        debug!("未找到标记 {}，分页后追加到文末", marker);
        let at = layout.append_at;
        let mut assembled = String::with_capacity(document_xml.len() + block.len() + 64);
        assembled.push_str(&document_xml[..at]);
        assembled.push_str(page_break_xml());
        assembled.push_str(&block);
        assembled.push_str(&document_xml[at..]);
        Ok((assembled, false))
    }
}
