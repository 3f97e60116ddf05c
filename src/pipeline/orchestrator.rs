//! 流程编排：模型输出 -> 编码标注 -> （可选）写入 Word 文档

use std::path::{Path, PathBuf};
use std::sync::Arc;
use serde::Serialize;

use crate::annotator::TextAnnotator;
use crate::config::{GlobalConfig, DEFAULT_MARKER};
use crate::document::DocumentAssembler;
use crate::error::CoderResult;
use crate::rule::KnowledgeBase;

/// 输出文档文件名前缀
pub const OUTPUT_PREFIX: &str = "AI摘要_";

/// 单次处理请求
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineRequest<'a> {
    /// 模型原始输出
    pub model_output: &'a str,
    /// 需要写入摘要的源文档
    pub document: Option<&'a Path>,
    /// 输出路径（缺省时按前缀生成）
    pub output: Option<&'a Path>,
}

/// 处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    pub annotated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_found: Option<bool>,
}

/// 编码流程
#[derive(Debug, Clone)]
pub struct CodingPipeline {
    knowledge: Arc<KnowledgeBase>,
    marker: String,
    output_dir: Option<PathBuf>,
}

impl CodingPipeline {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            marker: DEFAULT_MARKER.to_string(),
            output_dir: None,
        }
    }

    /// 按配置加载知识库并创建流程
    pub async fn from_config(config: &GlobalConfig) -> CoderResult<Self> {
        let knowledge = KnowledgeBase::load(config).await?;
        Ok(Self::new(Arc::new(knowledge)).apply_config(config))
    }

    /// 使用全局快照创建流程
    pub fn from_global(config: &GlobalConfig) -> CoderResult<Self> {
        let knowledge = super::global::current_knowledge()?;
        Ok(Self::new(knowledge).apply_config(config))
    }

    fn apply_config(mut self, config: &GlobalConfig) -> Self {
        self.marker = config.marker_name.clone();
        self.output_dir = config.output_dir.clone();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// 仅标注文本
    pub fn annotate(&self, model_output: &str) -> String {
        TextAnnotator::new(&self.knowledge.dictionary).annotate(model_output)
    }

    /// 完整处理：标注后，如有源文档则写入摘要
    pub fn process(&self, request: &PipelineRequest<'_>) -> CoderResult<PipelineOutput> {
        let annotated = self.annotate(request.model_output);

        let Some(source) = request.document else {
            return Ok(PipelineOutput {
                annotated,
                document: None,
                marker_found: None,
            });
        };

        let output = request
            .output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path(source));
        let outcome = DocumentAssembler::assemble(source, &annotated, &self.marker, Some(&output))?;

        Ok(PipelineOutput {
            annotated,
            document: Some(outcome.path),
            marker_found: Some(outcome.marker_found),
        })
    }

    /// 默认输出路径：输出目录（或源文档目录）下的 AI摘要_<源文件名>
    pub fn default_output_path(&self, source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "summary.docx".to_string());
        let dir = self
            .output_dir
            .clone()
            .or_else(|| source.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(format!("{}{}", OUTPUT_PREFIX, file_name))
    }
}

/// 组装模型的病例输入：病例文字 + （可选）出院摘要
pub fn build_case_input(case_text: &str, discharge_summary: &str) -> String {
    let mut input = format!("【病例文字】\n{}", case_text.trim());
    let discharge_summary = discharge_summary.trim();
    if !discharge_summary.is_empty() {
        input.push_str("\n\n【出院摘要】\n");
        input.push_str(discharge_summary);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::rule::{CodeDictionary, CodeEntry, RuleSets};

    fn pipeline() -> CodingPipeline {
        let dictionary: CodeDictionary = [(
            "I25110".to_string(),
            CodeEntry {
                english: "Atherosclerotic heart disease".to_string(),
                chinese: "冠狀動脈粥樣硬化性心臟病".to_string(),
            },
        )]
        .into_iter()
        .collect();
        CodingPipeline::new(Arc::new(KnowledgeBase::new(RuleSets::default(), dictionary)))
    }

    #[test]
    fn test_process_text_only() {
        let request = PipelineRequest {
            model_output: "主診斷: I25110 伴發症",
            ..Default::default()
        };
        let output = pipeline().process(&request).unwrap();
        assert_eq!(
            output.annotated,
            "主診斷: I25.110 - Atherosclerotic heart disease (冠狀動脈粥樣硬化性心臟病) 伴發症"
        );
        assert_eq!(output.document, None);
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("document").is_none());
    }

    #[test]
    fn test_default_output_path() {
        let p = pipeline();
        assert_eq!(
            p.default_output_path(Path::new("/tmp/up/case.docx")),
            PathBuf::from("/tmp/up/AI摘要_case.docx")
        );

        let config = ConfigManager::custom().output_dir(PathBuf::from("/srv/out")).build();
        let p = pipeline().apply_config(&config);
        assert_eq!(
            p.default_output_path(Path::new("/tmp/up/case.docx")),
            PathBuf::from("/srv/out/AI摘要_case.docx")
        );
    }

    #[test]
    fn test_build_case_input() {
        assert_eq!(build_case_input(" 胸痛 ", ""), "【病例文字】\n胸痛");
        assert_eq!(
            build_case_input("胸痛", "出院穩定"),
            "【病例文字】\n胸痛\n\n【出院摘要】\n出院穩定"
        );
    }
}
