//! cad-coder - 临床编码辅助核心：CAD 规则集、ICD 字典标注、Word 摘要插入

// 导出全局错误类型
pub use self::error::{CoderError, CoderResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, DictionaryColumns, DEFAULT_MARKER};

// 导出规则模块核心接口
pub use self::rule::{
    CodeClass, CodeEntry, RuleCategory, RuleEntry, RuleSets,
    RuleLoader, CodeDictionary, KnowledgeBase
};

// 导出标注模块核心接口
pub use self::annotator::{CodeFormatter, LineEvent, SectionState, TextAnnotator};

// 导出文档模块核心接口
pub use self::document::{
    style_run, AssemblyOutcome, DocumentAssembler, DocumentReader, RunStyle
};

// 导出工具模块核心接口
pub use self::utils::{CellCleaner, ScriptDetector};

// 导出流程模块核心接口（含全局快照的简化接口）
pub use self::pipeline::{
    CodingPipeline,
    PipelineRequest,
    PipelineOutput,
    build_case_input,
    init_coder,
    init_coder_with_config,
    init_coder_with_base,
    reload_knowledge,
    current_knowledge,
    annotate_model_output,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod annotator;
pub mod document;
pub mod utils;
pub mod pipeline;
