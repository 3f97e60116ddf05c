//! 流程模块：全局快照管理与处理流程编排
pub mod global;
pub mod orchestrator;

// 导出核心接口
pub use self::global::{
    annotate_model_output, current_knowledge, init_coder, init_coder_with_base,
    init_coder_with_config, is_initialized, reload_knowledge,
};
pub use self::orchestrator::{build_case_input, CodingPipeline, PipelineOutput, PipelineRequest, OUTPUT_PREFIX};
