//! 全局知识库快照管理
//! 启动时加载一次；重新加载时先构建新快照，再整体替换 Arc

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::annotator::TextAnnotator;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{CoderError, CoderResult};
use crate::rule::KnowledgeBase;

/// 全局知识库快照
static GLOBAL_KNOWLEDGE: Lazy<RwLock<Option<Arc<KnowledgeBase>>>> = Lazy::new(|| RwLock::new(None));

/// 初始化全局知识库（默认配置 + 环境变量覆盖）
pub async fn init_coder() -> CoderResult<()> {
    init_coder_with_config(ConfigManager::from_env()).await
}

/// 带自定义配置初始化全局知识库；已初始化时直接返回
pub async fn init_coder_with_config(config: GlobalConfig) -> CoderResult<()> {
    if is_initialized() {
        return Ok(());
    }

    // 加载失败时不发布任何状态
    let knowledge = KnowledgeBase::load(&config).await?;
    init_coder_with_base(knowledge);
    Ok(())
}

/// 以现成的知识库初始化；已初始化时保持原快照
pub fn init_coder_with_base(knowledge: KnowledgeBase) {
    let mut slot = GLOBAL_KNOWLEDGE.write().unwrap_or_else(|e| e.into_inner());
    if slot.is_none() {
        *slot = Some(Arc::new(knowledge));
    }
}

/// 重新加载并原子替换快照；加载失败时旧快照继续生效
pub async fn reload_knowledge(config: &GlobalConfig) -> CoderResult<()> {
    let knowledge = Arc::new(KnowledgeBase::load(config).await?);
    let mut slot = GLOBAL_KNOWLEDGE.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(knowledge);
    info!("编码知识库已重新加载");
    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_KNOWLEDGE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .is_some()
}

/// 获取当前快照（进行中的请求持有旧 Arc，不受替换影响）
pub fn current_knowledge() -> CoderResult<Arc<KnowledgeBase>> {
    GLOBAL_KNOWLEDGE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
        .ok_or(CoderError::NotInitialized)
}

/// 使用全局快照标注模型输出
pub fn annotate_model_output(text: &str) -> CoderResult<String> {
    let knowledge = current_knowledge()?;
    Ok(TextAnnotator::new(&knowledge.dictionary).annotate(text))
}
