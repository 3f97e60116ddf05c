//! cad-coder 命令行入口
//! 标注模型输出、写入 Word 摘要、查看规则与字典

use std::path::PathBuf;

use anyhow::Context;
use cad_coder::{
    CodeFormatter, CodeDictionary, CodingPipeline, ConfigManager, DocumentReader, GlobalConfig,
    PipelineRequest, RuleLoader,
};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cad-coder", version, about = "CAD 编码辅助：ICD 标注与 Word 摘要插入")]
struct Cli {
    /// CAD 规则表路径（默认读取 CAD_RULE_PATH 或 CAD_rule.csv）
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// ICD 字典表路径（默认读取 ICD_CSV_PATH 或 ICD_code.csv）
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 标注模型输出（缺省从标准输入读取）
    Annotate {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// 标注摘要并写入 Word 文档
    Insert {
        /// 摘要文本文件（缺省从标准输入读取）
        #[arg(short, long)]
        summary: Option<PathBuf>,
        /// 源文档
        #[arg(short, long)]
        document: PathBuf,
        /// 输出文档（缺省为 AI摘要_<源文件名>）
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 插入标记
        #[arg(short, long)]
        marker: Option<String>,
    },
    /// 以 JSON 输出规则集合
    Rules,
    /// 查询编码显示形式
    Lookup { code: String },
    /// 提取 Word 文档正文
    Extract { document: PathBuf },
}

impl Cli {
    fn config(&self) -> GlobalConfig {
        let base = ConfigManager::from_env();
        let mut builder = ConfigManager::custom()
            .rule_path(self.rules.clone().unwrap_or(base.rule_path))
            .dictionary_path(self.dictionary.clone().unwrap_or(base.dictionary_path))
            .marker_name(base.marker_name)
            .verbose(self.verbose);
        if let Command::Insert { marker: Some(marker), .. } = &self.command {
            builder = builder.marker_name(marker.clone());
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();

    match &cli.command {
        Command::Annotate { input } => {
            let text = read_input(input.as_ref()).await?;
            let pipeline = CodingPipeline::from_config(&config).await?;
            println!("{}", pipeline.annotate(&text));
        }
        Command::Insert { summary, document, output, .. } => {
            let text = read_input(summary.as_ref()).await?;
            let pipeline = CodingPipeline::from_config(&config).await?;
            let request = PipelineRequest {
                model_output: &text,
                document: Some(document.as_path()),
                output: output.as_deref(),
            };
            let result = pipeline.process(&request)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Rules => {
            let rules = RuleLoader::load(&config.rule_path).await?;
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        Command::Lookup { code } => {
            let dictionary = CodeDictionary::load(&config.dictionary_path, &config.dictionary_columns).await?;
            println!("{}", CodeFormatter::render(code, &dictionary));
        }
        Command::Extract { document } => {
            let text = DocumentReader::extract_text(document)
                .with_context(|| format!("读取文档失败：{}", document.display()))?;
            println!("{}", text);
        }
    }

    Ok(())
}

async fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("读取输入失败：{}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}
