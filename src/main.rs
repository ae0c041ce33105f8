//! 程序入口：解析命令行、初始化日志，在单线程运行时中执行翻译

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use json_fanyi::{translate_file, GoogleTranslator, Settings, TranslateParams};

/// 递归翻译JSON文档中的所有字符串叶子
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 源JSON文件路径
    src: PathBuf,
    /// 输出JSON文件路径
    out: PathBuf,
    /// 目标语言代码（如 fr、ja、zh-CN）
    lang: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let Args { src, out, lang } = Args::parse();
    let result = async_main(TranslateParams {
        src_path: src,
        out_path: out,
        to_language: lang,
    })
    .await;

    if let Err(e) = result {
        tracing::error!("翻译失败: {:#}", e);
        std::process::exit(1);
    }
}

async fn async_main(params: TranslateParams) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let translator = GoogleTranslator::from_settings(&settings)?;

    translate_file(&params, &translator, &settings)
        .await
        .with_context(|| {
            format!(
                "翻译 {} → {} 失败",
                params.src_path.display(),
                params.out_path.display()
            )
        })?;
    Ok(())
}
