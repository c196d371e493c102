//! docc-server - 代码仓库语音讲解 HTTP 服务

use std::sync::Arc;

use docc::config::{load_config, print_config};
use docc::infrastructure::adapters::{answer_generators, speech_synthesizers, TokioProcessRunner};
use docc::infrastructure::http::{AppState, HttpServer};
use docc::infrastructure::{init_tracing, FileAudioCache, InMemoryAudioRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：提供方环境变量 > DOCC_ 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("docc - repository Q&A narrator");
    print_config(&config);

    // 磁盘音频缓存
    let audio_cache = Arc::new(FileAudioCache::new(
        &config.cache.dir,
        config.cache.max_size_bytes(),
    )?);

    // 内存音频登记表
    let audio_registry = Arc::new(InMemoryAudioRegistry::new(
        config.registry.ttl(),
        config.registry.max_entries,
    ));

    // 提供方（顺序即回退优先级）
    let runner = Arc::new(TokioProcessRunner::new());
    let generators = answer_generators(&config, runner);
    let synthesizers = speech_synthesizers(&config);

    let state = AppState::new(generators, synthesizers, audio_cache, audio_registry).await;
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
