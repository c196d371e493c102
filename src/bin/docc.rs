//! docc - 命令行入口
//!
//! 对本地仓库提问，生成讲解脚本并为每个块合成音频，结果写入会话目录

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use serde_json::{json, Value};

use docc::application::{ScriptGenerator, TtsManager};
use docc::config::load_config;
use docc::domain::NarrationBlock;
use docc::infrastructure::adapters::{answer_generators, speech_synthesizers, TokioProcessRunner};
use docc::infrastructure::{init_tracing, FileAudioCache};

#[derive(Parser)]
#[command(author, version, about = "Ask a question about a repository and get a narrated answer", long_about = None)]
struct Args {
    /// Repository to analyze
    repository_path: PathBuf,

    /// Question about the repository
    question: String,

    /// Output directory (defaults to sessions/<repo>_<timestamp>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Preferred AI provider (claude_code, openai, opencode)
    #[arg(long)]
    ai_provider: Option<String>,

    /// Preferred TTS provider (elevenlabs, openai)
    #[arg(long)]
    tts_provider: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(session_dir) => {
            println!("Session saved to {}", session_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<PathBuf> {
    let mut config = load_config().context("Failed to load config")?;
    if args.verbose {
        config.log.level = "debug".to_string();
    }
    init_tracing(&config.log);

    if !args.repository_path.is_dir() {
        bail!("Repository path does not exist: {}", args.repository_path.display());
    }
    let repository_path = tokio::fs::canonicalize(&args.repository_path)
        .await
        .with_context(|| format!("Cannot resolve {}", args.repository_path.display()))?;

    let session_dir = match args.output {
        Some(dir) => dir,
        None => default_session_dir(&repository_path),
    };
    let audio_dir = session_dir.join("audio");
    tokio::fs::create_dir_all(&audio_dir)
        .await
        .with_context(|| format!("Cannot create {}", audio_dir.display()))?;

    tracing::info!(
        repository = %repository_path.display(),
        session = %session_dir.display(),
        "Starting session"
    );

    let runner = Arc::new(TokioProcessRunner::new());
    let generator = ScriptGenerator::new(answer_generators(&config, runner));
    let script = generator
        .generate(&repository_path, &args.question, args.ai_provider.as_deref())
        .await?;

    tracing::info!(blocks = script.len(), "Script generated");

    let cache = Arc::new(FileAudioCache::new(&audio_dir, config.cache.max_size_bytes())?);
    let tts = TtsManager::bind(&speech_synthesizers(&config), args.tts_provider.as_deref(), cache).await;

    let mut entries = Vec::with_capacity(script.len());
    for (index, block) in script.iter().enumerate() {
        let audio_file = synthesize_block(&tts, block, index, &audio_dir).await;
        entries.push(script_entry(block, audio_file)?);
    }

    let output = json!({
        "repository_path": repository_path.display().to_string(),
        "question": args.question,
        "script": entries,
    });
    let script_path = session_dir.join("script.json");
    tokio::fs::write(&script_path, serde_json::to_string_pretty(&output)?)
        .await
        .with_context(|| format!("Cannot write {}", script_path.display()))?;

    Ok(session_dir)
}

/// `sessions/<repo>_<YYYYmmdd_HHMMSS>`
fn default_session_dir(repository_path: &Path) -> PathBuf {
    let repo_name = repository_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string());
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    PathBuf::from("sessions").join(format!("{}_{}", repo_name, timestamp))
}

/// 音频写入 `<audio_dir>/block_<i>.mp3`，返回文件名
///
/// 合成失败只记录日志，对应块的 `audio_file` 为 null
async fn synthesize_block(
    tts: &TtsManager,
    block: &NarrationBlock,
    index: usize,
    audio_dir: &Path,
) -> Option<String> {
    if !tts.has_synthesizer() {
        return None;
    }

    let audio = match tts.get_or_synthesize(block.markdown()).await {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(block = index, error = %e, "Audio generation failed");
            return None;
        }
    };

    let file_name = format!("block_{}.mp3", index);
    let path = audio_dir.join(&file_name);
    match tokio::fs::write(&path, &audio.data).await {
        Ok(()) => {
            tracing::info!(block = index, cache_hit = audio.cache_hit, path = %path.display(), "Audio saved");
            Some(file_name)
        }
        Err(e) => {
            tracing::warn!(block = index, error = %e, "Failed to write audio file");
            None
        }
    }
}

fn script_entry(block: &NarrationBlock, audio_file: Option<String>) -> anyhow::Result<Value> {
    let mut entry = serde_json::to_value(block)?;
    if let Value::Object(map) = &mut entry {
        map.insert(
            "audio_file".to_string(),
            audio_file.map_or(Value::Null, Value::String),
        );
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docc::application::{AudioCachePort, SpeechSynthesizerPort, TtsError};
    use docc::domain::SpeechProviderId;

    #[test]
    fn test_default_session_dir_uses_repo_name_and_timestamp() {
        let dir = default_session_dir(Path::new("/home/me/projects/widget"));
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();

        assert!(dir.starts_with("sessions"));
        assert!(name.starts_with("widget_"));
        assert_eq!(name.len(), "widget_".len() + "YYYYmmdd_HHMMSS".len());
    }

    #[test]
    fn test_script_entry_carries_audio_file() {
        let block = NarrationBlock::text("hello");

        let with_audio = script_entry(&block, Some("block_0.mp3".to_string())).unwrap();
        assert_eq!(with_audio["type"], "text");
        assert_eq!(with_audio["audio_file"], "block_0.mp3");

        let without = script_entry(&block, None).unwrap();
        assert!(without["audio_file"].is_null());
    }

    #[test]
    fn test_parses_positional_and_flags() {
        let args = Args::try_parse_from([
            "docc",
            "/repo",
            "How does it work?",
            "-v",
            "--ai-provider",
            "openai",
        ])
        .unwrap();

        assert_eq!(args.repository_path, PathBuf::from("/repo"));
        assert_eq!(args.question, "How does it work?");
        assert!(args.verbose);
        assert_eq!(args.ai_provider.as_deref(), Some("openai"));
        assert!(args.output.is_none());
    }

    struct EchoSynthesizer;

    #[async_trait::async_trait]
    impl SpeechSynthesizerPort for EchoSynthesizer {
        fn id(&self) -> SpeechProviderId {
            SpeechProviderId::OpenAi
        }

        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
            Ok(text.as_bytes().to_vec())
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_block_audio_lands_in_audio_dir_with_bare_name() {
        let session = tempfile::tempdir().unwrap();
        let audio_dir = session.path().join("audio");
        let cache: Arc<dyn AudioCachePort> =
            Arc::new(FileAudioCache::new(&audio_dir, 10 * 1024 * 1024).unwrap());
        let synthesizer: Arc<dyn SpeechSynthesizerPort> = Arc::new(EchoSynthesizer);
        let tts = TtsManager::with_synthesizer(Some(synthesizer), cache);

        let block = NarrationBlock::text("hello");
        let audio_file = synthesize_block(&tts, &block, 0, &audio_dir).await;

        assert_eq!(audio_file.as_deref(), Some("block_0.mp3"));
        assert_eq!(std::fs::read(audio_dir.join("block_0.mp3")).unwrap(), b"hello".to_vec());
        assert!(!session.path().join("block_0.mp3").exists());
    }

    #[tokio::test]
    async fn test_block_without_synthesizer_has_no_audio() {
        let session = tempfile::tempdir().unwrap();
        let cache: Arc<dyn AudioCachePort> =
            Arc::new(FileAudioCache::new(session.path(), 10 * 1024 * 1024).unwrap());
        let tts = TtsManager::with_synthesizer(None, cache);

        let audio_file = synthesize_block(&tts, &NarrationBlock::text("hi"), 3, session.path()).await;
        assert!(audio_file.is_none());
    }
}
