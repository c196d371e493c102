//! docc - 代码仓库语音讲解
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Script: 讲解块与 AI 输出提取
//! - Provider: AI / TTS 提供方标识
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AnswerGenerator, SpeechSynthesizer, AudioCache, AudioRegistry, ProcessRunner）
//! - Services: 提供方回退编排、TTS 管理
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 音频登记表
//! - Persistence: 磁盘音频缓存
//! - Adapters: AI CLI / OpenAI / ElevenLabs 客户端、子进程执行

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
