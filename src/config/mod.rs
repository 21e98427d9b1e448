use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Postgres connection URL. When absent the append-only JSONL file
    /// store at `log_path` is used instead.
    pub database_url: Option<String>,
    pub log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// The single static bearer secret required on writes. An empty value
    /// rejects every write.
    pub write_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Default chat-completions endpoint (NVIDIA-hosted Nemotron).
const DEFAULT_API_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "nvidia/llama-3.1-nemotron-70b-instruct";
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are the Game Master for an ongoing tabletop role-playing campaign. \
     Answer in character, concisely, and never break the fourth wall.";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = env::var("HUD_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            environment,
            server: ServerConfig { port },
            store: StoreConfig {
                database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
                log_path: env::var("HUD_LOG_PATH").unwrap_or_else(|_| "hud_log.jsonl".to_string()),
            },
            security: SecurityConfig {
                write_token: env::var("HUD_WRITE_TOKEN").unwrap_or_default(),
            },
            inference: InferenceConfig {
                api_url: env::var("NEMOTRON_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                api_key: env::var("NEMOTRON_API_KEY").unwrap_or_default(),
                model: env::var("NEMOTRON_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                system_prompt: env::var("GM_SYSTEM_PROMPT")
                    .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string()),
                temperature: env::var("NEMOTRON_TEMPERATURE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.7),
                max_tokens: env::var("NEMOTRON_MAX_TOKENS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1024),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
