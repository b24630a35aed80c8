//! Configuration loaded from the process environment.

use crate::errors::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Environment key holding the generation provider credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const REQUIRED_VARS: &[&str] = &[API_KEY_VAR];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Settings for the OpenAI-compatible provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Bearer credential.
    pub api_key: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Chat completion model.
    pub chat_model: String,
    /// Image model; the provider default is used when unset.
    pub image_model: Option<String>,
    /// Requested image dimensions.
    pub image_size: String,
}

impl ProviderConfig {
    /// Creates a provider configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            image_model: None,
            image_size: default_image_size(),
        }
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the chat model.
    #[must_use]
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4".to_string()
}

fn default_image_size() -> String {
    "512x512".to_string()
}

const DEFAULT_PORT: u16 = 8855;

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
    /// Root under which run directories are created.
    pub output_dir: PathBuf,
    /// Directory holding the client UI.
    pub public_dir: PathBuf,
    /// Provider settings.
    pub provider: ProviderConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first if present.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`     | required                    |
    /// | `HOST`               | `0.0.0.0`                   |
    /// | `PORT`               | `8855`                      |
    /// | `OUTPUT_DIR`         | `output`                    |
    /// | `PUBLIC_DIR`         | `public`                    |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
    /// | `OPENAI_CHAT_MODEL`  | `gpt-4`                     |
    /// | `OPENAI_IMAGE_MODEL` | unset                       |
    /// | `IMAGE_SIZE`         | `512x512`                   |
    /// | `LOG_FORMAT`         | `text`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| (*key).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", &raw, "expected a port number"))?,
            None => DEFAULT_PORT,
        };

        let host = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::invalid("HOST", &raw, "expected an IP address"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "LOG_FORMAT",
                    other,
                    "expected 'text' or 'json'",
                ))
            }
        };

        let mut provider = ProviderConfig::new(get(API_KEY_VAR).unwrap_or_default());
        if let Some(url) = get("OPENAI_BASE_URL") {
            provider = provider.with_base_url(url);
        }
        if let Some(model) = get("OPENAI_CHAT_MODEL") {
            provider = provider.with_chat_model(model);
        }
        provider.image_model = get("OPENAI_IMAGE_MODEL");
        if let Some(size) = get("IMAGE_SIZE") {
            provider.image_size = size;
        }

        Ok(Self {
            host,
            port,
            output_dir: get("OUTPUT_DIR").map_or_else(|| PathBuf::from("output"), PathBuf::from),
            public_dir: get("PUBLIC_DIR").map_or_else(|| PathBuf::from("public"), PathBuf::from),
            provider,
            log_format,
        })
    }

    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
