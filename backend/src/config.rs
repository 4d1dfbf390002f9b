use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Completion endpoint settings.
///
/// `api_key` is intentionally optional: a missing key is reported per request
/// rather than refusing to start.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Outbound request timeout in seconds (default: 60)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (APP_* and AI_*)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let config_path = path.map(str::to_string).or_else(Self::find_config_file);

        let mut config = if let Some(config_path) = config_path {
            tracing::info!("Loading configuration from {}", config_path);
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,firstline=debug")
    /// - APP_STATIC_ENABLED: Serve the static front-end (true/false)
    /// - APP_WEB_ROOT: Directory of the static front-end
    /// - AI_API_KEY: Bearer token for the completion endpoint
    /// - AI_BASE_URL: Completion endpoint base URL (default: https://api.openai.com/v1)
    /// - AI_MODEL: Model name (default: gpt-4o-mini)
    /// - AI_TIMEOUT: Outbound timeout (accepts "60", "30s", "2m")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(enabled) = std::env::var("APP_STATIC_ENABLED")
            && let Ok(val) = enabled.parse()
        {
            self.static_config.enabled = val;
            tracing::info!("Override static_config.enabled from env: {}", val);
        }

        if let Ok(root) = std::env::var("APP_WEB_ROOT") {
            self.static_config.web_root = root;
            tracing::info!("Override static_config.web_root from env: {}", self.static_config.web_root);
        }

        if let Ok(key) = std::env::var("AI_API_KEY") {
            self.ai.api_key = Some(key);
            tracing::info!("Override ai.api_key from env");
        }

        if let Ok(base_url) = std::env::var("AI_BASE_URL") {
            self.ai.base_url = base_url;
            tracing::info!("Override ai.base_url from env: {}", self.ai.base_url);
        }

        if let Ok(model) = std::env::var("AI_MODEL") {
            self.ai.model = model;
            tracing::info!("Override ai.model from env: {}", self.ai.model);
        }

        if let Ok(timeout) = std::env::var("AI_TIMEOUT") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.ai.timeout_secs = val;
                    tracing::info!("Override ai.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid AI_TIMEOUT '{}': {} (keep {})",
                    timeout,
                    e,
                    self.ai.timeout_secs
                ),
            }
        }
    }

    /// Empty values behave like unset ones, and one trailing slash is dropped
    /// from the base URL.
    fn normalize(&mut self) {
        self.ai.normalize();
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.ai.timeout_secs == 0 {
            anyhow::bail!("ai.timeout_secs must be > 0");
        }

        if !self.ai.base_url.starts_with("http://") && !self.ai.base_url.starts_with("https://") {
            anyhow::bail!("ai.base_url must start with http:// or https://, got '{}'", self.ai.base_url);
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl AiConfig {
    pub fn normalize(&mut self) {
        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.api_key = None;
        }
        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_AI_BASE_URL.to_string();
        }
        if let Some(stripped) = self.base_url.strip_suffix('/') {
            self.base_url = stripped.to_string();
        }
        if self.model.trim().is_empty() {
            self.model = DEFAULT_AI_MODEL.to_string();
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,firstline=debug".to_string(), file: None }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Numeric or human-friendly string values ("30s", "2m")
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '2m'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
