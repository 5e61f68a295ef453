use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub conversation: ConversationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Key material for signing conversation exports
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub salt: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Upper bound on messages accepted by import and append
    pub max_messages: usize,
    /// Upper bound on concurrently stored sessions
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            salt: String::new(),
            algorithm: "sha256".to_string(),
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_messages: 100,
            max_sessions: 1000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.algorithm, "sha256");
        assert_eq!(config.conversation.max_messages, 100);
        assert_eq!(config.conversation.max_sessions, 1000);
    }

    #[test]
    fn test_partial_sources_fill_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("security.secret_key", "s3cret")
            .unwrap()
            .set_override("conversation.max_messages", 20)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.security.secret_key, "s3cret");
        assert_eq!(config.security.algorithm, "sha256");
        assert_eq!(config.conversation.max_messages, 20);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_security_debug_is_redacted() {
        let security = SecurityConfig {
            secret_key: "s3cret".to_string(),
            salt: "pepper".to_string(),
            algorithm: "sha512".to_string(),
        };

        let rendered = format!("{:?}", security);
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("pepper"));
        assert!(rendered.contains("sha512"));
    }
}
