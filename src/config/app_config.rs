use serde::Deserialize;

use crate::infrastructure::decorators::DecoratorKind;
use crate::infrastructure::registry::IRIS_MODEL_REFERENCE;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// What the registry is populated with at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Model references loaded through the catalog, in order
    pub models: Vec<String>,
    /// Decorators applied to every loaded model, innermost first
    pub decorators: Vec<DecoratorKind>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            models: vec![IRIS_MODEL_REFERENCE.to_string()],
            decorators: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ML_BASE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("registry.models")
                    .with_list_parse_key("registry.decorators")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
