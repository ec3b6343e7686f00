use serde::{Deserialize, Serialize};

use crate::types::{DESCRIPTION_MAX_CHARS, HEADLINE_MAX_CHARS, PATH_MAX_CHARS};

/// Root application configuration. Loaded from an optional `rsa-builder.toml`
/// file and environment variables with the prefix `RSA_BUILDER__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Where the session state lives between runs.
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub quote_style: QuoteStyle,
    #[serde(default = "default_pad_descriptions")]
    pub pad_descriptions: bool,
    #[serde(default)]
    pub url_join: UrlJoin,
}

/// Character limits enforced by Google Ads. The builder never truncates;
/// these only drive lint warnings.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_headline_max_chars")]
    pub headline_max_chars: usize,
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
    #[serde(default = "default_path_max_chars")]
    pub path_max_chars: usize,
}

/// How CSV fields are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Quote only fields containing a delimiter, quote, or line break.
    #[default]
    Necessary,
    Always,
    /// Legacy behaviour: fields are joined verbatim.
    Never,
}

/// How the base domain and an ad group's relative URL are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlJoin {
    /// Exactly one `/` between base and path; empty sides are dropped.
    #[default]
    Normalize,
    /// `base + "/" + path`, no cleanup.
    Verbatim,
}

// Default functions
fn default_state_path() -> String {
    "rsa-builder-state.json".to_string()
}
fn default_output_path() -> String {
    "export.csv".to_string()
}
fn default_pad_descriptions() -> bool {
    true
}
fn default_headline_max_chars() -> usize {
    HEADLINE_MAX_CHARS
}
fn default_description_max_chars() -> usize {
    DESCRIPTION_MAX_CHARS
}
fn default_path_max_chars() -> usize {
    PATH_MAX_CHARS
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            quote_style: QuoteStyle::default(),
            pad_descriptions: default_pad_descriptions(),
            url_join: UrlJoin::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            headline_max_chars: default_headline_max_chars(),
            description_max_chars: default_description_max_chars(),
            path_max_chars: default_path_max_chars(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `rsa-builder.toml` (if present) and environment
    /// variables. Environment values win.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("rsa-builder")
    }

    /// Same as [`AppConfig::load`] with an explicit config file stem.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("RSA_BUILDER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
