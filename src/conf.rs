use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub listen_port: u16,
    pub upstream_timeout_secs: u64,
    pub theirstack: TheirStackSettings,
    pub gemini: GeminiSettings,
    pub search: SearchDefaults,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TheirStackSettings {
    pub api_key: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

/// Values used for search parameters the caller left out.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchDefaults {
    pub default_limit: u32,
    pub default_max_age_days: u32,
    pub default_country_codes: Vec<String>,
    pub default_order_field: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        SearchDefaults {
            default_limit: 10,
            default_max_age_days: 14,
            default_country_codes: vec!["CA".into()],
            default_order_field: "date_posted".into(),
        }
    }
}

impl Settings {
    /// Loads `config.{yaml,toml,json}` if present, then environment variables
    /// (`GEMINI__API_KEY`, `THEIRSTACK__API_KEY`, ...) on top.
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search.default_country_codes"),
            );
        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let search = SearchDefaults::default();
        Config::builder()
            .set_default("listen_port", 8000)?
            .set_default("upstream_timeout_secs", 30)?
            .set_default("theirstack.url", "https://api.theirstack.com/v1/jobs/search")?
            .set_default(
                "gemini.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.model", "gemini-1.5-flash")?
            .set_default("search.default_limit", i64::from(search.default_limit))?
            .set_default(
                "search.default_max_age_days",
                i64::from(search.default_max_age_days),
            )?
            .set_default("search.default_country_codes", search.default_country_codes)?
            .set_default("search.default_order_field", search.default_order_field)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let s: Settings = builder.build()?.try_deserialize()?;
        if s.theirstack.api_key.trim().is_empty() {
            return Err(ConfigError::Message("missing theirstack.api_key".into()));
        }
        if s.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::Message("missing gemini.api_key".into()));
        }
        Ok(s)
    }
}
