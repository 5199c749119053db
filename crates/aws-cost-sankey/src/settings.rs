//! Run configuration.
//!
//! Loaded from YAML (the historical `configs/configs.yaml`) or, when the
//! file ends in `.toml`, from TOML. Field names are camelCase in both.
//!
//! ```yaml
//! accounts:
//!   - name: production
//!     key: AKIA...
//!     secret: ...
//!     token: ...
//! startDate: 2024-01-01
//! endDate: 2024-04-01
//! threshold: 100
//! width: 1800px
//! height: 1200px
//! ```

use crate::aggregator::normalizer::RoundingPolicy;
use crate::sankey::ChartOptions;
use crate::source::DateRange;
use crate::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// One AWS account and its static credentials
///
/// Credentials are passed through to the SDK and never interpreted.
#[derive(Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Account {
    pub name: String,

    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub secret: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub token: Option<String>,
}

// Keep credentials out of logs
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("key", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub accounts: Vec<Account>,

    /// Billing period, required for live fetching only
    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub end_date: String,

    /// Minimum edge amount shown in the chart
    #[serde(default)]
    pub threshold: f64,

    #[serde(default = "default_width")]
    pub width: String,

    #[serde(default = "default_height")]
    pub height: String,

    /// Rounding applied to live amounts before accumulation
    #[serde(default)]
    pub rounding: RoundingPolicy,

    #[serde(default)]
    pub openai_key: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub prompt: Option<String>,
}

fn default_width() -> String {
    DEFAULT_CHART_WIDTH.to_string()
}

fn default_height() -> String {
    DEFAULT_CHART_HEIGHT.to_string()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Settings for the LLM cost analysis
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("prompt", &self.prompt)
            .finish()
    }
}

impl Config {
    /// Validated billing period
    pub fn date_range(&self) -> Result<DateRange, ConfigError> {
        DateRange::new(&self.start_date, &self.end_date)
    }

    /// Check fields that do not depend on the selected mode
    ///
    /// Dates may be left out for replay runs, but when given they must
    /// form a valid period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.has_dates() {
            self.date_range()?;
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidField {
                field: "threshold",
                reason: format!("{} is not a non-negative number", self.threshold),
            });
        }

        let mut names = HashSet::new();
        for account in &self.accounts {
            if account.name.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    field: "accounts",
                    reason: "account name cannot be empty".to_string(),
                });
            }
            if !names.insert(account.name.as_str()) {
                return Err(ConfigError::InvalidField {
                    field: "accounts",
                    reason: format!("duplicate account name `{}`", account.name),
                });
            }
        }

        Ok(())
    }

    fn has_dates(&self) -> bool {
        !self.start_date.is_empty() || !self.end_date.is_empty()
    }

    /// Check that live fetching is possible
    pub fn require_accounts(&self) -> Result<(), ConfigError> {
        if self.accounts.is_empty() {
            return Err(ConfigError::MissingField("accounts"));
        }
        if self.start_date.is_empty() {
            return Err(ConfigError::MissingField("startDate"));
        }
        if self.end_date.is_empty() {
            return Err(ConfigError::MissingField("endDate"));
        }
        Ok(())
    }

    /// LLM settings, required for the `text+ai` format
    pub fn llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let api_key = required(&self.openai_key, "openaiKey")?;
        let model = required(&self.model, "model")?;
        let prompt = required(&self.prompt, "prompt")?;

        let max_tokens = match self.max_tokens {
            Some(0) => {
                return Err(ConfigError::InvalidField {
                    field: "maxTokens",
                    reason: "must be greater than 0".to_string(),
                })
            }
            Some(tokens) => tokens,
            None => return Err(ConfigError::MissingField("maxTokens")),
        };

        Ok(LlmConfig {
            api_key,
            model,
            max_tokens,
            prompt,
        })
    }

    /// Chart options derived from the period, threshold and size
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::new()
            .with_period(&self.start_date, &self.end_date, self.threshold)
            .with_size(&self.width, &self.height)
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or(ConfigError::MissingField(field))
}

/// Load configuration from a YAML or TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::Yaml` / `ConfigError::Toml` - If the content is invalid
/// * `ConfigError::InvalidField` - If a field fails validation
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let config = if is_toml {
        parse_toml_config(&contents)?
    } else {
        parse_yaml_config(&contents)?
    };

    config.validate()?;

    debug!(
        "Config loaded: {} accounts, {} to {}, threshold {}",
        config.accounts.len(),
        config.start_date,
        config.end_date,
        config.threshold
    );

    Ok(config)
}

pub fn parse_yaml_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn parse_toml_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML: &str = r#"
accounts:
  - name: production
    key: AKIAEXAMPLE
    secret: secret
    token: ""
  - name: staging
    key: AKIAEXAMPLE2
    secret: secret2
    token: session
startDate: 2024-01-01
endDate: 2024-04-01
threshold: 100
width: 1800px
height: 1200px
openaiKey: sk-test
model: gpt-4o
maxTokens: 500
prompt: Summarize these costs
"#;

    #[test]
    fn test_parse_yaml() {
        let config = parse_yaml_config(YAML).unwrap();

        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].token, None);
        assert_eq!(config.accounts[1].token, Some("session".to_string()));
        assert_eq!(config.start_date, "2024-01-01");
        assert_eq!(config.threshold, 100.0);
        assert_eq!(config.width, "1800px");
        assert_eq!(config.rounding, RoundingPolicy::Nearest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = parse_toml_config(
            r#"
startDate = "2024-01-01"
endDate = "2024-02-01"
rounding = "none"

[[accounts]]
name = "production"
key = "AKIAEXAMPLE"
secret = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.accounts[0].name, "production");
        assert_eq!(config.rounding, RoundingPolicy::None);
        assert_eq!(config.threshold, 0.0);
        assert_eq!(config.height, DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn test_llm_config() {
        let config = parse_yaml_config(YAML).unwrap();
        let llm = config.llm_config().unwrap();
        assert_eq!(llm.model, "gpt-4o");
        assert_eq!(llm.max_tokens, 500);

        let mut missing = config.clone();
        missing.openai_key = None;
        assert!(matches!(
            missing.llm_config(),
            Err(ConfigError::MissingField("openaiKey"))
        ));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = parse_yaml_config(YAML).unwrap();
        config.threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_accounts_rejected() {
        let mut config = parse_yaml_config(YAML).unwrap();
        config.accounts[1].name = "production".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = parse_yaml_config(YAML).unwrap();
        let debug = format!("{:?}", config.accounts[0]);
        assert!(!debug.contains("AKIAEXAMPLE"));
        assert!(debug.contains("production"));
    }

    #[test]
    fn test_dates_optional_for_replay() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("replay.yaml");
        fs::write(&path, "threshold: 50\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.start_date, "");
        assert_eq!(config.threshold, 50.0);
        assert!(matches!(
            config.require_accounts(),
            Err(ConfigError::MissingField("accounts"))
        ));
    }

    #[test]
    fn test_live_fetch_requires_dates() {
        let mut config = parse_yaml_config(YAML).unwrap();
        config.end_date = String::new();
        assert!(matches!(
            config.require_accounts(),
            Err(ConfigError::MissingField("endDate"))
        ));
    }

    #[test]
    fn test_invalid_dates_still_rejected() {
        let mut config = parse_yaml_config(YAML).unwrap();
        config.start_date = "2024-13-01".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }
}
