use crate::domain::model::Locale;
use crate::utils::error::{Result, UiError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use chrono::FixedOffset;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale_tag")]
    pub tag: String,
    /// Offset used to turn instants into calendar days.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_notification_ms")]
    pub notification_dismiss_ms: u64,
    #[serde(default = "default_toast_ms")]
    pub toast_dismiss_ms: u64,
    #[serde(default = "default_alert_ms")]
    pub alert_dismiss_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any response whose body parses as JSON is a success.
    #[default]
    Lenient,
    /// Non-2xx responses are errors.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub status_policy: StatusPolicy,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Overrides for the locale's default texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesConfig {
    pub copy_feedback: Option<String>,
    pub confirm_prompt: Option<String>,
}

fn default_locale_tag() -> String {
    "pt-BR".to_string()
}

fn default_notification_ms() -> u64 {
    5000
}

fn default_toast_ms() -> u64 {
    3000
}

fn default_alert_ms() -> u64 {
    5000
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            tag: default_locale_tag(),
            utc_offset_minutes: 0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_dismiss_ms: default_notification_ms(),
            toast_dismiss_ms: default_toast_ms(),
            alert_dismiss_ms: default_alert_ms(),
        }
    }
}

impl TimingConfig {
    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    pub fn toast_dismiss(&self) -> Duration {
        Duration::from_millis(self.toast_dismiss_ms)
    }

    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
            status_policy: StatusPolicy::default(),
            headers: BTreeMap::new(),
        }
    }
}

impl RequestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl UiConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UiError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| UiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are kept verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Locale preset named by `locale.tag`.
    pub fn resolved_locale(&self) -> Result<Locale> {
        Locale::from_tag(&self.locale.tag).ok_or_else(|| UiError::InvalidConfigValueError {
            field: "locale.tag".to_string(),
            value: self.locale.tag.clone(),
            reason: format!("Supported locales: {}", Locale::SUPPORTED_TAGS.join(", ")),
        })
    }

    pub fn copy_feedback(&self, locale: &Locale) -> String {
        self.messages
            .copy_feedback
            .clone()
            .unwrap_or_else(|| locale.copy_feedback.to_string())
    }

    pub fn confirm_prompt(&self, locale: &Locale) -> String {
        self.messages
            .confirm_prompt
            .clone()
            .unwrap_or_else(|| locale.confirm_prompt.to_string())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.locale
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| UiError::InvalidConfigValueError {
                field: "locale.utc_offset_minutes".to_string(),
                value: self.locale.utc_offset_minutes.to_string(),
                reason: "Offset out of range".to_string(),
            })
    }

    pub fn validate_config(&self) -> Result<()> {
        self.resolved_locale()?;
        validate_range(
            "locale.utc_offset_minutes",
            self.locale.utc_offset_minutes,
            -1439,
            1439,
        )?;

        validate_positive_number(
            "timing.notification_dismiss_ms",
            self.timing.notification_dismiss_ms,
            1,
        )?;
        validate_positive_number("timing.toast_dismiss_ms", self.timing.toast_dismiss_ms, 1)?;
        validate_positive_number("timing.alert_dismiss_ms", self.timing.alert_dismiss_ms, 1)?;

        if let Some(base_url) = &self.request.base_url {
            validate_url("request.base_url", base_url)?;
        }
        validate_positive_number("request.timeout_seconds", self.request.timeout_seconds, 1)?;
        for name in self.request.headers.keys() {
            validate_non_empty_string("request.headers", name)?;
        }

        if let Some(text) = &self.messages.copy_feedback {
            validate_non_empty_string("messages.copy_feedback", text)?;
        }
        if let Some(text) = &self.messages.confirm_prompt {
            validate_non_empty_string("messages.confirm_prompt", text)?;
        }

        Ok(())
    }
}

impl Validate for UiConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();

        assert_eq!(config.locale.tag, "pt-BR");
        assert_eq!(config.timing.notification_dismiss(), Duration::from_secs(5));
        assert_eq!(config.timing.toast_dismiss(), Duration::from_secs(3));
        assert_eq!(config.request.status_policy, StatusPolicy::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[locale]
tag = "en-US"
utc_offset_minutes = -300

[timing]
toast_dismiss_ms = 1500

[request]
base_url = "https://shop.example.com"
timeout_seconds = 10
status_policy = "strict"

[request.headers]
X-Requested-With = "XMLHttpRequest"

[messages]
confirm_prompt = "Really?"
"#;

        let config = UiConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.timing.toast_dismiss_ms, 1500);
        assert_eq!(config.timing.alert_dismiss_ms, 5000);
        assert_eq!(config.request.status_policy, StatusPolicy::Strict);
        assert_eq!(
            config.request.headers.get("X-Requested-With").map(String::as_str),
            Some("XMLHttpRequest")
        );
        let locale = config.resolved_locale().unwrap();
        assert_eq!(locale.currency_symbol, "$");
        assert_eq!(config.confirm_prompt(&locale), "Really?");
        assert_eq!(config.copy_feedback(&locale), "Copied to clipboard!");
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STOREFRONT_TEST_BASE_URL", "https://loja.example.com.br");

        let toml_content = r#"
[request]
base_url = "${STOREFRONT_TEST_BASE_URL}"
"#;

        let config = UiConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.request.base_url.as_deref(),
            Some("https://loja.example.com.br")
        );

        std::env::remove_var("STOREFRONT_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let unknown_locale = UiConfig::from_toml_str("[locale]\ntag = \"xx-YY\"\n").unwrap();
        assert!(unknown_locale.validate().is_err());
        assert!(unknown_locale.resolved_locale().is_err());

        let zero_delay = UiConfig::from_toml_str("[timing]\ntoast_dismiss_ms = 0\n").unwrap();
        assert!(zero_delay.validate().is_err());

        let bad_url = UiConfig::from_toml_str("[request]\nbase_url = \"not a url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let far_offset =
            UiConfig::from_toml_str("[locale]\nutc_offset_minutes = 1500\n").unwrap();
        assert!(far_offset.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = UiConfig::from_toml_str("[timing\n").unwrap_err();
        assert!(matches!(err, UiError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[locale]\ntag = \"de-DE\"\n")
            .unwrap();

        let config = UiConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.locale.tag, "de-DE");
    }
}
