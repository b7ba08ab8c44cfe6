use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap_serde_derive::ClapSerde;

use crate::provider::openai::OpenAiSettings;

#[derive(ClapSerde, Debug)]
pub struct Config {
    /// The address the listener binds to
    #[default("0.0.0.0".to_string())]
    #[arg(short, long, env)]
    pub(crate) address: String,

    /// The port the listener binds to
    #[default(25566)]
    #[arg(short, long, env)]
    pub(crate) port: u16,

    /// Directory holding the static form served on every unmatched GET
    #[default("public".to_string())]
    #[arg(long, env)]
    pub(crate) static_dir: String,

    /// Base URL of the OpenAI compatible provider, including the version segment
    #[default("https://api.openai.com/v1".to_string())]
    #[arg(long, env)]
    pub(crate) provider_base_url: String,

    /// Model requested from the provider
    #[default("gpt-4o-mini".to_string())]
    #[arg(long, env)]
    pub(crate) provider_model: String,

    /// API key sent as bearer token, left out when empty
    #[default(String::new())]
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub(crate) provider_api_key: String,

    /// Upper bound in milliseconds for a single provider call
    #[default(30_000)]
    #[arg(long, env)]
    pub(crate) provider_timeout_ms: u64,

    /// Sampling temperature
    #[default(0.7)]
    #[arg(long, env)]
    pub(crate) provider_temperature: f32,

    /// Maximum number of tokens the provider may generate
    #[default(512)]
    #[arg(long, env)]
    pub(crate) provider_max_tokens: u32,

    /// OTLP collector endpoint, telemetry export is disabled when empty
    #[default(String::new())]
    #[arg(long, env)]
    pub(crate) otlp_endpoint: String,

    /// Keep logging to the console while exporting telemetry
    #[default(false)]
    #[arg(long, env)]
    pub(crate) console_log: bool,
}

impl Config {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)?;
        let opt: <Config as ClapSerde>::Opt = toml::from_str(&str)?;
        Ok(Config::from(opt))
    }

    /// Reads `path`; a missing file is only tolerated when it is the default one.
    pub fn load(path: &str, default_path: &str) -> Result<Self> {
        match Self::from_toml(path) {
            Ok(config) => Ok(config),
            Err(_) if path == default_path && !Path::new(path).exists() => Ok(Config::default()),
            Err(err) => Err(err.context(format!("Failed to read configuration file {}", path))),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn provider_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.provider_base_url.clone(),
            model: self.provider_model.clone(),
            api_key: self.provider_api_key.clone(),
            temperature: self.provider_temperature,
            max_tokens: self.provider_max_tokens,
        }
    }

    pub fn otlp_endpoint(&self) -> Option<&str> {
        Some(self.otlp_endpoint.as_str()).filter(|endpoint| !endpoint.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 25566);
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
        assert_eq!(config.otlp_endpoint(), None);
        assert!(config.provider_api_key.is_empty());
    }

    #[test]
    fn test_missing_default_file_falls_back_to_defaults() {
        let config = Config::load("mail_drafter_absent.toml", "mail_drafter_absent.toml").unwrap();
        assert_eq!(config.port, 25566);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load("mail_drafter_absent.toml", "MailDrafter.toml").unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to read configuration file mail_drafter_absent.toml"));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let path = std::env::temp_dir().join("mail_drafter_config_test.toml");
        std::fs::write(
            &path,
            "port = 8080\nprovider_timeout_ms = 1500\nprovider_model = \"llama3\"\notlp_endpoint = \"http://collector:4317\"\n",
        )
        .unwrap();

        let config = Config::from_toml(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.provider_timeout(), Duration::from_millis(1500));
        assert_eq!(config.provider_settings().model, "llama3");
        assert_eq!(config.otlp_endpoint(), Some("http://collector:4317"));
    }
}
