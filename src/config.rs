use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime configuration for the keeper.
///
/// Every field has a default matching the service's expected cadence, so a
/// bare checkout runs with no config file at all. Values are read from an
/// optional TOML file (`keeper.toml`, overridable via `MYGATE_CONFIG`) with
/// a handful of environment overrides on top.
#[derive(Debug, Clone, Deserialize)]
pub struct KeeperConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_tokens_file")]
    pub tokens_file: PathBuf,
    #[serde(default = "default_proxies_file")]
    pub proxies_file: PathBuf,
    #[serde(default = "default_referral_code")]
    pub referral_code: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_api_base() -> String {
    "https://api.mygate.network".to_string()
}

fn default_tokens_file() -> PathBuf {
    PathBuf::from("tokens.txt")
}

fn default_proxies_file() -> PathBuf {
    PathBuf::from("proxy.txt")
}

fn default_referral_code() -> String {
    "40gNab".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

fn default_settle_delay_secs() -> u64 {
    3
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_refresh_interval_secs() -> u64 {
    10 * 60
}

fn default_poll_interval_secs() -> u64 {
    15 * 60
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            tokens_file: default_tokens_file(),
            proxies_file: default_proxies_file(),
            referral_code: default_referral_code(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            settle_delay_secs: default_settle_delay_secs(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl KeeperConfig {
    /// Load from `MYGATE_CONFIG` (default `keeper.toml`), falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = env::var("MYGATE_CONFIG").unwrap_or_else(|_| "keeper.toml".to_string());
        Self::from_file_or_default(path)
    }

    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut cfg = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("MYGATE_API_BASE") {
            self.api_base = v;
        }
        if let Ok(v) = env::var("MYGATE_TOKENS_FILE") {
            self.tokens_file = v.into();
        }
        if let Ok(v) = env::var("MYGATE_PROXIES_FILE") {
            self.proxies_file = v.into();
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.api_base.is_empty(), "api_base must not be empty");
        anyhow::ensure!(
            self.refresh_interval_secs > 0,
            "refresh_interval_secs must be positive"
        );
        anyhow::ensure!(
            self.poll_interval_secs > 0,
            "poll_interval_secs must be positive"
        );
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_cadence() {
        let cfg = KeeperConfig::default();
        assert_eq!(cfg.api_base, "https://api.mygate.network");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_delay(), Duration::from_secs(10));
        assert_eq!(cfg.settle_delay(), Duration::from_secs(3));
        assert_eq!(cfg.reconnect_delay(), Duration::from_secs(5));
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(600));
        assert_eq!(cfg.poll_interval(), Duration::from_secs(900));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg: KeeperConfig = toml::from_str(
            r#"
            api_base = "https://staging.mygate.network"
            reconnect_delay_secs = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api_base, "https://staging.mygate.network");
        assert_eq!(cfg.reconnect_delay(), Duration::from_secs(2));
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.tokens_file, PathBuf::from("tokens.txt"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = KeeperConfig::from_file_or_default("definitely-not-here.toml").unwrap();
        assert_eq!(cfg.poll_interval_secs, 900);
    }
}
