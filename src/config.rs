use std::path::PathBuf;

use anyhow::Context;

use crate::auth::PasswordScheme;
use crate::store::LoadPolicy;

pub const DEFAULT_DATA_FILE: &str = "greenwallet_data.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub password_scheme: PasswordScheme,
    pub load_policy: LoadPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            password_scheme: PasswordScheme::default(),
            load_policy: LoadPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = lookup("GREENWALLET_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let password_scheme = match lookup("GREENWALLET_PASSWORD_SCHEME") {
            Some(v) => v
                .parse::<PasswordScheme>()
                .map_err(anyhow::Error::msg)
                .context("GREENWALLET_PASSWORD_SCHEME")?,
            None => PasswordScheme::default(),
        };
        let load_policy = match lookup("GREENWALLET_LOAD_POLICY") {
            Some(v) => v
                .parse::<LoadPolicy>()
                .map_err(anyhow::Error::msg)
                .context("GREENWALLET_LOAD_POLICY")?,
            None => LoadPolicy::default(),
        };
        Ok(Self {
            data_file,
            password_scheme,
            load_policy,
        })
    }
}
