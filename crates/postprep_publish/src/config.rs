//! Publisher settings and credentials.
//!
//! Settings are layered with the `config` crate, later sources winning:
//! 1. Bundled defaults (include_str! from postprep.toml)
//! 2. User override (./postprep.toml, or an explicit path)
//! 3. `POSTPREP_*` environment variables
//!
//! Credentials never live in a config file. They come from `ACCESS_TOKEN` and
//! `INSTAGRAM_ACCOUNT_ID`, with a `.env` file honored.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_builder::Builder;
use derive_getters::Getters;
use postprep_error::{ConfigError, PostprepResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../postprep.toml");

/// Environment variable holding the Graph API access token.
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

/// Environment variable holding the Instagram business account id.
pub const ACCOUNT_ID_VAR: &str = "INSTAGRAM_ACCOUNT_ID";

/// Non-secret publisher settings.
///
/// # Example
///
/// ```toml
/// api_base_url = "https://graph.facebook.com/v21.0"
/// archive_dir = "posted"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct PublishSettings {
    /// Graph API root including the version segment.
    #[builder(default = "String::from(\"https://graph.facebook.com/v21.0\")")]
    api_base_url: String,
    /// Folder that receives published media files.
    #[builder(default = "PathBuf::from(postprep_storage::DEFAULT_ARCHIVE_DIR)")]
    archive_dir: PathBuf,
}

impl PublishSettings {
    /// Settings from the bundled defaults only.
    pub fn bundled() -> PostprepResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load with precedence: environment > ./postprep.toml > bundled defaults.
    #[instrument]
    pub fn load() -> PostprepResult<Self> {
        debug!("Loading publisher settings");
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::with_name("postprep").required(false))
                .add_source(Environment::with_prefix("POSTPREP")),
        )
    }

    /// Load with an explicit override file in place of ./postprep.toml.
    ///
    /// Unlike the implicit lookup, a missing file is an error here.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> PostprepResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref()).required(true))
                .add_source(Environment::with_prefix("POSTPREP")),
        )
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> PostprepResult<Self> {
        let settings: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        debug!(api_base_url = %settings.api_base_url, archive_dir = %settings.archive_dir.display(), "Publisher settings ready");
        Ok(settings)
    }
}

/// Graph API credentials.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct Credentials {
    access_token: String,
    account_id: String,
}

impl Credentials {
    /// Credentials from explicit values.
    pub fn new(access_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: account_id.into(),
        }
    }

    /// Read credentials from the environment, loading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every variable that is unset or blank.
    pub fn from_env() -> PostprepResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PostprepResult<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let access_token = read(ACCESS_TOKEN_VAR);
        let account_id = read(ACCOUNT_ID_VAR);

        match (access_token, account_id) {
            (Some(access_token), Some(account_id)) => Ok(Self::new(access_token, account_id)),
            (access_token, account_id) => {
                let missing: Vec<&str> = [
                    (ACCESS_TOKEN_VAR, access_token.is_none()),
                    (ACCOUNT_ID_VAR, account_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                Err(ConfigError::new(format!(
                    "Missing required environment variable(s): {}",
                    missing.join(", ")
                ))
                .into())
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_bundled_defaults() {
        let settings = PublishSettings::bundled().unwrap();
        assert_eq!(settings.api_base_url(), "https://graph.facebook.com/v21.0");
        assert_eq!(settings.archive_dir(), Path::new("posted"));
    }

    #[test]
    fn test_builder_defaults_match_bundled() {
        let built = PublishSettingsBuilder::default().build().unwrap();
        assert_eq!(built, PublishSettings::bundled().unwrap());
    }

    #[test]
    fn test_override_file_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "archive_dir = \"done\"\n").unwrap();

        let settings = PublishSettings::load_from(&path).unwrap();
        assert_eq!(settings.archive_dir(), Path::new("done"));
        assert_eq!(settings.api_base_url(), "https://graph.facebook.com/v21.0");
    }

    #[test]
    fn test_missing_override_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(PublishSettings::load_from(dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars = HashMap::from([
            (ACCESS_TOKEN_VAR, "token"),
            (ACCOUNT_ID_VAR, "1784"),
        ]);
        let credentials =
            Credentials::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(credentials.access_token(), "token");
        assert_eq!(credentials.account_id(), "1784");
    }

    #[test]
    fn test_missing_credentials_named() {
        let vars = HashMap::from([(ACCESS_TOKEN_VAR, "  ")]);
        let err = Credentials::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(ACCESS_TOKEN_VAR));
        assert!(message.contains(ACCOUNT_ID_VAR));
    }

    #[test]
    fn test_debug_redacts_token() {
        let credentials = Credentials::new("secret-token", "1784");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("1784"));
    }
}
