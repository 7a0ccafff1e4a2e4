//! File and environment configuration.
//!
//! Configuration lives in a TOML file (by default under the platform config
//! directory, see [`Config::default_path`]). Every key is optional:
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! user_id = "+15550100"
//! refresh_interval_secs = 15
//! request_timeout_secs = 10
//! draw_interval_ms = 80
//! draw_count = 8
//! ```
//!
//! After the file is read, `STASH_API_URL` and `STASH_USER_ID` override the
//! corresponding keys.

use url::Url;

use super::*;

/// Environment variable overriding [`Config::api_url`].
pub const API_URL_ENV: &str = "STASH_API_URL";
/// Environment variable overriding [`Config::user_id`].
pub const USER_ID_ENV: &str = "STASH_USER_ID";

/// Runtime configuration for the collection engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL of the content backend
  pub api_url:               String,
  /// User whose collection is shown
  pub user_id:               String,
  /// Seconds between scheduled refreshes
  pub refresh_interval_secs: u64,
  /// Per-request HTTP timeout in seconds
  pub request_timeout_secs:  u64,
  /// Milliseconds between inspiration draws
  pub draw_interval_ms:      u64,
  /// Number of draws in one inspiration roll
  pub draw_count:            u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_url:               "http://localhost:8000".to_string(),
      user_id:               String::new(),
      refresh_interval_secs: 15,
      request_timeout_secs:  10,
      draw_interval_ms:      80,
      draw_count:            8,
    }
  }
}

impl Config {
  /// Default location of the configuration file: `<config dir>/stash/config.toml`.
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join("stash").join("config.toml"))
      .ok_or_else(|| StashError::Config("Could not determine the configuration directory".into()))
  }

  /// Reads the file at `path`, then applies environment overrides.
  ///
  /// A missing file is not an error; defaults are used instead.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let config = if path.exists() {
      debug!("Loading configuration from {}", path.display());
      Self::from_toml(&std::fs::read_to_string(path)?)?
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Self::default()
    };
    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
  }

  /// Parses a TOML document.
  pub fn from_toml(content: &str) -> Result<Self> { Ok(toml::from_str(content)?) }

  /// Writes this configuration to `path` as TOML, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(self)?)?;
    info!("Configuration written to {}", path.display());
    Ok(())
  }

  /// Applies `STASH_API_URL` / `STASH_USER_ID` when they are set and non-empty.
  pub fn with_env_overrides(mut self) -> Self {
    if let Some(url) = env_value(API_URL_ENV) {
      trace!("{} overrides api_url", API_URL_ENV);
      self.api_url = url;
    }
    if let Some(user) = env_value(USER_ID_ENV) {
      trace!("{} overrides user_id", USER_ID_ENV);
      self.user_id = user;
    }
    self
  }

  /// Sets the backend URL.
  pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
    self.api_url = api_url.into();
    self
  }

  /// Sets the user.
  pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
    self.user_id = user_id.into();
    self
  }

  /// Checks that the values can drive the engine.
  pub fn validate(&self) -> Result<()> {
    Url::parse(&self.api_url)
      .map_err(|e| StashError::Config(format!("Invalid api_url \"{}\": {e}", self.api_url)))?;
    if self.refresh_interval_secs == 0 {
      return Err(StashError::Config("refresh_interval_secs must be greater than zero".into()));
    }
    if self.draw_interval_ms == 0 {
      return Err(StashError::Config("draw_interval_ms must be greater than zero".into()));
    }
    if self.draw_count == 0 {
      return Err(StashError::Config("draw_count must be greater than zero".into()));
    }
    if self.user_id.trim().is_empty() {
      warn!("No user_id configured, the backend will return an empty collection");
    }
    Ok(())
  }

  /// Period of the scheduled refresh.
  pub fn refresh_interval(&self) -> Duration { Duration::from_secs(self.refresh_interval_secs) }

  /// Per-request HTTP timeout.
  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }

  /// Delay between inspiration draws.
  pub fn draw_interval(&self) -> Duration { Duration::from_millis(self.draw_interval_ms) }
}

fn env_value(key: &str) -> Option<String> {
  std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
