use once_cell::sync::Lazy;
use serde::Deserialize;

static SETTINGS: Lazy<Settings> =
  Lazy::new(|| Settings::init().expect("Failed to load settings from environment"));

/// Runtime configuration, read once from `QUILL_`-prefixed environment
/// variables with defaults for anything unset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
  /// Path of the sqlite database file, or `:memory:`.
  pub database_url: String,
  /// Connection pool size.
  pub pool_size: u32,
  /// Seconds until a cached home feed page expires.
  pub cache_ttl_secs: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      database_url: "quill.sqlite3".into(),
      pool_size: 5,
      cache_ttl_secs: 20,
    }
  }
}

impl Settings {
  fn init() -> Result<Self, envy::Error> {
    envy::prefixed("QUILL_").from_env()
  }

  pub fn get() -> Self {
    SETTINGS.clone()
  }

  pub fn get_database_url(&self) -> String {
    self.database_url.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::Settings;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_defaults() {
    let settings = Settings::default();
    assert_eq!("quill.sqlite3", settings.get_database_url());
    assert_eq!(5, settings.pool_size);
    assert_eq!(20, settings.cache_ttl_secs);
  }
}
