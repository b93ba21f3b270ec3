//! Settings loading: defaults, then an optional TOML file, then `KVQUEUE_*` env vars

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_CONFIG_FILE: &str = "kvqueue.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `redis://...`, `rediss://...` or `memory://`
    pub store_url: String,

    /// Default blocking-pop timeout in seconds (0 = wait forever)
    pub pop_timeout_secs: u64,

    /// Default number of messages shown by `peek`
    pub peek_limit: usize,

    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings
    ///
    /// An explicit `path` must exist; the default `kvqueue.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("store_url", DEFAULT_STORE_URL)?
            .set_default("pop_timeout_secs", 0)?
            .set_default("peek_limit", 20)?
            .set_default("log_format", "pretty")?
            .add_source(file)
            .add_source(Environment::with_prefix("KVQUEUE").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "kvqueue-settings-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "store_url = \"memory://\"\npop_timeout_secs = 5\npeek_limit = 50\nlog_format = \"json\""
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.store_url, "memory://");
        assert_eq!(settings.pop_timeout_secs, 5);
        assert_eq!(settings.peek_limit, 50);
        assert_eq!(settings.log_format, LogFormat::Json);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("kvqueue-does-not-exist.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
