//! Configuration for SILTA
//!
//! Loading is deliberately permissive: a missing or unreadable config file,
//! or any missing key, silently falls back to the compiled-in defaults.
//! Startup never fails on bad configuration.

use std::path::Path;

use tracing::warn;

/// InfluxDB port the series URL always targets; not read from the config file.
const INFLUX_PORT: u16 = 8086;

/// Destination settings for the InfluxDB series endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL scheme prefix, including the `://`
    pub protocol: String,

    /// InfluxDB host
    pub host: String,

    /// Database to write into
    pub db: String,

    /// Credentials passed as query parameters
    pub user: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: "http://".to_string(),
            host: "localhost".to_string(),
            db: "events".to_string(),
            user: "data".to_string(),
            password: "data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file.
    ///
    /// Each key falls back to its default independently; an absent or
    /// unparseable file yields all defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = Config::default();

        let Some(path) = path else {
            return config;
        };

        let source = match config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()
        {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file unreadable, using defaults");
                return config;
            }
        };

        if let Ok(v) = source.get_string("protocol") {
            config.protocol = v;
        }
        if let Ok(v) = source.get_string("host") {
            config.host = v;
        }
        if let Ok(v) = source.get_string("db") {
            config.db = v;
        }
        if let Ok(v) = source.get_string("user") {
            config.user = v;
        }
        if let Ok(v) = source.get_string("password") {
            config.password = v;
        }

        config
    }

    /// Assemble the series ingest URL, done once at startup
    pub fn series_url(&self) -> String {
        format!(
            "{}{}:{}/db/{}/series?u={}&p={}",
            self.protocol, self.host, INFLUX_PORT, self.db, self.user, self.password
        )
    }
}
