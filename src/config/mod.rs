use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct DbConfig {
    pub location: String,
}

/// config properties for log output
#[derive(Deserialize, Clone, Debug)]
pub struct LogConfig {
    /// one of `error`, `warn`, `info`, `debug`, `trace`. Unknown values fall back to `info`
    pub level: String,
    /// if present, log lines are appended to this file in addition to stdout
    pub file: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug)]
pub struct ThreadTagsConfig {
    pub database: DbConfig,
    #[serde(rename = "logging")]
    pub log: LogConfig,
}

/// Parses the config file located at ./ThreadTags.toml, if it exists.
/// If the file exists but can't be parsed, the application will panic
pub fn parse_config() -> ThreadTagsConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./ThreadTags.toml"))
        .build();
    let settings = match builder {
        Ok(settings) => settings,
        // a missing file is fine, we just use the defaults
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return TT_CONFIG_DEFAULT.clone();
        }
        Err(e) => {
            log::error!("Failed to parse config file. Exception is {e}");
            panic!("Failed to parse config file. Exception is {e}");
        }
    };
    settings.try_deserialize().unwrap_or_else(|e| {
        log::warn!("Config file is missing properties ({e}), using defaults");
        TT_CONFIG_DEFAULT.clone()
    })
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static THREAD_TAGS_CONFIG: Lazy<ThreadTagsConfig> = Lazy::new(parse_config);
static TT_CONFIG_DEFAULT: Lazy<ThreadTagsConfig> = Lazy::new(|| ThreadTagsConfig {
    database: DbConfig {
        location: "./thread_tags.sqlite".to_string(),
    },
    log: LogConfig {
        level: "info".to_string(),
        file: None,
    },
});
