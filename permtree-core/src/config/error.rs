//! Errors raised while loading or persisting permtree configuration

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed.
    #[error("configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not parse as the expected sections.
    #[error("unreadable configuration: {0}")]
    Unparsable(String),

    #[error("could not render configuration as TOML: {0}")]
    Unrenderable(String),

    /// An environment override carried a value the flag cannot take.
    #[error("environment override {name} rejected: {reason}")]
    BadOverride { name: &'static str, reason: String },

    /// The assembled configuration is self-consistent TOML but breaks
    /// one of the engine's rules, such as an unknown log level.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
