//! Errors from locating, reading, writing and checking `config.ron`.

/// Configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform reports no per-user config directory.
    #[error("no user config directory on this platform, pass --config")]
    NoConfigDir,

    /// `config.ron` exists but could not be read.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config directory or file could not be written.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Serializing to RON failed.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
