/// Why a lookup ended without a usable book.
///
/// None of these reach the caller: the orchestrator collapses every variant
/// into the "no results" render path. They exist so the cause can be logged.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Transport failure: no payload returned")]
    Transport,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("No item has both a title and an author")]
    NoQualifyingItem,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
