/// Convenience result type used across frameline.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Top-level error taxonomy used by encoder APIs.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// A host capability getter reported a failure while a command was being encoded.
    #[error("property read error: {capability}.{property} failed with code {code}")]
    PropertyRead {
        /// Capability that was being read (e.g. `drop_shadow`).
        capability: &'static str,
        /// Property getter that failed (e.g. `angle`).
        property: &'static str,
        /// Host fault code.
        code: i32,
    },

    /// Host text could not be transcoded into UTF-8.
    #[error("transcode error: {0}")]
    Transcode(String),

    /// Invalid encoder configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing documents and event streams.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EncodeError {
    /// Build a [`EncodeError::PropertyRead`] value.
    pub fn property_read(capability: &'static str, property: &'static str, code: i32) -> Self {
        Self::PropertyRead {
            capability,
            property,
            code,
        }
    }

    /// Build a [`EncodeError::Transcode`] value.
    pub fn transcode(msg: impl Into<String>) -> Self {
        Self::Transcode(msg.into())
    }

    /// Build a [`EncodeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`EncodeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error came from a failed host property read.
    pub fn is_property_read(&self) -> bool {
        matches!(self, Self::PropertyRead { .. })
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
