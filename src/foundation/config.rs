//! Ambient encoder configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{EncodeError, EncodeResult};

/// Configuration read by the command encoder on every call.
///
/// The defaults reproduce the canonical frame-script sanitization expected by the playback
/// runtime; override them only for hosts that pre-process script text themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Frame-script text rules.
    pub script: ScriptRules,
}

/// Sanitization rules applied to frame-script text before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptRules {
    /// Remove every `\r`.
    pub strip_carriage_returns: bool,
    /// Replace every `\n` with the two characters `\` `n`.
    pub escape_newlines: bool,
    /// Remove every `\t`.
    pub strip_tabs: bool,
}

impl Default for ScriptRules {
    fn default() -> Self {
        Self {
            strip_carriage_returns: true,
            escape_newlines: true,
            strip_tabs: true,
        }
    }
}

impl EncoderConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> EncodeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EncodeError::config(format!("parse encoder config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EncodeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            EncodeError::config(format!("open encoder config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}
