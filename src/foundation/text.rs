use crate::foundation::config::ScriptRules;
use crate::foundation::error::{EncodeError, EncodeResult};

/// Authoring-tool-native text that can be transcoded into the encoder's `String` form.
///
/// Hosts hand text over either as UTF-8 or as raw UTF-16 code units.
pub trait HostText {
    /// Transcode into an owned UTF-8 string.
    fn transcode(&self) -> EncodeResult<String>;
}

impl HostText for str {
    fn transcode(&self) -> EncodeResult<String> {
        Ok(self.to_owned())
    }
}

impl HostText for String {
    fn transcode(&self) -> EncodeResult<String> {
        Ok(self.clone())
    }
}

impl HostText for [u16] {
    fn transcode(&self) -> EncodeResult<String> {
        let units = match self.iter().position(|&u| u == 0) {
            Some(nul) => &self[..nul],
            None => self,
        };
        String::from_utf16(units).map_err(|e| EncodeError::transcode(format!("host text: {e}")))
    }
}

impl HostText for Vec<u16> {
    fn transcode(&self) -> EncodeResult<String> {
        self.as_slice().transcode()
    }
}

/// Apply frame-script sanitization rules.
pub fn sanitize_script(script: &str, rules: &ScriptRules) -> String {
    let mut out = String::with_capacity(script.len());
    for ch in script.chars() {
        match ch {
            '\r' if rules.strip_carriage_returns => {}
            '\t' if rules.strip_tabs => {}
            '\n' if rules.escape_newlines => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}
