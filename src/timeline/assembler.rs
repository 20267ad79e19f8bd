use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{AssetId, FrameNumber},
    foundation::error::EncodeResult,
    timeline::frame::Frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// What a timeline document describes.
pub enum TimelineKind {
    /// The main stage (asset id 0).
    Stage,
    /// A library symbol without an instance name.
    Graphic,
    /// A library symbol with an instance name.
    Movieclip,
}

impl TimelineKind {
    /// Derive the kind from the timeline's identity.
    pub fn derive(asset_id: AssetId, has_instance_name: bool) -> Self {
        if asset_id.is_stage() {
            Self::Stage
        } else if has_instance_name {
            Self::Movieclip
        } else {
            Self::Graphic
        }
    }
}

fn is_stage(id: &AssetId) -> bool {
    id.is_stage()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Finalized, frame-indexed timeline document.
pub struct Timeline {
    /// Library asset id; omitted for the stage.
    #[serde(default, skip_serializing_if = "is_stage")]
    pub asset_id: AssetId,
    /// Derived timeline kind.
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    /// Timeline name.
    pub name: String,
    /// Number of frame ticks, including frames that emitted no record.
    pub total_frames: u32,
    /// Frames that carried content, in commit order.
    pub frames: Vec<Frame>,
}

impl Timeline {
    /// Look up the record emitted for `frame`, if it had content.
    pub fn frame(&self, frame: FrameNumber) -> Option<&Frame> {
        self.frames.iter().find(|f| f.frame == frame)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> EncodeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> EncodeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>, pretty: bool) -> EncodeResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create timeline document '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        if pretty {
            serde_json::to_writer_pretty(&mut w, self)?;
        } else {
            serde_json::to_writer(&mut w, self)?;
        }
        w.flush()
            .with_context(|| format!("flush timeline document '{}'", path.display()))?;
        Ok(())
    }
}

/// Owns the committed frame sequence and the running frame counter.
#[derive(Clone, Debug, Default)]
pub struct TimelineAssembler {
    frames: Vec<Frame>,
    frame_count: u32,
}

impl TimelineAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame tick, appending `frame` when it carried content.
    pub fn commit(&mut self, frame: Option<Frame>) {
        if let Some(frame) = frame {
            tracing::debug!(
                frame = frame.frame.0,
                commands = frame.commands.len(),
                "frame sealed"
            );
            self.frames.push(frame);
        }
        self.frame_count = self.frame_count.saturating_add(1);
    }

    /// Frame ticks committed so far.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Frames emitted so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Stamp identity onto the committed frames. An empty instance name counts as absent.
    ///
    /// Re-deriving is allowed; nothing is reset.
    #[tracing::instrument(skip(self))]
    pub fn finalize(&self, asset_id: AssetId, instance_name: Option<&str>, name: &str) -> Timeline {
        let named = instance_name.is_some_and(|n| !n.is_empty());
        Timeline {
            asset_id,
            kind: TimelineKind::derive(asset_id, named),
            name: name.to_owned(),
            total_frames: self.frame_count,
            frames: self.frames.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assembler.rs"]
mod tests;
