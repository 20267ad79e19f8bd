use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::config::EncoderConfig,
    foundation::core::{Affine, AssetId, ColorMatrix, FrameNumber, InstanceId, Rect},
    foundation::error::{EncodeError, EncodeResult},
    foundation::text::HostText,
    host::capability::NoCapabilities,
    replay::descriptor::{FilterDescriptor, SoundDescriptor},
    timeline::assembler::Timeline,
    timeline::command::Placement,
    timeline::frame::LabelKind,
    timeline::writer::TimelineWriter,
};

/// Host text as it appears in a replay script: UTF-8 or raw UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ReplayText {
    /// UTF-8 string.
    Utf8(String),
    /// UTF-16 code units, optionally NUL-terminated.
    Utf16(Vec<u16>),
}

impl HostText for ReplayText {
    fn transcode(&self) -> EncodeResult<String> {
        match self {
            Self::Utf8(s) => s.transcode(),
            Self::Utf16(units) => units.transcode(),
        }
    }
}

fn name_label() -> LabelKind {
    LabelKind::Name
}

/// Label kinds are recorded either by name or by raw host code.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RecordedLabelKind {
    Code(u32),
    Named(LabelKind),
}

fn label_kind<'de, D: serde::Deserializer<'de>>(d: D) -> Result<LabelKind, D::Error> {
    let recorded: RecordedLabelKind = serde::Deserialize::deserialize(d)?;
    let kind = match recorded {
        RecordedLabelKind::Code(code) => LabelKind::from_code(code),
        RecordedLabelKind::Named(kind) => Some(kind),
    };
    kind.ok_or_else(|| serde::de::Error::custom("unknown label kind code"))
}

/// One recorded writer callback.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[allow(missing_docs)]
pub enum Event {
    /// [`TimelineWriter::place`].
    Place {
        asset_id: AssetId,
        instance_id: InstanceId,
        #[serde(default)]
        place_after_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<Affine>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds: Option<Rect>,
    },
    /// [`TimelineWriter::place_looped`].
    PlaceLooped {
        asset_id: AssetId,
        instance_id: InstanceId,
        #[serde(default)]
        place_after_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<Affine>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instance_name: Option<String>,
        #[serde(rename = "loop", default)]
        looped: bool,
        #[serde(default)]
        is_graphic: bool,
    },
    /// [`TimelineWriter::place_sound`]; a missing descriptor models a non-sound handle.
    PlaceSound {
        asset_id: AssetId,
        instance_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sound: Option<SoundDescriptor>,
    },
    /// [`TimelineWriter::remove`].
    Remove { instance_id: InstanceId },
    /// [`TimelineWriter::reorder_after`].
    Reorder {
        instance_id: InstanceId,
        place_after_id: InstanceId,
    },
    /// [`TimelineWriter::declare_mask`].
    Mask {
        instance_id: InstanceId,
        masked_through_id: InstanceId,
    },
    /// [`TimelineWriter::set_blend_mode`] with the raw host code.
    BlendMode { instance_id: InstanceId, code: u32 },
    /// [`TimelineWriter::set_visibility`].
    Visibility {
        instance_id: InstanceId,
        visible: bool,
    },
    /// [`TimelineWriter::attach_filter`].
    Filter {
        instance_id: InstanceId,
        filter: FilterDescriptor,
    },
    /// [`TimelineWriter::set_transform`].
    Move {
        instance_id: InstanceId,
        transform: Affine,
    },
    /// [`TimelineWriter::set_color_transform`].
    ColorTransform {
        instance_id: InstanceId,
        color_matrix: ColorMatrix,
    },
    /// [`TimelineWriter::set_frame_label`].
    Label {
        text: ReplayText,
        #[serde(default = "name_label", deserialize_with = "label_kind")]
        label_kind: LabelKind,
    },
    /// [`TimelineWriter::add_frame_script`].
    Script {
        text: ReplayText,
        #[serde(default)]
        layer: u32,
    },
    /// [`TimelineWriter::remove_frame_script`].
    RemoveScript {
        #[serde(default)]
        layer: u32,
    },
    /// [`TimelineWriter::show_frame`].
    ShowFrame { frame: FrameNumber },
}

impl Event {
    /// Apply this event to `writer`.
    pub fn apply(&self, writer: &mut TimelineWriter) -> EncodeResult<()> {
        match self {
            Self::Place {
                asset_id,
                instance_id,
                place_after_id,
                transform,
                bounds,
            } => {
                let p = placement(*asset_id, *instance_id, *place_after_id, *transform);
                writer.place(p, *bounds);
            }
            Self::PlaceLooped {
                asset_id,
                instance_id,
                place_after_id,
                transform,
                instance_name,
                looped,
                is_graphic,
            } => {
                let p = placement(*asset_id, *instance_id, *place_after_id, *transform);
                writer.place_looped(p, instance_name.as_deref(), *looped, *is_graphic);
            }
            Self::PlaceSound {
                asset_id,
                instance_id,
                sound,
            } => match sound {
                Some(sound) => writer.place_sound(*asset_id, *instance_id, sound)?,
                None => writer.place_sound(*asset_id, *instance_id, &NoCapabilities)?,
            },
            Self::Remove { instance_id } => writer.remove(*instance_id),
            Self::Reorder {
                instance_id,
                place_after_id,
            } => writer.reorder_after(*instance_id, *place_after_id),
            Self::Mask {
                instance_id,
                masked_through_id,
            } => writer.declare_mask(*instance_id, *masked_through_id),
            Self::BlendMode { instance_id, code } => writer.set_blend_mode(*instance_id, *code),
            Self::Visibility {
                instance_id,
                visible,
            } => writer.set_visibility(*instance_id, *visible),
            Self::Filter {
                instance_id,
                filter,
            } => writer.attach_filter(*instance_id, filter)?,
            Self::Move {
                instance_id,
                transform,
            } => writer.set_transform(*instance_id, *transform),
            Self::ColorTransform {
                instance_id,
                color_matrix,
            } => writer.set_color_transform(*instance_id, *color_matrix),
            Self::Label { text, label_kind } => writer.set_frame_label(text, *label_kind)?,
            Self::Script { text, layer } => writer.add_frame_script(text, *layer)?,
            Self::RemoveScript { layer } => writer.remove_frame_script(*layer),
            Self::ShowFrame { frame } => {
                writer.show_frame(*frame);
            }
        }
        Ok(())
    }
}

fn placement(
    asset_id: AssetId,
    instance_id: InstanceId,
    place_after_id: InstanceId,
    transform: Option<Affine>,
) -> Placement {
    Placement {
        asset_id,
        instance_id,
        place_after_id,
        transform,
    }
}

/// A recorded walk over one timeline, replayable without a live authoring tool.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplayScript {
    /// Library asset id; `0` for the stage.
    #[serde(default)]
    pub asset_id: AssetId,
    /// Instance name, when the symbol is a movie clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    /// Timeline name.
    pub name: String,
    /// Callbacks in host order.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl ReplayScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> EncodeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EncodeError::serde(format!("parse replay script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EncodeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open replay script '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Drive a fresh [`TimelineWriter`] through every event and finalize it.
    ///
    /// The first failing event aborts the replay.
    #[tracing::instrument(
        skip(self, config),
        fields(name = %self.name, events = self.events.len())
    )]
    pub fn run(&self, config: &EncoderConfig) -> EncodeResult<Timeline> {
        let mut writer = TimelineWriter::new(config.clone());
        for (index, event) in self.events.iter().enumerate() {
            event.apply(&mut writer).map_err(|e| {
                tracing::debug!(index, error = %e, "replay event failed");
                e
            })?;
        }
        let instance_name = self.instance_name.as_deref();
        Ok(writer.finalize(self.asset_id, instance_name, &self.name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/script.rs"]
mod tests;
