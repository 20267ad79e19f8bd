use crate::{
    effects::filter::{FilterSpec, encode_filters},
    foundation::config::EncoderConfig,
    foundation::core::{Affine, AssetId, ColorMatrix, InstanceId, Rect},
    foundation::error::EncodeResult,
    foundation::text::{HostText, sanitize_script},
    host::capability::{CapabilityHandle, CapabilityKind, HostResultExt as _},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
#[allow(missing_docs)]
/// One display-list mutation replayed by the playback runtime.
///
/// Optional fields are omitted from the wire form when absent.
pub enum Command {
    /// Place a library asset on the display list above `place_after_id`.
    Place {
        asset_id: AssetId,
        instance_id: InstanceId,
        place_after_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<Affine>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds: Option<Rect>,
    },
    /// Place a timeline symbol (movie clip or graphic).
    PlaceLooped {
        asset_id: AssetId,
        instance_id: InstanceId,
        place_after_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<Affine>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instance_name: Option<String>,
        #[serde(rename = "loop")]
        looped: bool,
        is_graphic: bool,
    },
    /// Cue a sound. Every optional field is absent when the handle is not a sound.
    SoundPlace {
        asset_id: AssetId,
        instance_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loop_mode: Option<SoundLoopMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        repeat_count: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sync_mode: Option<SoundSyncMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit_in_samples: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit_out_samples: Option<u32>,
    },
    /// Remove an instance from the display list.
    Remove { instance_id: InstanceId },
    /// Move an instance directly above `place_after_id`.
    ReorderAfter {
        instance_id: InstanceId,
        place_after_id: InstanceId,
    },
    /// Use `instance_id` as a mask for every instance up to `masked_through_id`.
    Mask {
        instance_id: InstanceId,
        masked_through_id: InstanceId,
    },
    /// Set the blend mode. `mode` is absent when the host code was not recognized.
    SetBlendMode {
        instance_id: InstanceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<BlendMode>,
    },
    /// Show or hide an instance.
    SetVisibility {
        instance_id: InstanceId,
        visible: bool,
    },
    /// Attach filters; one block per filter probe the host handle matched.
    AttachFilter {
        instance_id: InstanceId,
        filters: Vec<FilterSpec>,
    },
    /// Replace an instance's transform.
    Move {
        instance_id: InstanceId,
        transform: Affine,
    },
    /// Replace an instance's color transform.
    SetColorTransform {
        instance_id: InstanceId,
        color_matrix: ColorMatrix,
    },
}

impl Command {
    /// Wire `type` tag of this command.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Place { .. } => "Place",
            Self::PlaceLooped { .. } => "PlaceLooped",
            Self::SoundPlace { .. } => "SoundPlace",
            Self::Remove { .. } => "Remove",
            Self::ReorderAfter { .. } => "ReorderAfter",
            Self::Mask { .. } => "Mask",
            Self::SetBlendMode { .. } => "SetBlendMode",
            Self::SetVisibility { .. } => "SetVisibility",
            Self::AttachFilter { .. } => "AttachFilter",
            Self::Move { .. } => "Move",
            Self::SetColorTransform { .. } => "SetColorTransform",
        }
    }

    /// Instance the command targets.
    pub fn instance_id(&self) -> InstanceId {
        match self {
            Self::Place { instance_id, .. }
            | Self::PlaceLooped { instance_id, .. }
            | Self::SoundPlace { instance_id, .. }
            | Self::Remove { instance_id }
            | Self::ReorderAfter { instance_id, .. }
            | Self::Mask { instance_id, .. }
            | Self::SetBlendMode { instance_id, .. }
            | Self::SetVisibility { instance_id, .. }
            | Self::AttachFilter { instance_id, .. }
            | Self::Move { instance_id, .. }
            | Self::SetColorTransform { instance_id, .. } => *instance_id,
        }
    }

    /// Whether this is a [`Command::Mask`].
    pub fn is_mask(&self) -> bool {
        matches!(self, Self::Mask { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Blend mode, encoded with the runtime's literal names.
pub enum BlendMode {
    /// Code 0.
    Normal,
    /// Code 1.
    Layer,
    /// Code 2.
    Darken,
    /// Code 3.
    Multiply,
    /// Code 4.
    Lighten,
    /// Code 5.
    Screen,
    /// Code 6.
    Overlay,
    /// Code 7.
    Hardlight,
    /// Code 8.
    Add,
    /// Code 9. The runtime expects this spelling.
    Substract,
    /// Code 10.
    Difference,
    /// Code 11.
    Invert,
    /// Code 12.
    Alpha,
    /// Code 13.
    Erase,
}

impl BlendMode {
    const TABLE: [BlendMode; 14] = [
        Self::Normal,
        Self::Layer,
        Self::Darken,
        Self::Multiply,
        Self::Lighten,
        Self::Screen,
        Self::Overlay,
        Self::Hardlight,
        Self::Add,
        Self::Substract,
        Self::Difference,
        Self::Invert,
        Self::Alpha,
        Self::Erase,
    ];

    /// Exact lookup of a host blend-mode code.
    pub fn from_code(code: u32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::TABLE.get(i).copied())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a cued sound repeats.
pub enum SoundLoopMode {
    /// Code 0: play `repeat_count` times.
    Repeat,
    /// Code 1: loop forever.
    Loop,
}

impl SoundLoopMode {
    /// Exact lookup of a host loop-mode code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Repeat),
            1 => Some(Self::Loop),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a cued sound is synchronized with the timeline.
pub enum SoundSyncMode {
    /// Code 0.
    Event,
    /// Code 1.
    Start,
    /// Code 2. Stop cues normally arrive as `Remove` instead.
    Stop,
    /// Code 3.
    Stream,
}

impl SoundSyncMode {
    /// Exact lookup of a host sync-mode code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Event),
            1 => Some(Self::Start),
            2 => Some(Self::Stop),
            3 => Some(Self::Stream),
            _ => None,
        }
    }
}

/// Identity and position shared by the placement callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Library asset to instantiate.
    pub asset_id: AssetId,
    /// New instance id.
    pub instance_id: InstanceId,
    /// Instance to stack above; [`InstanceId::BOTTOM`] for the bottom of the list.
    pub place_after_id: InstanceId,
    /// Initial transform, if any.
    pub transform: Option<Affine>,
}

impl Placement {
    /// Placement at the bottom of the display list without a transform.
    pub fn new(asset_id: AssetId, instance_id: InstanceId) -> Self {
        Self {
            asset_id,
            instance_id,
            place_after_id: InstanceId::BOTTOM,
            transform: None,
        }
    }

    /// Stack above `place_after_id`.
    pub fn after(mut self, place_after_id: InstanceId) -> Self {
        self.place_after_id = place_after_id;
        self
    }

    /// Set the initial transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Maps mutation callbacks to canonical [`Command`] records.
///
/// Stateless apart from the ambient [`EncoderConfig`]; appending the records is the caller's job.
#[derive(Clone, Debug, Default)]
pub struct CommandEncoder {
    config: EncoderConfig,
}

impl CommandEncoder {
    /// Create an encoder reading `config`.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Ambient configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// [`Command::Place`].
    pub fn place(&self, p: Placement, bounds: Option<Rect>) -> Command {
        Command::Place {
            asset_id: p.asset_id,
            instance_id: p.instance_id,
            place_after_id: p.place_after_id,
            transform: p.transform,
            bounds,
        }
    }

    /// [`Command::PlaceLooped`]. An empty instance name is treated as absent.
    pub fn place_looped(
        &self,
        p: Placement,
        instance_name: Option<&str>,
        looped: bool,
        is_graphic: bool,
    ) -> Command {
        Command::PlaceLooped {
            asset_id: p.asset_id,
            instance_id: p.instance_id,
            place_after_id: p.place_after_id,
            transform: p.transform,
            instance_name: instance_name.filter(|n| !n.is_empty()).map(str::to_owned),
            looped,
            is_graphic,
        }
    }

    /// [`Command::SoundPlace`], reading loop/sync/limit data when `handle` is a sound.
    pub fn place_sound(
        &self,
        asset_id: AssetId,
        instance_id: InstanceId,
        handle: &dyn CapabilityHandle,
    ) -> EncodeResult<Command> {
        let Some(sound) = handle.as_sound() else {
            return Ok(Command::SoundPlace {
                asset_id,
                instance_id,
                loop_mode: None,
                repeat_count: None,
                sync_mode: None,
                limit_in_samples: None,
                limit_out_samples: None,
            });
        };

        const CAP: &str = CapabilityKind::Sound.name();
        let looping = sound.loop_settings().read(CAP, "loop_mode")?;
        let sync_code = sound.sync_mode().read(CAP, "sync_mode")?;
        let limit = sound.limit().read(CAP, "limit")?;

        let loop_mode = SoundLoopMode::from_code(looping.mode);
        if loop_mode.is_none() {
            tracing::debug!(
                code = looping.mode,
                "unsupported sound loop mode; field omitted"
            );
        }
        let sync_mode = SoundSyncMode::from_code(sync_code);
        match sync_mode {
            None => tracing::debug!(
                code = sync_code,
                "unsupported sound sync mode; field omitted"
            ),
            Some(SoundSyncMode::Stop) => tracing::warn!(
                instance = instance_id.0,
                "sound placed with stop sync mode; stop cues are expected as Remove commands"
            ),
            Some(_) => {}
        }

        Ok(Command::SoundPlace {
            asset_id,
            instance_id,
            loop_mode,
            repeat_count: Some(looping.repeat_count),
            sync_mode,
            limit_in_samples: Some(limit.in_samples),
            limit_out_samples: Some(limit.out_samples),
        })
    }

    /// [`Command::Remove`].
    pub fn remove(&self, instance_id: InstanceId) -> Command {
        Command::Remove { instance_id }
    }

    /// [`Command::ReorderAfter`].
    pub fn reorder_after(&self, instance_id: InstanceId, place_after_id: InstanceId) -> Command {
        Command::ReorderAfter {
            instance_id,
            place_after_id,
        }
    }

    /// [`Command::Mask`].
    pub fn mask(&self, instance_id: InstanceId, masked_through_id: InstanceId) -> Command {
        Command::Mask {
            instance_id,
            masked_through_id,
        }
    }

    /// [`Command::SetBlendMode`]; unknown codes leave `mode` absent.
    pub fn blend_mode(&self, instance_id: InstanceId, code: u32) -> Command {
        let mode = BlendMode::from_code(code);
        if mode.is_none() {
            tracing::debug!(
                code,
                instance = instance_id.0,
                "unsupported blend mode; field omitted"
            );
        }
        Command::SetBlendMode { instance_id, mode }
    }

    /// [`Command::SetVisibility`].
    pub fn visibility(&self, instance_id: InstanceId, visible: bool) -> Command {
        Command::SetVisibility {
            instance_id,
            visible,
        }
    }

    /// [`Command::AttachFilter`] with one block per matching filter probe.
    pub fn attach_filter(
        &self,
        instance_id: InstanceId,
        handle: &dyn CapabilityHandle,
    ) -> EncodeResult<Command> {
        Ok(Command::AttachFilter {
            instance_id,
            filters: encode_filters(handle)?,
        })
    }

    /// [`Command::Move`].
    pub fn transform(&self, instance_id: InstanceId, transform: Affine) -> Command {
        Command::Move {
            instance_id,
            transform,
        }
    }

    /// [`Command::SetColorTransform`].
    pub fn color_transform(&self, instance_id: InstanceId, color_matrix: ColorMatrix) -> Command {
        Command::SetColorTransform {
            instance_id,
            color_matrix,
        }
    }

    /// Transcode and sanitize frame-script text.
    pub fn frame_script<T: HostText + ?Sized>(&self, script: &T) -> EncodeResult<String> {
        Ok(sanitize_script(&script.transcode()?, &self.config.script))
    }

    /// Transcode label text.
    pub fn label<T: HostText + ?Sized>(&self, label: &T) -> EncodeResult<String> {
        label.transcode()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/command.rs"]
mod tests;
