//! Frameline encodes authoring-tool timelines into frame-indexed JSON documents.
//!
//! The authoring tool walks each timeline frame by frame and reports display-list mutations
//! through [`TimelineWriter`]. Every callback becomes one canonical [`Command`] in the open
//! frame; frame boundaries seal the frame into a [`Timeline`] that a playback runtime replays.
//!
//! # Pipeline overview
//!
//! 1. **Probe**: host objects arrive as borrowed [`CapabilityHandle`]s and are queried for the
//!    filter and sound capabilities they satisfy.
//! 2. **Encode**: [`CommandEncoder`] maps each callback to a [`Command`], reading capability
//!    properties and translating host enumeration codes.
//! 3. **Commit**: [`TimelineWriter::show_frame`] appends deferred masks, seals non-empty frames,
//!    and counts every tick toward `totalFrames`.
//! 4. **Finalize**: [`TimelineWriter::finalize`] stamps identity and derives the timeline kind.
//!
//! Recorded callback streams can be replayed offline with [`ReplayScript`], which is what the
//! `frameline` binary does.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No retained host borrows**: capability handles are only borrowed for the duration of a
//!   callback.
//! - **Masks last**: within a frame, `Mask` commands always follow every other command.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod foundation;
mod host;
mod replay;
mod timeline;

pub use effects::filter::{
    FilterKind, FilterPlacement, FilterQuality, FilterSpec, GradientFilter, GradientStop,
    encode_filters, gradient_stops,
};
pub use foundation::config::{EncoderConfig, ScriptRules};
pub use foundation::core::{
    Affine, AssetId, ColorMatrix, FrameNumber, HexColor, InstanceId, Rect, Rgba8, Strength,
};
pub use foundation::error::{EncodeError, EncodeResult};
pub use foundation::text::{HostText, sanitize_script};
pub use host::capability::{
    BevelSource, BlurSource, Capability, CapabilityHandle, CapabilityKind, ColorAdjustSource,
    DropShadowSource, Fault, GlowSource, GradientFilterSource, GradientHandle, GradientPoint,
    HostResult, HostResultExt, LinearGradientSource, NoCapabilities, SoundLimit, SoundLoopSettings,
    SoundSource,
};
pub use replay::descriptor::{
    BevelParams, BlurParams, ColorAdjustParams, DropShadowParams, Faults, FilterDescriptor,
    GlowParams, GradientParams, STOP_OUT_OF_RANGE, SoundDescriptor, TOO_MANY_STOPS,
};
pub use replay::script::{Event, ReplayScript, ReplayText};
pub use timeline::assembler::{Timeline, TimelineAssembler, TimelineKind};
pub use timeline::command::{
    BlendMode, Command, CommandEncoder, Placement, SoundLoopMode, SoundSyncMode,
};
pub use timeline::frame::{Frame, FrameBuffer, LabelKind};
pub use timeline::mask::{MaskDeferralQueue, MaskRelation};
pub use timeline::writer::TimelineWriter;
