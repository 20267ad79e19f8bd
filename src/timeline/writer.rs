use crate::{
    foundation::config::EncoderConfig,
    foundation::core::{Affine, AssetId, ColorMatrix, FrameNumber, InstanceId, Rect},
    foundation::error::EncodeResult,
    foundation::text::HostText,
    host::capability::CapabilityHandle,
    timeline::assembler::{Timeline, TimelineAssembler},
    timeline::command::{Command, CommandEncoder, Placement},
    timeline::frame::{FrameBuffer, LabelKind},
    timeline::mask::MaskDeferralQueue,
};

/// Callback surface driven by the authoring tool while it walks one timeline.
///
/// Every mutation callback appends exactly one command to the open frame, except
/// [`TimelineWriter::declare_mask`], whose command is deferred to the next
/// [`TimelineWriter::show_frame`]. A failing callback appends nothing.
#[derive(Clone, Debug, Default)]
pub struct TimelineWriter {
    encoder: CommandEncoder,
    frame: FrameBuffer,
    masks: MaskDeferralQueue,
    timeline: TimelineAssembler,
}

impl TimelineWriter {
    /// Create a writer with an open, empty first frame.
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            encoder: CommandEncoder::new(config),
            ..Self::default()
        }
    }

    /// Place a library asset.
    pub fn place(&mut self, placement: Placement, bounds: Option<Rect>) {
        let cmd = self.encoder.place(placement, bounds);
        self.frame.push_command(cmd);
    }

    /// Place a timeline symbol.
    pub fn place_looped(
        &mut self,
        placement: Placement,
        instance_name: Option<&str>,
        looped: bool,
        is_graphic: bool,
    ) {
        let cmd = self
            .encoder
            .place_looped(placement, instance_name, looped, is_graphic);
        self.frame.push_command(cmd);
    }

    /// Cue a sound; `handle` may or may not resolve to a sound capability.
    pub fn place_sound(
        &mut self,
        asset_id: AssetId,
        instance_id: InstanceId,
        handle: &dyn CapabilityHandle,
    ) -> EncodeResult<()> {
        let cmd = self.encoder.place_sound(asset_id, instance_id, handle)?;
        self.frame.push_command(cmd);
        Ok(())
    }

    /// Remove an instance.
    pub fn remove(&mut self, instance_id: InstanceId) {
        let cmd = self.encoder.remove(instance_id);
        self.frame.push_command(cmd);
    }

    /// Restack an instance above `place_after_id`.
    pub fn reorder_after(&mut self, instance_id: InstanceId, place_after_id: InstanceId) {
        let cmd = self.encoder.reorder_after(instance_id, place_after_id);
        self.frame.push_command(cmd);
    }

    /// Declare a mask relation; materialized at the end of the current frame.
    pub fn declare_mask(&mut self, instance_id: InstanceId, masked_through_id: InstanceId) {
        self.masks.declare(instance_id, masked_through_id);
    }

    /// Set a blend mode from its host code.
    pub fn set_blend_mode(&mut self, instance_id: InstanceId, code: u32) {
        let cmd = self.encoder.blend_mode(instance_id, code);
        self.frame.push_command(cmd);
    }

    /// Show or hide an instance.
    pub fn set_visibility(&mut self, instance_id: InstanceId, visible: bool) {
        let cmd = self.encoder.visibility(instance_id, visible);
        self.frame.push_command(cmd);
    }

    /// Attach the filter(s) `handle` describes.
    pub fn attach_filter(
        &mut self,
        instance_id: InstanceId,
        handle: &dyn CapabilityHandle,
    ) -> EncodeResult<()> {
        let cmd = self.encoder.attach_filter(instance_id, handle)?;
        self.frame.push_command(cmd);
        Ok(())
    }

    /// Replace an instance's transform.
    pub fn set_transform(&mut self, instance_id: InstanceId, transform: Affine) {
        let cmd = self.encoder.transform(instance_id, transform);
        self.frame.push_command(cmd);
    }

    /// Replace an instance's color transform.
    pub fn set_color_transform(&mut self, instance_id: InstanceId, color_matrix: ColorMatrix) {
        let cmd = self.encoder.color_transform(instance_id, color_matrix);
        self.frame.push_command(cmd);
    }

    /// Label the current frame. Only [`LabelKind::Name`] labels reach the document.
    pub fn set_frame_label<T: HostText + ?Sized>(
        &mut self,
        label: &T,
        kind: LabelKind,
    ) -> EncodeResult<()> {
        let label = self.encoder.label(label)?;
        match kind {
            LabelKind::Name => self.frame.push_label(label),
            LabelKind::Comment => {
                tracing::warn!(label = %label, "comment frame label type is ignored");
            }
            LabelKind::Anchor => {
                tracing::warn!(label = %label, "anchor frame label type is ignored");
            }
            LabelKind::None => {}
        }
        Ok(())
    }

    /// Attach a frame script to the current frame.
    pub fn add_frame_script<T: HostText + ?Sized>(
        &mut self,
        script: &T,
        layer: u32,
    ) -> EncodeResult<()> {
        let script = self.encoder.frame_script(script)?;
        tracing::trace!(layer, len = script.len(), "frame script added");
        self.frame.push_script(script);
        Ok(())
    }

    /// The host asked to drop a script from a frame that has no keyframe; nothing is encoded.
    pub fn remove_frame_script(&mut self, layer: u32) {
        tracing::warn!(layer, "frame scripts cannot be added to empty keyframes");
    }

    /// Close the current frame. Returns whether a frame record was emitted.
    #[tracing::instrument(skip(self))]
    pub fn show_frame(&mut self, frame: FrameNumber) -> bool {
        self.frame.commit(frame, &mut self.masks, &mut self.timeline)
    }

    /// Finalize the timeline document. May be called again; state is not reset.
    pub fn finalize(&self, asset_id: AssetId, instance_name: Option<&str>, name: &str) -> Timeline {
        self.timeline.finalize(asset_id, instance_name, name)
    }

    /// Commands recorded for the open frame (pending masks excluded).
    pub fn open_commands(&self) -> &[Command] {
        self.frame.commands()
    }

    /// Mask declarations awaiting the next frame boundary.
    pub fn pending_masks(&self) -> &MaskDeferralQueue {
        &self.masks
    }

    /// Frame ticks committed so far.
    pub fn frame_count(&self) -> u32 {
        self.timeline.frame_count()
    }

    /// Ambient configuration.
    pub fn config(&self) -> &EncoderConfig {
        self.encoder.config()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/writer.rs"]
mod tests;
