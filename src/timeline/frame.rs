use crate::foundation::core::FrameNumber;
use crate::timeline::assembler::TimelineAssembler;
use crate::timeline::command::Command;
use crate::timeline::mask::MaskDeferralQueue;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One sealed frame of a timeline. Empty collections are omitted on the wire.
pub struct Frame {
    /// Frame number.
    pub frame: FrameNumber,
    /// Frame labels (zero or one expected).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Commands in replay order; masks come last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    /// Sanitized frame scripts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of a keyframe label as reported by the host.
pub enum LabelKind {
    /// Code 0: no label.
    None,
    /// Code 1: a named label; the only kind that reaches the document.
    Name,
    /// Code 2: an authoring comment.
    Comment,
    /// Code 3: a navigation anchor.
    Anchor,
}

impl LabelKind {
    /// Exact lookup of a host label-kind code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Name),
            2 => Some(Self::Comment),
            3 => Some(Self::Anchor),
            _ => None,
        }
    }
}

/// Mutable accumulator for the frame currently being encoded.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    commands: Vec<Command>,
    labels: Vec<String>,
    scripts: Vec<String>,
}

impl FrameBuffer {
    /// Create an empty, open frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Append a label.
    pub fn push_label(&mut self, label: String) {
        self.labels.push(label);
    }

    /// Append an already sanitized script.
    pub fn push_script(&mut self, script: String) {
        self.scripts.push(script);
    }

    /// Commands accumulated so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Labels accumulated so far.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Scripts accumulated so far.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Whether anything was recorded for this frame.
    pub fn has_content(&self) -> bool {
        !self.commands.is_empty() || !self.labels.is_empty() || !self.scripts.is_empty()
    }

    /// Frame boundary.
    ///
    /// Flushes pending masks after every other command, seals the frame into `timeline` if it
    /// has any content, advances the timeline's frame counter even for an empty frame, and
    /// leaves this buffer empty. Returns whether a frame record was emitted.
    pub fn commit(
        &mut self,
        frame: FrameNumber,
        masks: &mut MaskDeferralQueue,
        timeline: &mut TimelineAssembler,
    ) -> bool {
        masks.flush_into(&mut self.commands);

        let sealed = self.has_content().then(|| Frame {
            frame,
            labels: std::mem::take(&mut self.labels),
            commands: std::mem::take(&mut self.commands),
            scripts: std::mem::take(&mut self.scripts),
        });
        let emitted = sealed.is_some();
        timeline.commit(sealed);
        emitted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frame.rs"]
mod tests;
