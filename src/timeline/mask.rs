use crate::{foundation::core::InstanceId, timeline::command::Command};

/// A pending "mask everything up to `masked_through_id` with `instance_id`" declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskRelation {
    /// Masking instance.
    pub instance_id: InstanceId,
    /// Last instance covered by the mask.
    pub masked_through_id: InstanceId,
}

/// Two-phase mask buffer: declarations are recorded mid-frame and materialized as
/// [`Command::Mask`] at the frame boundary, after every other command of that frame.
#[derive(Clone, Debug, Default)]
pub struct MaskDeferralQueue {
    pending: Vec<MaskRelation>,
}

impl MaskDeferralQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mask relation for the current frame.
    pub fn declare(&mut self, instance_id: InstanceId, masked_through_id: InstanceId) {
        self.pending.push(MaskRelation {
            instance_id,
            masked_through_id,
        });
    }

    /// Relations declared since the last flush, in declaration order.
    pub fn pending(&self) -> &[MaskRelation] {
        &self.pending
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append one `Mask` command per pending relation, in declaration order, then clear.
    ///
    /// Returns the number of commands appended; a no-op on an empty queue.
    pub fn flush_into(&mut self, commands: &mut Vec<Command>) -> usize {
        let n = self.pending.len();
        commands.extend(self.pending.drain(..).map(|rel| Command::Mask {
            instance_id: rel.instance_id,
            masked_through_id: rel.masked_through_id,
        }));
        n
    }
}
