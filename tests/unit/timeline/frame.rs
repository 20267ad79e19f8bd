use super::*;
use crate::foundation::core::InstanceId;

fn remove(id: u32) -> Command {
    Command::Remove {
        instance_id: InstanceId(id),
    }
}

#[test]
fn masks_are_appended_after_interleaved_commands() {
    let mut buf = FrameBuffer::new();
    let mut masks = MaskDeferralQueue::new();
    let mut timeline = TimelineAssembler::new();

    buf.push_command(remove(1));
    masks.declare(InstanceId(7), InstanceId(8));
    buf.push_command(remove(2));
    masks.declare(InstanceId(3), InstanceId(4));
    buf.push_command(remove(5));

    assert!(buf.commit(FrameNumber(0), &mut masks, &mut timeline));

    let frame = &timeline.frames()[0];
    let kinds: Vec<_> = frame.commands.iter().map(Command::type_name).collect();
    assert_eq!(kinds, ["Remove", "Remove", "Remove", "Mask", "Mask"]);
    assert_eq!(frame.commands[3].instance_id(), InstanceId(7));
    assert_eq!(frame.commands[4].instance_id(), InstanceId(3));
    assert!(masks.is_empty());
    assert!(!buf.has_content());
}

#[test]
fn empty_frame_is_counted_but_not_emitted() {
    let mut buf = FrameBuffer::new();
    let mut masks = MaskDeferralQueue::new();
    let mut timeline = TimelineAssembler::new();

    assert!(!buf.commit(FrameNumber(0), &mut masks, &mut timeline));
    buf.push_command(remove(1));
    assert!(buf.commit(FrameNumber(1), &mut masks, &mut timeline));
    assert!(!buf.commit(FrameNumber(2), &mut masks, &mut timeline));

    assert_eq!(timeline.frame_count(), 3);
    assert_eq!(timeline.frames().len(), 1);
    assert_eq!(timeline.frames()[0].frame, FrameNumber(1));
}

#[test]
fn mask_only_frame_is_emitted() {
    let mut buf = FrameBuffer::new();
    let mut masks = MaskDeferralQueue::new();
    let mut timeline = TimelineAssembler::new();

    masks.declare(InstanceId(10), InstanceId(20));
    assert!(buf.commit(FrameNumber(4), &mut masks, &mut timeline));
    assert!(timeline.frames()[0].commands[0].is_mask());
}

#[test]
fn labels_and_scripts_alone_make_a_frame() {
    let mut buf = FrameBuffer::new();
    let mut masks = MaskDeferralQueue::new();
    let mut timeline = TimelineAssembler::new();

    buf.push_label("intro".to_owned());
    assert!(buf.commit(FrameNumber(0), &mut masks, &mut timeline));
    buf.push_script("stop();".to_owned());
    assert!(buf.commit(FrameNumber(1), &mut masks, &mut timeline));

    let frames = timeline.frames();
    assert_eq!(frames[0].labels, ["intro"]);
    assert!(frames[0].scripts.is_empty());
    assert_eq!(frames[1].scripts, ["stop();"]);
    assert!(frames[1].labels.is_empty());
}

#[test]
fn empty_collections_are_omitted_on_the_wire() {
    let frame = Frame {
        frame: FrameNumber(3),
        labels: vec!["loop".to_owned()],
        commands: Vec::new(),
        scripts: Vec::new(),
    };
    assert_eq!(
        serde_json::to_value(&frame).unwrap(),
        serde_json::json!({ "frame": 3, "labels": ["loop"] })
    );

    let back: Frame = serde_json::from_str(r#"{"frame":3,"labels":["loop"]}"#).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn label_kind_codes() {
    assert_eq!(LabelKind::from_code(0), Some(LabelKind::None));
    assert_eq!(LabelKind::from_code(1), Some(LabelKind::Name));
    assert_eq!(LabelKind::from_code(2), Some(LabelKind::Comment));
    assert_eq!(LabelKind::from_code(3), Some(LabelKind::Anchor));
    assert_eq!(LabelKind::from_code(4), None);
}
