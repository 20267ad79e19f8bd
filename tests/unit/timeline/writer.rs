use super::*;
use crate::foundation::error::EncodeError;
use crate::host::capability::{BlurSource, Fault, HostResult, NoCapabilities};
use crate::timeline::assembler::TimelineKind;

fn assert_send<T: Send>() {}

#[test]
fn writer_is_send() {
    assert_send::<TimelineWriter>();
}

struct Blur {
    fail: bool,
}

impl BlurSource for Blur {
    fn is_enabled(&self) -> HostResult<bool> {
        Ok(true)
    }
    fn blur_x(&self) -> HostResult<f64> {
        if self.fail {
            return Err(Fault(-2));
        }
        Ok(4.0)
    }
    fn blur_y(&self) -> HostResult<f64> {
        Ok(4.0)
    }
    fn quality(&self) -> HostResult<u32> {
        Ok(1)
    }
}

impl CapabilityHandle for Blur {
    fn as_blur(&self) -> Option<&dyn BlurSource> {
        Some(self)
    }
}

#[test]
fn place_visibility_mask_round_trip() {
    let mut w = TimelineWriter::default();
    w.place(Placement::new(AssetId(1), InstanceId(10)), None);
    w.declare_mask(InstanceId(10), InstanceId(20));
    w.set_visibility(InstanceId(10), false);
    assert_eq!(w.open_commands().len(), 2);
    assert_eq!(w.pending_masks().pending().len(), 1);

    assert!(w.show_frame(FrameNumber(0)));
    let doc = w.finalize(AssetId::STAGE, None, "main");

    assert_eq!(doc.total_frames, 1);
    assert_eq!(doc.kind, TimelineKind::Stage);
    let kinds: Vec<_> = doc.frames[0].commands.iter().map(Command::type_name).collect();
    assert_eq!(kinds, ["Place", "SetVisibility", "Mask"]);
    assert!(w.open_commands().is_empty());
    assert!(w.pending_masks().is_empty());
}

#[test]
fn every_mutation_appends_one_command() {
    let mut w = TimelineWriter::default();
    w.place(
        Placement::new(AssetId(1), InstanceId(1)),
        Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
    );
    w.place_looped(
        Placement::new(AssetId(2), InstanceId(2)).after(InstanceId(1)),
        Some("clip"),
        true,
        false,
    );
    w.place_sound(AssetId(3), InstanceId(3), &NoCapabilities).unwrap();
    w.remove(InstanceId(3));
    w.reorder_after(InstanceId(1), InstanceId(2));
    w.set_blend_mode(InstanceId(1), 3);
    w.set_visibility(InstanceId(1), true);
    w.attach_filter(InstanceId(1), &Blur { fail: false }).unwrap();
    w.set_transform(InstanceId(1), Affine::translate((5.0, 6.0)));
    w.set_color_transform(InstanceId(2), ColorMatrix::IDENTITY);

    let kinds: Vec<_> = w.open_commands().iter().map(Command::type_name).collect();
    assert_eq!(
        kinds,
        [
            "Place",
            "PlaceLooped",
            "SoundPlace",
            "Remove",
            "ReorderAfter",
            "SetBlendMode",
            "SetVisibility",
            "AttachFilter",
            "Move",
            "SetColorTransform",
        ]
    );
}

#[test]
fn failed_filter_read_appends_nothing() {
    let mut w = TimelineWriter::default();
    let err = w
        .attach_filter(InstanceId(1), &Blur { fail: true })
        .unwrap_err();
    assert!(err.is_property_read());
    assert_eq!(
        err.to_string(),
        "property read error: blur.blur_x failed with code -2"
    );
    assert!(w.open_commands().is_empty());
    assert!(!w.show_frame(FrameNumber(0)));
    assert_eq!(w.frame_count(), 1);
}

#[test]
fn empty_frames_advance_total_frames_only() {
    let mut w = TimelineWriter::default();
    assert!(!w.show_frame(FrameNumber(0)));
    w.remove(InstanceId(4));
    assert!(w.show_frame(FrameNumber(1)));
    assert!(!w.show_frame(FrameNumber(2)));

    let doc = w.finalize(AssetId(9), Some("x"), "X");
    assert_eq!(doc.total_frames, 3);
    assert_eq!(doc.frames.len(), 1);
    assert_eq!(doc.frames[0].frame, FrameNumber(1));
    assert_eq!(doc.kind, TimelineKind::Movieclip);
}

#[test]
fn only_name_labels_are_recorded() {
    let mut w = TimelineWriter::default();
    w.set_frame_label("note", LabelKind::Comment).unwrap();
    w.set_frame_label("anchor", LabelKind::Anchor).unwrap();
    w.set_frame_label("nothing", LabelKind::None).unwrap();
    assert!(!w.show_frame(FrameNumber(0)));

    let name: Vec<u16> = "intro".encode_utf16().collect();
    w.set_frame_label(&name, LabelKind::Name).unwrap();
    assert!(w.show_frame(FrameNumber(1)));

    let doc = w.finalize(AssetId::STAGE, None, "main");
    assert_eq!(doc.frames.len(), 1);
    assert_eq!(doc.frames[0].labels, ["intro"]);
}

#[test]
fn scripts_are_sanitized_with_the_configured_rules() {
    let mut w = TimelineWriter::default();
    w.add_frame_script("a();\r\n\tb();", 0).unwrap();
    w.remove_frame_script(1);
    assert!(w.show_frame(FrameNumber(0)));
    let doc = w.finalize(AssetId::STAGE, None, "main");
    assert_eq!(doc.frames[0].scripts, ["a();\\nb();"]);
    assert!(doc.frames[0].commands.is_empty());

    let mut config = EncoderConfig::default();
    config.script.escape_newlines = false;
    let mut w = TimelineWriter::new(config);
    assert!(!w.config().script.escape_newlines);
    w.add_frame_script("a();\nb();", 0).unwrap();
    w.show_frame(FrameNumber(0));
    let doc = w.finalize(AssetId::STAGE, None, "main");
    assert_eq!(doc.frames[0].scripts, ["a();\nb();"]);
}

#[test]
fn invalid_utf16_label_is_a_transcode_error() {
    let mut w = TimelineWriter::default();
    let bad = vec![0xDC00u16];
    let err = w.set_frame_label(&bad, LabelKind::Name).unwrap_err();
    assert!(matches!(err, EncodeError::Transcode(_)));
    assert!(!w.show_frame(FrameNumber(0)));
}

#[test]
fn unknown_blend_code_omits_mode() {
    let mut w = TimelineWriter::default();
    w.set_blend_mode(InstanceId(1), 99);
    let v = serde_json::to_value(&w.open_commands()[0]).unwrap();
    assert_eq!(
        v,
        serde_json::json!({ "type": "SetBlendMode", "instanceId": 1 })
    );
}

#[test]
fn finalize_treats_empty_instance_name_as_absent() {
    let mut w = TimelineWriter::default();
    w.remove(InstanceId(1));
    w.show_frame(FrameNumber(0));

    let doc = w.finalize(AssetId(7), Some(""), "sym");
    assert_eq!(doc.kind, TimelineKind::Graphic);
    assert_eq!(doc.total_frames, 1);
}
