use super::*;
use crate::foundation::core::InstanceId;
use crate::timeline::command::Command;

fn frame(n: u32) -> Frame {
    Frame {
        frame: FrameNumber(n),
        labels: Vec::new(),
        commands: vec![Command::Remove {
            instance_id: InstanceId(n + 1),
        }],
        scripts: Vec::new(),
    }
}

#[test]
fn kind_is_derived_from_identity() {
    let derive = TimelineKind::derive;
    assert_eq!(derive(AssetId::STAGE, false), TimelineKind::Stage);
    assert_eq!(derive(AssetId::STAGE, true), TimelineKind::Stage);
    assert_eq!(derive(AssetId(4), false), TimelineKind::Graphic);
    assert_eq!(derive(AssetId(4), true), TimelineKind::Movieclip);
}

#[test]
fn stage_document_omits_asset_id() {
    let mut asm = TimelineAssembler::new();
    asm.commit(Some(frame(0)));
    asm.commit(None);

    let doc = asm.finalize(AssetId::STAGE, None, "scene");
    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["type"], "stage");
    assert_eq!(v["name"], "scene");
    assert_eq!(v["totalFrames"], 2);
    assert!(v.get("assetId").is_none());
    assert_eq!(v["frames"].as_array().unwrap().len(), 1);
}

#[test]
fn symbol_documents_carry_asset_id() {
    let asm = TimelineAssembler::new();

    let clip = asm.finalize(AssetId(12), Some("hero"), "Hero");
    let v = serde_json::to_value(&clip).unwrap();
    assert_eq!(v["assetId"], 12);
    assert_eq!(v["type"], "movieclip");
    assert_eq!(v["totalFrames"], 0);
    assert_eq!(v["frames"], serde_json::json!([]));

    let graphic = asm.finalize(AssetId(12), None, "Hero");
    assert_eq!(graphic.kind, TimelineKind::Graphic);
}

#[test]
fn empty_instance_name_counts_as_absent() {
    let asm = TimelineAssembler::new();
    let doc = asm.finalize(AssetId(7), Some(""), "sym");
    assert_eq!(doc.kind, TimelineKind::Graphic);
    assert_eq!(
        asm.finalize(AssetId::STAGE, Some(""), "main").kind,
        TimelineKind::Stage
    );
}

#[test]
fn finalize_can_run_again() {
    let mut asm = TimelineAssembler::new();
    asm.commit(Some(frame(0)));
    let first = asm.finalize(AssetId(3), None, "a");

    asm.commit(Some(frame(1)));
    let second = asm.finalize(AssetId(3), None, "a");

    assert_eq!(first.total_frames, 1);
    assert_eq!(second.total_frames, 2);
    assert_eq!(second.frames.len(), 2);
    assert_eq!(second.frame(FrameNumber(1)), Some(&frame(1)));
    assert_eq!(second.frame(FrameNumber(9)), None);
}

#[test]
fn json_round_trips_through_serde() {
    let mut asm = TimelineAssembler::new();
    asm.commit(Some(frame(2)));
    let doc = asm.finalize(AssetId(5), Some("clip"), "Clip");

    let back: Timeline = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(back, doc);
    assert!(doc.to_json_pretty().unwrap().contains('\n'));
}

#[test]
fn write_json_creates_the_file() {
    let dir = std::env::temp_dir().join(format!("frameline-assembler-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("timeline.json");

    let mut asm = TimelineAssembler::new();
    asm.commit(Some(frame(0)));
    let doc = asm.finalize(AssetId::STAGE, None, "main");
    doc.write_json(&path, false).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: Timeline = serde_json::from_str(&text).unwrap();
    assert_eq!(back, doc);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_json_reports_unwritable_path() {
    let doc = TimelineAssembler::new().finalize(AssetId::STAGE, None, "main");
    let err = doc
        .write_json("/nonexistent-frameline-dir/x/timeline.json", true)
        .unwrap_err();
    assert!(err.to_string().contains("create timeline document"));
}
