use super::*;
use crate::effects::filter::{FilterKind, encode_filters};
use crate::host::capability::{CapabilityKind, HostResultExt as _};

fn blur() -> BlurParams {
    BlurParams {
        enabled: true,
        blur_x: 2.0,
        blur_y: 3.0,
        quality: 2,
        faults: Faults::default(),
    }
}

#[test]
fn populated_variants_answer_their_probes_in_order() {
    let d: FilterDescriptor = serde_json::from_value(serde_json::json!({
        "colorAdjust": { "brightness": 10.0 },
        "blur": { "blurX": 4.0, "blurY": 4.0, "quality": 1 }
    }))
    .unwrap();

    let kinds: Vec<_> = d.capabilities().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, [CapabilityKind::Blur, CapabilityKind::ColorAdjust]);
    assert!(d.as_sound().is_none());
}

#[test]
fn unknown_variant_key_is_rejected() {
    let value = serde_json::json!({ "sparkle": {} });
    let err = serde_json::from_value::<FilterDescriptor>(value).unwrap_err();
    assert!(err.to_string().contains("sparkle"));
}

#[test]
fn injected_fault_surfaces_with_property_context() {
    let d = FilterDescriptor {
        blur: Some(BlurParams {
            faults: Faults::default().inject("blur_y", 7),
            ..blur()
        }),
        ..FilterDescriptor::default()
    };
    assert_eq!(d.as_blur().unwrap().blur_y(), Err(Fault(7)));

    let err = encode_filters(&d).unwrap_err();
    assert_eq!(
        err.to_string(),
        "property read error: blur.blur_y failed with code 7"
    );
}

#[test]
fn non_linear_gradient_has_no_stops() {
    let d: FilterDescriptor = serde_json::from_value(serde_json::json!({
        "gradientGlow": {
            "linear": false,
            "stops": [{ "position": 0, "color": { "r": 255, "g": 0, "b": 0 } }]
        }
    }))
    .unwrap();

    let specs = encode_filters(&d).unwrap();
    match &specs[0].kind {
        FilterKind::GradientGlow(g) => assert!(g.gradient_stops.is_none()),
        other => panic!("unexpected filter kind: {other:?}"),
    }
}

#[test]
fn linear_gradient_reports_its_stops() {
    let d: FilterDescriptor = serde_json::from_value(serde_json::json!({
        "gradientBevel": {
            "stops": [
                { "position": 0, "color": { "r": 0, "g": 0, "b": 0, "a": 0 } },
                { "position": 255, "color": { "r": 255, "g": 255, "b": 255 } }
            ]
        }
    }))
    .unwrap();

    let g = d.as_gradient_bevel().unwrap().gradient().unwrap();
    let linear = g.as_linear().unwrap();
    assert_eq!(linear.key_color_count(), Ok(2));
    let white = linear.key_color_at(1).unwrap().color;
    assert_eq!(white, Rgba8::opaque(255, 255, 255));
    assert_eq!(linear.key_color_at(2), Err(Fault(STOP_OUT_OF_RANGE)));
}

#[test]
fn sound_descriptor_reports_settings_and_faults() {
    let s = SoundDescriptor {
        loop_mode: 1,
        repeat_count: 0,
        sync_mode: 3,
        in_samples: 10,
        out_samples: 20,
        faults: Faults::default(),
    };
    assert_eq!(s.capabilities().len(), 1);
    assert_eq!(s.loop_settings().unwrap().mode, 1);
    assert_eq!(s.limit().unwrap().out_samples, 20);

    let failing = SoundDescriptor {
        faults: Faults::default().inject("sync_mode", -4),
        ..s
    };
    let err = failing.sync_mode().read("sound", "sync_mode").unwrap_err();
    assert!(err.is_property_read());
}

#[test]
fn defaults_fill_omitted_fields() {
    let d: DropShadowParams = serde_json::from_str("{}").unwrap();
    assert!(d.enabled);
    assert_eq!(d.color, Rgba8::opaque(0, 0, 0));
    assert!(d.faults.is_empty());

    let b: BevelParams = serde_json::from_str(r#"{"faults":{"angle":3}}"#).unwrap();
    assert_eq!(b.highlight_color, Rgba8::opaque(255, 255, 255));
    assert_eq!(b.angle(), Err(Fault(3)));
}

#[test]
fn stop_list_longer_than_host_count_is_a_fault() {
    let stop = GradientPoint {
        position: 0,
        color: Rgba8::opaque(0, 0, 0),
    };
    let d = FilterDescriptor {
        gradient_glow: Some(GradientParams {
            stops: vec![stop; 300],
            ..serde_json::from_str::<GradientParams>("{}").unwrap()
        }),
        ..FilterDescriptor::default()
    };

    let g = d.as_gradient_glow().unwrap().gradient().unwrap();
    let linear = g.as_linear().unwrap();
    assert_eq!(linear.key_color_count(), Err(Fault(TOO_MANY_STOPS)));

    let err = encode_filters(&d).unwrap_err();
    assert_eq!(
        err.to_string(),
        "property read error: gradient_glow.key_color_count failed with code -2"
    );
}

#[test]
fn exactly_255_stops_are_all_reported() {
    let d = FilterDescriptor {
        gradient_bevel: Some(GradientParams {
            stops: (0..=254u8)
                .map(|position| GradientPoint {
                    position,
                    color: Rgba8::opaque(0, 0, 0),
                })
                .collect(),
            ..serde_json::from_str::<GradientParams>("{}").unwrap()
        }),
        ..FilterDescriptor::default()
    };

    let specs = encode_filters(&d).unwrap();
    let FilterKind::GradientBevel(g) = &specs[0].kind else {
        panic!("expected gradient bevel");
    };
    assert_eq!(g.gradient_stops.as_ref().map(Vec::len), Some(255));
}
