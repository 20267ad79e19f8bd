use super::*;

struct BlurAndSound;

impl BlurSource for BlurAndSound {
    fn is_enabled(&self) -> HostResult<bool> {
        Ok(true)
    }
    fn blur_x(&self) -> HostResult<f64> {
        Ok(4.0)
    }
    fn blur_y(&self) -> HostResult<f64> {
        Err(Fault(-2))
    }
    fn quality(&self) -> HostResult<u32> {
        Ok(1)
    }
}

impl SoundSource for BlurAndSound {
    fn loop_settings(&self) -> HostResult<SoundLoopSettings> {
        Ok(SoundLoopSettings::default())
    }
    fn sync_mode(&self) -> HostResult<u32> {
        Ok(0)
    }
    fn limit(&self) -> HostResult<SoundLimit> {
        Ok(SoundLimit::default())
    }
}

impl CapabilityHandle for BlurAndSound {
    fn as_blur(&self) -> Option<&dyn BlurSource> {
        Some(self)
    }
    fn as_sound(&self) -> Option<&dyn SoundSource> {
        Some(self)
    }
}

#[test]
fn capabilities_lists_every_matching_probe_in_order() {
    let kinds: Vec<_> = BlurAndSound
        .capabilities()
        .iter()
        .map(Capability::kind)
        .collect();
    assert_eq!(kinds, vec![CapabilityKind::Blur, CapabilityKind::Sound]);
}

#[test]
fn empty_handle_has_no_capabilities() {
    assert!(NoCapabilities.capabilities().is_empty());
    assert!(NoCapabilities.as_sound().is_none());
}

#[test]
fn read_attaches_property_context() {
    let handle = BlurAndSound;
    let blur = handle.as_blur().unwrap();
    assert_eq!(blur.blur_x().read("blur", "blur_x").unwrap(), 4.0);
    let err = blur.blur_y().read("blur", "blur_y").unwrap_err();
    match err {
        EncodeError::PropertyRead {
            capability,
            property,
            code,
        } => {
            assert_eq!(capability, "blur");
            assert_eq!(property, "blur_y");
            assert_eq!(code, -2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn capability_names_are_snake_case() {
    assert_eq!(CapabilityKind::ColorAdjust.name(), "color_adjust");
    assert_eq!(CapabilityKind::GradientBevel.name(), "gradient_bevel");
    assert_eq!(CapabilityKind::Sound.name(), "sound");
}
