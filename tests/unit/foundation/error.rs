use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EncodeError::property_read("blur", "blur_x", -3)
            .to_string()
            .contains("property read error:")
    );
    assert!(
        EncodeError::transcode("x")
            .to_string()
            .contains("transcode error:")
    );
    assert!(
        EncodeError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        EncodeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn property_read_names_capability_and_code() {
    let err = EncodeError::property_read("drop_shadow", "angle", 7);
    assert!(err.is_property_read());
    assert_eq!(
        err.to_string(),
        "property read error: drop_shadow.angle failed with code 7"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EncodeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_property_read());
}

#[test]
fn json_errors_map_to_serde() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = EncodeError::from(bad);
    assert!(matches!(err, EncodeError::Serde(_)));
}
