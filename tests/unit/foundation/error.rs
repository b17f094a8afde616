use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WavyteError::unsupported_ease("wobble")
            .to_string()
            .contains("unsupported ease: 'wobble'")
    );
    assert!(
        WavyteError::invalid_config("x")
            .to_string()
            .contains("invalid animation config:")
    );
    assert!(
        WavyteError::overlapping("x")
            .to_string()
            .contains("overlapping animation windows:")
    );
    assert!(
        WavyteError::Serde("x".to_string())
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        WavyteError::UnresolvedSlot("else").to_string(),
        "unresolved else slot in filter expression"
    );
}

#[test]
fn json_errors_map_to_serde() {
    let err: WavyteError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, WavyteError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WavyteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
