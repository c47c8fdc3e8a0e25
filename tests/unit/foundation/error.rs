use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlowError::unavailable("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        GlowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(GlowError::UnknownSession(7).to_string().contains("7"));
}

#[test]
fn degenerate_reports_point_count() {
    let err = GlowError::degenerate(1);
    assert!(err.is_degenerate());
    assert!(err.to_string().contains("got 1"));
    assert!(!GlowError::validation("x").is_degenerate());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
