use super::*;

#[test]
fn constructors_map_to_variants() {
    assert!(matches!(
        PlotshotError::backend("x"),
        PlotshotError::Backend(_)
    ));
    assert!(matches!(PlotshotError::widget("x"), PlotshotError::Widget(_)));
    assert!(matches!(
        PlotshotError::validation("x"),
        PlotshotError::Validation(_)
    ));
    assert!(matches!(PlotshotError::serde("x"), PlotshotError::Serde(_)));
}

#[test]
fn display_includes_category_prefix() {
    assert_eq!(
        PlotshotError::validation("bad frame").to_string(),
        "validation error: bad frame"
    );
    assert_eq!(
        PlotshotError::backend("connection refused").to_string(),
        "backend error: connection refused"
    );
}

#[test]
fn anyhow_errors_wrap_transparently() {
    let err: PlotshotError = anyhow::anyhow!("disk full").into();
    assert_eq!(err.to_string(), "disk full");
}
