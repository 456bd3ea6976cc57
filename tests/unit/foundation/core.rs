use super::*;

#[test]
fn frame_number_file_stem_is_zero_padded() {
    assert_eq!(FrameNumber(1).file_stem(), "frame-00001");
    assert_eq!(FrameNumber(42).file_stem(), "frame-00042");
    assert_eq!(FrameNumber(12345).file_stem(), "frame-12345");
    assert_eq!(FrameNumber(123456).file_stem(), "frame-123456");
}

#[test]
fn frame_index_and_number_convert_both_ways() {
    assert_eq!(FrameIndex(0).number(), FrameNumber(1));
    assert_eq!(FrameNumber(1).index(), FrameIndex(0));
    assert_eq!(FrameIndex(7).next(), FrameIndex(8));
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 1080).is_err());
    assert!(Canvas::new(1920, 0).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert_eq!((c.width, c.height), (1920, 1080));
}

#[test]
fn viewport_serde_uses_storage_key_names() {
    let vp = Viewport::new(-1.5, 2.5, -3.0, 4.0);
    let json = serde_json::to_value(vp).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"xmin": -1.5, "xmax": 2.5, "ymin": -3.0, "ymax": 4.0})
    );

    let parsed: Viewport =
        serde_json::from_str(r#"{"xmin":0.0,"xmax":320.0,"ymin":0.0,"ymax":180.0}"#).unwrap();
    assert_eq!(parsed, Viewport::new(0.0, 320.0, 0.0, 180.0));
}
