use super::*;

#[test]
fn init_response_parses_backend_payload() {
    let json = r#"{"height": 180, "width": 320, "total_frames": 48,
                   "download_images": true, "show_grid": false}"#;
    let init: InitResponse = serde_json::from_str(json).unwrap();
    let cfg = init.into_config().unwrap();
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (320, 180));
    assert_eq!(cfg.total_frames, 48);
    assert!(cfg.download_images);
    assert!(!cfg.show_grid);
}

#[test]
fn init_response_with_zero_canvas_is_rejected() {
    let init: InitResponse =
        serde_json::from_str(r#"{"height":0,"width":320,"total_frames":1,"download_images":false,"show_grid":true}"#)
            .unwrap();
    assert!(init.into_config().is_err());
}

#[test]
fn block_response_parses_expressions_with_slider_bounds() {
    let json = r##"{
        "result": [[
            {"id": "expr-1", "latex": "((1-t)0+t1,(1-t)0+t2)", "color": "#2464b4", "secret": true},
            {"id": "frame", "latex": "f=0", "sliderBounds": {"min": 0, "max": 48, "step": 1}}
        ]],
        "number_of_frames": 1
    }"##;
    let resp: BlockResponse = serde_json::from_str(json).unwrap();
    let block = resp.into_block(FrameIndex(3)).unwrap();
    assert_eq!(block.first(), FrameIndex(3));
    assert_eq!(block.len(), 1);
    let set = block.get(FrameIndex(3)).unwrap();
    assert_eq!(set[0].secret, Some(true));
    assert_eq!(
        set[1].slider_bounds,
        Some(SliderBounds {
            min: 0.0,
            max: 48.0,
            step: 1.0
        })
    );
}

#[test]
fn null_result_tolerates_missing_frame_count() {
    // The backend answers `{"result": null}` with no number_of_frames while
    // the requested frame is not buffered yet.
    let resp: BlockResponse = serde_json::from_str(r#"{"result": null}"#).unwrap();
    assert_eq!(resp.number_of_frames, 0);
    assert!(resp.into_block(FrameIndex(0)).is_none());
}

#[test]
fn block_covers_boundaries_exactly() {
    let set: ExpressionSet = vec![Expression {
        id: "expr-1".to_owned(),
        latex: "x=1".to_owned(),
        color: None,
        secret: None,
        slider_bounds: None,
    }];
    let block = FrameBlock::new(FrameIndex(2), vec![set.clone(), set.clone(), set]);
    assert!(!block.covers(FrameIndex(1)));
    assert!(block.covers(FrameIndex(2)));
    assert!(block.covers(FrameIndex(4)));
    assert!(!block.covers(FrameIndex(5)));
    assert_eq!(block.end(), FrameIndex(5));
    assert!(block.get(FrameIndex(5)).is_err());
}

#[test]
fn expression_serialization_skips_absent_options() {
    let expr = Expression {
        id: "lines".to_owned(),
        latex: "l=0".to_owned(),
        color: None,
        secret: None,
        slider_bounds: None,
    };
    let json = serde_json::to_value(&expr).unwrap();
    assert_eq!(json, serde_json::json!({"id": "lines", "latex": "l=0"}));
}
