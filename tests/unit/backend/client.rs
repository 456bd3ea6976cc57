use super::*;
use crate::foundation::core::Canvas;

fn test_config(total_frames: u64) -> SessionConfig {
    SessionConfig {
        canvas: Canvas::new(320, 180).unwrap(),
        total_frames,
        download_images: false,
        show_grid: true,
    }
}

fn one_expr_set(latex: &str) -> ExpressionSet {
    vec![crate::backend::wire::Expression {
        id: "expr-1".to_owned(),
        latex: latex.to_owned(),
        color: None,
        secret: None,
        slider_bounds: None,
    }]
}

#[test]
fn wait_for_config_polls_until_backend_is_up() {
    let mut backend =
        ScriptedBackend::new(test_config(4), vec![], 25).with_init_failures(3);
    let cfg = wait_for_config(&mut backend, Duration::ZERO).unwrap();
    assert_eq!(cfg.total_frames, 4);
    assert_eq!(backend.init_calls, 4);
}

#[test]
fn scripted_backend_serves_fixed_size_blocks() {
    let sets: Vec<ExpressionSet> = (0..5).map(|i| one_expr_set(&format!("y={i}"))).collect();
    let mut backend = ScriptedBackend::new(test_config(5), sets, 2);

    let block = backend.fetch_block(FrameIndex(0)).unwrap().unwrap();
    assert_eq!(block.first(), FrameIndex(0));
    assert_eq!(block.len(), 2);

    // The tail block is shorter.
    let block = backend.fetch_block(FrameIndex(4)).unwrap().unwrap();
    assert_eq!(block.len(), 1);

    // Past the end there is nothing to serve.
    assert!(backend.fetch_block(FrameIndex(5)).unwrap().is_none());
    assert_eq!(backend.fetch_calls, vec![0, 4, 5]);
}

#[test]
fn scripted_backend_null_fetches_count_down() {
    let sets = vec![one_expr_set("y=0")];
    let mut backend = ScriptedBackend::new(test_config(1), sets, 1).with_null_fetches(2);
    assert!(backend.fetch_block(FrameIndex(0)).unwrap().is_none());
    assert!(backend.fetch_block(FrameIndex(0)).unwrap().is_none());
    assert!(backend.fetch_block(FrameIndex(0)).unwrap().is_some());
}
