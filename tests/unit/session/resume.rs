use super::*;

fn record(frame: u64) -> ResumeState {
    ResumeState {
        last_frame: FrameNumber(frame),
        viewport: Viewport::new(-5.0, 5.0, -2.5, 2.5),
    }
}

#[test]
fn put_then_take_round_trips() {
    let mut store = InMemoryResumeStore::new();
    store.put(&record(7)).unwrap();
    assert!(!store.is_empty());

    assert_eq!(store.take_last_frame().unwrap(), Some(FrameNumber(7)));
    assert_eq!(
        store.take_viewport().unwrap(),
        Some(Viewport::new(-5.0, 5.0, -2.5, 2.5))
    );
    assert!(store.is_empty());
}

#[test]
fn keys_are_gone_after_one_read() {
    let mut store = InMemoryResumeStore::new();
    store.put(&record(3)).unwrap();
    let _ = store.take_last_frame().unwrap();
    let _ = store.take_viewport().unwrap();

    // A second read behaves as if nothing was ever stored.
    assert_eq!(store.take_last_frame().unwrap(), None);
    assert_eq!(store.take_viewport().unwrap(), None);
}

#[test]
fn unparseable_keys_are_cleared_by_the_failed_read() {
    let mut store = InMemoryResumeStore::new();
    store.last_frame = Some("not-a-number".to_owned());
    store.viewport = Some("{broken".to_owned());

    assert!(store.take_last_frame().is_err());
    assert!(store.take_viewport().is_err());
    // The failed reads still consumed the keys.
    assert_eq!(store.take_last_frame().unwrap(), None);
    assert_eq!(store.take_viewport().unwrap(), None);
}

#[test]
fn put_replaces_any_existing_record() {
    let mut store = InMemoryResumeStore::new();
    store.put(&record(1)).unwrap();
    store.put(&record(9)).unwrap();
    assert_eq!(store.take_last_frame().unwrap(), Some(FrameNumber(9)));
}
