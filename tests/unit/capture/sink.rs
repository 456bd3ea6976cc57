use super::*;

fn cfg(download: bool) -> SinkConfig {
    SinkConfig {
        canvas: Canvas::new(4, 4).unwrap(),
        download,
    }
}

fn shot() -> Screenshot {
    Screenshot {
        width: 4,
        height: 4,
        data: vec![255; 4 * 4 * 4],
    }
}

#[test]
fn in_memory_sink_records_names_in_push_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(false)).unwrap();
    sink.push(FrameNumber(1), &shot()).unwrap();
    sink.push(FrameNumber(2), &shot()).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.names(), vec!["frame-00001", "frame-00002"]);
    assert_eq!(sink.config(), Some(cfg(false)));
}

#[test]
fn directory_sink_writes_png_when_download_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    sink.begin(cfg(true)).unwrap();
    sink.push(FrameNumber(1), &shot()).unwrap();
    sink.end().unwrap();

    let path = dir.path().join("frame-00001.png");
    assert!(path.is_file());
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (4, 4));
}

#[test]
fn directory_sink_links_but_never_writes_when_download_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");
    let mut sink = DirectorySink::new(&out);
    sink.begin(cfg(false)).unwrap();
    sink.push(FrameNumber(1), &shot()).unwrap();
    sink.push(FrameNumber(2), &shot()).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.links, vec!["frame-00001", "frame-00002"]);
    // The output directory is not even created.
    assert!(!out.exists());
}
