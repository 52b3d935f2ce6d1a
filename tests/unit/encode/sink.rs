use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        frame_size: Canvas {
            width: 64,
            height: 32,
        },
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn write_sink_emits_one_document_per_line() {
    let mut sink = WriteSink::new(Vec::new());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), "<svg/>").unwrap();
    sink.push_frame(FrameIndex(1), "<svg></svg>").unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 2);

    let bytes = sink.into_inner();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "<svg/>\n<svg></svg>\n");
}

#[test]
fn in_memory_sink_shares_storage_between_clones() {
    let probe = InMemorySink::new();
    let mut sink = probe.clone();
    assert!(probe.config().is_none());

    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), "a").unwrap();
    sink.push_frame(FrameIndex(1), "b").unwrap();
    assert_eq!(probe.len(), 2);
    assert!(!probe.is_ended());

    sink.end().unwrap();
    assert!(probe.is_ended());
    assert_eq!(probe.config(), Some(cfg()));
    assert_eq!(
        probe.frames(),
        vec![(FrameIndex(0), "a".to_owned()), (FrameIndex(1), "b".to_owned())]
    );
}

#[test]
fn begin_resets_captured_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), "a").unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.is_empty());
}
