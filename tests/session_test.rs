use blob_transform::{Engine, EngineConfig, ErrorKind, OpArgs, Operation, Payload};

fn args(pairs: &[(&str, &str)]) -> OpArgs {
    pairs.iter().copied().collect()
}

fn working(engine: &Engine) -> Vec<u8> {
    engine
        .with_session(|s| s.buffer().working().to_vec())
        .expect("session mounted")
}

#[test]
fn test_edit_diff_undo_example() {
    let engine = Engine::default();
    engine.mount(&[0x00, 0xFF, 0x10, 0x20]);

    let edit = engine.invoke("edit", &args(&[("offset", "1"), ("value", "0xAA")]));
    assert!(edit.ok, "{}", edit.status_message);
    assert_eq!(working(&engine), vec![0x00, 0xAA, 0x10, 0x20]);

    let diff = engine.invoke("diff", &OpArgs::new());
    match diff.payload {
        Some(Payload::Diff { report }) => {
            assert_eq!(report.entries.len(), 1);
            let entry = report.entries[0];
            assert_eq!((entry.offset, entry.original, entry.working), (1, 0xFF, 0xAA));
            assert!(!report.length_mismatch());
        }
        other => panic!("Expected diff payload, got {:?}", other),
    }

    let undo = engine.invoke("undo", &OpArgs::new());
    assert!(undo.ok);
    assert_eq!(working(&engine), vec![0x00, 0xFF, 0x10, 0x20]);
}

#[test]
fn test_delete_example() {
    let engine = Engine::default();
    engine.mount(&[0x00, 0xFF, 0x10, 0x20]);

    let result = engine.invoke("delete", &args(&[("offset", "1"), ("length", "2")]));
    assert!(result.ok);
    assert_eq!(result.payload, Some(Payload::Length { len: 2 }));
    assert_eq!(working(&engine), vec![0x00, 0x20]);

    let diff = engine.invoke("diff", &OpArgs::new());
    assert!(diff.status_message.contains("length 0x4 -> 0x2"), "{}", diff.status_message);
}

#[test]
fn test_failures_leave_state_untouched() {
    let engine = Engine::default();
    engine.mount(&[1, 2, 3, 4]);
    engine.invoke("edit", &args(&[("offset", "0"), ("value", "9")]));

    let before = working(&engine);
    let depth = engine.with_session(|s| s.history().len()).unwrap();

    let cases: Vec<(&str, OpArgs, ErrorKind)> = vec![
        ("edit", args(&[("offset", "zz"), ("value", "1")]), ErrorKind::InvalidArgument),
        ("edit", args(&[("value", "1")]), ErrorKind::InvalidArgument),
        ("overwrite", args(&[("offset", "3"), ("bytes", "0102")]), ErrorKind::OutOfRange),
        ("overwrite", args(&[("offset", "0"), ("bytes", "123")]), ErrorKind::MalformedHex),
        ("insert", args(&[("offset", "5"), ("bytes", "00")]), ErrorKind::OutOfRange),
        ("delete", args(&[("offset", "2"), ("length", "3")]), ErrorKind::OutOfRange),
        ("copy", args(&[("offset", "4"), ("length", "1")]), ErrorKind::OutOfRange),
        ("paste", args(&[("offset", "0")]), ErrorKind::EmptyClipboard),
        ("search", args(&[("pattern", "ABC"), ("mode", "hex")]), ErrorKind::MalformedHex),
        ("rewind", OpArgs::new(), ErrorKind::InvalidArgument),
    ];

    for (op, op_args, kind) in cases {
        let result = engine.invoke(op, &op_args);
        assert!(!result.ok, "{} should fail", op);
        assert_eq!(result.error_kind, Some(kind), "{}: {}", op, result.status_message);
        assert!(!result.status_message.is_empty());
    }

    assert_eq!(working(&engine), before);
    assert_eq!(engine.with_session(|s| s.history().len()).unwrap(), depth);
    assert!(engine.with_session(|s| s.clipboard().is_empty()).unwrap());
}

#[test]
fn test_undo_until_empty() {
    let engine = Engine::default();
    engine.mount(b"abc");
    engine.invoke("insert", &args(&[("offset", "3"), ("bytes", "64")]));

    assert!(engine.invoke("undo", &OpArgs::new()).ok);
    let second = engine.invoke("undo", &OpArgs::new());
    assert!(!second.ok);
    assert_eq!(second.error_kind, Some(ErrorKind::EmptyHistory));
    assert_eq!(second.status_message, "nothing to undo");
    assert_eq!(working(&engine), b"abc".to_vec());
}

#[test]
fn test_save_exports_binary() {
    let engine = Engine::default();
    engine.mount(&[0xCA, 0xFE]);
    engine.invoke("overwrite", &args(&[("offset", "0"), ("bytes", "BE EF")]));
    engine.invoke("undo", &OpArgs::new());
    engine.invoke("overwrite", &args(&[("offset", "1"), ("bytes", "00")]));

    let saved = engine.invoke(Operation::Save.name(), &OpArgs::new());
    assert_eq!(saved.binary(), Some(&[0xCA, 0x00][..]));
    assert!(saved.status_message.contains("1 undo(s)"));
}

#[test]
fn test_checksum_over_current_buffer() {
    let engine = Engine::default();
    engine.mount(b"ab");
    engine.invoke("insert", &args(&[("offset", "2"), ("bytes", "63")]));

    let result = engine.invoke("checksum", &OpArgs::new());
    let text = result.text();
    assert!(text.contains("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"));
    assert!(text.contains("MD5:    unavailable"));
}

#[test]
fn test_configured_history_capacity() {
    let engine = Engine::new(EngineConfig { history_capacity: 2, ..EngineConfig::default() });
    engine.mount(&[0]);

    for value in ["1", "2", "3"] {
        assert!(engine.invoke("edit", &args(&[("offset", "0"), ("value", value)])).ok);
    }
    assert!(engine.invoke("undo", &OpArgs::new()).ok);
    assert!(engine.invoke("undo", &OpArgs::new()).ok);
    assert!(!engine.invoke("undo", &OpArgs::new()).ok);
    // the snapshot holding 0 was evicted
    assert_eq!(working(&engine), vec![1]);
}

#[test]
fn test_concurrent_invocations_serialize() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(Engine::default());
    engine.mount(&[]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..10 {
                    let result = engine.invoke("insert", &args(&[("offset", "0"), ("bytes", "AB")]));
                    assert!(result.ok);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(working(&engine), vec![0xAB; 80]);
    assert_eq!(engine.with_session(|s| s.history().len()).unwrap(), 80);
}

fn history_len(engine: &Engine) -> usize {
    engine.with_session(|s| s.history().len()).expect("session mounted")
}

#[test]
fn test_zero_length_operations_snapshot_without_change() {
    let engine = Engine::default();
    engine.mount(&[0x00, 0xFF, 0x10, 0x20]);

    let delete = engine.invoke("delete", &args(&[("offset", "1"), ("length", "0")]));
    assert!(delete.ok, "{}", delete.status_message);
    assert_eq!(working(&engine), vec![0x00, 0xFF, 0x10, 0x20]);
    assert_eq!(history_len(&engine), 1);

    let insert = engine.invoke("insert", &args(&[("offset", "1"), ("bytes", "")]));
    assert!(insert.ok, "{}", insert.status_message);
    assert_eq!(working(&engine), vec![0x00, 0xFF, 0x10, 0x20]);
    assert_eq!(history_len(&engine), 2);

    // offset == len is a valid empty range
    let copy = engine.invoke("copy", &args(&[("offset", "4"), ("length", "0")]));
    assert!(copy.ok, "{}", copy.status_message);
    assert_eq!(copy.payload, Some(Payload::Yanked { count: 0 }));
    assert_eq!(history_len(&engine), 2);

    let paste = engine.invoke("paste", &args(&[("offset", "1")]));
    assert!(paste.ok, "{}", paste.status_message);
    assert_eq!(working(&engine).len(), 4);
    assert_eq!(history_len(&engine), 3);

    let past_end = engine.invoke("delete", &args(&[("offset", "5"), ("length", "0")]));
    assert_eq!(past_end.error_kind, Some(ErrorKind::OutOfRange));
    assert_eq!(history_len(&engine), 3);
}

#[test]
fn test_signed_hex_arguments_are_rejected() {
    let engine = Engine::default();
    engine.mount(&[0x00, 0xFF, 0x10, 0x20]);

    let result = engine.invoke("edit", &args(&[("offset", "+1"), ("value", "+AA")]));
    assert!(!result.ok);
    assert_eq!(result.error_kind, Some(ErrorKind::InvalidArgument));

    let result = engine.invoke("edit", &args(&[("offset", "1"), ("value", "0x+AA")]));
    assert_eq!(result.error_kind, Some(ErrorKind::InvalidArgument));

    assert_eq!(working(&engine), vec![0x00, 0xFF, 0x10, 0x20]);
    assert_eq!(history_len(&engine), 0);
}
