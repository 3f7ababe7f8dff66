use super::*;

#[test]
fn in_memory_collects_chunks_until_closed() {
    let mut s = InMemorySink::new();
    s.accept(b"GIF").unwrap();
    s.accept(b"").unwrap();
    s.accept(b"89a").unwrap();
    assert_eq!(s.bytes(), b"GIF89a");
    assert_eq!(s.chunk_count(), 2);

    s.close().unwrap();
    assert!(s.is_closed());
    assert!(s.accept(b"x").unwrap_err().is_sink_failure());
    assert_eq!(s.into_bytes(), b"GIF89a".to_vec());
}

#[test]
fn writer_sink_writes_through_and_flushes() {
    let mut s = WriterSink::new(Vec::new());
    s.accept(b"abc").unwrap();
    s.accept(b"def").unwrap();
    s.close().unwrap();
    assert_eq!(s.into_inner(), b"abcdef".to_vec());
}

#[test]
fn writer_sink_refuses_bytes_after_close() {
    let mut s = WriterSink::new(Vec::new());
    s.accept(b"abc").unwrap();
    s.close().unwrap();
    assert!(s.is_closed());

    let err = s.accept(b"late").unwrap_err();
    assert!(err.is_sink_failure());
    s.close().unwrap();
    assert_eq!(s.into_inner(), b"abc".to_vec());
}

#[test]
fn writer_sink_reports_io_failure_as_sink_error() {
    struct Broken;
    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "peer went away",
            ))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = WriterSink::new(Broken).accept(b"x").unwrap_err();
    assert!(err.is_sink_failure());
    assert!(err.to_string().contains("peer went away"));
}

#[test]
fn channel_sink_delivers_in_order_and_ends_on_close() {
    let (mut s, rx) = ChannelSink::bounded(4);
    s.accept(b"one").unwrap();
    s.accept(b"two").unwrap();
    s.close().unwrap();

    let got: Vec<Vec<u8>> = rx.iter().collect();
    assert_eq!(got, vec![b"one".to_vec(), b"two".to_vec()]);
    assert!(s.accept(b"late").is_err());
}

#[test]
fn channel_sink_fails_when_receiver_dropped() {
    let (mut s, rx) = ChannelSink::bounded(1);
    drop(rx);
    assert!(s.accept(b"x").unwrap_err().is_sink_failure());
}

#[test]
fn channel_sink_blocks_until_consumer_reads() {
    let (mut s, rx) = ChannelSink::bounded(1);
    let producer = std::thread::spawn(move || {
        for i in 0u8..5 {
            s.accept(&[i]).unwrap();
        }
        s.close().unwrap();
    });

    let got: Vec<u8> = rx.iter().flatten().collect();
    producer.join().unwrap();
    assert_eq!(got, vec![0, 1, 2, 3, 4]);
}

#[test]
fn boxed_and_borrowed_sinks_forward() {
    let mut inner = InMemorySink::new();
    {
        let mut borrowed: &mut InMemorySink = &mut inner;
        ByteSink::accept(&mut borrowed, b"a").unwrap();
    }
    assert_eq!(inner.bytes(), b"a");

    let mut boxed: Box<dyn ByteSink> = Box::new(InMemorySink::new());
    boxed.accept(b"b").unwrap();
    boxed.close().unwrap();
    assert!(boxed.accept(b"c").is_err());
}
