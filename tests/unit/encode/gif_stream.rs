use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Rgb8;

fn frame(width: u32, height: u32, fill: u8) -> IndexedFrame {
    IndexedFrame {
        width,
        height,
        indices: vec![fill; (width * height) as usize],
    }
}

fn configured<'a>(
    sink: &'a mut InMemorySink,
    palette: &Palette,
) -> GifStreamEncoder<&'a mut InMemorySink> {
    let mut enc = GifStreamEncoder::new(sink);
    enc.begin(4, 3).unwrap();
    enc.set_loop(LOOP_FOREVER).unwrap();
    enc.set_frame_delay(1000).unwrap();
    enc.set_global_palette(palette).unwrap();
    enc
}

struct Decoded {
    palette: Vec<u8>,
    frames: Vec<(u16, Vec<u8>)>,
}

fn decode(bytes: &[u8]) -> Decoded {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut dec = opts.read_info(bytes).unwrap();
    let palette = dec.global_palette().unwrap().to_vec();
    let mut frames = Vec::new();
    while let Some(f) = dec.read_next_frame().unwrap() {
        frames.push((f.delay, f.buffer.to_vec()));
    }
    Decoded { palette, frames }
}

#[test]
fn writes_frames_with_shared_palette_and_one_second_delay() {
    let palette = Palette::build(Rgb8::new(255, 255, 255), Rgb8::new(0, 0, 0), 8);
    let mut sink = InMemorySink::new();
    let mut enc = configured(&mut sink, &palette);

    enc.write_frame(&frame(4, 3, 0)).unwrap();
    enc.write_frame(&frame(4, 3, 8)).unwrap();
    enc.write_frame(&frame(4, 3, 3)).unwrap();
    assert_eq!(enc.frames_written(), 3);
    enc.finish().unwrap();
    let emitted = enc.bytes_emitted();
    drop(enc);

    assert!(sink.is_closed());
    assert_eq!(emitted, sink.bytes().len() as u64);
    assert!(sink.bytes().starts_with(b"GIF89a"));
    assert_eq!(sink.bytes().last(), Some(&0x3B));
    assert!(
        sink.bytes()
            .windows(b"NETSCAPE2.0".len())
            .any(|w| w == b"NETSCAPE2.0")
    );

    let d = decode(sink.bytes());
    assert_eq!(&d.palette[..27], palette.to_rgb_bytes().as_slice());
    assert_eq!(d.frames.len(), 3);
    assert!(d.frames.iter().all(|(delay, _)| *delay == 100));
    assert_eq!(d.frames[1].1, vec![8; 12]);
    assert_eq!(d.frames[2].1, vec![3; 12]);
}

#[test]
fn each_frame_reaches_the_sink_before_the_next() {
    let palette = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let mut sink = InMemorySink::new();
    let mut enc = configured(&mut sink, &palette);

    enc.write_frame(&frame(4, 3, 1)).unwrap();
    let after_first = enc.bytes_emitted();
    assert!(after_first > 0);
    enc.write_frame(&frame(4, 3, 2)).unwrap();
    assert!(enc.bytes_emitted() > after_first);
    enc.finish().unwrap();
    drop(enc);

    // Header + first frame, second frame, trailer.
    assert_eq!(sink.chunk_count(), 3);
}

#[test]
fn finish_without_frames_still_yields_a_valid_container() {
    let palette = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let mut sink = InMemorySink::new();
    let mut enc = configured(&mut sink, &palette);
    enc.finish().unwrap();
    drop(enc);

    let d = decode(sink.bytes());
    assert!(d.frames.is_empty());
}

#[test]
fn rejects_mismatched_frames_and_late_configuration() {
    let palette = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let mut sink = InMemorySink::new();
    let mut enc = configured(&mut sink, &palette);

    assert!(enc.write_frame(&frame(5, 3, 0)).is_err());
    assert!(enc.finish().is_err());
    drop(enc);

    let mut enc = configured(&mut sink, &palette);
    enc.write_frame(&frame(4, 3, 0)).unwrap();
    assert!(enc.set_frame_delay(500).is_err());
    assert!(enc.begin(8, 8).is_err());
}

#[test]
fn requires_begin_and_palette() {
    let mut sink = InMemorySink::new();
    let mut enc = GifStreamEncoder::new(&mut sink);
    let err = enc.write_frame(&frame(4, 3, 0)).unwrap_err();
    assert!(err.to_string().contains("begin"));

    let mut sink = InMemorySink::new();
    let mut enc = GifStreamEncoder::new(&mut sink);
    enc.begin(4, 3).unwrap();
    let err = enc.write_frame(&frame(4, 3, 0)).unwrap_err();
    assert!(err.to_string().contains("palette"));
}

#[test]
fn sink_failure_surfaces_as_sink_error() {
    let palette = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let mut sink = InMemorySink::new();
    sink.close().unwrap();
    let mut enc = configured(&mut sink, &palette);
    let err = enc.write_frame(&frame(4, 3, 0)).unwrap_err();
    assert!(err.is_sink_failure());
}

#[test]
fn finite_loop_and_sink_recovery() {
    let palette = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let mut enc = GifStreamEncoder::new(InMemorySink::new());
    enc.begin(4, 3).unwrap();
    enc.set_loop(3).unwrap();
    enc.set_global_palette(&palette).unwrap();
    enc.write_frame(&frame(4, 3, 0)).unwrap();
    enc.finish().unwrap();
    enc.finish().unwrap();

    let sink = enc.into_sink().unwrap();
    assert!(sink.is_closed());
    assert!(sink.bytes().starts_with(b"GIF89a"));
}
