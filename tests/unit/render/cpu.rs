use super::*;
use crate::foundation::core::Canvas;

fn system_font() -> Option<FontSource> {
    DEFAULT_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .and_then(|p| FontSource::from_path(p).ok())
}

#[test]
fn garbage_bytes_are_not_a_font() {
    let err = CpuTextRasterizer::new(&FontSource::from_bytes(vec![0, 1, 2, 3])).err();
    assert!(matches!(err, Some(CountdownError::Font(_))));
}

#[test]
fn missing_explicit_font_file_is_an_error() {
    let err = FontSource::discover(Some(Path::new("target/definitely/missing.ttf"))).unwrap_err();
    assert!(err.to_string().contains("missing.ttf"));
}

#[test]
fn font_source_debug_hides_bytes() {
    let s = FontSource::from_bytes(vec![7; 32]);
    let dbg = format!("{s:?}");
    assert!(dbg.contains("bytes_len: 32"));
    assert_eq!(s.origin(), "<memory>");
}

#[test]
fn system_font_measures_monotonically_and_paints_ink() {
    // Skip on hosts without any of the well-known fonts.
    let Some(source) = system_font() else {
        return;
    };
    let mut r = CpuTextRasterizer::new(&source).unwrap();
    assert!(!r.family_name().trim().is_empty());

    let small = r.measure_text("12:34:56", 12.0).unwrap();
    let large = r.measure_text("12:34:56", 48.0).unwrap();
    assert!(small > 0.0);
    assert!(large > small);

    let mut surface = Surface::new(Canvas::clamped(200, 200)).unwrap();
    surface.clear(Rgb8::BLACK);
    r.paint(&mut surface, "12:34:56", 24.0, Rgb8::WHITE).unwrap();

    let inked = surface
        .data()
        .chunks_exact(4)
        .filter(|px| px[0] > 0)
        .count();
    assert!(inked > 0);
    // Corners stay background.
    assert_eq!(&surface.data()[..3], &[0, 0, 0]);
}

#[test]
fn rejects_non_positive_sizes() {
    let Some(source) = system_font() else {
        return;
    };
    let mut r = CpuTextRasterizer::new(&source).unwrap();
    assert!(r.measure_text("x", 0.0).is_err());
    assert!(r.measure_text("x", f32::NAN).is_err());
}

#[test]
fn reused_context_paints_like_a_fresh_one() {
    let Some(source) = system_font() else {
        return;
    };
    let canvas = Canvas::clamped(200, 200);
    let paint = |r: &mut CpuTextRasterizer, text: &str| {
        let mut surface = Surface::new(canvas).unwrap();
        r.paint(&mut surface, text, 30.0, Rgb8::WHITE).unwrap();
        surface.data().to_vec()
    };

    let mut reused = CpuTextRasterizer::new(&source).unwrap();
    paint(&mut reused, "88:88:88");
    let second = paint(&mut reused, "00:00:01");
    assert!(reused.ctx.is_some());

    let mut fresh = CpuTextRasterizer::new(&source).unwrap();
    assert_eq!(second, paint(&mut fresh, "00:00:01"));

    // A different surface size gets a matching context.
    let mut wide = Surface::new(Canvas::clamped(400, 150)).unwrap();
    reused.paint(&mut wide, "00:00:01", 30.0, Rgb8::WHITE).unwrap();
    assert!(wide.data().chunks_exact(4).any(|px| px[0] > 0));
    assert_eq!(&wide.data()[..3], &[0, 0, 0]);
}
