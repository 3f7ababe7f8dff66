use super::*;

#[test]
fn black_to_white_four_levels_truncates_channels() {
    let p = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    let grays: Vec<u8> = p.colors().iter().map(|c| c.r).collect();
    assert_eq!(grays, vec![0, 63, 127, 191, 255]);
    for c in p.colors() {
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}

#[test]
fn endpoints_are_exact_colors() {
    let bg = Rgb8::new(250, 240, 230);
    let fg = Rgb8::new(12, 34, 56);
    for levels in [4u8, 8, 13, 32] {
        let p = Palette::build(bg, fg, levels);
        assert_eq!(p.colors().len(), usize::from(levels) + 1);
        assert_eq!(p.colors()[0], bg);
        assert_eq!(p.colors()[usize::from(levels)], fg);
    }
}

#[test]
fn ramp_is_monotonic_between_endpoints() {
    let p = Palette::build(Rgb8::new(255, 0, 10), Rgb8::new(0, 255, 200), 8);
    for w in p.colors().windows(2) {
        assert!(w[0].r >= w[1].r);
        assert!(w[0].g <= w[1].g);
        assert!(w[0].b <= w[1].b);
    }
}

#[test]
fn levels_are_clamped() {
    assert_eq!(Palette::build(Rgb8::BLACK, Rgb8::WHITE, 0).levels(), 4);
    assert_eq!(Palette::build(Rgb8::BLACK, Rgb8::WHITE, 200).levels(), 32);
    assert_eq!(Palette::build(Rgb8::BLACK, Rgb8::WHITE, 8).levels(), 8);
}

#[test]
fn intensity_maps_with_rounding_and_zero_fast_path() {
    let p = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 8);
    assert_eq!(p.index_for_intensity(0), 0);
    assert_eq!(p.index_for_intensity(1), 0);
    assert_eq!(p.index_for_intensity(MAX_INK_INTENSITY), 8);
    // 765 / 8 = 95.625 per level; half a level rounds up.
    assert_eq!(p.index_for_intensity(47), 0);
    assert_eq!(p.index_for_intensity(48), 1);
    assert_eq!(p.index_for_intensity(383), 4);
}

#[test]
fn intensity_index_never_exceeds_levels() {
    let p = Palette::build(Rgb8::BLACK, Rgb8::WHITE, 4);
    for i in 0..=MAX_INK_INTENSITY {
        assert!(p.index_for_intensity(i) <= p.levels());
    }
}

#[test]
fn rgb_bytes_are_packed_in_order() {
    let p = Palette::build(Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6), 4);
    let bytes = p.to_rgb_bytes();
    assert_eq!(bytes.len(), 15);
    assert_eq!(&bytes[..3], &[1, 2, 3]);
    assert_eq!(&bytes[12..], &[4, 5, 6]);
}
