use super::*;

#[test]
fn color_quantises_to_two_bits_per_channel() {
    assert_eq!(GColor8::from_rgba(0, 0, 0, 255), GColor8::BLACK);
    assert_eq!(GColor8::from_rgba(255, 255, 255, 255), GColor8::WHITE);
    assert_eq!(GColor8::from_rgba(255, 255, 255, 0), GColor8(0x3F));
    assert_eq!(GColor8::from_rgba(0x80, 0x40, 0x00, 0xFF), GColor8(0b1110_0100));
    assert_eq!(GColor8::WHITE.to_rgba(), [255, 255, 255, 255]);
    assert_eq!(GColor8(0b1110_0100).to_rgba(), [170, 85, 0, 255]);
}

#[test]
fn color_parse_accepts_names_and_hex() {
    assert_eq!(GColor8::parse("black").unwrap(), GColor8::BLACK);
    assert_eq!(GColor8::parse(" White ").unwrap(), GColor8::WHITE);
    assert_eq!(GColor8::parse("clear").unwrap(), GColor8::CLEAR);
    assert_eq!(GColor8::parse("#FF0000").unwrap(), GColor8(0b1111_0000));
    assert_eq!(GColor8::parse("#00000000").unwrap(), GColor8::CLEAR);
    assert!(GColor8::parse("#12345").is_err());
    assert!(GColor8::parse("#GG0000").is_err());
    assert!(GColor8::parse("mauve").is_err());
}

#[test]
fn color_serde_uses_string_form() {
    let json = serde_json::to_string(&GColor8::BLACK).unwrap();
    assert_eq!(json, "\"#000000\"");
    let back: GColor8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, GColor8::BLACK);
    let clear: GColor8 = serde_json::from_str("\"clear\"").unwrap();
    assert_eq!(clear.to_string(), "#00000000");
}

#[test]
fn rect_intersection_clips_to_overlap() {
    let display = GRect::from_size(DISPLAY_SIZE);
    let r = GRect::new(-10, 160, 30, 30);
    assert_eq!(display.intersection(r), Some(GRect::new(0, 160, 20, 8)));
    assert_eq!(display.intersection(GRect::new(200, 0, 5, 5)), None);
    assert!(GRect::new(0, 0, 0, 4).is_empty());
}

#[test]
fn row_band_rejects_inverted_ranges() {
    assert!(RowBand::new(10, 10).is_err());
    assert!(RowBand::new(11, 10).is_err());
    let band = RowBand::default();
    assert_eq!((band.start, band.end, band.len_rows()), (50, 100, 50));
}

#[test]
fn word_width_matches_display_stride() {
    assert_eq!(WORD_BYTES, 8);
    assert_eq!(DISPLAY_WIDTH as usize / WORD_BYTES, 18);
}
