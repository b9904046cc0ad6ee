use super::*;
use crate::foundation::core::{DISPLAY_SIZE, GSize};

#[test]
fn fill_overflow_steps_scale_down_until_the_run_fits() {
    let rect = GRect::new(0, 50, 144, 118);
    let layout = layout_text("08:39", &TextStyle::default(), rect);
    assert_eq!(layout.scale, 2);
    assert_eq!(layout.width, 100);
    assert_eq!(layout.height, 40);
    assert_eq!(layout.x, 22);
    assert_eq!(layout.y, 50);
}

#[test]
fn clip_overflow_keeps_scale_and_centers_symmetrically() {
    let style = TextStyle {
        overflow: TextOverflowMode::Clip,
        ..TextStyle::default()
    };
    let layout = layout_text("08:39", &style, GRect::new(0, 0, 144, 60));
    assert_eq!(layout.scale, 3);
    assert_eq!(layout.width, 150);
    assert_eq!(layout.x, -3);
}

#[test]
fn alignment_moves_the_run_inside_the_box() {
    let rect = GRect::new(10, 0, 100, 20);
    let base = TextStyle {
        font: FontKey::Small,
        scale: 1,
        ..TextStyle::default()
    };
    let left = layout_text(
        "ab",
        &TextStyle {
            alignment: TextAlignment::Left,
            ..base
        },
        rect,
    );
    let right = layout_text(
        "ab",
        &TextStyle {
            alignment: TextAlignment::Right,
            ..base
        },
        rect,
    );
    assert_eq!(left.x, 10);
    assert_eq!(right.x, 10 + 100 - left.width as i32);
}

#[test]
fn drawn_pixels_stay_inside_the_laid_out_run() {
    let rect = GRect::new(0, 50, 144, 118);
    let style = TextStyle::default();
    let mut bmp = Bitmap::filled(DISPLAY_SIZE, GColor8::BLACK);
    draw_text(&mut bmp, "08:39", &style, rect, GColor8::WHITE);

    let layout = layout_text("08:39", &style, rect);
    let mut lit = 0usize;
    for y in 0..DISPLAY_SIZE.h as i32 {
        for x in 0..DISPLAY_SIZE.w as i32 {
            if bmp.pixel(x, y) == Some(GColor8::WHITE) {
                lit += 1;
                assert!(x >= layout.x && x < layout.x + layout.width as i32);
                assert!(y >= layout.y && y < layout.y + layout.height as i32);
            }
        }
    }
    assert!(lit > 0);
}

#[test]
fn text_is_clipped_to_its_box() {
    let mut bmp = Bitmap::filled(GSize::new(40, 40), GColor8::BLACK);
    let style = TextStyle {
        overflow: TextOverflowMode::Clip,
        alignment: TextAlignment::Left,
        ..TextStyle::default()
    };
    draw_text(&mut bmp, "8888", &style, GRect::new(0, 0, 12, 12), GColor8::WHITE);
    for y in 0..40 {
        for x in 0..40 {
            if x >= 12 || y >= 12 {
                assert_eq!(bmp.pixel(x, y), Some(GColor8::BLACK), "({x},{y})");
            }
        }
    }
}

#[test]
fn huge_scale_is_clamped_instead_of_overflowing() {
    let rect = GRect::new(0, 50, 144, 118);
    let fill = TextStyle {
        scale: u32::MAX,
        ..TextStyle::default()
    };
    assert_eq!(layout_text("08:39", &fill, rect).scale, 2);

    let clip = TextStyle {
        scale: u32::MAX,
        overflow: TextOverflowMode::Clip,
        ..TextStyle::default()
    };
    let layout = layout_text("08:39", &clip, rect);
    assert_eq!(layout.scale, MAX_TEXT_SCALE);
    assert_eq!(layout.width, 50 * MAX_TEXT_SCALE);

    let mut bmp = Bitmap::filled(DISPLAY_SIZE, GColor8::BLACK);
    draw_text(&mut bmp, "08:39", &clip, rect, GColor8::WHITE);
    assert_eq!(bmp.pixel(0, 10), Some(GColor8::BLACK));
}
