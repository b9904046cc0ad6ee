use super::*;
use crate::foundation::core::{DISPLAY_SIZE, GSize};

fn background_only(cfg: &FaceConfig) -> Bitmap {
    let mut ctx = GContext::for_display();
    Compositor::new(cfg).redraw(&mut ctx, None).unwrap();
    ctx.framebuffer().clone()
}

#[test]
fn without_a_frame_only_background_and_text_are_drawn() {
    let cfg = FaceConfig::default();
    let mut ctx = GContext::for_display();
    Compositor::new(&cfg).redraw(&mut ctx, None).unwrap();

    let fb = ctx.framebuffer();
    assert_eq!(fb.pixel(0, 0), Some(GColor8::BLACK));
    assert_eq!(fb.pixel(143, 167), Some(GColor8::BLACK));
    assert!(fb.data().contains(&GColor8::WHITE.0));
    assert_eq!(ctx.framebuffer_captures(), 1);
    assert_eq!(ctx.framebuffer_releases(), 1);
}

#[test]
fn frame_is_and_merged_into_the_band_only() {
    let cfg = FaceConfig::default();
    let expected_bg = background_only(&cfg);

    let mut frame = Bitmap::filled(DISPLAY_SIZE, GColor8::WHITE);
    frame.fill_rect(GRect::new(0, 0, 72, 168), GColor8::CLEAR);

    let mut ctx = GContext::for_display();
    Compositor::new(&cfg).redraw(&mut ctx, Some(&frame)).unwrap();
    let fb = ctx.framebuffer();

    let stride = fb.row_stride();
    for (i, (&got, &bg)) in fb.data().iter().zip(expected_bg.data()).enumerate() {
        let row = i / stride;
        if (50..100).contains(&row) {
            assert_eq!(got, bg & frame.data()[i], "byte {i}");
        } else {
            assert_eq!(got, bg, "byte {i}");
        }
    }
    assert_eq!(fb.pixel(10, 60), Some(GColor8::CLEAR));
    assert_eq!(fb.pixel(10, 49), Some(GColor8::BLACK));
    assert_eq!(ctx.framebuffer_releases(), 1);
}

#[test]
fn stride_mismatch_is_an_error_and_still_releases() {
    let cfg = FaceConfig::default();
    let frame = Bitmap::new_blank(GSize::new(100, 168));
    let mut ctx = GContext::for_display();

    let err = Compositor::new(&cfg)
        .redraw(&mut ctx, Some(&frame))
        .unwrap_err();
    assert!(matches!(err, WatchError::Geometry(_)));
    assert_eq!(ctx.framebuffer_captures(), 1);
    assert_eq!(ctx.framebuffer_releases(), 1);
}

#[test]
fn short_frame_is_an_error_not_an_overrun() {
    let cfg = FaceConfig::default();
    let frame = Bitmap::new_blank(GSize::new(144, 80));
    let mut ctx = GContext::for_display();
    assert!(Compositor::new(&cfg).redraw(&mut ctx, Some(&frame)).is_err());
    assert_eq!(ctx.framebuffer_releases(), 1);
}
