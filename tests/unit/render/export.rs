use super::*;
use crate::foundation::core::{GColor8, GSize};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("maskface_export_{name}_{}", std::process::id()))
}

#[test]
fn png_sink_numbers_frames_and_honours_limit() {
    let dir = temp_dir("limit");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir).unwrap().with_limit(2);
    let fb = Bitmap::filled(GSize::new(4, 3), GColor8::WHITE);

    for ms in [0, 10, 20] {
        sink.present(&fb, Duration::from_millis(ms)).unwrap();
    }

    assert_eq!(sink.written(), 2);
    assert!(dir.join("frame_00000.png").exists());
    assert!(dir.join("frame_00001.png").exists());
    assert!(!dir.join("frame_00002.png").exists());

    let img = image::open(dir.join("frame_00001.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(3, 2).0, [255, 255, 255, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn null_sink_accepts_anything() {
    let fb = Bitmap::new_blank(GSize::new(1, 1));
    NullSink.present(&fb, Duration::ZERO).unwrap();
}
