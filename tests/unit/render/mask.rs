use super::*;

fn words_of(bytes: &[u8]) -> Vec<u64> {
    bytes.chunks_exact(8).map(load_word).collect()
}

fn patterned(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(37).wrapping_add(seed))
        .collect()
}

#[test]
fn band_words_become_live_and_frame_outside_is_untouched() {
    let stride = 144;
    let rows = 168;
    let mut live = patterned(stride * rows, 11);
    let frame = patterned(stride * rows, 201);
    let before = live.clone();

    mask_rows(&mut live, &frame, 50, 100, stride).unwrap();

    let (live_w, before_w, frame_w) = (words_of(&live), words_of(&before), words_of(&frame));
    let row_words = stride / 8;
    assert_eq!(row_words, 18);
    for i in 0..live_w.len() {
        if (50 * row_words..100 * row_words).contains(&i) {
            assert_eq!(live_w[i], before_w[i] & frame_w[i], "word {i}");
        } else {
            assert_eq!(live_w[i], before_w[i], "word {i}");
        }
    }
}

#[test]
fn all_ones_frame_is_identity_and_all_zeros_clears() {
    let mut live = patterned(16 * 4, 3);
    let before = live.clone();
    mask_rows(&mut live, &[0xFF; 64], 0, 4, 16).unwrap();
    assert_eq!(live, before);

    mask_rows(&mut live, &[0x00; 64], 1, 3, 16).unwrap();
    assert_eq!(&live[..16], &before[..16]);
    assert!(live[16..48].iter().all(|&b| b == 0));
    assert_eq!(&live[48..], &before[48..]);
}

#[test]
fn stride_with_partial_word_merges_trailing_bytes() {
    let mut live = vec![0b1010_1010u8; 10 * 2];
    let frame = vec![0b0110_0110u8; 10 * 2];
    mask_rows(&mut live, &frame, 0, 2, 10).unwrap();
    assert!(live.iter().all(|&b| b == 0b0010_0010));
}

#[test]
fn empty_band_is_a_noop() {
    let mut live = vec![7u8; 32];
    mask_rows(&mut live, &[0u8; 32], 2, 2, 8).unwrap();
    assert!(live.iter().all(|&b| b == 7));
}

#[test]
fn mismatched_buffers_are_rejected_not_overrun() {
    let mut live = vec![0u8; 144 * 100];
    let short = vec![0u8; 144 * 99];
    assert!(matches!(
        mask_rows(&mut live, &short, 50, 100, 144),
        Err(WatchError::Geometry(_))
    ));
    let same = live.clone();
    assert!(mask_rows(&mut live, &same, 60, 50, 144).is_err());
    assert!(mask_rows(&mut live, &same, 0, 1, 0).is_err());
}
