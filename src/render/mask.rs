use crate::foundation::{
    core::WORD_BYTES,
    error::{WatchError, WatchResult},
};

/// AND-merge rows `[row_start, row_end)` of `frame` into `live`, one machine word at a time.
///
/// Both buffers are row-major with `row_stride` bytes per row. Words covered by the
/// band become `live & frame`; everything else in `live` is left untouched. A stride
/// that is not a whole number of words merges its trailing bytes one by one, which
/// gives the same result.
pub fn mask_rows(
    live: &mut [u8],
    frame: &[u8],
    row_start: usize,
    row_end: usize,
    row_stride: usize,
) -> WatchResult<()> {
    if row_start > row_end {
        return Err(WatchError::geometry(format!(
            "mask rows {row_start}..{row_end} are inverted"
        )));
    }
    if row_stride == 0 {
        return Err(WatchError::geometry("mask row stride must be > 0"));
    }
    let end = row_end
        .checked_mul(row_stride)
        .ok_or_else(|| WatchError::geometry("mask band overflows usize"))?;
    if live.len() < end || frame.len() < end {
        return Err(WatchError::geometry(format!(
            "mask band needs {end} bytes, live has {}, frame has {}",
            live.len(),
            frame.len()
        )));
    }
    let start = row_start * row_stride;

    let live = &mut live[start..end];
    let frame = &frame[start..end];

    let mut live_words = live.chunks_exact_mut(WORD_BYTES);
    let mut frame_words = frame.chunks_exact(WORD_BYTES);
    for (l, f) in (&mut live_words).zip(&mut frame_words) {
        let merged = load_word(l) & load_word(f);
        l.copy_from_slice(&merged.to_ne_bytes());
    }
    for (l, f) in live_words
        .into_remainder()
        .iter_mut()
        .zip(frame_words.remainder())
    {
        *l &= *f;
    }
    Ok(())
}

fn load_word(bytes: &[u8]) -> u64 {
    let mut word = [0u8; WORD_BYTES];
    word.copy_from_slice(bytes);
    u64::from_ne_bytes(word)
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
