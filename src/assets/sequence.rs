use std::io::Cursor;

use image::{AnimationDecoder, Frame, Frames, ImageDecoder, codecs::png::PngDecoder};

use crate::{
    assets::resource::AnimationResource,
    foundation::{
        core::{FrameDelay, GSize},
        error::{WatchError, WatchResult},
    },
    graphics::bitmap::Bitmap,
};

/// In-progress iteration over a bitmap sequence.
///
/// Implementations write each frame into a caller-owned bitmap and report how long
/// that frame should stay on screen.
pub trait FrameSource {
    /// Size a bitmap must have to receive frames.
    fn bitmap_size(&self) -> GSize;

    /// Decode the next frame into `bitmap`.
    ///
    /// Returns `Ok(Some(delay))` when a frame was written and `Ok(None)` once the
    /// sequence is exhausted.
    fn update_bitmap_next_frame(&mut self, bitmap: &mut Bitmap)
    -> WatchResult<Option<FrameDelay>>;

    /// Frames written so far by this handle.
    fn frames_decoded(&self) -> u32;
}

/// Creates fresh [`FrameSource`]s positioned at frame zero.
pub trait SequenceFactory {
    /// Handle type produced.
    type Source: FrameSource;

    /// Open a new handle on the underlying resource.
    fn create_sequence(&self) -> WatchResult<Self::Source>;
}

/// Streaming APNG decoder over a shared [`AnimationResource`].
///
/// Frames come out fully composited to the canvas, then quantised into the 8-bit
/// target bitmap. A plain PNG decodes as a single frame with a zero delay.
pub struct ApngSequence {
    frames: Frames<'static>,
    size: GSize,
    decoded: u32,
}

impl ApngSequence {
    /// Open `resource` and position the handle before its first frame.
    pub fn open(resource: &AnimationResource) -> WatchResult<Self> {
        let open_err =
            |e: image::ImageError| WatchError::resource(format!("open '{}': {e}", resource.id()));

        let mut decoder = PngDecoder::new(Cursor::new(resource.bytes())).map_err(open_err)?;
        let (w, h) = decoder.dimensions();
        let frames = if decoder.is_apng().map_err(open_err)? {
            decoder.apng().map_err(open_err)?.into_frames()
        } else {
            let still = image::DynamicImage::from_decoder(decoder)
                .map_err(open_err)?
                .to_rgba8();
            Frames::new(Box::new(std::iter::once(Ok(Frame::new(still)))))
        };

        Ok(Self {
            frames,
            size: GSize::new(w, h),
            decoded: 0,
        })
    }
}

impl FrameSource for ApngSequence {
    fn bitmap_size(&self) -> GSize {
        self.size
    }

    fn update_bitmap_next_frame(
        &mut self,
        bitmap: &mut Bitmap,
    ) -> WatchResult<Option<FrameDelay>> {
        if bitmap.size() != self.size {
            return Err(WatchError::geometry(format!(
                "bitmap {} does not match sequence {}",
                bitmap.size(),
                self.size
            )));
        }

        let frame = match self.frames.next() {
            None => return Ok(None),
            Some(Err(e)) => {
                return Err(WatchError::decode(format!("frame {}: {e}", self.decoded)));
            }
            Some(Ok(frame)) => frame,
        };

        bitmap.write_rgba_frame(frame.buffer())?;
        self.decoded += 1;
        Ok(Some(frame_delay(&frame)))
    }

    fn frames_decoded(&self) -> u32 {
        self.decoded
    }
}

impl std::fmt::Debug for ApngSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApngSequence")
            .field("size", &self.size)
            .field("decoded", &self.decoded)
            .finish()
    }
}

impl SequenceFactory for AnimationResource {
    type Source = ApngSequence;

    fn create_sequence(&self) -> WatchResult<ApngSequence> {
        ApngSequence::open(self)
    }
}

fn frame_delay(frame: &Frame) -> FrameDelay {
    let (numer, denom) = frame.delay().numer_denom_ms();
    if denom == 0 {
        return FrameDelay(0);
    }
    FrameDelay((numer + denom / 2) / denom)
}

/// Summary of one full pass over a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceInfo {
    /// Canvas size of the sequence.
    pub size: GSize,
    /// Delay reported after each frame, in order.
    pub delays: Vec<FrameDelay>,
}

impl SequenceInfo {
    /// Number of frames in a pass.
    pub fn frame_count(&self) -> usize {
        self.delays.len()
    }

    /// Sum of all frame delays in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.delays.iter().map(|d| u64::from(d.0)).sum()
    }
}

/// Decode one full pass of `factory` and report its frame delays.
pub fn probe_sequence<F: SequenceFactory>(factory: &F) -> WatchResult<SequenceInfo> {
    let mut source = factory.create_sequence()?;
    let size = source.bitmap_size();
    let mut bitmap = Bitmap::new_blank(size);
    let mut delays = Vec::new();
    while let Some(delay) = source.update_bitmap_next_frame(&mut bitmap)? {
        delays.push(delay);
    }
    Ok(SequenceInfo { size, delays })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sequence.rs"]
mod tests;
