use crate::{
    config::face::FaceConfig,
    foundation::{
        core::{GColor8, GRect, RowBand},
        error::{WatchError, WatchResult},
    },
    graphics::{bitmap::Bitmap, context::GContext, text::TextStyle},
    render::mask::mask_rows,
};

/// Paints the static background and punches the current animation frame into it.
#[derive(Clone, Debug)]
pub struct Compositor {
    background: GColor8,
    text_color: GColor8,
    clock_text: String,
    text_rect: GRect,
    text_style: TextStyle,
    mask_band: RowBand,
}

impl Compositor {
    /// Build from a validated face config.
    pub fn new(cfg: &FaceConfig) -> Self {
        Self {
            background: cfg.background,
            text_color: cfg.text_color,
            clock_text: cfg.clock_text.clone(),
            text_rect: cfg.text_rect,
            text_style: cfg.text_style(),
            mask_band: cfg.mask_band,
        }
    }

    /// Rows merged with the animation frame.
    pub fn mask_band(&self) -> RowBand {
        self.mask_band
    }

    /// Redraw the whole display into `ctx`.
    ///
    /// `frame` is the most recently decoded animation frame, or `None` before a
    /// sequence has been started. The framebuffer capture is released on every
    /// return path, including geometry errors.
    pub fn redraw(&self, ctx: &mut GContext, frame: Option<&Bitmap>) -> WatchResult<()> {
        let bounds = ctx.bounds();
        ctx.set_fill_color(self.background);
        ctx.fill_rect(bounds);
        ctx.set_text_color(self.text_color);
        ctx.draw_text(&self.clock_text, &self.text_style, self.text_rect);

        let mut fb = ctx.capture_frame_buffer();
        let Some(frame) = frame else {
            return Ok(());
        };
        if frame.row_stride() != fb.row_stride() {
            return Err(WatchError::geometry(format!(
                "animation stride {} differs from framebuffer stride {}",
                frame.row_stride(),
                fb.row_stride()
            )));
        }
        let stride = fb.row_stride();
        mask_rows(
            fb.data_mut(),
            frame.data(),
            self.mask_band.start as usize,
            self.mask_band.end as usize,
            stride,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
