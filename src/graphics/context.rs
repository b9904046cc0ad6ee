use std::ops::{Deref, DerefMut};

use crate::{
    foundation::core::{DISPLAY_SIZE, GColor8, GRect, GSize},
    graphics::{
        bitmap::Bitmap,
        text::{self, TextStyle},
    },
};

/// Drawing context bound to the display's live framebuffer.
///
/// Drawing calls go through the context; raw access to the pixels is only possible
/// through [`GContext::capture_frame_buffer`], which hands out a scoped guard.
#[derive(Debug)]
pub struct GContext {
    framebuffer: Bitmap,
    fill_color: GColor8,
    text_color: GColor8,
    captures: u64,
    releases: u64,
}

impl GContext {
    /// Context for the fixed 144x168 display.
    pub fn for_display() -> Self {
        Self::with_size(DISPLAY_SIZE)
    }

    /// Context over a blank framebuffer of `size`.
    pub fn with_size(size: GSize) -> Self {
        Self {
            framebuffer: Bitmap::new_blank(size),
            fill_color: GColor8::BLACK,
            text_color: GColor8::WHITE,
            captures: 0,
            releases: 0,
        }
    }

    /// Read-only view of the framebuffer as last drawn.
    pub fn framebuffer(&self) -> &Bitmap {
        &self.framebuffer
    }

    /// Full drawable area.
    pub fn bounds(&self) -> GRect {
        self.framebuffer.bounds()
    }

    /// Colour used by [`GContext::fill_rect`].
    pub fn set_fill_color(&mut self, color: GColor8) {
        self.fill_color = color;
    }

    /// Colour used by [`GContext::draw_text`].
    pub fn set_text_color(&mut self, color: GColor8) {
        self.text_color = color;
    }

    /// Fill `rect` with the current fill colour.
    pub fn fill_rect(&mut self, rect: GRect) {
        self.framebuffer.fill_rect(rect, self.fill_color);
    }

    /// Draw `text` inside `rect` with the current text colour.
    pub fn draw_text(&mut self, text: &str, style: &TextStyle, rect: GRect) {
        text::draw_text(&mut self.framebuffer, text, style, rect, self.text_color);
    }

    /// Take exclusive access to the framebuffer memory until the guard drops.
    pub fn capture_frame_buffer(&mut self) -> FramebufferGuard<'_> {
        self.captures += 1;
        FramebufferGuard { ctx: self }
    }

    /// Number of captures handed out so far.
    pub fn framebuffer_captures(&self) -> u64 {
        self.captures
    }

    /// Number of captures released so far.
    pub fn framebuffer_releases(&self) -> u64 {
        self.releases
    }
}

/// Scoped, exclusive borrow of the live framebuffer; released on drop.
pub struct FramebufferGuard<'a> {
    ctx: &'a mut GContext,
}

impl Deref for FramebufferGuard<'_> {
    type Target = Bitmap;

    fn deref(&self) -> &Bitmap {
        &self.ctx.framebuffer
    }
}

impl DerefMut for FramebufferGuard<'_> {
    fn deref_mut(&mut self) -> &mut Bitmap {
        &mut self.ctx.framebuffer
    }
}

impl Drop for FramebufferGuard<'_> {
    fn drop(&mut self) {
        self.ctx.releases += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphics/context.rs"]
mod tests;
