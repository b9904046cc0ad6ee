//! Built-in bitmap fonts rasterised with `embedded-graphics` and blitted with
//! integer magnification.

use embedded_graphics::{
    Pixel,
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_9X18_BOLD, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::{
    foundation::core::{GColor8, GRect},
    graphics::bitmap::Bitmap,
};

/// Largest magnification applied to a text run; larger requests are clamped.
pub const MAX_TEXT_SCALE: u32 = 168;

/// Built-in system fonts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKey {
    /// 6x10 glyph cell.
    Small,
    /// 9x18 bold glyph cell.
    Medium,
    /// 10x20 glyph cell.
    #[default]
    Large,
}

impl FontKey {
    fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            FontKey::Small => &FONT_6X10,
            FontKey::Medium => &FONT_9X18_BOLD,
            FontKey::Large => &FONT_10X20,
        }
    }
}

/// What happens when a text run is wider than its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOverflowMode {
    /// Step the magnification down until the run fits, then clip.
    #[default]
    Fill,
    /// Keep the magnification and clip at the box edges.
    Clip,
}

/// Horizontal placement inside the text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Flush with the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

/// Font, magnification and layout rules for one text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Glyph source.
    pub font: FontKey,
    /// Integer magnification (upper bound under [`TextOverflowMode::Fill`]).
    pub scale: u32,
    /// Overflow behaviour.
    pub overflow: TextOverflowMode,
    /// Horizontal alignment.
    pub alignment: TextAlignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontKey::Large,
            scale: 3,
            overflow: TextOverflowMode::Fill,
            alignment: TextAlignment::Center,
        }
    }
}

/// Placement of a laid-out text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Left edge of the scaled run (may lie outside the box).
    pub x: i32,
    /// Top edge of the scaled run.
    pub y: i32,
    /// Magnification actually used.
    pub scale: u32,
    /// Scaled width in pixels.
    pub width: u32,
    /// Scaled height in pixels.
    pub height: u32,
}

/// Unscaled 1-bit coverage of a text run.
struct GlyphMask {
    width: u32,
    height: u32,
    on: Vec<bool>,
}

impl GlyphMask {
    fn render(text: &str, font: &MonoFont<'_>) -> Self {
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let run = Text::with_baseline(text, Point::zero(), style, Baseline::Top);
        let bbox = run.bounding_box();
        let mut mask = Self {
            width: bbox.size.width,
            height: bbox.size.height,
            on: vec![false; (bbox.size.width as usize) * (bbox.size.height as usize)],
        };
        run.draw(&mut mask).unwrap_or_else(|never| match never {});
        mask
    }

    fn is_on(&self, x: u32, y: u32) -> bool {
        self.on[(y * self.width + x) as usize]
    }
}

impl OriginDimensions for GlyphMask {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for GlyphMask {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x as u32 >= self.width || p.y as u32 >= self.height {
                continue;
            }
            self.on[(p.y as u32 * self.width + p.x as u32) as usize] = color.is_on();
        }
        Ok(())
    }
}

fn layout_mask(mask: &GlyphMask, style: &TextStyle, rect: GRect) -> TextLayout {
    let mut scale = style.scale.clamp(1, MAX_TEXT_SCALE);
    if style.overflow == TextOverflowMode::Fill {
        scale = scale.min(rect.w / mask.width.max(1)).max(1);
    }

    let width = mask.width.saturating_mul(scale);
    let slack = i64::from(rect.w) - i64::from(width);
    let x = match style.alignment {
        TextAlignment::Left => i64::from(rect.x),
        TextAlignment::Center => i64::from(rect.x) + slack / 2,
        TextAlignment::Right => i64::from(rect.x) + slack,
    };

    TextLayout {
        x: x as i32,
        y: rect.y,
        scale,
        width,
        height: mask.height.saturating_mul(scale),
    }
}

/// Compute where `text` lands inside `rect` without drawing it.
pub fn layout_text(text: &str, style: &TextStyle, rect: GRect) -> TextLayout {
    let mask = GlyphMask::render(text, style.font.mono_font());
    layout_mask(&mask, style, rect)
}

/// Draw a single-line text run into `bitmap`, clipped to `rect`.
pub fn draw_text(bitmap: &mut Bitmap, text: &str, style: &TextStyle, rect: GRect, color: GColor8) {
    if text.is_empty() {
        return;
    }
    let Some(clip) = bitmap.bounds().intersection(rect) else {
        return;
    };

    let mask = GlyphMask::render(text, style.font.mono_font());
    let layout = layout_mask(&mask, style, rect);
    let s = layout.scale;

    for my in 0..mask.height {
        for mx in 0..mask.width {
            if !mask.is_on(mx, my) {
                continue;
            }
            let bx = i64::from(layout.x) + i64::from(mx) * i64::from(s);
            let by = i64::from(layout.y) + i64::from(my) * i64::from(s);
            if bx >= clip.right() || by >= clip.bottom() {
                continue;
            }
            let block = GRect::new(bx as i32, by as i32, s, s);
            if let Some(visible) = clip.intersection(block) {
                bitmap.fill_rect(visible, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphics/text.rs"]
mod tests;
