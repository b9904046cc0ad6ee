use std::{fmt, time::Duration};

use crate::foundation::error::{WatchError, WatchResult};

/// Horizontal resolution of the display in pixels.
pub const DISPLAY_WIDTH: u32 = 144;
/// Vertical resolution of the display in pixels.
pub const DISPLAY_HEIGHT: u32 = 168;
/// Full display size.
pub const DISPLAY_SIZE: GSize = GSize {
    w: DISPLAY_WIDTH,
    h: DISPLAY_HEIGHT,
};
/// Machine word used by the masking merge, in bytes (one byte per pixel).
pub const WORD_BYTES: usize = std::mem::size_of::<u64>();
/// Delay used to prime the first frame of a pass.
pub const MIN_TIMER_DELAY: FrameDelay = FrameDelay(1);

/// Size in pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GSize {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl GSize {
    /// Build a size from width and height.
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }
}

impl fmt::Display for GSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Axis-aligned rectangle with a signed origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl GRect {
    /// Build a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the origin covering `size`.
    pub const fn from_size(size: GSize) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    /// True when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Overlap of two rectangles, `None` when they do not touch.
    pub fn intersection(self, other: GRect) -> Option<GRect> {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(GRect {
            x: x0 as i32,
            y: y0 as i32,
            w: (x1 - x0) as u32,
            h: (y1 - y0) as u32,
        })
    }
}

/// 8-bit ARGB2222 colour (`0bAARRGGBB`), the only pixel format of the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GColor8(pub u8);

impl GColor8 {
    /// Fully transparent black.
    pub const CLEAR: GColor8 = GColor8(0x00);
    /// Opaque black.
    pub const BLACK: GColor8 = GColor8(0xC0);
    /// Opaque white.
    pub const WHITE: GColor8 = GColor8(0xFF);

    /// Quantise straight 8-bit RGBA to two bits per channel.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a >> 6) << 6) | ((r >> 6) << 4) | ((g >> 6) << 2) | (b >> 6))
    }

    /// Two-bit alpha channel.
    pub fn alpha(self) -> u8 {
        self.0 >> 6
    }

    /// Expand back to 8-bit RGBA.
    pub fn to_rgba(self) -> [u8; 4] {
        let expand = |shift: u8| ((self.0 >> shift) & 0b11) * 85;
        [expand(4), expand(2), expand(0), expand(6)]
    }

    /// Parse `black`, `white`, `clear`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse(s: &str) -> WatchResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "clear" => return Ok(Self::CLEAR),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| WatchError::validation(format!("unknown colour '{s}'")))?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(WatchError::validation(format!(
                "colour '{s}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| WatchError::validation(format!("colour '{s}' is not hex")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for GColor8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl TryFrom<String> for GColor8 {
    type Error = WatchError;

    fn try_from(value: String) -> WatchResult<Self> {
        Self::parse(&value)
    }
}

impl From<GColor8> for String {
    fn from(value: GColor8) -> Self {
        value.to_string()
    }
}

/// Time to wait before decoding the next frame, in milliseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameDelay(pub u32);

impl FrameDelay {
    /// Delay as a [`Duration`].
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

/// Half-open range of display rows `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowBand {
    /// First row included.
    pub start: u32,
    /// First row excluded.
    pub end: u32, // exclusive
}

impl RowBand {
    /// Build a row band, rejecting empty or inverted ranges.
    pub fn new(start: u32, end: u32) -> WatchResult<Self> {
        if start >= end {
            return Err(WatchError::validation("RowBand start must be < end"));
        }
        Ok(Self { start, end })
    }

    /// Number of rows covered.
    pub fn len_rows(self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl Default for RowBand {
    fn default() -> Self {
        Self { start: 50, end: 100 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
