use crate::foundation::{
    core::{GColor8, GRect, GSize},
    error::{WatchError, WatchResult},
};

/// Owned 8-bit-per-pixel bitmap in [`GColor8`] format.
///
/// Rows are stored top to bottom with `row_stride == width`, so two bitmaps of the
/// same width share their memory layout. Both the decoded animation frame and the
/// live display framebuffer use this type.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: GSize,
    row_stride: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a bitmap with every pixel set to [`GColor8::CLEAR`].
    pub fn new_blank(size: GSize) -> Self {
        Self::filled(size, GColor8::CLEAR)
    }

    /// Allocate a bitmap with every pixel set to `color`.
    pub fn filled(size: GSize, color: GColor8) -> Self {
        Self {
            size,
            row_stride: size.w as usize,
            data: vec![color.0; size.area()],
        }
    }

    /// Wrap raw pixel bytes; `data` must hold exactly `size.w * size.h` bytes.
    pub fn from_raw(size: GSize, data: Vec<u8>) -> WatchResult<Self> {
        if data.len() != size.area() {
            return Err(WatchError::geometry(format!(
                "bitmap {size} needs {} bytes, got {}",
                size.area(),
                data.len()
            )));
        }
        Ok(Self {
            size,
            row_stride: size.w as usize,
            data,
        })
    }

    /// Pixel dimensions.
    pub fn size(&self) -> GSize {
        self.size
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Rectangle at the origin covering the whole bitmap.
    pub fn bounds(&self) -> GRect {
        GRect::from_size(self.size)
    }

    /// Raw row-major pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw row-major pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read one pixel, `None` outside the bitmap.
    pub fn pixel(&self, x: i32, y: i32) -> Option<GColor8> {
        self.index_of(x, y).map(|i| GColor8(self.data[i]))
    }

    /// Write one pixel; writes outside the bitmap are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: GColor8) {
        if let Some(i) = self.index_of(x, y) {
            self.data[i] = color.0;
        }
    }

    /// Fill `rect` clipped to the bitmap bounds.
    pub fn fill_rect(&mut self, rect: GRect, color: GColor8) {
        let Some(clip) = self.bounds().intersection(rect) else {
            return;
        };
        let x0 = clip.x as usize;
        let x1 = x0 + clip.w as usize;
        for y in clip.y as usize..clip.bottom() as usize {
            let row = y * self.row_stride;
            self.data[row + x0..row + x1].fill(color.0);
        }
    }

    /// Quantise a straight-alpha RGBA frame of exactly this bitmap's size into it.
    pub fn write_rgba_frame(&mut self, frame: &image::RgbaImage) -> WatchResult<()> {
        let (w, h) = frame.dimensions();
        if GSize::new(w, h) != self.size {
            return Err(WatchError::geometry(format!(
                "frame {w}x{h} does not fit bitmap {}",
                self.size
            )));
        }
        for (dst, px) in self.data.iter_mut().zip(frame.pixels()) {
            let [r, g, b, a] = px.0;
            *dst = GColor8::from_rgba(r, g, b, a).0;
        }
        Ok(())
    }

    /// Expand to an opaque RGBA image (the display ignores alpha when scanning out).
    pub fn to_rgba8(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.size.w, self.size.h, |x, y| {
            let i = y as usize * self.row_stride + x as usize;
            let [r, g, b, _] = GColor8(self.data[i]).to_rgba();
            image::Rgba([r, g, b, 255])
        })
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.w || y as u32 >= self.size.h {
            return None;
        }
        Some(y as usize * self.row_stride + x as usize)
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .field("row_stride", &self.row_stride)
            .field("data_len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphics/bitmap.rs"]
mod tests;
