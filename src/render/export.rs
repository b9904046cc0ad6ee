use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;

use crate::{foundation::error::WatchResult, graphics::bitmap::Bitmap};

/// Receives every repainted framebuffer from the event loop.
pub trait DisplaySink {
    /// Scan out `framebuffer`, repainted at `at` after the loop started.
    fn present(&mut self, framebuffer: &Bitmap, at: Duration) -> WatchResult<()>;
}

/// Discards frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn present(&mut self, _framebuffer: &Bitmap, _at: Duration) -> WatchResult<()> {
        Ok(())
    }
}

/// Writes presented frames as `frame_00000.png`, `frame_00001.png`, ...
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
    limit: Option<u64>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created if needed.
    pub fn new(dir: impl Into<PathBuf>) -> WatchResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            written: 0,
            limit: None,
        })
    }

    /// Stop writing after `limit` frames (later frames are dropped).
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl DisplaySink for PngSequenceSink {
    fn present(&mut self, framebuffer: &Bitmap, at: Duration) -> WatchResult<()> {
        if self.limit.is_some_and(|limit| self.written >= limit) {
            return Ok(());
        }
        let path = self.dir.join(format!("frame_{:05}.png", self.written));
        let rgba = framebuffer.to_rgba8();
        image::save_buffer_with_format(
            &path,
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::trace!(path = %path.display(), at_ms = at.as_millis() as u64, "frame written");
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
