//! maskface is an animated watchface for a 144x168 display with an 8-bit framebuffer.
//!
//! An APNG sequence is decoded one frame per timer tick and AND-merged, one machine
//! word at a time, into a band of rows on top of a freshly painted clock face. The
//! result is a silhouette punched out of the background rather than an alpha blend.
//!
//! # Pieces
//!
//! 1. **Decode**: [`ApngSequence`] streams frames from an [`AnimationResource`] into a
//!    caller-owned [`Bitmap`] and reports each frame's delay.
//! 2. **Schedule**: [`FrameScheduler`] advances one frame per tick, reports the delay to
//!    re-arm with, and restarts from frame zero when a pass is exhausted.
//! 3. **Composite**: [`Compositor`] fills the background, draws the clock text, then
//!    [`mask_rows`] merges the frame into the live framebuffer through a scoped
//!    [`FramebufferGuard`].
//! 4. **Host**: [`EventLoop`] plays the platform: one-shot timers, repaint requests and
//!    window lifecycle callbacks, dispatched serially on one thread.
//!
//! The display geometry and pixel format are fixed: see [`DISPLAY_SIZE`] and [`GColor8`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod app;
mod assets;
mod config;
mod foundation;
mod graphics;
mod playback;
mod render;
mod runtime;

pub use app::watchface::Watchface;
pub use assets::resource::{AnimationResource, ResourceStore, normalize_rel_path};
pub use assets::sequence::{
    ApngSequence, FrameSource, SequenceFactory, SequenceInfo, probe_sequence,
};
pub use config::face::{DEFAULT_ANIMATION_ID, FaceConfig};
pub use foundation::core::{
    DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, FrameDelay, GColor8, GRect, GSize,
    MIN_TIMER_DELAY, RowBand, WORD_BYTES,
};
pub use foundation::error::{WatchError, WatchResult};
pub use graphics::bitmap::Bitmap;
pub use graphics::context::{FramebufferGuard, GContext};
pub use graphics::text::{
    FontKey, MAX_TEXT_SCALE, TextAlignment, TextLayout, TextOverflowMode, TextStyle, draw_text,
    layout_text,
};
pub use playback::scheduler::{FrameScheduler, PlaybackState, Tick};
pub use render::compositor::Compositor;
pub use render::export::{DisplaySink, NullSink, PngSequenceSink};
pub use render::mask::mask_rows;
pub use runtime::clock::{Clock, ManualClock, SystemClock};
pub use runtime::event_loop::{EventLoop, RunSummary, StopWhen, WindowHandlers};
pub use runtime::host::{Host, TimerHandle, TimerQueue};
