use crate::{
    assets::sequence::{FrameSource, SequenceFactory},
    foundation::{
        core::{FrameDelay, MIN_TIMER_DELAY},
        error::WatchResult,
    },
    graphics::bitmap::Bitmap,
};

/// Where the scheduler is in its play/restart cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No sequence has been started, or playback was torn down.
    Idle,
    /// A pass is running; `frame_index` frames of it have been shown.
    Playing {
        /// Index of the next frame to decode.
        frame_index: u32,
    },
    /// The previous handle is gone and a new one is being created.
    Restarting,
}

/// What the host has to do after a timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A frame was decoded: mark the display dirty and re-arm after `delay`.
    Advanced {
        /// Frame number within the current pass (1-based count of frames shown).
        frame: u32,
        /// Delay reported by the decoder for this frame.
        delay: FrameDelay,
    },
    /// The pass ended and playback restarted at frame zero: re-arm after `delay`.
    Restarted {
        /// Frames shown by the pass that just ended.
        frames: u32,
        /// Priming delay for the first frame of the next pass.
        delay: FrameDelay,
    },
    /// Nothing is playing; arm nothing.
    Idle,
}

/// Drives a bitmap sequence one frame per timer tick and loops it forever.
///
/// The scheduler owns the decoder handle and the frame bitmap it decodes into. It
/// never talks to a timer itself: [`FrameScheduler::start_sequence`] and
/// [`FrameScheduler::on_timer_fire`] tell the caller what to arm.
pub struct FrameScheduler<F: SequenceFactory> {
    factory: F,
    source: Option<F::Source>,
    bitmap: Option<Bitmap>,
    frame_counter: u32,
    state: PlaybackState,
    passes: u64,
    prime_delay: FrameDelay,
}

impl<F: SequenceFactory> FrameScheduler<F> {
    /// Scheduler over `factory`, idle until the first [`FrameScheduler::start_sequence`].
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            source: None,
            bitmap: None,
            frame_counter: 0,
            state: PlaybackState::Idle,
            passes: 0,
            prime_delay: MIN_TIMER_DELAY,
        }
    }

    /// Override the delay used to prime each pass.
    pub fn with_prime_delay(mut self, delay: FrameDelay) -> Self {
        self.prime_delay = delay;
        self
    }

    /// Drop any current handle and bitmap, open a new pass and return the delay to arm.
    #[tracing::instrument(skip(self))]
    pub fn start_sequence(&mut self) -> WatchResult<FrameDelay> {
        if self.source.is_some() || self.bitmap.is_some() {
            self.state = PlaybackState::Restarting;
        }
        self.source = None;
        self.bitmap = None;

        let source = self.factory.create_sequence()?;
        let size = source.bitmap_size();
        self.bitmap = Some(Bitmap::new_blank(size));
        self.source = Some(source);
        self.frame_counter = 0;
        self.state = PlaybackState::Playing { frame_index: 0 };

        tracing::debug!(size = %size, "sequence started");
        Ok(self.prime_delay)
    }

    /// Advance one frame; on exhaustion log the pass length and restart.
    pub fn on_timer_fire(&mut self) -> WatchResult<Tick> {
        match self.state {
            PlaybackState::Idle => return Ok(Tick::Idle),
            PlaybackState::Restarting => {
                let delay = self.start_sequence()?;
                return Ok(Tick::Restarted { frames: 0, delay });
            }
            PlaybackState::Playing { .. } => {}
        }

        let decoded = match (self.source.as_mut(), self.bitmap.as_mut()) {
            (Some(source), Some(bitmap)) => source.update_bitmap_next_frame(bitmap),
            _ => Ok(None),
        };

        match decoded {
            Ok(Some(delay)) => {
                self.frame_counter += 1;
                self.state = PlaybackState::Playing {
                    frame_index: self.frame_counter,
                };
                tracing::debug!(frame = self.frame_counter, delay_ms = delay.0, "frame decoded");
                Ok(Tick::Advanced {
                    frame: self.frame_counter,
                    delay,
                })
            }
            Ok(None) => self.finish_pass(),
            Err(err) => {
                tracing::warn!(frame = self.frame_counter, error = %err, "frame decode failed; restarting");
                self.finish_pass()
            }
        }
    }

    fn finish_pass(&mut self) -> WatchResult<Tick> {
        let frames = self.frame_counter;
        tracing::info!(frames, "Frames: {frames}");
        self.frame_counter = 0;
        self.passes += 1;
        let delay = self.start_sequence()?;
        Ok(Tick::Restarted { frames, delay })
    }

    /// Release the handle and the frame bitmap and go idle.
    pub fn teardown(&mut self) {
        self.source = None;
        self.bitmap = None;
        self.frame_counter = 0;
        self.state = PlaybackState::Idle;
    }

    /// Most recently decoded frame, `None` while idle.
    pub fn frame(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Frames shown so far in the current pass.
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Passes completed since construction.
    pub fn passes_completed(&self) -> u64 {
        self.passes
    }

    /// True while a decoder handle is live.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
