use crate::{
    assets::sequence::SequenceFactory,
    config::face::FaceConfig,
    foundation::{core::FrameDelay, error::WatchResult},
    graphics::context::GContext,
    playback::scheduler::{FrameScheduler, Tick},
    render::compositor::Compositor,
    runtime::{
        event_loop::WindowHandlers,
        host::{Host, TimerHandle},
    },
};

/// The watchface window: an animation masked into a clock face.
///
/// Exactly one timer is pending while the window is loaded. Unloading cancels it,
/// and a callback carrying any other handle is ignored, so nothing runs against a
/// torn-down sequence.
pub struct Watchface<F: SequenceFactory> {
    scheduler: FrameScheduler<F>,
    compositor: Compositor,
    pending: Option<TimerHandle>,
}

impl<F: SequenceFactory> Watchface<F> {
    /// Window playing sequences from `factory`, styled by `cfg`.
    pub fn new(factory: F, cfg: &FaceConfig) -> Self {
        Self {
            scheduler: FrameScheduler::new(factory)
                .with_prime_delay(FrameDelay(cfg.first_frame_delay_ms)),
            compositor: Compositor::new(cfg),
            pending: None,
        }
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &FrameScheduler<F> {
        &self.scheduler
    }

    /// Handle of the timer currently armed by this window.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    fn arm(&mut self, host: &mut dyn Host, delay: FrameDelay) {
        self.pending = Some(host.register_timer(delay));
    }
}

impl<F: SequenceFactory> WindowHandlers for Watchface<F> {
    fn load(&mut self, host: &mut dyn Host) -> WatchResult<()> {
        let delay = self.scheduler.start_sequence()?;
        self.arm(host, delay);
        Ok(())
    }

    fn unload(&mut self, host: &mut dyn Host) {
        if let Some(handle) = self.pending.take() {
            host.cancel_timer(handle);
        }
        self.scheduler.teardown();
    }

    fn update(&mut self, ctx: &mut GContext) -> WatchResult<()> {
        self.compositor.redraw(ctx, self.scheduler.frame())
    }

    fn timer_fired(&mut self, handle: TimerHandle, host: &mut dyn Host) -> WatchResult<()> {
        if self.pending != Some(handle) {
            tracing::debug!(timer = handle.0, "ignoring stale timer");
            return Ok(());
        }
        self.pending = None;

        match self.scheduler.on_timer_fire()? {
            Tick::Advanced { delay, .. } => {
                host.mark_dirty();
                self.arm(host, delay);
            }
            Tick::Restarted { delay, .. } => self.arm(host, delay),
            Tick::Idle => {}
        }
        Ok(())
    }

    fn passes_completed(&self) -> u64 {
        self.scheduler.passes_completed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/watchface.rs"]
mod tests;
