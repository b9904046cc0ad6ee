use std::time::Duration;

use crate::{
    foundation::error::WatchResult,
    graphics::context::GContext,
    render::export::DisplaySink,
    runtime::{
        clock::Clock,
        host::{Host, TimerHandle, TimerQueue},
    },
};

/// Lifecycle callbacks a window registers with the event loop.
pub trait WindowHandlers {
    /// The window was pushed and is about to appear.
    fn load(&mut self, host: &mut dyn Host) -> WatchResult<()>;

    /// The window is going away; release everything acquired in `load`.
    fn unload(&mut self, host: &mut dyn Host);

    /// Repaint the window's layer into `ctx`.
    fn update(&mut self, ctx: &mut GContext) -> WatchResult<()>;

    /// A timer registered through `host` fired.
    fn timer_fired(&mut self, handle: TimerHandle, host: &mut dyn Host) -> WatchResult<()>;

    /// Completed animation passes, for [`StopWhen::Passes`].
    fn passes_completed(&self) -> u64 {
        0
    }
}

/// When [`EventLoop::run`] returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopWhen {
    /// After this many completed animation passes.
    Passes(u64),
    /// After this many repaints.
    Redraws(u64),
    /// Before dispatching a timer due later than this.
    Elapsed(Duration),
    /// Only when no timer is left.
    Never,
}

/// What happened during one [`EventLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Repaints presented to the sink.
    pub redraws: u64,
    /// Timer callbacks dispatched.
    pub timers_fired: u64,
    /// Animation passes completed.
    pub passes: u64,
    /// Loop time covered.
    pub elapsed: Duration,
}

impl StopWhen {
    fn reached(self, s: &RunSummary) -> bool {
        match self {
            StopWhen::Passes(n) => s.passes >= n,
            StopWhen::Redraws(n) => s.redraws >= n,
            StopWhen::Elapsed(d) => s.elapsed >= d,
            StopWhen::Never => false,
        }
    }
}

/// Single-threaded event loop dispatching repaints and timer callbacks serially.
///
/// A repaint requested by a callback is always presented before the next timer is
/// dispatched.
#[derive(Debug)]
pub struct EventLoop<C: Clock> {
    clock: C,
    timers: TimerQueue,
}

impl<C: Clock> EventLoop<C> {
    /// Loop driven by `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timers: TimerQueue::new(),
        }
    }

    /// Clock driving the loop.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Timers still armed (after `run` returns: timers the window did not cancel).
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Load `app`, pump callbacks until `stop`, then unload it.
    pub fn run(
        &mut self,
        app: &mut dyn WindowHandlers,
        ctx: &mut GContext,
        sink: &mut dyn DisplaySink,
        stop: StopWhen,
    ) -> WatchResult<RunSummary> {
        let started = self.clock.now();
        self.timers.advance_to(started);

        app.load(&mut self.timers)?;
        self.timers.mark_dirty();

        let result = self.pump(app, ctx, sink, stop, started);
        app.unload(&mut self.timers);

        if let Ok(summary) = &result {
            tracing::debug!(
                redraws = summary.redraws,
                timers = summary.timers_fired,
                passes = summary.passes,
                "event loop finished"
            );
        }
        result
    }

    fn pump(
        &mut self,
        app: &mut dyn WindowHandlers,
        ctx: &mut GContext,
        sink: &mut dyn DisplaySink,
        stop: StopWhen,
        started: Duration,
    ) -> WatchResult<RunSummary> {
        let mut summary = RunSummary::default();
        loop {
            let elapsed = self.timers.now().saturating_sub(started);
            if self.timers.take_dirty() {
                app.update(ctx)?;
                sink.present(ctx.framebuffer(), elapsed)?;
                summary.redraws += 1;
            }
            summary.passes = app.passes_completed();
            summary.elapsed = elapsed;
            if stop.reached(&summary) {
                return Ok(summary);
            }

            let Some(deadline) = self.timers.peek_deadline() else {
                tracing::debug!("no timer pending; leaving event loop");
                return Ok(summary);
            };
            if let StopWhen::Elapsed(limit) = stop
                && deadline.saturating_sub(started) > limit
            {
                summary.elapsed = limit;
                return Ok(summary);
            }
            let Some((handle, deadline)) = self.timers.pop_next() else {
                return Ok(summary);
            };

            self.clock.wait_until(deadline);
            self.timers.advance_to(deadline.max(self.clock.now()));
            app.timer_fired(handle, &mut self.timers)?;
            summary.timers_fired += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/event_loop.rs"]
mod tests;
