pub mod clock;
pub mod event_loop;
pub mod host;
