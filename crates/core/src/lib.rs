#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod time;
pub mod timer;

pub use navigation::Navigator;
pub use time::Clock;
pub use timer::{CountdownTimer, TickOutcome, TimerState};
