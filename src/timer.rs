mod config;
mod timers;

pub use config::TimerConfig;
pub use timers::{Timer, TimerExt, TimerId, TimerState};
