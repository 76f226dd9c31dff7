//! Countdown engine.
//!
//! - `state`: pure session/break state machine
//! - `scheduler`: repeating tick sources
//! - `timer`: driver that runs effects and publishes events

pub mod scheduler;
pub mod state;
pub mod timer;

pub use scheduler::{IntervalScheduler, ManualScheduler, TickHandle, TickScheduler};
pub use state::{ClockState, Effect, Intent};
pub use timer::{TimerEngine, TimerEvent};
