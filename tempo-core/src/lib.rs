//! Shared engine library for tempo and tempoctl.
//!
//! The timer itself is a plain state machine (`TimerEngine`) with
//! explicitly-invoked transitions - the host decides when a second has
//! elapsed and calls `tick()`. Everything the UI or the control socket
//! needs to render or mutate the timer goes through this crate.

pub mod engine;
pub mod input;
pub mod ipc;

pub use engine::{format_time, Completion, Mode, TimerEngine, COUNTDOWN_PRESETS, COUNT_UP_PRESETS};
pub use input::InputError;
pub use ipc::{Command, IpcError, Response, StatusSnapshot, SOCKET_PATH};
