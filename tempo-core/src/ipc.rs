//! Inter-process communication between tempo and tempoctl.
//!
//! We use Unix domain sockets for local IPC - they're fast, secure,
//! and perfect for this use case. One line-delimited JSON command per
//! connection, one JSON response back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{format_time, Mode, TimerEngine};

/// Commands that tempoctl can send to tempo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    Reset,
    SwitchMode { mode: Mode },
    /// Raw text on purpose: validation (and its messages) belongs to the
    /// engine, not the CLI.
    SetCountdown { value: String },
    SetTarget { value: String },
    Preset { seconds: u32 },
    Acknowledge,
    Status,
}

/// Responses from tempo back to tempoctl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Ok,
    Status(StatusSnapshot),
    Error(String),
}

/// Point-in-time copy of everything the engine exposes to readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub running: bool,
    pub display: u32,
    pub formatted: String,
    pub status: String,
    pub progress: f64,
    pub custom_countdown: u32,
    pub count_up_target: u32,
    pub target_display: String,
    pub completion_pending: bool,
    pub input_error: Option<String>,
}

impl StatusSnapshot {
    pub fn capture(engine: &TimerEngine) -> Self {
        Self {
            mode: engine.mode(),
            running: engine.is_running(),
            display: engine.display_value(),
            formatted: format_time(engine.display_value()),
            status: engine.status_text().to_string(),
            progress: engine.progress_percentage(),
            custom_countdown: engine.custom_countdown(),
            count_up_target: engine.count_up_target(),
            target_display: engine.count_up_target_display(),
            completion_pending: engine.completion_pending(),
            input_error: engine.input_error().map(|e| e.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Connection refused - is tempo running?")]
    ConnectionRefused,
}

pub const SOCKET_PATH: &str = "/tmp/tempo.sock";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_mirrors_the_engine() {
        let mut engine = TimerEngine::new();
        engine.switch_mode(Mode::CountDown);
        engine.set_custom_countdown("90").expect("valid");
        engine.commit_countdown();
        engine.start();
        engine.tick();

        let snap = StatusSnapshot::capture(&engine);
        assert_eq!(snap.display, 89);
        assert_eq!(snap.formatted, "01:29");
        assert_eq!(snap.status, "Running");
        assert!(snap.running);
        assert!(snap.input_error.is_none());
    }

    #[test]
    fn snapshot_carries_validation_errors() {
        let mut engine = TimerEngine::new();
        let _ = engine.set_count_up_target("over 9000");
        let snap = StatusSnapshot::capture(&engine);
        assert_eq!(
            snap.input_error.as_deref(),
            Some("Please enter a valid number")
        );
    }
}
