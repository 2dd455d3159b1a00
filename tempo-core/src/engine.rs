//! The timer state machine.
//!
//! One engine instance owns all timer state. The host drives it: a tick
//! scheduler calls [`TimerEngine::tick`] once per elapsed second while the
//! engine reports itself running, and user actions map onto the other
//! operations. Completion is edge-triggered - entering the completed state
//! queues exactly one [`Completion`] event, drained with
//! [`TimerEngine::take_completion`], no matter how often the state is
//! re-read afterwards.

use serde::{Deserialize, Serialize};

use crate::input::{self, InputError};

/// Countdown presets offered in the UI, in seconds (1/5/30 min).
pub const COUNTDOWN_PRESETS: [u32; 3] = [60, 300, 1800];

/// Count-up target presets, in seconds (1/5/15/30/60/120 min).
pub const COUNT_UP_PRESETS: [u32; 6] = [60, 300, 900, 1800, 3600, 7200];

/// Direction the timer counts in. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    CountUp,
    CountDown,
}

/// Payload of the one-shot completion event: which mode finished and the
/// configured value relevant for message formatting (countdown duration or
/// count-up target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub mode: Mode,
    pub configured: u32,
}

/// `MM:SS`, both components zero-padded; minutes are not wrapped at 60.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub struct TimerEngine {
    mode: Mode,
    running: bool,
    count: u32,
    countdown_time: u32,
    custom_countdown: u32,
    count_up_target: u32,
    completion_pending: bool,
    input_error: Option<InputError>,
    // edge tracking for the one-shot completion event
    was_complete: bool,
    pending_event: Option<Completion>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            mode: Mode::CountUp,
            running: false,
            count: 0,
            countdown_time: 30,
            custom_countdown: 30,
            count_up_target: 100,
            completion_pending: false,
            input_error: None,
            was_complete: false,
            pending_event: None,
        }
    }

    // --- read accessors ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn countdown_time(&self) -> u32 {
        self.countdown_time
    }

    pub fn custom_countdown(&self) -> u32 {
        self.custom_countdown
    }

    pub fn count_up_target(&self) -> u32 {
        self.count_up_target
    }

    pub fn completion_pending(&self) -> bool {
        self.completion_pending
    }

    pub fn input_error(&self) -> Option<&InputError> {
        self.input_error.as_ref()
    }

    /// Whether `start()` would currently be accepted. A countdown sitting
    /// at zero cannot be restarted until it is reset or re-based.
    pub fn can_start(&self) -> bool {
        !(self.mode == Mode::CountDown && self.countdown_time == 0)
    }

    // --- operations ---

    /// Begins (or resumes) the run. No-op when already running or when the
    /// countdown has already reached zero.
    pub fn start(&mut self) {
        if self.running || !self.can_start() {
            return;
        }
        self.running = true;
        self.sync_completion();
    }

    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.sync_completion();
    }

    /// Stops the run and rewinds the active counter. Configured duration,
    /// target and mode are untouched.
    pub fn reset(&mut self) {
        self.running = false;
        match self.mode {
            Mode::CountUp => self.count = 0,
            Mode::CountDown => self.countdown_time = self.custom_countdown,
        }
        self.sync_completion();
    }

    /// Switches the counting direction. Always forces a pause and rewinds
    /// the counter belonging to the new mode.
    pub fn switch_mode(&mut self, new_mode: Mode) {
        self.running = false;
        self.mode = new_mode;
        match new_mode {
            Mode::CountUp => self.count = 0,
            Mode::CountDown => self.countdown_time = self.custom_countdown,
        }
        self.sync_completion();
    }

    /// Advances the active counter by one second. Ticks delivered while
    /// paused are ignored. The countdown auto-stops on reaching zero; the
    /// count-up auto-stops on the tick that lands exactly on a set target
    /// (later ticks past the target, after a manual restart, keep going).
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        match self.mode {
            Mode::CountUp => {
                self.count += 1;
                if self.count_up_target > 0 && self.count == self.count_up_target {
                    self.running = false;
                }
            }
            Mode::CountDown => {
                if self.countdown_time <= 1 {
                    self.countdown_time = 0;
                    self.running = false;
                } else {
                    self.countdown_time -= 1;
                }
            }
        }
        self.sync_completion();
    }

    /// Validates and stores a pending countdown duration. The live
    /// `countdown_time` is only re-based by [`commit_countdown`].
    ///
    /// [`commit_countdown`]: TimerEngine::commit_countdown
    pub fn set_custom_countdown(&mut self, raw: &str) -> Result<u32, InputError> {
        match input::parse_seconds(raw) {
            Ok(seconds) => {
                self.custom_countdown = seconds;
                self.input_error = None;
                Ok(seconds)
            }
            Err(err) => {
                self.input_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Validates and stores a pending count-up target. Committed by
    /// [`commit_count_up_target`].
    ///
    /// [`commit_count_up_target`]: TimerEngine::commit_count_up_target
    pub fn set_count_up_target(&mut self, raw: &str) -> Result<u32, InputError> {
        match input::parse_seconds(raw) {
            Ok(seconds) => {
                self.count_up_target = seconds;
                self.input_error = None;
                Ok(seconds)
            }
            Err(err) => {
                self.input_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Re-bases the live countdown to the stored duration and pauses.
    pub fn commit_countdown(&mut self) {
        self.running = false;
        self.countdown_time = self.custom_countdown;
        self.input_error = None;
        self.sync_completion();
    }

    /// Commits the stored target without rewinding the elapsed count, and
    /// pauses. If the count already meets the new target this completes.
    pub fn commit_count_up_target(&mut self) {
        self.running = false;
        self.input_error = None;
        self.sync_completion();
    }

    /// Applies a pre-vetted preset, skipping validation. In countdown mode
    /// both the stored duration and the live countdown are re-based (a
    /// running countdown keeps running from the new value); in count-up
    /// mode the target is replaced and the count rewound.
    pub fn apply_preset(&mut self, seconds: u32) {
        match self.mode {
            Mode::CountDown => {
                self.custom_countdown = seconds;
                self.countdown_time = seconds;
            }
            Mode::CountUp => {
                self.count_up_target = seconds;
                self.count = 0;
                self.running = false;
            }
        }
        self.input_error = None;
        self.sync_completion();
    }

    /// Acknowledges a completion the user has seen. Clears the pending
    /// flag only; the counters stay where they finished.
    pub fn acknowledge_completion(&mut self) {
        self.completion_pending = false;
    }

    /// Drains the one-shot completion event, if a transition into the
    /// completed state queued one since the last call.
    pub fn take_completion(&mut self) -> Option<Completion> {
        self.pending_event.take()
    }

    // --- derived values ---

    /// The number the display shows: remaining seconds counting down,
    /// elapsed seconds counting up.
    pub fn display_value(&self) -> u32 {
        match self.mode {
            Mode::CountDown => self.countdown_time,
            Mode::CountUp => self.count,
        }
    }

    /// Progress in percent. Count-up with no target reports 0; count-up
    /// past its target saturates at 100.
    pub fn progress_percentage(&self) -> f64 {
        match self.mode {
            Mode::CountUp => {
                if self.count_up_target == 0 {
                    0.0
                } else {
                    (self.count as f64 / self.count_up_target as f64 * 100.0).min(100.0)
                }
            }
            Mode::CountDown => {
                if self.custom_countdown == 0 {
                    0.0
                } else {
                    (self.custom_countdown - self.countdown_time) as f64
                        / self.custom_countdown as f64
                        * 100.0
                }
            }
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.mode == Mode::CountDown && self.countdown_time == 0 {
            return "Countdown Complete!";
        }
        if self.mode == Mode::CountUp && self.count_up_target > 0 && self.count >= self.count_up_target
        {
            return "Count Up Complete!";
        }
        if self.running {
            "Running"
        } else {
            "Paused"
        }
    }

    pub fn count_up_target_display(&self) -> String {
        if self.count_up_target == 0 {
            "No target set".to_string()
        } else {
            format_time(self.count_up_target)
        }
    }

    // --- completion state machine ---

    fn is_complete(&self) -> bool {
        match self.mode {
            Mode::CountDown => self.countdown_time == 0 && !self.running,
            Mode::CountUp => {
                self.count_up_target > 0 && self.count >= self.count_up_target && !self.running
            }
        }
    }

    /// Re-evaluates the completed state after a mutation. Only the rising
    /// edge queues an event and raises the pending flag.
    fn sync_completion(&mut self) {
        let complete = self.is_complete();
        if complete && !self.was_complete {
            self.completion_pending = true;
            let configured = match self.mode {
                Mode::CountDown => self.custom_countdown,
                Mode::CountUp => self.count_up_target,
            };
            self.pending_event = Some(Completion {
                mode: self.mode,
                configured,
            });
        }
        self.was_complete = complete;
    }
}
