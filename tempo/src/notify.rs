//! Completion notification sink. Consumes the engine's one-shot event and
//! raises a desktop notification; failures are logged, never fatal.

use tempo_core::{Completion, Mode};
use tracing::warn;

pub struct Notifier;

impl Notifier {
    pub fn completion(&self, event: &Completion) {
        let (title, body) = message_for(event);
        if let Err(e) = notify_rust::Notification::new()
            .summary(&title)
            .body(&body)
            .appname("tempo")
            .show()
        {
            warn!("Failed to send notification: {}", e);
        }
    }
}

/// Title and body for a completion, shared by the desktop notification
/// and the in-app modal.
pub fn message_for(event: &Completion) -> (String, String) {
    match event.mode {
        Mode::CountDown => (
            "⏰ Countdown Complete!".to_string(),
            format!(
                "Your {}-second countdown has finished. Time is up!",
                event.configured
            ),
        ),
        Mode::CountUp => (
            "⏰ Count Up Complete!".to_string(),
            format!(
                "You reached your target of {} seconds. Well done!",
                event.configured
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_message_names_the_duration() {
        let (title, body) = message_for(&Completion {
            mode: Mode::CountDown,
            configured: 30,
        });
        assert_eq!(title, "⏰ Countdown Complete!");
        assert_eq!(body, "Your 30-second countdown has finished. Time is up!");
    }

    #[test]
    fn count_up_message_names_the_target() {
        let (_, body) = message_for(&Completion {
            mode: Mode::CountUp,
            configured: 100,
        });
        assert!(body.contains("100"));
    }
}
