//! End-to-end runs through the public engine API, covering a full count-up
//! session and a full configure-and-run countdown session.

use tempo_core::{format_time, Mode, TimerEngine};

#[test]
fn count_up_session_reaches_default_target() {
    let mut engine = TimerEngine::new();
    assert_eq!(engine.mode(), Mode::CountUp);
    assert_eq!(engine.count_up_target(), 100);

    engine.start();
    let mut completions = 0;
    for _ in 0..100 {
        engine.tick();
        if engine.take_completion().is_some() {
            completions += 1;
        }
    }

    assert_eq!(engine.count(), 100);
    assert_eq!(completions, 1);
    assert_eq!(engine.status_text(), "Count Up Complete!");
    assert_eq!(engine.progress_percentage(), 100.0);
    assert!(engine.completion_pending());

    engine.acknowledge_completion();
    assert!(!engine.completion_pending());
}

#[test]
fn countdown_session_from_configuration_to_zero() {
    let mut engine = TimerEngine::new();
    engine.switch_mode(Mode::CountDown);
    engine.set_custom_countdown("5").expect("valid duration");
    engine.commit_countdown();
    assert_eq!(engine.countdown_time(), 5);
    assert!(!engine.is_running());

    engine.start();
    let mut completions = 0;
    for _ in 0..5 {
        engine.tick();
        if engine.take_completion().is_some() {
            completions += 1;
        }
    }

    assert_eq!(engine.countdown_time(), 0);
    assert!(!engine.is_running());
    assert_eq!(completions, 1);
    assert_eq!(engine.status_text(), "Countdown Complete!");
    assert_eq!(format_time(engine.display_value()), "00:00");

    // stray ticks after auto-stop change nothing and fire nothing
    engine.tick();
    assert_eq!(engine.countdown_time(), 0);
    assert!(engine.take_completion().is_none());
}
