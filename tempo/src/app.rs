use crate::config::Config;
use crate::notify::Notifier;
use crate::scheduler::TickScheduler;
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tachyonfx::{fx, EffectManager, Motion};
use tempo_core::{Mode, TimerEngine, COUNTDOWN_PRESETS, COUNT_UP_PRESETS};
use tracing::info;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Default, Clone, PartialEq, Debug)]
pub enum InputMode {
    #[default]
    Normal,
    EditingTime,
    SelectingPreset,
}

pub struct App {
    pub engine: Arc<Mutex<TimerEngine>>,
    pub mode: InputMode,
    pub input_buffer: String,
    pub config: Config,
    pub voice_enabled: bool,
    pub callout: Option<String>,
    pub completed_at: Option<DateTime<Local>>,
    pub effect_manager: EffectManager<u32>,
    pub timer_area: Rect,
    scheduler: TickScheduler,
    notifier: Notifier,
    last_frame: Instant,
}

impl App {
    pub fn new(engine: Arc<Mutex<TimerEngine>>, config: Config) -> Self {
        let voice_enabled = config.timer.voice;
        Self {
            engine,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            config,
            voice_enabled,
            callout: None,
            completed_at: None,
            effect_manager: EffectManager::default(),
            timer_area: Rect::default(),
            scheduler: TickScheduler::new(TICK_PERIOD),
            notifier: Notifier,
            last_frame: Instant::now(),
        }
    }

    pub fn engine(&self) -> MutexGuard<'_, TimerEngine> {
        // a poisoned lock still holds consistent engine state; keep going
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// One pass of host-side bookkeeping: align the scheduler with the
    /// engine (control-socket mutations included), deliver a due tick,
    /// drain the completion event, refresh the voice callout.
    pub fn on_loop(&mut self) {
        let running = self.engine().is_running();
        if running {
            self.scheduler.start();
        } else {
            self.scheduler.stop();
        }

        if self.scheduler.poll() {
            self.engine().tick();
        }

        let event = self.engine().take_completion();
        if let Some(event) = event {
            info!("timer completed: {:?}", event);
            self.completed_at = Some(Local::now());
            self.notifier.completion(&event);
            let area = self.timer_area;
            self.trigger_complete_effect(area);
        }

        self.update_callout();
    }

    pub fn toggle_run(&mut self) {
        let mut engine = self.engine();
        if engine.is_running() {
            engine.pause();
        } else {
            engine.start();
        }
    }

    pub fn reset_timer(&mut self) {
        self.engine().reset();
    }

    pub fn switch_mode(&mut self) {
        let next = match self.engine().mode() {
            Mode::CountUp => Mode::CountDown,
            Mode::CountDown => Mode::CountUp,
        };
        self.engine().switch_mode(next);
        let area = self.timer_area;
        self.trigger_mode_change_effect(area);
    }

    pub fn toggle_voice(&mut self) {
        self.voice_enabled = !self.voice_enabled;
        if !self.voice_enabled {
            self.callout = None;
        }
    }

    pub fn acknowledge_completion(&mut self) {
        self.engine().acknowledge_completion();
        self.callout = None;
    }

    pub fn begin_time_edit(&mut self) {
        self.mode = InputMode::EditingTime;
        self.input_buffer.clear();
    }

    pub fn begin_preset_select(&mut self) {
        self.mode = InputMode::SelectingPreset;
    }

    pub fn cancel_input(&mut self) {
        self.mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Presets offered for the engine's current direction.
    pub fn presets(&self) -> &'static [u32] {
        match self.engine().mode() {
            Mode::CountDown => &COUNTDOWN_PRESETS,
            Mode::CountUp => &COUNT_UP_PRESETS,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        match self.mode {
            InputMode::EditingTime => {
                if c == '\n' {
                    self.submit_time_input();
                } else if c.is_ascii_digit() || c == ':' {
                    self.input_buffer.push(c);
                }
            }
            InputMode::SelectingPreset => {
                if let Some(index) = c.to_digit(10) {
                    let presets = self.presets();
                    if index >= 1 && (index as usize) <= presets.len() {
                        let seconds = presets[index as usize - 1];
                        self.engine().apply_preset(seconds);
                        self.mode = InputMode::Normal;
                    }
                }
            }
            InputMode::Normal => {}
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.mode == InputMode::EditingTime {
            self.input_buffer.pop();
        }
    }

    /// Validates and commits the typed duration/target. On rejection the
    /// overlay stays open with the engine's message on display.
    pub fn submit_time_input(&mut self) {
        let accepted = {
            let mut engine = self.engine();
            match engine.mode() {
                Mode::CountDown => {
                    let ok = engine.set_custom_countdown(&self.input_buffer).is_ok();
                    if ok {
                        engine.commit_countdown();
                    }
                    ok
                }
                Mode::CountUp => {
                    let ok = engine.set_count_up_target(&self.input_buffer).is_ok();
                    if ok {
                        engine.commit_count_up_target();
                    }
                    ok
                }
            }
        };
        if accepted {
            self.input_buffer.clear();
            self.mode = InputMode::Normal;
        }
    }

    fn update_callout(&mut self) {
        if !self.voice_enabled {
            return;
        }
        let (mode, remaining, running, pending) = {
            let engine = self.engine();
            (
                engine.mode(),
                engine.countdown_time(),
                engine.is_running(),
                engine.completion_pending(),
            )
        };
        if mode != Mode::CountDown {
            self.callout = None;
        } else if pending && remaining == 0 {
            self.callout = Some("Time's up!".to_string());
        } else if running && (1..=10).contains(&remaining) {
            self.callout = Some(remaining.to_string());
        } else if !pending {
            self.callout = None;
        }
    }

    /// Time since the previous frame, for effect playback.
    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;
        elapsed
    }

    pub fn trigger_mode_change_effect(&mut self, area: Rect) {
        let effect = fx::slide_in(Motion::LeftToRight, 8, 4, self.config.theme.selection, 300)
            .with_area(area);
        self.effect_manager.add_effect(effect);
    }

    pub fn trigger_complete_effect(&mut self, area: Rect) {
        let effect = fx::fade_to_fg(self.config.theme.green, 500).with_area(area);
        self.effect_manager.add_effect(effect);
    }
}
