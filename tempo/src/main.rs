use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::{Arc, Mutex};
use tempo_core::TimerEngine;
use tracing::info;

mod app;
mod config;
mod ipc;
mod notify;
mod scheduler;
mod ui;

use app::{App, InputMode};

fn main() -> Result<()> {
    init_logging()?;

    let config = config::load_config()?;
    let engine = Arc::new(Mutex::new(TimerEngine::new()));
    ipc::server::spawn(engine.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(engine, config);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// The terminal owns stdout while the TUI runs, so logs go to a file under
/// the platform data directory.
fn init_logging() -> Result<()> {
    let Some(proj_dirs) = ProjectDirs::from("com", "tempo", "Tempo") else {
        return Ok(());
    };
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory at {:?}", data_dir))?;
    let log_file = std::fs::File::create(data_dir.join("tempo.log"))
        .with_context(|| "Failed to create log file")?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    info!("tempo starting");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.on_loop();

        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // an open completion modal takes the keyboard first
                    if app.engine().completion_pending()
                        && matches!(key.code, KeyCode::Enter | KeyCode::Esc)
                    {
                        app.acknowledge_completion();
                        continue;
                    }
                    match app.mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => return Ok(()),
                            KeyCode::Char(' ') => app.toggle_run(),
                            KeyCode::Char('r') => app.reset_timer(),
                            KeyCode::Char('m') | KeyCode::Tab => app.switch_mode(),
                            KeyCode::Char('t') => app.begin_time_edit(),
                            KeyCode::Char('p') => app.begin_preset_select(),
                            KeyCode::Char('v') => app.toggle_voice(),
                            _ => {}
                        },
                        InputMode::EditingTime => match key.code {
                            KeyCode::Esc => app.cancel_input(),
                            KeyCode::Enter => app.handle_char('\n'),
                            KeyCode::Backspace => app.handle_backspace(),
                            KeyCode::Char(c) => app.handle_char(c),
                            _ => {}
                        },
                        InputMode::SelectingPreset => match key.code {
                            KeyCode::Esc => app.cancel_input(),
                            KeyCode::Char(c) if c.is_numeric() => app.handle_char(c),
                            _ => {}
                        },
                    }
                }
            }
        }
    }
}
