use crate::app::{App, InputMode};
use crate::notify;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};
use tachyonfx::Duration as TachyonDuration;
use tempo_core::{format_time, Completion, Mode, StatusSnapshot};

pub fn draw(f: &mut Frame, app: &mut App) {
    let snap = StatusSnapshot::capture(&app.engine());
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(f, chunks[0], app, &snap);
    app.timer_area = chunks[1];
    draw_timer(f, chunks[1], app, &snap);
    draw_status_bar(f, chunks[2], app);

    match app.mode {
        InputMode::EditingTime => draw_input_overlay(f, app, &snap),
        InputMode::SelectingPreset => draw_preset_overlay(f, app),
        InputMode::Normal => {}
    }

    if snap.completion_pending {
        draw_completion_modal(f, app, &snap);
    }

    let elapsed: TachyonDuration = app.frame_elapsed().into();
    app.effect_manager
        .process_effects(elapsed, f.buffer_mut(), area);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, snap: &StatusSnapshot) {
    let theme = &app.config.theme;
    let icons = &app.config.icons;
    let mode_icon = match snap.mode {
        Mode::CountUp => &icons.mode_up,
        Mode::CountDown => &icons.mode_down,
    };
    let voice_icon = if app.voice_enabled {
        &icons.voice_on
    } else {
        &icons.voice_off
    };
    let text = Line::from(vec![
        Span::raw(icons.header_left.clone()),
        Span::styled(
            "TEMPO",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw(icons.header_right.clone()),
        Span::styled(
            format!(" {} {} ", mode_icon, mode_label(snap.mode)),
            Style::default().fg(theme.selection),
        ),
        Span::styled(format!(" {} ", voice_icon), Style::default().fg(theme.gray)),
    ]);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.black)),
        ),
        area,
    );
}

fn draw_timer(f: &mut Frame, area: Rect, app: &App, snap: &StatusSnapshot) {
    let theme = &app.config.theme;
    let icons = &app.config.icons;
    let state_icon = if snap.running {
        &icons.play
    } else if snap.status.ends_with("Complete!") {
        &icons.stop
    } else {
        &icons.pause
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} ", icons.timer, mode_label(snap.mode)),
            Style::default().fg(theme.gray),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.green));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    f.render_widget(
        Paragraph::new(format!("{} {}", state_icon, snap.formatted))
            .style(
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        v_chunks[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme.blue).bg(theme.black))
            .percent(snap.progress.clamp(0.0, 100.0) as u16),
        v_chunks[1],
    );

    let configured = match snap.mode {
        Mode::CountDown => format!("Duration: {}", format_time(snap.custom_countdown)),
        Mode::CountUp => format!("Target: {}", snap.target_display),
    };
    f.render_widget(
        Paragraph::new(configured)
            .style(Style::default().fg(theme.cyan))
            .alignment(Alignment::Center),
        v_chunks[2],
    );

    let mut status_spans = vec![Span::styled(
        format!("Status: {}", snap.status),
        Style::default().fg(theme.foreground),
    )];
    if let Some(at) = app.completed_at {
        status_spans.push(Span::styled(
            format!("  (at {})", at.format("%H:%M:%S")),
            Style::default().fg(theme.gray),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(status_spans)).alignment(Alignment::Center),
        v_chunks[3],
    );

    if let Some(callout) = &app.callout {
        f.render_widget(
            Paragraph::new(callout.clone())
                .style(
                    Style::default()
                        .fg(theme.yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center),
            v_chunks[4],
        );
    } else if let Some(error) = &snap.input_error {
        f.render_widget(
            Paragraph::new(error.clone())
                .style(Style::default().fg(theme.red))
                .alignment(Alignment::Center),
            v_chunks[4],
        );
    }
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.config.theme;
    let (mode_text, mode_color) = match app.mode {
        InputMode::Normal => ("NORMAL", theme.green),
        InputMode::EditingTime => ("TIME", theme.blue),
        InputMode::SelectingPreset => ("PRESET", theme.magenta),
    };
    let help = if app.mode == InputMode::Normal {
        "space:start/pause │ r:reset │ m:mode │ t:time │ p:preset │ v:voice │ q:quit"
    } else {
        "enter:confirm │ esc:cancel"
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", mode_text),
                Style::default()
                    .bg(mode_color)
                    .fg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(help),
        ]))
        .block(Block::default().style(Style::default().bg(theme.black).fg(theme.gray))),
        area,
    );
}

fn draw_input_overlay(f: &mut Frame, app: &App, snap: &StatusSnapshot) {
    let theme = &app.config.theme;
    let title = match snap.mode {
        Mode::CountDown => " Set Countdown (seconds or MM:SS) ",
        Mode::CountUp => " Set Target (seconds or MM:SS) ",
    };
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.yellow))
        .border_type(BorderType::Double)
        .style(Style::default().bg(theme.background));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(theme.foreground)),
            Span::styled(app.input_buffer.clone(), Style::default().fg(theme.foreground)),
            Span::styled(
                app.config.icons.input_cursor.clone(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ])),
        rows[0],
    );
    if let Some(error) = &snap.input_error {
        f.render_widget(
            Paragraph::new(error.clone()).style(Style::default().fg(theme.red)),
            rows[1],
        );
    }
}

fn draw_preset_overlay(f: &mut Frame, app: &App) {
    let theme = &app.config.theme;
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);
    let items: Vec<ListItem> = app
        .presets()
        .iter()
        .enumerate()
        .map(|(i, &seconds)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(theme.blue)),
                Span::raw(preset_label(seconds)),
                Span::styled(
                    format!(" ({})", format_time(seconds)),
                    Style::default().fg(theme.gray),
                ),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(
            Block::default()
                .title(" Select Preset ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(theme.magenta))
                .style(Style::default().bg(theme.background)),
        ),
        area,
    );
}

fn draw_completion_modal(f: &mut Frame, app: &App, snap: &StatusSnapshot) {
    let theme = &app.config.theme;
    let configured = match snap.mode {
        Mode::CountDown => snap.custom_countdown,
        Mode::CountUp => snap.count_up_target,
    };
    let (title, message) = notify::message_for(&Completion {
        mode: snap.mode,
        configured,
    });

    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection))
        .border_type(BorderType::Double)
        .style(Style::default().bg(theme.background));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner_area);
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(theme.foreground))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        rows[0],
    );
    f.render_widget(
        Paragraph::new("Press Enter to dismiss")
            .style(Style::default().fg(theme.gray))
            .alignment(Alignment::Center),
        rows[1],
    );
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::CountUp => "Count Up",
        Mode::CountDown => "Countdown",
    }
}

fn preset_label(seconds: u32) -> String {
    if seconds % 60 == 0 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}s", seconds)
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
