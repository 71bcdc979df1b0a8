//! Screen drawing

use std::time::Instant;

use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Sparkline, Wrap},
    Frame,
};

use crate::core::types::TimestampMs;
use crate::history::HistoryEntry;
use crate::round::{AdvanceAction, SLOTS};
use crate::session::Screen;
use crate::ui::{styled_block, App, LogCategory, Theme};

const HELP_GAME: &str = "1-9 pick | z/x clear slot | Space skip | Tab history | q menu";

pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    match app.controller.screen() {
        Screen::Menu => render_menu(frame, app),
        Screen::Game => render_game(frame, app, now),
        Screen::End => render_end(frame, app),
    }
}

fn render_menu(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let all_time = app.history.all_time();
    let lines = vec![
        Line::from(Span::styled(
            "FORGE DRILL",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Name the two components that craft each item."),
        Line::from(format!(
            "{} components, {} recipes, {} answers on record",
            app.controller.engine().catalog().component_count(),
            app.controller.engine().catalog().recipes().len(),
            all_time.len()
        )),
        Line::from(""),
        Line::from(Span::styled("Enter to start, q to quit", Style::default().fg(theme.muted))),
    ];
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(styled_block("Menu", theme));
    frame.render_widget(menu, centered(frame.size(), 60, 10));
}

fn render_end(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let player = app.controller.player();
    let summary = app.controller.summary(&app.history);
    let lines = vec![
        Line::from(Span::styled(
            "OUT OF LIVES",
            Style::default().fg(theme.alert).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final score: {}", player.score)),
        Line::from(format!("Best streak: {}", player.best_streak)),
        Line::from(format!(
            "{}: {}/{} correct ({:.0}%)",
            app.controller.view().label(),
            summary.correct,
            summary.total,
            summary.accuracy
        )),
        Line::from(""),
        Line::from(Span::styled("Enter to retry, q to quit", Style::default().fg(theme.muted))),
    ];
    let end = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(styled_block("Game over", theme));
    frame.render_widget(end, centered(frame.size(), 50, 11));
}

fn render_game(frame: &mut Frame, app: &App, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(1)])
        .split(frame.size());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_header(frame, app, rows[0]);
    render_board(frame, app, columns[0], now);
    render_stats(frame, app, columns[1]);

    let help = Paragraph::new(HELP_GAME).style(Style::default().fg(app.theme.muted));
    frame.render_widget(help, rows[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let player = app.controller.player();
    let hearts = "♥".repeat(player.lives as usize);
    let line = Line::from(vec![
        Span::styled(format!(" Round {} ", app.controller.engine().round_number()), Style::default().fg(theme.muted)),
        Span::raw("| "),
        Span::styled(format!("Score {} ", player.score), Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
        Span::raw("| "),
        Span::styled(format!("Streak {} ", player.streak), Style::default().fg(theme.warning)),
        Span::raw("| "),
        Span::styled(hearts, Style::default().fg(theme.alert)),
    ]);
    frame.render_widget(Paragraph::new(line).block(styled_block("Forge Drill", theme)), area);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let theme = &app.theme;
    let engine = app.controller.engine();
    let Some(round) = engine.round() else {
        return;
    };
    let catalog = engine.catalog();

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Craft: "),
            Span::styled(
                round.target().name.clone(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(round.target().description.clone(), Style::default().fg(theme.muted))),
        Line::from(""),
    ];

    match (&app.ui.feedback, app.ui.awaiting_feedback) {
        (Some(feedback), _) => lines.push(Line::from(Span::styled(
            format!("Coach: {}", feedback.message),
            Style::default().fg(theme.tone(feedback.tone)),
        ))),
        (None, Some(_)) => lines.push(Line::from(Span::styled("Coach: ...", Style::default().fg(theme.muted)))),
        (None, None) => lines.push(Line::from("")),
    }
    lines.push(Line::from(""));

    let slots: Vec<Span> = (0..SLOTS)
        .flat_map(|slot| {
            let label = round
                .selection()
                .slot(slot)
                .and_then(|id| catalog.item(id))
                .map(|item| item.name.clone())
                .unwrap_or_else(|| "----".to_string());
            let key = if slot == 0 { 'z' } else { 'x' };
            [
                Span::styled(format!("[{}] ", key), Style::default().fg(theme.muted)),
                Span::styled(format!("{:<18}", label), Style::default().fg(theme.fg)),
            ]
        })
        .collect();
    lines.push(Line::from(slots));
    lines.push(Line::from(""));

    for (i, item) in catalog.components().enumerate().take(9) {
        let chosen = round.selection().count(&item.id);
        let marker = if chosen > 0 { format!(" x{}", chosen) } else { String::new() };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.accent)),
            Span::raw(format!("{}{}", item.name, marker)),
        ]));
    }

    if round.is_revealed() {
        lines.push(Line::from(""));
        lines.push(reveal_line(app, now));
    }

    let board = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(styled_block("Workbench", theme));
    frame.render_widget(board, area);
}

fn reveal_line(app: &App, now: Instant) -> Line<'static> {
    let theme = &app.theme;
    let engine = app.controller.engine();
    let Some(round) = engine.round() else {
        return Line::from("");
    };
    let countdown = engine
        .pending()
        .map(|pending| {
            let next = match pending.action {
                AdvanceAction::NextQuestion => "next",
                AdvanceAction::EndGame => "results",
            };
            format!(" ({} in {}s, Space to skip)", next, pending.remaining(now).as_secs() + 1)
        })
        .unwrap_or_default();

    if let Some(recipe) = engine.correct_recipe().filter(|_| round.last_answer_wrong()) {
        // Any pair crafting the target is a valid answer
        let catalog = engine.catalog();
        let answers: Vec<String> = catalog
            .recipes_producing(&recipe.result)
            .map(|r| catalog.recipe_label(r))
            .collect();
        Line::from(vec![
            Span::styled(format!("Wrong! {}", answers.join(" or ")), Style::default().fg(theme.alert)),
            Span::styled(countdown, Style::default().fg(theme.muted)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Correct!", Style::default().fg(theme.success)),
            Span::styled(countdown, Style::default().fg(theme.muted)),
        ])
    }
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let view = app.controller.view();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let summary = app.controller.summary(&app.history);
    let headline = Paragraph::new(format!(
        "{:.0}% accuracy over {} answers",
        summary.accuracy, summary.total
    ))
    .block(styled_block(&format!("{} (Tab)", view.label()), theme));
    frame.render_widget(headline, chunks[0]);

    let trend: Vec<u64> = app
        .controller
        .trend(&app.history)
        .iter()
        .map(|v| (v * 100.0).round() as u64)
        .collect();
    let sparkline = Sparkline::default()
        .block(styled_block("Trend", theme))
        .data(&trend)
        .max(100)
        .style(Style::default().fg(theme.accent));
    frame.render_widget(sparkline, chunks[1]);

    let rows: Vec<ListItem> = app
        .history
        .view(view)
        .iter()
        .take(chunks[2].height as usize)
        .map(|entry| history_row(entry, theme))
        .collect();
    let list = List::new(rows).block(styled_block("History", theme));
    frame.render_widget(list, chunks[2]);

    // Session event log replaces the list when nothing has been answered yet
    if app.history.view(view).is_empty() {
        if let Some(last) = app.ui.event_log.back() {
            let color = match last.category {
                LogCategory::Correct => theme.success,
                LogCategory::Wrong => theme.alert,
                LogCategory::System => theme.muted,
            };
            let inner = styled_block("History", theme).inner(chunks[2]);
            frame.render_widget(
                Paragraph::new(last.message.clone()).style(Style::default().fg(color)),
                inner,
            );
        }
    }
}

fn history_row<'a>(entry: &HistoryEntry, theme: &Theme) -> ListItem<'a> {
    let (mark, color) = if entry.is_correct {
        ("✔", theme.success)
    } else {
        ("✘", theme.alert)
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", mark), Style::default().fg(color)),
        Span::raw(format!("{:<20}", entry.target.name)),
        Span::styled(clock(entry.timestamp), Style::default().fg(theme.muted)),
    ]))
}

fn clock(timestamp: TimestampMs) -> String {
    Local
        .timestamp_millis_opt(timestamp)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
