//! TUI rendering with ratatui.

use calgrid_core::{Editor, EditorMode, Field};
use calgrid_core::month::{DAYS_PER_WEEK, GridCell};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render the whole surface: header, grid, status, help, and any popup.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Month header
            Constraint::Length(1), // Weekday labels
            Constraint::Min(8),    // Day grid
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_weekdays(frame, chunks[1]);
    render_grid(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);

    if app.editor.is_some() {
        render_editor(frame, app);
    }
    if app.alert.is_some() {
        render_alert(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let working = if app.in_flight { "  (working)" } else { "" };
    let text = Line::from(vec![
        Span::styled(
            app.view.cursor().label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(working, Style::default().fg(Color::Yellow)),
    ]);

    let para = Paragraph::new(text)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(para, area);
}

fn render_weekdays(frame: &mut Frame, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area);

    for (label, col) in WEEKDAY_LABELS.iter().zip(cols.iter()) {
        let para = Paragraph::new(*label)
            .centered()
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(para, *col);
    }
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let grid = app.view.grid();
    let weeks: Vec<&[GridCell]> = grid.chunks(DAYS_PER_WEEK).collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, weeks.len() as u32); weeks.len()])
        .split(area);

    for (week, row) in weeks.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(*row);

        for (cell, rect) in week.iter().zip(cols.iter()) {
            render_cell(frame, app, *cell, *rect);
        }
    }
}

fn render_cell(frame: &mut Frame, app: &App, cell: GridCell, area: Rect) {
    let Some(day) = cell else {
        let blank = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(blank, area);
        return;
    };

    let date = app.view.cursor().date(day);
    let is_today = date == Some(app.today);
    let is_selected = day == app.selected_day;

    let mut day_style = Style::default();
    if is_today {
        day_style = day_style.fg(Color::Green).add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(Span::styled(day.to_string(), day_style))];
    if let Some(date) = date {
        for event in app.view.events_on(date) {
            // Title-less entries still get a grid label.
            let label = if event.title.is_empty() {
                event.description.as_str()
            } else {
                event.title.as_str()
            };
            lines.push(Line::from(Span::styled(
                label.to_string(),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let border = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.status {
        let para = Paragraph::new(message.as_str()).style(Style::default().fg(Color::Green));
        frame.render_widget(para, area);
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.editor {
        Some(editor) if editor.is_editing() => {
            "enter save | tab switch field | backspace erase | esc cancel"
        }
        Some(_) => "e edit | d delete | esc close",
        None => "arrows move | p/n change month | enter open day | r refresh | q quit",
    };
    let para = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_editor(frame: &mut Frame, app: &App) {
    let Some(editor) = &app.editor else { return };

    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let title = format!(" {} ", editor.date().format("%Y-%m-%d"));
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match editor.mode() {
        EditorMode::Viewing => {
            let lines = vec![
                Line::from(Span::styled(
                    editor.title().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(editor.description().to_string()),
            ];
            let para = Paragraph::new(lines).wrap(Wrap { trim: false });
            frame.render_widget(para, inner);
        }
        EditorMode::Editing | EditorMode::Empty => render_form(frame, editor, inner),
    }
}

fn render_form(frame: &mut Frame, editor: &Editor, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let field_block = |label: &'static str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(style)
    };

    let title = Paragraph::new(editor.title().to_string())
        .block(field_block("Title", editor.focus() == Field::Title));
    frame.render_widget(title, rows[0]);

    let description = Paragraph::new(editor.description().to_string())
        .wrap(Wrap { trim: false })
        .block(field_block(
            "Description",
            editor.focus() == Field::Description,
        ));
    frame.render_widget(description, rows[1]);
}

fn render_alert(frame: &mut Frame, app: &App) {
    let Some(message) = &app.alert else { return };

    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Notice ")
        .border_style(Style::default().fg(Color::Red));
    let para = Paragraph::new(format!("{message}\n\npress any key"))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(para, area);
}

/// A rect centered in `area`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
