use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use taskdeck_core::api::{BusyOp, NotificationKind, Task, TaskSummary};

use super::app::TuiApp;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

const HEADER_ROWS: u16 = 2;
const INPUT_ROWS: u16 = 3;
const TOAST_ROWS: u16 = 1;
const HELP_ROWS: u16 = 1;
/// Task list border plus three rows.
const MIN_LIST_ROWS: u16 = 5;

/// Smallest terminal the layout below fits in.
pub const MIN_HEIGHT: u16 = HEADER_ROWS + INPUT_ROWS + MIN_LIST_ROWS + TOAST_ROWS + HELP_ROWS;
pub const MIN_WIDTH: u16 = 40;

fn split_rows(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Length(INPUT_ROWS),
            Constraint::Min(MIN_LIST_ROWS),
            Constraint::Length(TOAST_ROWS),
            Constraint::Length(HELP_ROWS),
        ])
        .split(area)
}

pub fn draw(f: &mut Frame<'_>, app: &TuiApp) {
    let chunks = split_rows(f.area());

    draw_header(f, chunks[0], app);
    draw_input(f, chunks[1], app);
    draw_tasks(f, chunks[2], app);
    draw_toast(f, chunks[3], app);
    draw_help(f, chunks[4]);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let summary = TaskSummary::of(&app.view.tasks).summary_line();
    let line = Line::from(vec![
        Span::styled("My Tasks", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(summary, Style::default().fg(Color::Gray)),
        Span::raw("  API: "),
        Span::styled(app.service.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let (text, style) = if app.is_adding() {
        (
            format!("{} adding...", spinner(app)),
            Style::default().fg(Color::DarkGray),
        )
    } else if app.input_buffer.is_empty() {
        (
            "Add a new task...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input_buffer.clone(), Style::default())
    };
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(text, style),
    ]);
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);

    if !app.is_adding() {
        let col = app.input_buffer[..app.input_cursor].chars().count() as u16;
        let x = (area.x + 3 + col).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_tasks(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let block = Block::default().borders(Borders::ALL).title("Tasks");
    let lines = build_task_lines(app);
    // Keep the selected row visible.
    let visible = area.height.saturating_sub(2) as usize;
    let selected_line = selected_line_index(app);
    let offset = selected_line.saturating_sub(visible.saturating_sub(1)) as u16;
    let widget = Paragraph::new(lines).block(block).scroll((offset, 0));
    f.render_widget(widget, area);
}

fn build_task_lines(app: &TuiApp) -> Vec<Line<'static>> {
    if app.view.loading {
        return vec![Line::from(Span::styled(
            format!("{} Loading tasks...", spinner(app)),
            Style::default().fg(Color::Cyan),
        ))];
    }
    let rows = app.rows();
    if rows.is_empty() {
        return vec![
            Line::from(Span::styled(
                "No tasks yet",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Add your first task above to get started",
                Style::default().fg(Color::DarkGray),
            )),
        ];
    }

    let completed = rows.iter().filter(|t| t.completed).count();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (idx, task) in rows.iter().enumerate() {
        if task.completed && (idx == 0 || !rows[idx - 1].completed) {
            lines.push(Line::from(Span::styled(
                format!("Completed ({completed})"),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(task_line(app, task, idx == app.selected));
    }
    lines
}

fn task_line(app: &TuiApp, task: &Task, selected: bool) -> Line<'static> {
    let busy = app.view.busy.get(&task.id).copied();
    let marker = if task.completed { "[x] " } else { "[ ] " };
    let mut title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if busy.is_some() {
        title_style = title_style.add_modifier(Modifier::DIM);
    }
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![
        Span::styled(
            marker,
            Style::default().fg(if task.completed {
                Color::Green
            } else {
                Color::Gray
            }),
        ),
        Span::styled(task.title.clone(), title_style),
    ];
    if let Some(op) = busy {
        spans.push(Span::styled(
            format!("  {} {}", spinner(app), busy_label(op)),
            Style::default().fg(Color::Yellow),
        ));
    }
    if task.is_local() {
        spans.push(Span::styled("  (local)", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn selected_line_index(app: &TuiApp) -> usize {
    let rows = app.rows();
    let header_before = rows
        .iter()
        .take(app.selected + 1)
        .any(|t| t.completed);
    app.selected + usize::from(header_before)
}

fn draw_toast(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let Some(toast) = app.toast.as_ref() else {
        return;
    };
    let n = &toast.notification;
    let color = match n.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Demo => Color::Yellow,
        NotificationKind::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled(
            n.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(n.description.clone(), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame<'_>, area: Rect) {
    let help = "Enter add  Up/Down select  Tab toggle  Ctrl-d delete  Ctrl-r reload  Esc quit";
    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn busy_label(op: BusyOp) -> &'static str {
    match op {
        BusyOp::Toggling => "updating",
        BusyOp::Deleting => "deleting",
    }
}

fn spinner(app: &TuiApp) -> char {
    let step = (app.start.elapsed().as_millis() / 120) as usize;
    SPINNER[step % SPINNER.len()]
}
