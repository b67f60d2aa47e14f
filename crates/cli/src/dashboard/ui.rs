//! Dashboard rendering.
//!
//! Fixed 30/70 split between the package list and the log pane; the split is
//! recomputed from the frame size on every draw, so a resize reflows the
//! panes proportionally.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use wrun_core::supervisor::ProcessStatus;

use super::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(frame.area());

    render_package_list(frame, chunks[0], app);
    render_log_pane(frame, chunks[1], app);
}

fn status_span(status: ProcessStatus) -> Span<'static> {
    match status {
        ProcessStatus::Running => {
            Span::styled("Running", Style::default().fg(Color::Green))
        }
        ProcessStatus::Exited(code) => {
            let label = match code {
                Some(code) => format!("Exited({})", code),
                None => "Exited(signal)".to_string(),
            };
            Span::styled(label, Style::default().fg(Color::Red))
        }
    }
}

fn render_package_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .processes()
        .iter()
        .enumerate()
        .map(|(i, proc)| {
            let line = Line::from(vec![
                Span::raw(proc.name.as_str()),
                Span::raw(" - "),
                status_span(proc.status),
            ]);
            let style = if i == app.selected() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Applications ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

fn render_log_pane(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.selected_name() {
        Some(name) => format!(" Logs: {} ", name),
        None => " Logs ".to_string(),
    };

    // Tail of the full accumulated buffer; older lines scroll out the top.
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = match app.selected_process() {
        Some(proc) => {
            let start = proc.log.len().saturating_sub(inner_height);
            proc.log[start..]
                .iter()
                .map(|chunk| Line::from(chunk.as_str()))
                .collect()
        }
        None => Vec::new(),
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
