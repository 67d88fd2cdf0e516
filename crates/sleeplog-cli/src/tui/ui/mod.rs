//! Main UI layout and rendering for the TUI dashboard.
//!
//! - **Header**: Title, record count and threshold
//! - **Main content**: Session panel and statistics (left), recent records
//!   and trend (right)
//! - **Status bar**: Key hints or the latest status message

pub mod theme;

mod dashboard;
mod overlays;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use sleeplog_core::SessionStatus;
use sleeplog_types::format::format_hours;

use super::app::App;
use theme::AppTheme;

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(1)])
        .split(main_layout[1]);

    dashboard::draw_session_panel(frame, content_layout[0], app);
    dashboard::draw_records_panel(frame, content_layout[1], app);

    draw_status_bar(frame, main_layout[2], app);

    if app.show_help {
        overlays::draw_help_overlay(frame);
    }

    // Confirmation dialog (on top of everything)
    overlays::draw_confirmation_dialog(frame, app);
}

/// Draw the header bar with app title and quick stats.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = AppTheme::dark();

    let mut spans = vec![
        Span::styled(" Sleep Log ", theme.title_style()),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!(" {} records ", app.summary.total_records),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(
            format!(" goal {} h ", format_hours(app.threshold.hours())),
            Style::default().fg(theme.info),
        ),
    ];

    if matches!(app.status(), SessionStatus::Active { .. }) {
        spans.push(Span::styled(
            " SLEEPING ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if app.summary.warning {
        spans.push(Span::styled(
            " SHORT ",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if app.last_error.is_some() {
        spans.push(Span::styled(" ERR ", Style::default().fg(theme.danger)));
    }

    let header = Paragraph::new(Line::from(spans)).style(theme.header_style());
    frame.render_widget(header, area);
}

/// Key hints for the current state.
fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("?", "help")];
    match app.status() {
        SessionStatus::Idle => hints.push(("s", "start sleep")),
        SessionStatus::Active { .. } => {
            hints.push(("e", "end sleep"));
            hints.push(("x", "cancel"));
        }
    }
    hints.push(("+/-", "threshold"));
    hints.push(("r", "reload"));
    hints.push(("q", "quit"));
    hints
}

/// Draw the status bar with context-sensitive help.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = AppTheme::dark();
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left_spans = if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in context_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let status_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), status_layout[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", time_str),
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Right),
        status_layout[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use sleeplog_core::Threshold;
    use time::macros::datetime;

    use crate::logbook::Logbook;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_empty_dashboard() {
        let dir = tempfile::TempDir::new().unwrap();
        let logbook = Logbook::open(&dir.path().join("sleep_log.csv")).unwrap();
        let app = App::new(logbook, Threshold::default(), 7);
        let screen = render(&app);
        assert!(screen.contains("Sleep Log"));
        assert!(screen.contains("No data yet"));
        assert!(screen.contains("start sleep"));
    }

    #[test]
    fn test_draw_with_records_and_help() {
        let dir = tempfile::TempDir::new().unwrap();
        let logbook = Logbook::open(&dir.path().join("sleep_log.csv")).unwrap();
        let mut app = App::new(logbook, Threshold::default(), 7);
        app.start_sleep(datetime!(2024-01-01 23:00:00));
        app.end_sleep(datetime!(2024-01-02 6:30:00));
        app.status_messages.clear();

        let screen = render(&app);
        assert!(screen.contains("2024-01-02"));
        assert!(screen.contains("7.50"));

        app.show_help = true;
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_context_hints_follow_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let logbook = Logbook::open(&dir.path().join("sleep_log.csv")).unwrap();
        let mut app = App::new(logbook, Threshold::default(), 7);
        assert!(context_hints(&app).contains(&("s", "start sleep")));
        app.start_sleep(datetime!(2024-01-01 23:00:00));
        assert!(context_hints(&app).contains(&("e", "end sleep")));
    }
}
