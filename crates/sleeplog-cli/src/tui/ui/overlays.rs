//! Overlay panels drawn on top of the dashboard.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use sleeplog_types::format::format_timestamp;

use super::super::app::{App, PendingAction};
use super::theme::{AppTheme, BORDER_TYPE};

/// Draw help overlay showing keyboard shortcuts.
pub(super) fn draw_help_overlay(frame: &mut Frame) {
    let theme = AppTheme::dark();

    let area = frame.area();
    let width = 44.min(area.width.saturating_sub(2));
    let height = 14.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let help_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, help_area);

    let lines = vec![
        Line::from(""),
        shortcut_line("s", "Start sleep now", &theme),
        shortcut_line("e", "End sleep and record it", &theme),
        shortcut_line("x", "Discard the open session", &theme),
        shortcut_line("r", "Reload from disk", &theme),
        shortcut_line("+/-", "Adjust threshold", &theme),
        shortcut_line("?", "Toggle this help", &theme),
        shortcut_line("q/Esc", "Quit", &theme),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()))
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_active_style()),
    );
    frame.render_widget(help, help_area);
}

fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>8} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}

/// Draw the yes/no dialog for a pending action.
pub(super) fn draw_confirmation_dialog(frame: &mut Frame, app: &App) {
    let Some(action) = &app.pending_confirmation else {
        return;
    };
    let theme = AppTheme::dark();

    let message = match action {
        PendingAction::CancelSession { started_at } => format!(
            "Discard sleep started {}?",
            format_timestamp(*started_at).replace('T', " ")
        ),
    };

    let area = frame.area();
    let dialog_width = 48.min(area.width.saturating_sub(4));
    let dialog_height = 5;
    let dialog_x = (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " [Y]es ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                " [N]o ",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(" Confirm ", theme.title_style()))
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.warning)),
        );
    frame.render_widget(dialog, dialog_area);
}
