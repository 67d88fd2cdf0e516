//! Session, statistics and records panels.

use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap,
};
use time::PrimitiveDateTime;

use sleeplog_core::{NO_DATA_MESSAGE, SessionStatus, SleepRecord};
use sleeplog_types::format::{format_clock, format_hours, format_timestamp};

use super::super::app::App;
use super::theme::{AppTheme, BORDER_TYPE};
use crate::clock::local_now;

/// Draw the current session and summary statistics.
pub(super) fn draw_session_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = AppTheme::dark();
    let now = local_now().ok();

    let block = Block::default()
        .title(Span::styled(" Session ", theme.title_style()))
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style());

    let mut lines = session_lines(app, now, &theme);
    lines.push(Line::from(""));
    lines.extend(stats_lines(app, &theme));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn session_lines<'a>(
    app: &App,
    now: Option<PrimitiveDateTime>,
    theme: &AppTheme,
) -> Vec<Line<'a>> {
    match app.status() {
        SessionStatus::Idle => vec![
            Line::from(Span::styled(
                "Awake",
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press s when you go to bed",
                Style::default().fg(theme.text_muted),
            )),
        ],
        SessionStatus::Active { since } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Sleeping",
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled("Since   ", Style::default().fg(theme.text_secondary)),
                    Span::styled(
                        format_timestamp(since).replace('T', " "),
                        Style::default().fg(theme.text_primary),
                    ),
                ]),
            ];
            if let Some(minutes) = now.and_then(|now| app.elapsed_minutes(now)) {
                lines.push(Line::from(vec![
                    Span::styled("Elapsed ", Style::default().fg(theme.text_secondary)),
                    Span::styled(
                        format!("{}h {:02}m", minutes / 60, minutes % 60),
                        Style::default().fg(theme.text_primary),
                    ),
                ]));
            }
            lines
        }
    }
}

fn stats_lines<'a>(app: &App, theme: &AppTheme) -> Vec<Line<'a>> {
    let summary = &app.summary;
    let label = |text: &'a str| Span::styled(text, Style::default().fg(theme.text_secondary));

    let mut lines = vec![Line::from(Span::styled(
        "Statistics",
        theme.title_style(),
    ))];

    match summary.average_hours {
        Some(average) => lines.push(Line::from(vec![
            label("Average   "),
            Span::styled(
                format!("{:.2} h", average),
                Style::default().fg(theme.hours_color(average, app.threshold)),
            ),
        ])),
        None => {
            lines.push(Line::from(Span::styled(
                NO_DATA_MESSAGE,
                Style::default().fg(theme.text_muted),
            )));
            return lines;
        }
    }

    if let Some(latest) = summary.latest {
        lines.push(Line::from(vec![
            label("Last night"),
            Span::styled(
                format!(" {:.2} h", latest.hours),
                Style::default().fg(theme.hours_color(latest.hours, app.threshold)),
            ),
        ]));
    }

    lines.push(Line::from(vec![
        label("Records   "),
        Span::styled(
            summary.total_records.to_string(),
            Style::default().fg(theme.text_primary),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Below goal"),
        Span::styled(
            format!(" {} of {}", summary.below_count, summary.recent_records.len()),
            Style::default().fg(if summary.below_count > 0 {
                theme.warning
            } else {
                theme.success
            }),
        ),
    ]));

    if summary.warning {
        let level = app.threshold.evaluate(summary.latest.map_or(0.0, |r| r.hours));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Less than {} hours! {}",
                format_hours(app.threshold.hours()),
                level.action()
            ),
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines
}

/// Draw the recent records table and the trend chart.
pub(super) fn draw_records_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = AppTheme::dark();
    let records = &app.summary.recent_records;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),     // Table
            Constraint::Length(10), // Trend
        ])
        .split(area);

    let block = Block::default()
        .title(Span::styled(
            format!(
                " Last {} of {} ",
                records.len(),
                app.summary.total_records
            ),
            theme.title_style(),
        ))
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style());

    if records.is_empty() {
        let empty = Paragraph::new(Span::styled(
            NO_DATA_MESSAGE,
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, layout[0]);
    } else {
        frame.render_widget(records_table(records, app, &theme).block(block), layout[0]);
    }

    draw_trend(frame, layout[1], app, &theme);
}

fn records_table<'a>(records: &[SleepRecord], app: &App, theme: &AppTheme) -> Table<'a> {
    let header = Row::new(vec!["Date", "Start", "End", "Hours"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    // Newest first
    let rows: Vec<Row> = records
        .iter()
        .rev()
        .map(|record| {
            Row::new(vec![
                Cell::from(record.date_string()),
                Cell::from(format_clock(record.start)),
                Cell::from(format_clock(record.end)),
                Cell::from(Span::styled(
                    format!("{:.2}", record.hours),
                    Style::default().fg(theme.hours_color(record.hours, app.threshold)),
                )),
            ])
            .style(Style::default().fg(theme.text_primary))
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
}

fn draw_trend(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let records = &app.summary.recent_records;
    let threshold = app.threshold.hours();
    let color = match app.summary.latest {
        Some(latest) => theme.hours_color(latest.hours, app.threshold),
        None => theme.text_muted,
    };

    let block = Block::default()
        .title(Span::styled(" Trend ", theme.title_style()))
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style());

    if records.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let points = chart_points(records);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let goal = [(0.0, threshold), (x_max, threshold)];
    let average = app
        .summary
        .average_hours
        .map(|avg| [(0.0, avg), (x_max, avg)]);
    let y_max = y_ceiling(records, threshold);

    let mut datasets = vec![
        Dataset::default()
            .name(format!("goal {} h", format_hours(threshold)))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.danger))
            .data(&goal),
    ];
    if let Some(average) = &average {
        datasets.push(
            Dataset::default()
                .name("average")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.info))
                .data(average),
        );
    }
    // A single night has nothing to connect
    let graph_type = if points.len() > 1 {
        GraphType::Line
    } else {
        GraphType::Scatter
    };
    datasets.push(
        Dataset::default()
            .name("hours")
            .marker(symbols::Marker::Braille)
            .graph_type(graph_type)
            .style(Style::default().fg(color))
            .data(&points),
    );

    let label_style = Style::default().fg(theme.text_muted);
    let x_labels = match (records.first(), records.last()) {
        (Some(oldest), Some(newest)) if records.len() > 1 => vec![
            Span::styled(oldest.date_string(), label_style),
            Span::styled(newest.date_string(), label_style),
        ],
        (Some(only), _) => vec![Span::styled(only.date_string(), label_style)],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::styled("0", label_style),
        Span::styled(format!("{:.0}", y_max / 2.0), label_style),
        Span::styled(format!("{:.0}", y_max), label_style),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(label_style)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(label_style)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

/// One point per record: x is the position in the window, y the hours.
fn chart_points(records: &[SleepRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.hours))
        .collect()
}

/// Upper y bound: the longest night or the threshold, rounded up to an even hour.
fn y_ceiling(records: &[SleepRecord], threshold: f64) -> f64 {
    let longest = records.iter().map(|r| r.hours).fold(threshold, f64::max);
    ((longest / 2.0).ceil() * 2.0).max(2.0)
}
