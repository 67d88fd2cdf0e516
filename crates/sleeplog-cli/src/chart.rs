//! ASCII trend chart of recent sleep durations.
//!
//! One column per record, oldest on the left. The threshold is drawn as a
//! dashed row so nights below it stand out:
//!
//! ```text
//!  9.0 │
//!  8.0 │             ●
//!  7.0 │- - - -●- - - - - - -   7.0 h
//!  6.0 │
//!  5.0 │  ●
//!  4.0 │
//!      └─────────────────────
//!        01-01 01-02 01-03
//! ```

use owo_colors::OwoColorize;

use sleeplog_types::SleepRecord;

/// Width of one record column, enough for an `MM-DD` label.
const COLUMN_WIDTH: usize = 6;

/// Chart rendering options.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Number of plot rows.
    pub height: usize,
    /// Threshold in hours, drawn as a dashed row.
    pub threshold: f64,
    /// Restrict output to ASCII characters.
    pub ascii: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            height: 8,
            threshold: sleeplog_types::DEFAULT_THRESHOLD_HOURS,
            ascii: false,
            no_color: false,
        }
    }
}

struct Glyphs {
    point: &'static str,
    axis: &'static str,
    corner: &'static str,
    rule: &'static str,
}

impl Glyphs {
    fn new(ascii: bool) -> Self {
        if ascii {
            Self {
                point: "*",
                axis: "|",
                corner: "+",
                rule: "-",
            }
        } else {
            Self {
                point: "●",
                axis: "│",
                corner: "└",
                rule: "─",
            }
        }
    }
}

/// Number of record columns that fit in `width` terminal cells (at least one).
pub fn columns_for_width(width: usize) -> usize {
    // Y-axis labels on the left, threshold tag on the right.
    (width.saturating_sub(7 + 8) / COLUMN_WIDTH).max(1)
}

/// Render the chart. Returns an empty string for no records.
pub fn render_chart(records: &[SleepRecord], opts: &ChartOptions) -> String {
    if records.is_empty() {
        return String::new();
    }

    let glyphs = Glyphs::new(opts.ascii);
    let height = opts.height.max(2);
    let peak = records
        .iter()
        .map(|r| r.hours)
        .fold(opts.threshold, f64::max)
        .ceil()
        .max(1.0);

    // Row index counted from the bottom.
    let level = |hours: f64| ((hours / peak) * (height - 1) as f64).round() as usize;
    let threshold_row = level(opts.threshold);

    let mut out = String::new();
    for row in (0..height).rev() {
        let label = peak * row as f64 / (height - 1) as f64;
        out.push_str(&format!("{:>5.1} {}", label, glyphs.axis));

        let on_threshold = row == threshold_row;
        for record in records {
            let cell = if level(record.hours) == row {
                let point = point_cell(glyphs.point, record.hours, opts);
                centered(&point, 1)
            } else if on_threshold {
                "- - - ".to_string()
            } else {
                " ".repeat(COLUMN_WIDTH)
            };
            out.push_str(&cell);
        }

        if on_threshold {
            let tag = format!("  {:.1} h", opts.threshold);
            if opts.no_color {
                out.push_str(&tag);
            } else {
                out.push_str(&format!("{}", tag.red()));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "      {}{}\n",
        glyphs.corner,
        glyphs.rule.repeat(records.len() * COLUMN_WIDTH)
    ));
    out.push_str("       ");
    for record in records {
        let date = record.date_string();
        out.push_str(&format!("{:<width$}", &date[5..], width = COLUMN_WIDTH));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn point_cell(point: &str, hours: f64, opts: &ChartOptions) -> String {
    if opts.no_color {
        point.to_string()
    } else if hours < opts.threshold {
        format!("{}", point.red())
    } else {
        format!("{}", point.green())
    }
}

/// Place a glyph of `visible` display width in the middle of a column.
fn centered(glyph: &str, visible: usize) -> String {
    let left = (COLUMN_WIDTH - visible) / 2;
    let right = COLUMN_WIDTH - visible - left;
    format!("{}{}{}", " ".repeat(left), glyph, " ".repeat(right))
}
