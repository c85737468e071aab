//! Scatter chart of plays: calendar day against time of day.
//!
//! Each play becomes one point whose x value is the number of days since the
//! earliest play and whose y value is the number of seconds since midnight.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};

use listen_core::formatting::{clock_label, format_count};
use listen_core::models::PlayEvent;

use crate::themes::Theme;

/// Seconds in one day; the top of the y axis.
pub const SECONDS_PER_DAY: u32 = 86_400;

const Y_TICKS: [u32; 5] = [0, 21_600, 43_200, 64_800, SECONDS_PER_DAY];

/// `(date, seconds since midnight)` for every event, in input order.
pub fn project(events: &[PlayEvent]) -> Vec<(NaiveDate, u32)> {
    events
        .iter()
        .map(|e| (e.date(), e.seconds_since_midnight()))
        .collect()
}

/// Points ready for plotting plus the date range they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub points: Vec<(f64, f64)>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl ScatterData {
    pub fn from_events(events: &[PlayEvent]) -> Self {
        let projected = project(events);
        let first_date = projected.iter().map(|(d, _)| *d).min();
        let last_date = projected.iter().map(|(d, _)| *d).max();

        let points = match first_date {
            Some(first) => projected
                .iter()
                .map(|(date, seconds)| ((*date - first).num_days() as f64, *seconds as f64))
                .collect(),
            None => Vec::new(),
        };

        Self {
            points,
            first_date,
            last_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of days between the first and last play, at least one so the
    /// x axis never collapses.
    pub fn span_days(&self) -> i64 {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => (last - first).num_days().max(1),
            _ => 1,
        }
    }

    /// Start, middle and end date labels for the x axis.
    pub fn date_labels(&self) -> Vec<String> {
        let Some(first) = self.first_date else {
            return Vec::new();
        };
        let span = self.span_days();
        [0, span / 2, span]
            .iter()
            .map(|offset| {
                (first + chrono::Duration::days(*offset))
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .collect()
    }
}

/// Render the scatter chart into `area`, with a key hint on the last row.
pub fn render_scatter(frame: &mut Frame, area: Rect, data: &ScatterData, theme: &Theme) {
    if data.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let [chart_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let dataset = Dataset::default()
        .name(format!("{} plays", format_count(data.points.len() as u64)))
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(theme.point)
        .data(&data.points);

    let x_labels: Vec<Span> = data
        .date_labels()
        .into_iter()
        .map(|l| Span::styled(l, theme.axis_label))
        .collect();
    let y_labels: Vec<Span> = Y_TICKS
        .iter()
        .map(|s| Span::styled(clock_label(*s), theme.axis_label))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(" Listening Times ", theme.title)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme.axis_title))
                .style(theme.axis)
                .bounds([0.0, data.span_days() as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Time of Day", theme.axis_title))
                .style(theme.axis)
                .bounds([0.0, SECONDS_PER_DAY as f64])
                .labels(y_labels),
        );

    frame.render_widget(chart, chart_area);
    frame.render_widget(
        Paragraph::new(Span::styled("Press 'q' or Esc to exit", theme.hint)),
        hint_area,
    );
}

/// Placeholder when there is nothing to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No plays to plot", theme.text)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Esc to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Listening Times "),
        ),
        area,
    );
}

/// Show the chart in the alternate screen until `q`, `Esc` or `Ctrl+C`.
pub fn run_scatter(data: &ScatterData, theme: &Theme) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| {
            let area = frame.area();
            render_scatter(frame, area, data, theme);
        }) {
            break Err(e);
        }

        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break Ok(()),
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => {}
            Err(e) => break Err(e),
        }
    };

    // Restore terminal state unconditionally.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
