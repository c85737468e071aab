use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. Absent or unparseable
/// values fall back to `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Styles used by the listening-time chart.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Frame ────────────────────────────────────────────────────────────────
    pub title: Style,
    pub border: Style,
    pub hint: Style,

    // ── Axes ─────────────────────────────────────────────────────────────────
    pub axis: Style,
    pub axis_title: Style,
    pub axis_label: Style,

    // ── Data ─────────────────────────────────────────────────────────────────
    /// One plotted play.
    pub point: Style,
    pub text: Style,
    pub dim: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            hint: Style::default().fg(Color::DarkGray),

            axis: Style::default().fg(Color::Gray),
            axis_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            axis_label: Style::default().fg(Color::Gray),

            point: Style::default().fg(Color::Green),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),
            hint: Style::default().fg(Color::Gray),

            axis: Style::default().fg(Color::DarkGray),
            axis_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            axis_label: Style::default().fg(Color::DarkGray),

            point: Style::default().fg(Color::Magenta),
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            hint: Style::default().fg(Color::DarkGray),

            axis: Style::default().fg(Color::White),
            axis_title: Style::default().fg(Color::Cyan),
            axis_label: Style::default().fg(Color::White),

            point: Style::default().fg(Color::Yellow),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names, `"auto"` included.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
