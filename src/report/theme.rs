//! Visual theme and styling.

use console::Style;

/// Shakedown's visual theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for passing results (green).
    pub pass: Style,
    /// Style for failing results (red bold).
    pub fail: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for informational results (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for section headers (bold).
    pub header: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            pass: Style::new().green(),
            fail: Style::new().red().bold(),
            warning: Style::new().color256(208),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            header: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            warning: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            header: Style::new(),
        }
    }

    /// Pick a theme based on whether stdout is a terminal.
    pub fn auto() -> Self {
        if console::Term::stdout().is_term() {
            Self::new()
        } else {
            Self::plain()
        }
    }
}
