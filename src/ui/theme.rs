use crate::config::ThemeMode;
use crate::features::whiteboard::Rgb;
use ratatui::style::{Color, Modifier, Style};

/// Styles for the active color theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    mode: ThemeMode,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    fn dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn background(&self) -> Style {
        if self.dark() {
            Style::default().bg(Color::Reset)
        } else {
            Style::default().bg(Color::Rgb(0xf4, 0xf4, 0xf0))
        }
    }

    pub fn border(&self) -> Style {
        if self.dark() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent())
    }

    pub fn title(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        if self.dark() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Black)
        }
    }

    pub fn muted(&self) -> Style {
        if self.dark() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn accent(&self) -> Color {
        if self.dark() {
            Color::Cyan
        } else {
            Color::Blue
        }
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn status_bar(&self) -> Style {
        if self.dark() {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        }
    }

    /// Ink for the whiteboard. White ink on a light theme would vanish, so it
    /// is drawn black there.
    pub fn ink(&self, color: Rgb) -> Color {
        if !self.dark() && color == Rgb::new(0xff, 0xff, 0xff) {
            Color::Black
        } else {
            rgb(color)
        }
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
