//! Terminal front end built on ratatui

pub mod app;
pub mod render;
pub mod state;

pub use app::App;
pub use state::{GameUI, LogCategory, LogEntry};

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

use crate::coach::Tone;

/// Color scheme
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub alert: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            alert: Color::Red,
            warning: Color::Yellow,
            muted: Color::Gray,
            border: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Encouraging => self.success,
            Tone::Neutral => self.muted,
            Tone::Critical => self.alert,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}
