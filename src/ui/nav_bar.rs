use crate::app::state::{AppState, Screen};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Tabs;

/// Screens reachable from the tab bar, with their shortcut keys.
const TABS: [(Screen, char); 7] = [
    (Screen::Dashboard, 'd'),
    (Screen::Whiteboard, 'w'),
    (Screen::Games, 'g'),
    (Screen::Presentation, 'p'),
    (Screen::Settings, 's'),
    (Screen::Profile, 'o'),
    (Screen::Help, 'h'),
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if state.user.is_none() {
        let line = Line::from(vec![
            Span::styled(" gesturedeck ", theme.highlight()),
            Span::styled("  F1 help  F2 switch login/register  Ctrl+C quit", theme.muted()),
        ]);
        frame.render_widget(line, area);
        return;
    }

    let titles: Vec<Line> = TABS
        .iter()
        .map(|(screen, key)| Line::from(format!("{} {}", key, screen.title())))
        .collect();
    let selected = TABS.iter().position(|(s, _)| *s == state.screen);
    let tabs = Tabs::new(titles)
        .select(selected.unwrap_or(0))
        .style(theme.muted())
        .highlight_style(theme.highlight())
        .divider("│");
    frame.render_widget(tabs, area);
}
