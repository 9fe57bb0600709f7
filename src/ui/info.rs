use crate::app::state::AppState;
use crate::backend::types::Gesture;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Dashboard ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let user = state.user.as_deref().unwrap_or("guest");
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Welcome, ", theme.text()),
            Span::styled(user.to_string(), theme.highlight()),
        ]),
        Line::default(),
        Line::from(Span::styled("Modes", theme.title())),
        Line::from(Span::styled("  w  Whiteboard: draw in the air", theme.text())),
        Line::from(Span::styled("  g  Games: rock-paper-scissors, basketball, spells", theme.text())),
        Line::from(Span::styled("  p  Presentation: gesture slide control", theme.text())),
        Line::default(),
    ];
    if !state.camera.active {
        lines.push(Line::from(Span::styled(
            "Start the camera with F5 to enable gestures.",
            theme.warning(),
        )));
    }
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_profile(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Profile ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let user = state.user.as_deref().unwrap_or("-");
    let lines = vec![
        Line::from(vec![
            Span::styled("Email:       ", theme.muted()),
            Span::styled(user.to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("Sensitivity: ", theme.muted()),
            Span::styled(state.settings.gesture_sensitivity.to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("Theme:       ", theme.muted()),
            Span::styled(state.theme.as_str(), theme.text()),
        ]),
        Line::default(),
        Line::from(Span::styled("l  log out", theme.highlight())),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(" Help ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let mut lines = vec![Line::from(Span::styled("Gestures", theme.title()))];
    for gesture in Gesture::ALL.iter().filter(|g| g.is_known()) {
        let meaning = match gesture {
            Gesture::OneFingerUp => "draw · next slide · lightning",
            Gesture::TwoFingersUp => "erase · scissors",
            Gesture::ThreeFingersUp => "change color · fire",
            Gesture::ThumbsUp => "select · shoot",
            Gesture::Fist => "back · rock · previous slide",
            Gesture::OpenPalm => "clear · paper · ice · play/pause",
            Gesture::Unknown => "",
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", gesture.display_name()), theme.highlight()),
            Span::styled(meaning, theme.text()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Keys", theme.title())));
    for (key, what) in [
        ("d w g p s o h", "switch screen"),
        ("F5 F6 F7", "start, stop, restart camera"),
        ("u x c", "whiteboard undo, clear, color"),
        ("1 2 3", "pick a game"),
        ("← → space", "slides"),
        ("Esc", "back to dashboard"),
        ("l / q", "log out / quit"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", key), theme.highlight()),
            Span::styled(what, theme.text()),
        ]));
    }
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
