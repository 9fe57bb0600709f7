use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let cam = &state.camera;
    let block = Block::default()
        .title(" Camera ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(if cam.active {
            theme.border_focused()
        } else {
            theme.border()
        });

    let status_style = if cam.active {
        theme.success()
    } else if cam.initializing || cam.pending.is_some() {
        theme.warning()
    } else if cam.error.is_some() {
        theme.error()
    } else {
        theme.muted()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status: ", theme.muted()),
            Span::styled(cam.status_text(), status_style),
        ]),
        Line::default(),
    ];

    match cam.video_source(&state.video_feed_url) {
        Some(url) => {
            lines.push(Line::from(Span::styled("Feed:", theme.muted())));
            lines.push(Line::from(Span::styled(url.to_string(), theme.text())));
        }
        None => lines.push(Line::from(Span::styled("Camera is off", theme.muted()))),
    }
    lines.push(Line::default());

    let controls = cam.controls();
    let mut keys: Vec<Span> = Vec::new();
    if controls.start {
        keys.push(Span::styled("F5 start  ", theme.highlight()));
    }
    if controls.stop {
        keys.push(Span::styled("F6 stop  ", theme.highlight()));
    }
    if controls.restart {
        keys.push(Span::styled("F7 restart", theme.highlight()));
    }
    if !keys.is_empty() {
        lines.push(Line::from(keys));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn render_gesture(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let screen = state.screen;
    let polling = state
        .screen_state(screen)
        .map(|s| s.gesture_active)
        .unwrap_or(false);
    let gesture = state.gesture_for(screen);

    let block = Block::default()
        .title(" Gesture ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let line = if polling {
        let style = if gesture.is_known() {
            theme.highlight()
        } else {
            theme.muted()
        };
        Line::from(Span::styled(gesture.display_name(), style))
    } else {
        Line::from(Span::styled("Detection off", theme.muted()))
    };
    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
