mod auth_form;
mod camera_panel;
mod games;
mod info;
mod layout;
mod nav_bar;
mod notification;
mod presentation;
mod settings;
mod status_bar;
mod theme;
mod whiteboard;

use crate::app::state::{AppState, Screen};
use crate::app::event::AuthRequest;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = Theme::new(state.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.background()), area);

    let app_layout = layout::compute_layout(area);
    nav_bar::render(frame, app_layout.nav_bar, state, &theme);

    let content = app_layout.content;
    match state.screen {
        Screen::Login => auth_form::render(frame, content, state, AuthRequest::Login, &theme),
        Screen::Register => auth_form::render(frame, content, state, AuthRequest::Register, &theme),
        Screen::Settings => settings::render(frame, content, state, &theme),
        Screen::Profile => info::render_profile(frame, content, state, &theme),
        Screen::Help => info::render_help(frame, content, &theme),
        screen => {
            let cam = layout::camera_layout(content);
            match screen {
                Screen::Whiteboard => whiteboard::render(frame, cam.main, state, &theme),
                Screen::Games => games::render(frame, cam.main, state, &theme),
                Screen::Presentation => presentation::render(frame, cam.main, state, &theme),
                _ => info::render_dashboard(frame, cam.main, state, &theme),
            }
            camera_panel::render(frame, cam.camera, state, &theme);
            camera_panel::render_gesture(frame, cam.gesture, state, &theme);
        }
    }

    status_bar::render(frame, app_layout.status_bar, state, &theme);
    notification::render(frame, state, &theme);
}
