use crate::app::event::AuthRequest;
use crate::app::state::*;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, request: AuthRequest, theme: &Theme) {
    let fields = AuthForm::fields(request);
    let height = 4 + fields.len() as u16 * 3 + 2;
    let form_area = centered(area, 50, height);

    let title = match request {
        AuthRequest::Login => " Login ",
        AuthRequest::Register => " Register ",
    };
    let block = Block::default()
        .title(title)
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .padding(Padding::horizontal(1));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let form = &state.auth_form;
    for (i, field) in fields.iter().enumerate() {
        let y = inner.y + 1 + i as u16 * 3;
        if y + 3 > inner.bottom() {
            break;
        }
        let field_area = Rect::new(inner.x, y, inner.width, 3);
        let (label, input, secret) = match field {
            FormField::Email => ("Email", &form.email, false),
            FormField::Password => ("Password", &form.password, true),
            FormField::Confirm => ("Confirm password", &form.confirm, true),
        };
        let focused = form.focus == *field;
        render_field(frame, field_area, label, input, secret, focused, theme);
    }

    let hint_y = inner.bottom().saturating_sub(1);
    let hint = if form.submitting {
        Span::styled("Submitting...", theme.warning())
    } else {
        let other = match request {
            AuthRequest::Login => "register",
            AuthRequest::Register => "login",
        };
        Span::styled(
            format!("Enter submit · Tab next field · F2 {}", other),
            theme.muted(),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(hint)).alignment(Alignment::Center),
        Rect::new(inner.x, hint_y, inner.width, 1),
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &InputState,
    secret: bool,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .title_style(if focused { theme.title() } else { theme.muted() })
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused()
        } else {
            theme.border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shown = if secret {
        "•".repeat(input.text.chars().count())
    } else {
        input.text.clone()
    };
    frame.render_widget(Paragraph::new(shown).style(theme.text()), inner);

    if focused && inner.width > 0 {
        let cursor_x = inner.x + input.cursor_column() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}
