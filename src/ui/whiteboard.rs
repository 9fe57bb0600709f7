use crate::app::state::AppState;
use crate::features::whiteboard::Rgb;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let board = &state.whiteboard;
    let (width, height) = board.size();
    let cell = board.raster().cell_size();

    // Canvas y grows upward; the raster's rows grow downward.
    let mut by_color: Vec<(Rgb, Vec<(f64, f64)>)> = Vec::new();
    for (col, row, color) in board.raster().painted() {
        let point = (
            col as f64 * cell + cell / 2.0,
            height - (row as f64 * cell + cell / 2.0),
        );
        match by_color.iter_mut().find(|(c, _)| *c == color) {
            Some((_, points)) => points.push(point),
            None => by_color.push((color, vec![point])),
        }
    }

    let pen = if board.is_pen_down() { "pen down" } else { "pen up" };
    let title = Line::from(vec![
        Span::styled(" Whiteboard ", theme.title()),
        Span::styled("■ ", Style::default().fg(theme.ink(board.color()))),
        Span::styled(format!("{} · {} strokes ", pen, board.strokes().len()), theme.muted()),
    ]);
    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(" u undo · x clear · c color ").right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for (color, points) in &by_color {
                ctx.draw(&Points {
                    coords: points,
                    color: theme.ink(*color),
                });
            }
        });
    frame.render_widget(canvas, area);
}
