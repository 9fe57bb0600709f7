use crate::app::state::AppState;
use crate::features::basketball::BallPhase;
use crate::features::games::GameKind;
use crate::ui::theme::{rgb, Theme};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

const COURT_HEIGHT: f64 = 100.0;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Game picker
            Constraint::Length(2), // Scores
            Constraint::Min(5),    // Arena
        ])
        .split(area);

    let titles: Vec<Line> = GameKind::ALL
        .iter()
        .enumerate()
        .map(|(i, g)| Line::from(format!("{} {}", i + 1, g.title())))
        .collect();
    let mut tabs = Tabs::new(titles)
        .style(theme.muted())
        .highlight_style(theme.highlight())
        .divider("│");
    if let Some(i) = state
        .games
        .current
        .and_then(|c| GameKind::ALL.iter().position(|g| *g == c))
    {
        tabs = tabs.select(i);
    }
    frame.render_widget(tabs, chunks[0]);

    let Some(game) = state.games.current else {
        let hint = Paragraph::new("Press 1, 2 or 3 to pick a game.")
            .style(theme.muted())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
        frame.render_widget(hint, chunks[2]);
        return;
    };

    if state.games.camera_notice && !state.camera.active {
        frame.render_widget(
            Paragraph::new("Please start the camera to play this game").style(theme.error()),
            chunks[1],
        );
    } else {
        frame.render_widget(Paragraph::new(score_lines(state, game, theme)), chunks[1]);
    }

    match game {
        GameKind::Rps => render_rps(frame, chunks[2], state, theme),
        GameKind::Basketball => render_basketball(frame, chunks[2], state, theme),
        GameKind::Spells => render_spells(frame, chunks[2], state, theme),
    }
}

fn score_lines<'a>(state: &AppState, game: GameKind, theme: &Theme) -> Vec<Line<'a>> {
    match game {
        GameKind::Rps => {
            let rps = &state.games.rps;
            vec![Line::from(vec![
                Span::styled(format!(" You {} ", rps.player_score), theme.highlight()),
                Span::styled(format!(" Computer {} ", rps.computer_score), theme.text()),
            ])]
        }
        GameKind::Basketball => vec![Line::from(Span::styled(
            format!(" Score {} ", state.games.basketball.score()),
            theme.highlight(),
        ))],
        GameKind::Spells => {
            let spells = &state.games.spells;
            let last = spells.last_cast.map(|k| k.name()).unwrap_or("-");
            vec![Line::from(vec![
                Span::styled(format!(" Spells cast {} ", spells.cast_count), theme.highlight()),
                Span::styled(format!(" Last: {} ", last), theme.text()),
            ])]
        }
    }
}

fn render_rps(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rps = &state.games.rps;
    let name = |t: Option<crate::features::rps::Throw>| t.map(|t| t.name()).unwrap_or("?");
    let computer = if rps.is_revealing() {
        "...".to_string()
    } else {
        name(rps.computer_throw).to_string()
    };
    let result = match (rps.is_revealing(), rps.last_outcome) {
        (false, Some(outcome)) => Span::styled(outcome.message(), theme.highlight()),
        _ => Span::styled("Fist rock · Open palm paper · Two fingers scissors", theme.muted()),
    };
    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled("You: ", theme.muted()),
            Span::styled(name(rps.player_throw), theme.text()),
            Span::styled("    Computer: ", theme.muted()),
            Span::styled(computer, theme.text()),
        ]),
        Line::default(),
        Line::from(result),
    ];
    let block = Block::default()
        .title(" Rock Paper Scissors ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

fn render_basketball(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let ball = &state.games.basketball;
    let court = ball.court_width();
    let threshold = state.config.games.hoop_threshold;
    let (ball_y, label) = match ball.phase() {
        BallPhase::Ready => (10.0, "Thumbs up to shoot"),
        BallPhase::Flying { .. } => (55.0, "Shooting..."),
        BallPhase::Landed { scored: true, .. } => (85.0, "Score!"),
        BallPhase::Landed { scored: false, .. } => (65.0, "Miss"),
    };
    let ball_color = if ball.is_aligned() {
        Color::Green
    } else {
        Color::Rgb(0xff, 0x8c, 0x00)
    };

    let block = Block::default()
        .title(" Basketball ")
        .title_style(theme.title())
        .title_bottom(Line::from(format!(" {} ", label)).right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, court])
        .y_bounds([0.0, COURT_HEIGHT])
        .paint(|ctx| {
            ctx.draw(&Rectangle {
                x: ball.hoop_x() - threshold,
                y: 85.0,
                width: threshold * 2.0,
                height: 3.0,
                color: theme.accent(),
            });
            ctx.draw(&Circle {
                x: ball.ball_x(),
                y: ball_y,
                radius: 6.0,
                color: ball_color,
            });
        });
    frame.render_widget(canvas, area);
}

fn render_spells(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Spells ")
        .title_style(theme.title())
        .title_bottom(Line::from(" Three fingers fire · Open palm ice · One finger lightning ").right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let effects = state.games.spells.effects();
    let canvas = Canvas::default()
        .block(block)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            for effect in effects {
                let style = Style::default().fg(rgb(effect.kind.color()));
                ctx.print(
                    effect.x,
                    1.0 - effect.y,
                    Span::styled(format!("{} {}", effect.kind.glyph(), effect.kind.name()), style),
                );
            }
        });
    frame.render_widget(canvas, area);
}
