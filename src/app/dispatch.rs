//! Gesture bindings for the gesture-reactive features.
//!
//! The same label means different things depending on who is listening, so
//! bindings are a flat `(target, gesture) -> command` table rather than
//! per-screen conditionals.

use crate::app::action::Action;
use crate::app::event::TimerEvent;
use crate::app::state::{AppState, Screen};
use crate::backend::types::Gesture;
use crate::features::games::GameKind;
use crate::features::rps::Throw;
use crate::features::spells::SpellKind;
use rand::RngExt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Rps,
    Basketball,
    Spells,
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommand {
    RpsThrow(Throw),
    Shoot,
    CastSpell(SpellKind),
    NextSlide,
    PreviousSlide,
    TogglePlay,
}

pub const BINDINGS: &[(Target, Gesture, GestureCommand)] = &[
    (Target::Rps, Gesture::Fist, GestureCommand::RpsThrow(Throw::Rock)),
    (Target::Rps, Gesture::OpenPalm, GestureCommand::RpsThrow(Throw::Paper)),
    (Target::Rps, Gesture::TwoFingersUp, GestureCommand::RpsThrow(Throw::Scissors)),
    (Target::Basketball, Gesture::ThumbsUp, GestureCommand::Shoot),
    (Target::Spells, Gesture::ThreeFingersUp, GestureCommand::CastSpell(SpellKind::Fire)),
    (Target::Spells, Gesture::OpenPalm, GestureCommand::CastSpell(SpellKind::Ice)),
    (Target::Spells, Gesture::OneFingerUp, GestureCommand::CastSpell(SpellKind::Lightning)),
    (Target::Presentation, Gesture::OneFingerUp, GestureCommand::NextSlide),
    (Target::Presentation, Gesture::Fist, GestureCommand::PreviousSlide),
    (Target::Presentation, Gesture::OpenPalm, GestureCommand::TogglePlay),
];

/// Which feature, if any, listens to gestures on `screen`.
pub fn target_for(screen: Screen, current_game: Option<GameKind>) -> Option<Target> {
    match screen {
        Screen::Presentation => Some(Target::Presentation),
        Screen::Games => current_game.map(|game| match game {
            GameKind::Rps => Target::Rps,
            GameKind::Basketball => Target::Basketball,
            GameKind::Spells => Target::Spells,
        }),
        _ => None,
    }
}

pub fn command_for(target: Target, gesture: Gesture) -> Option<GestureCommand> {
    BINDINGS
        .iter()
        .find(|(t, g, _)| *t == target && *g == gesture)
        .map(|(_, _, cmd)| *cmd)
}

/// Forward a polled gesture on `screen` to its feature.
pub fn dispatch(state: &mut AppState, screen: Screen, gesture: Gesture) -> Vec<Action> {
    if !gesture.is_known() {
        return Vec::new();
    }
    let Some(target) = target_for(screen, state.games.current) else {
        return Vec::new();
    };
    match command_for(target, gesture) {
        Some(cmd) => {
            tracing::debug!("{} -> {:?}", gesture.label(), cmd);
            apply_command(state, cmd)
        }
        None => Vec::new(),
    }
}

pub fn apply_command(state: &mut AppState, cmd: GestureCommand) -> Vec<Action> {
    state.dirty = true;
    let games = &state.config.games;
    match cmd {
        GestureCommand::RpsThrow(throw) => {
            let round = state.games.rps.throw(throw);
            vec![Action::Schedule {
                delay: Duration::from_millis(games.rps_reveal_delay_ms),
                event: TimerEvent::RpsReveal { round },
            }]
        }
        GestureCommand::Shoot => match state.games.basketball.shoot() {
            Some(shot) => vec![Action::Schedule {
                delay: Duration::from_millis(games.shot_duration_ms),
                event: TimerEvent::ShotLanded { shot },
            }],
            None => Vec::new(),
        },
        GestureCommand::CastSpell(kind) => {
            let mut rng = rand::rng();
            let x = rng.random_range(0.1..=0.9);
            let y = rng.random_range(0.1..=0.9);
            let effect = state.games.spells.cast(kind, x, y);
            vec![Action::Schedule {
                delay: Duration::from_millis(games.spell_fade_ms),
                event: TimerEvent::SpellFaded { effect },
            }]
        }
        GestureCommand::NextSlide => {
            state.presentation.advance();
            Vec::new()
        }
        GestureCommand::PreviousSlide => {
            state.presentation.retreat();
            Vec::new()
        }
        GestureCommand::TogglePlay => {
            state.presentation.toggle();
            Vec::new()
        }
    }
}

/// Deliver a feature timer. Timers for superseded rounds, shots or effects
/// change nothing.
pub fn on_timer(state: &mut AppState, event: TimerEvent) -> Vec<Action> {
    match event {
        TimerEvent::RpsReveal { round } => {
            let computer = Throw::ALL[rand::rng().random_range(0..Throw::ALL.len())];
            if let Some(outcome) = state.games.rps.reveal(round, computer) {
                tracing::debug!("rps round {}: {}", round, outcome.message());
                state.dirty = true;
            }
            Vec::new()
        }
        TimerEvent::ShotLanded { shot } => match state.games.basketball.land(shot) {
            Some(scored) => {
                tracing::debug!("shot {} landed, scored: {}", shot, scored);
                state.dirty = true;
                vec![Action::Schedule {
                    delay: Duration::from_millis(state.config.games.ball_reset_ms),
                    event: TimerEvent::BallReset { shot },
                }]
            }
            None => Vec::new(),
        },
        TimerEvent::BallReset { shot } => {
            if state.games.basketball.reset_ball(shot) {
                state.dirty = true;
            }
            Vec::new()
        }
        TimerEvent::SpellFaded { effect } => {
            if state.games.spells.fade(effect) {
                state.dirty = true;
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::HandPosition;
    use crate::config::{AppConfig, SettingsStore};

    fn state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            AppConfig::default(),
            SettingsStore::new(dir.path().join("settings.toml")),
        );
        (dir, state)
    }

    #[test]
    fn test_each_target_gesture_pair_bound_once() {
        for (i, (t, g, _)) in BINDINGS.iter().enumerate() {
            let dupes = BINDINGS[i + 1..]
                .iter()
                .filter(|(t2, g2, _)| t2 == t && g2 == g)
                .count();
            assert_eq!(dupes, 0, "{:?}/{:?} bound twice", t, g);
        }
    }

    #[test]
    fn test_same_gesture_differs_by_target() {
        assert_eq!(
            command_for(Target::Rps, Gesture::Fist),
            Some(GestureCommand::RpsThrow(Throw::Rock))
        );
        assert_eq!(
            command_for(Target::Presentation, Gesture::Fist),
            Some(GestureCommand::PreviousSlide)
        );
        assert_eq!(command_for(Target::Basketball, Gesture::Fist), None);
    }

    #[test]
    fn test_targets() {
        assert_eq!(target_for(Screen::Games, None), None);
        assert_eq!(target_for(Screen::Games, Some(GameKind::Spells)), Some(Target::Spells));
        assert_eq!(target_for(Screen::Presentation, Some(GameKind::Rps)), Some(Target::Presentation));
        assert_eq!(target_for(Screen::Dashboard, Some(GameKind::Rps)), None);
    }

    #[test]
    fn test_unknown_gesture_does_nothing() {
        let (_dir, mut state) = state();
        state.games.current = Some(GameKind::Rps);
        assert!(dispatch(&mut state, Screen::Games, Gesture::Unknown).is_empty());
        assert!(state.games.rps.player_throw.is_none());
    }

    #[test]
    fn test_rps_throw_schedules_reveal() {
        let (_dir, mut state) = state();
        state.games.current = Some(GameKind::Rps);
        let actions = dispatch(&mut state, Screen::Games, Gesture::OpenPalm);
        assert_eq!(
            actions,
            vec![Action::Schedule {
                delay: Duration::from_millis(300),
                event: TimerEvent::RpsReveal { round: 1 },
            }]
        );
        on_timer(&mut state, TimerEvent::RpsReveal { round: 1 });
        let rps = &state.games.rps;
        assert!(rps.computer_throw.is_some());
        assert!(rps.player_score + rps.computer_score <= 1);
    }

    #[test]
    fn test_aligned_shot_scores_once_then_resets() {
        let (_dir, mut state) = state();
        state.games.current = Some(GameKind::Basketball);
        state.games.basketball.aim(HandPosition { x: 0.55, y: 0.5, visible: true });
        let actions = dispatch(&mut state, Screen::Games, Gesture::ThumbsUp);
        let shot = match actions[0] {
            Action::Schedule { event: TimerEvent::ShotLanded { shot }, .. } => shot,
            ref other => panic!("unexpected {:?}", other),
        };
        // A second thumbs up while the ball flies is ignored.
        assert!(dispatch(&mut state, Screen::Games, Gesture::ThumbsUp).is_empty());

        let reset = on_timer(&mut state, TimerEvent::ShotLanded { shot });
        assert_eq!(state.games.basketball.score(), 1);
        assert!(on_timer(&mut state, TimerEvent::ShotLanded { shot }).is_empty());
        assert_eq!(state.games.basketball.score(), 1);
        assert_eq!(reset.len(), 1);
    }

    #[test]
    fn test_spell_fades_after_timer() {
        let (_dir, mut state) = state();
        state.games.current = Some(GameKind::Spells);
        let actions = dispatch(&mut state, Screen::Games, Gesture::ThreeFingersUp);
        assert_eq!(state.games.spells.cast_count, 1);
        assert_eq!(state.games.spells.last_cast, Some(SpellKind::Fire));
        let effect = state.games.spells.effects()[0];
        assert!((0.1..=0.9).contains(&effect.x));
        match actions[0] {
            Action::Schedule { event, delay } => {
                assert_eq!(delay, Duration::from_millis(1100));
                on_timer(&mut state, event);
            }
            ref other => panic!("unexpected {:?}", other),
        }
        assert!(state.games.spells.effects().is_empty());
    }

    #[test]
    fn test_presentation_bindings() {
        let (_dir, mut state) = state();
        dispatch(&mut state, Screen::Presentation, Gesture::OneFingerUp);
        assert_eq!(state.presentation.current(), 2);
        dispatch(&mut state, Screen::Presentation, Gesture::Fist);
        dispatch(&mut state, Screen::Presentation, Gesture::Fist);
        assert_eq!(state.presentation.current(), 1);
        dispatch(&mut state, Screen::Presentation, Gesture::OpenPalm);
        assert!(state.presentation.is_playing());
    }
}
