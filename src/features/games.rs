use crate::features::basketball::Basketball;
use crate::features::rps::RockPaperScissors;
use crate::features::spells::Spells;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Rps,
    Basketball,
    Spells,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Rps, GameKind::Basketball, GameKind::Spells];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Rps => "Rock Paper Scissors",
            Self::Basketball => "Basketball",
            Self::Spells => "Spells",
        }
    }
}

/// All three games plus the single "current game" slot.
#[derive(Debug, Clone)]
pub struct Games {
    pub current: Option<GameKind>,
    pub rps: RockPaperScissors,
    pub basketball: Basketball,
    pub spells: Spells,
    /// Set when a game was picked while the camera was off.
    pub camera_notice: bool,
}

impl Games {
    pub fn new(court_width: f64, hoop_threshold: f64) -> Self {
        Self {
            current: None,
            rps: RockPaperScissors::default(),
            basketball: Basketball::new(court_width, hoop_threshold),
            spells: Spells::default(),
            camera_notice: false,
        }
    }

    /// Reset the current game's score and transient state.
    pub fn init_current(&mut self) {
        match self.current {
            Some(GameKind::Rps) => self.rps.reset(),
            Some(GameKind::Basketball) => self.basketball.reset(),
            Some(GameKind::Spells) => self.spells.reset(),
            None => {}
        }
    }

    /// Make `kind` the current game. Every other game is reset so rounds,
    /// shots and effects still waiting on a timer are dropped.
    pub fn select(&mut self, kind: GameKind) {
        self.current = Some(kind);
        if kind != GameKind::Rps {
            self.rps.reset();
        }
        if kind != GameKind::Basketball {
            self.basketball.reset();
        }
        if kind != GameKind::Spells {
            self.spells.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::rps::Throw;
    use crate::features::spells::SpellKind;

    #[test]
    fn test_select_drops_other_games_pending_timers() {
        let mut games = Games::new(400.0, 50.0);
        games.select(GameKind::Rps);
        let round = games.rps.throw(Throw::Rock);
        let effect = games.spells.cast(SpellKind::Fire, 0.5, 0.5);

        games.select(GameKind::Basketball);
        assert_eq!(games.current, Some(GameKind::Basketball));
        assert_eq!(games.rps.reveal(round, Throw::Scissors), None);
        assert_eq!(games.rps.player_score, 0);
        assert!(!games.spells.fade(effect));
    }

    #[test]
    fn test_select_keeps_entered_game() {
        let mut games = Games::new(400.0, 50.0);
        games.select(GameKind::Rps);
        let round = games.rps.throw(Throw::Paper);
        games.select(GameKind::Rps);
        assert!(games.rps.reveal(round, Throw::Rock).is_some());
    }
}
