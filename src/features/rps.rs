//! Rock-paper-scissors against a random opponent.
//!
//! The player's throw is fixed as soon as the gesture arrives; the computer's
//! throw is revealed a moment later by a timer carrying the round id.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    pub fn beats(&self, other: Throw) -> bool {
        matches!(
            (self, other),
            (Throw::Rock, Throw::Scissors)
                | (Throw::Scissors, Throw::Paper)
                | (Throw::Paper, Throw::Rock)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PlayerWins => "You win!",
            Self::ComputerWins => "Computer wins!",
            Self::Tie => "Tie!",
        }
    }
}

pub fn decide(player: Throw, computer: Throw) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::PlayerWins
    } else {
        Outcome::ComputerWins
    }
}

#[derive(Debug, Clone, Default)]
pub struct RockPaperScissors {
    pub player_score: u32,
    pub computer_score: u32,
    pub player_throw: Option<Throw>,
    pub computer_throw: Option<Throw>,
    pub last_outcome: Option<Outcome>,
    pending_round: Option<u64>,
    next_round: u64,
}

impl RockPaperScissors {
    /// New game: scores zeroed and any unrevealed round forgotten.
    pub fn reset(&mut self) {
        let next_round = self.next_round;
        *self = Self {
            next_round,
            ..Self::default()
        };
    }

    /// Fix the player's throw and open a round awaiting the computer's.
    pub fn throw(&mut self, player: Throw) -> u64 {
        self.next_round += 1;
        let round = self.next_round;
        self.player_throw = Some(player);
        self.computer_throw = None;
        self.pending_round = Some(round);
        round
    }

    /// Reveal the computer's throw for `round`. Rounds superseded by a newer
    /// throw or a reset return `None` and change nothing.
    pub fn reveal(&mut self, round: u64, computer: Throw) -> Option<Outcome> {
        if self.pending_round != Some(round) {
            return None;
        }
        let player = self.player_throw?;
        self.pending_round = None;
        self.computer_throw = Some(computer);
        let outcome = decide(player, computer);
        match outcome {
            Outcome::PlayerWins => self.player_score += 1,
            Outcome::ComputerWins => self.computer_score += 1,
            Outcome::Tie => {}
        }
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    pub fn is_revealing(&self) -> bool {
        self.pending_round.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        for p in Throw::ALL {
            for c in Throw::ALL {
                let expected = match (p, c) {
                    (Throw::Rock, Throw::Scissors)
                    | (Throw::Scissors, Throw::Paper)
                    | (Throw::Paper, Throw::Rock) => Outcome::PlayerWins,
                    _ if p == c => Outcome::Tie,
                    _ => Outcome::ComputerWins,
                };
                assert_eq!(decide(p, c), expected, "{:?} vs {:?}", p, c);
            }
        }
    }

    #[test]
    fn test_exactly_one_side_scores_per_round() {
        for p in Throw::ALL {
            for c in Throw::ALL {
                let mut game = RockPaperScissors::default();
                let round = game.throw(p);
                let outcome = game.reveal(round, c).unwrap();
                let total = game.player_score + game.computer_score;
                match outcome {
                    Outcome::Tie => assert_eq!(total, 0),
                    Outcome::PlayerWins => assert_eq!((game.player_score, game.computer_score), (1, 0)),
                    Outcome::ComputerWins => assert_eq!((game.player_score, game.computer_score), (0, 1)),
                }
            }
        }
    }

    #[test]
    fn test_player_throw_is_visible_before_reveal() {
        let mut game = RockPaperScissors::default();
        game.throw(Throw::Paper);
        assert_eq!(game.player_throw, Some(Throw::Paper));
        assert_eq!(game.computer_throw, None);
        assert!(game.is_revealing());
    }

    #[test]
    fn test_stale_round_is_ignored() {
        let mut game = RockPaperScissors::default();
        let old = game.throw(Throw::Rock);
        let new = game.throw(Throw::Paper);
        assert_eq!(game.reveal(old, Throw::Scissors), None);
        assert_eq!(game.reveal(new, Throw::Rock), Some(Outcome::PlayerWins));
        assert_eq!(game.reveal(new, Throw::Rock), None);
        assert_eq!(game.player_score, 1);
    }

    #[test]
    fn test_reset_discards_pending_round() {
        let mut game = RockPaperScissors::default();
        let round = game.throw(Throw::Rock);
        game.player_score = 4;
        game.reset();
        assert_eq!(game.player_score, 0);
        assert_eq!(game.reveal(round, Throw::Scissors), None);
        assert!(game.throw(Throw::Rock) > round);
    }
}
