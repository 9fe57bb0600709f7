//! Hand-aimed basketball.
//!
//! The ball follows the hand horizontally across a court of fixed logical
//! width; a shot is judged on alignment with the hoop at the moment it is
//! taken, scored when it lands, and the ball returns to centre afterwards.

use crate::backend::types::HandPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Ready,
    Flying { shot: u64, aligned: bool },
    Landed { shot: u64, scored: bool },
}

#[derive(Debug, Clone)]
pub struct Basketball {
    court_width: f64,
    hoop_x: f64,
    threshold: f64,
    ball_x: f64,
    score: u32,
    phase: BallPhase,
    next_shot: u64,
}

impl Basketball {
    pub fn new(court_width: f64, threshold: f64) -> Self {
        Self {
            court_width,
            hoop_x: court_width / 2.0,
            threshold,
            ball_x: court_width / 2.0,
            score: 0,
            phase: BallPhase::Ready,
            next_shot: 0,
        }
    }

    pub fn court_width(&self) -> f64 {
        self.court_width
    }

    pub fn hoop_x(&self) -> f64 {
        self.hoop_x
    }

    pub fn ball_x(&self) -> f64 {
        self.ball_x
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    /// Zero the score and centre the ball. Shots still in the air are
    /// forgotten, so their timers become no-ops.
    pub fn reset(&mut self) {
        self.score = 0;
        self.ball_x = self.court_width / 2.0;
        self.phase = BallPhase::Ready;
        self.next_shot += 1;
    }

    /// Move the ball under the hand. Hidden hands leave the ball in place.
    pub fn aim(&mut self, position: HandPosition) -> bool {
        if !position.visible || self.phase != BallPhase::Ready {
            return false;
        }
        self.ball_x = position.x.clamp(0.0, 1.0) * self.court_width;
        true
    }

    pub fn is_aligned(&self) -> bool {
        (self.ball_x - self.hoop_x).abs() < self.threshold
    }

    /// Take a shot from the current position. Returns the shot id, or `None`
    /// while a previous shot is still in play.
    pub fn shoot(&mut self) -> Option<u64> {
        if self.phase != BallPhase::Ready {
            return None;
        }
        self.next_shot += 1;
        let shot = self.next_shot;
        self.phase = BallPhase::Flying {
            shot,
            aligned: self.is_aligned(),
        };
        Some(shot)
    }

    /// The shot reaches the hoop. Returns whether it scored.
    pub fn land(&mut self, shot: u64) -> Option<bool> {
        match self.phase {
            BallPhase::Flying { shot: s, aligned } if s == shot => {
                if aligned {
                    self.score += 1;
                }
                self.phase = BallPhase::Landed {
                    shot,
                    scored: aligned,
                };
                Some(aligned)
            }
            _ => None,
        }
    }

    /// Return the ball to the centre after `shot` has landed.
    pub fn reset_ball(&mut self, shot: u64) -> bool {
        match self.phase {
            BallPhase::Landed { shot: s, .. } if s == shot => {
                self.ball_x = self.court_width / 2.0;
                self.phase = BallPhase::Ready;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aim_at(game: &mut Basketball, x: f64) {
        game.aim(HandPosition { x, y: 0.5, visible: true });
    }

    #[test]
    fn test_aligned_shot_scores_once() {
        let mut game = Basketball::new(400.0, 50.0);
        aim_at(&mut game, 0.55);
        assert!(game.is_aligned());
        let shot = game.shoot().unwrap();
        assert_eq!(game.land(shot), Some(true));
        assert_eq!(game.land(shot), None);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_misaligned_shot_never_scores() {
        let mut game = Basketball::new(400.0, 50.0);
        aim_at(&mut game, 0.9);
        assert!(!game.is_aligned());
        let shot = game.shoot().unwrap();
        assert_eq!(game.land(shot), Some(false));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut game = Basketball::new(400.0, 50.0);
        aim_at(&mut game, 0.625);
        assert_eq!(game.ball_x(), 250.0);
        assert!(!game.is_aligned());
    }

    #[test]
    fn test_ball_resets_after_landing_regardless_of_result() {
        let mut game = Basketball::new(400.0, 50.0);
        aim_at(&mut game, 0.1);
        let shot = game.shoot().unwrap();
        assert_eq!(game.shoot(), None);
        game.land(shot);
        assert!(game.reset_ball(shot));
        assert_eq!(game.ball_x(), 200.0);
        assert_eq!(game.phase(), BallPhase::Ready);
    }

    #[test]
    fn test_hidden_hand_does_not_move_ball() {
        let mut game = Basketball::new(400.0, 50.0);
        assert!(!game.aim(HandPosition { x: 0.0, y: 0.0, visible: false }));
        assert_eq!(game.ball_x(), 200.0);
    }

    #[test]
    fn test_reset_invalidates_shot_in_flight() {
        let mut game = Basketball::new(400.0, 50.0);
        let shot = game.shoot().unwrap();
        game.reset();
        assert_eq!(game.land(shot), None);
        assert_eq!(game.score(), 0);
    }
}
