//! Step helpers - the gravity and action sequences shared by every front end
//!
//! The engine never spawns after a lock and never records game over. Both
//! front ends (terminal loop, session server) need the same follow-up:
//! a blocked down step locks, then the next piece spawns, and a failed spawn
//! means the game is over. These helpers hold no state of their own.

use crate::engine::GameEngine;
use crate::types::GameAction;

/// Result of one gravity step or action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The engine accepted the move (false for a blocked shift or rotation)
    pub applied: bool,
    /// The active piece was locked into the board
    pub locked: bool,
    /// A new piece could not be placed after the lock
    pub game_over: bool,
}

/// One gravity step: move down, or lock and spawn the next piece.
pub fn tick(engine: &mut GameEngine) -> StepOutcome {
    if engine.move_down() {
        return StepOutcome {
            applied: true,
            ..StepOutcome::default()
        };
    }
    respawn(engine)
}

/// Apply a player action, spawning the next piece if it locked the current one.
pub fn apply_action(engine: &mut GameEngine, action: GameAction) -> StepOutcome {
    match action {
        GameAction::MoveLeft => shifted(engine.move_left()),
        GameAction::MoveRight => shifted(engine.move_right()),
        GameAction::Rotate => shifted(engine.rotate()),
        GameAction::MoveDown => tick(engine),
        GameAction::HardDrop => {
            engine.hard_drop();
            respawn(engine)
        }
    }
}

fn shifted(applied: bool) -> StepOutcome {
    StepOutcome {
        applied,
        ..StepOutcome::default()
    }
}

fn respawn(engine: &mut GameEngine) -> StepOutcome {
    let spawned = engine.spawn_next_piece();
    StepOutcome {
        applied: true,
        locked: true,
        game_over: !spawned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_moves_piece_down() {
        let mut engine = GameEngine::with_seed(10, 20, 3).unwrap();
        let outcome = tick(&mut engine);
        assert_eq!(
            outcome,
            StepOutcome {
                applied: true,
                locked: false,
                game_over: false
            }
        );
        assert_eq!(engine.piece_position().1, 1);
    }

    #[test]
    fn hard_drop_spawns_next_piece() {
        let mut engine = GameEngine::with_seed(10, 20, 3).unwrap();
        let next = engine.next_piece();
        let outcome = apply_action(&mut engine, GameAction::HardDrop);

        assert!(outcome.locked);
        assert!(!outcome.game_over);
        assert_eq!(engine.current_kind(), next);
        assert_eq!(engine.piece_position(), (3, 0));
        assert_eq!(engine.board().filled_count(), 4);
    }

    #[test]
    fn blocked_shift_is_not_applied() {
        let mut engine = GameEngine::with_seed(10, 20, 3).unwrap();
        while engine.move_left() {}
        let outcome = apply_action(&mut engine, GameAction::MoveLeft);
        assert!(!outcome.applied);
        assert!(!outcome.locked);
    }

    #[test]
    fn stacking_to_the_top_ends_the_game() {
        let mut engine = GameEngine::with_seed(10, 20, 3).unwrap();
        let mut outcome = StepOutcome::default();
        for _ in 0..200 {
            outcome = apply_action(&mut engine, GameAction::HardDrop);
            if outcome.game_over {
                break;
            }
        }
        assert!(outcome.game_over);
        // Every piece spawns in the same columns, so the stack reaches row 0.
        assert!((3..7).any(|x| engine.board().is_occupied(x, 0)
            || engine.board().is_occupied(x, 1)));
    }
}
