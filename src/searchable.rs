//! The contract a game must implement to be searched.
//!
//! The engine never looks inside a position. It asks the game for ordered
//! candidate moves, plays and retracts them in place, and reads back a static
//! score and a position key.

use std::fmt::Debug;

use crate::transposition::HashKey;

/// Any score at or beyond this magnitude is a decided game.
pub const WINNING_VALUE: i32 = 4096;

/// A move as produced by the game's move generator.
pub trait TwoPlayerMove: Clone + Debug + PartialEq {
    /// Heuristic worth of the move from player one's perspective, as assigned
    /// when it was generated. Used for move selection and playout outcomes.
    fn value(&self) -> i32;

    /// True if player one makes this move.
    fn is_player1(&self) -> bool;
}

/// A two-player zero-sum game position that can be searched in place.
///
/// `last_move` is the move that produced the current position. The side to
/// move is the opponent of whoever made it.
pub trait Searchable {
    type Move: TwoPlayerMove;
    type Error: std::error::Error;

    /// Legal moves for the side to move, best first.
    fn generate_moves(&mut self, last_move: &Self::Move) -> Vec<Self::Move>;

    /// Moves that must still be examined at the search horizon, such as
    /// captures. Defaults to none.
    fn generate_urgent_moves(&mut self, _last_move: &Self::Move) -> Vec<Self::Move> {
        Vec::new()
    }

    /// True if the side to move faces an immediate threat and the horizon
    /// should be pushed one ply further.
    fn in_jeopardy(&self, _last_move: &Self::Move) -> bool {
        false
    }

    /// Static score of the current position from player one's perspective.
    /// Must depend only on the position.
    fn worth(&self, last_move: &Self::Move) -> i32;

    /// True if the game is over.
    fn done(&self, last_move: &Self::Move) -> bool;

    fn make_internal_move(&mut self, mv: &Self::Move) -> Result<(), Self::Error>;

    fn undo_internal_move(&mut self, mv: &Self::Move) -> Result<(), Self::Error>;

    /// Key of the current position, kept up to date by make/undo.
    fn hash_key(&self) -> HashKey;
}

/// Returns `value` (player one's perspective) as seen by the given player.
#[inline(always)]
pub fn perspective(value: i32, player1: bool) -> i32 {
    if player1 {
        value
    } else {
        -value
    }
}
