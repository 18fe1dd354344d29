pub mod chess;
pub mod coloring;

use rand::Rng;

use self::chess::ChessBoard;
use self::coloring::ColoringBoard;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardMove {
    pub notation: String,
    pub captured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Board {
    Chess(ChessBoard),
    Coloring(ColoringBoard),
}

impl Board {
    pub fn apply_player_move(&mut self, value: &str) -> Option<BoardMove> {
        match self {
            Board::Chess(board) => board.apply_player_move(value),
            Board::Coloring(board) => board.apply_player_move(value),
        }
    }

    pub fn opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<BoardMove> {
        match self {
            Board::Chess(board) => board.opponent_move(rng),
            Board::Coloring(board) => board.opponent_move(rng),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Board::Chess(board) => board.is_complete(),
            Board::Coloring(board) => board.is_complete(),
        }
    }

    pub fn reset(&mut self) {
        *self = match self {
            Board::Chess(_) => Board::Chess(ChessBoard::default()),
            Board::Coloring(_) => Board::Coloring(ColoringBoard::default()),
        };
    }
}
