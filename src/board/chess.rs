use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::BoardMove;

const SIZE: usize = 8;
const FILES: &[u8; SIZE] = b"abcdefgh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

type Square = (usize, usize);

/// Row 0 is the black back rank (rank 8), row 7 the white one (rank 1).
#[derive(Debug, Clone, PartialEq)]
pub struct ChessBoard {
    squares: [[Option<Piece>; SIZE]; SIZE],
}

impl Default for ChessBoard {
    fn default() -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut squares = [[None; SIZE]; SIZE];
        for (column, kind) in back_rank.into_iter().enumerate() {
            squares[0][column] = Some(Piece::new(Color::Black, kind));
            squares[1][column] = Some(Piece::new(Color::Black, Pawn));
            squares[6][column] = Some(Piece::new(Color::White, Pawn));
            squares[7][column] = Some(Piece::new(Color::White, kind));
        }
        ChessBoard { squares }
    }
}

impl ChessBoard {
    pub fn piece_at(&self, square: &str) -> Option<Piece> {
        parse_square(square).and_then(|(row, column)| self.squares[row][column])
    }

    /// Moves a white piece anywhere that is not occupied by another white piece.
    pub fn apply_player_move(&mut self, notation: &str) -> Option<BoardMove> {
        let notation = notation.trim().to_lowercase();
        if notation.len() != 4 || !notation.is_ascii() {
            return None;
        }
        let from = parse_square(&notation[..2])?;
        let to = parse_square(&notation[2..])?;
        if from == to {
            return None;
        }
        let piece = self.get(from).filter(|piece| piece.color == Color::White)?;
        let captured = match self.get(to) {
            Some(target) if target.color == Color::White => return None,
            target => target.is_some(),
        };
        self.set(to, Some(piece));
        self.set(from, None);
        Some(BoardMove { notation, captured })
    }

    /// Moves a random black piece one square down onto an empty square.
    pub fn opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<BoardMove> {
        let candidates: Vec<Square> = (0..SIZE - 1)
            .flat_map(|row| (0..SIZE).map(move |column| (row, column)))
            .filter(|&(row, column)| {
                matches!(self.squares[row][column], Some(piece) if piece.color == Color::Black)
                    && self.squares[row + 1][column].is_none()
            })
            .collect();
        let &(row, column) = candidates.choose(rng)?;
        let to = (row + 1, column);
        self.set(to, self.get((row, column)));
        self.set((row, column), None);
        Some(BoardMove {
            notation: format!("{}{}", square_name((row, column)), square_name(to)),
            captured: false,
        })
    }

    pub fn is_complete(&self) -> bool {
        [Color::White, Color::Black].iter().any(|&color| {
            !self
                .squares
                .iter()
                .flatten()
                .flatten()
                .any(|piece| piece.color == color && piece.kind == PieceKind::King)
        })
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| square.map(|piece| piece.glyph().to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    fn get(&self, (row, column): Square) -> Option<Piece> {
        self.squares[row][column]
    }

    fn set(&mut self, (row, column): Square, piece: Option<Piece>) {
        self.squares[row][column] = piece;
    }
}

fn parse_square(square: &str) -> Option<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let column = FILES.iter().position(|file| *file == bytes[0])?;
    let rank = (bytes[1] as char).to_digit(10)? as usize;
    if !(1..=SIZE).contains(&rank) {
        return None;
    }
    Some((SIZE - rank, column))
}

fn square_name((row, column): Square) -> String {
    format!("{}{}", FILES[column] as char, SIZE - row)
}
