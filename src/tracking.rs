//! Stable identities for the pieces of a game.
//!
//! The rules engine only knows which kind of piece stands on which square.
//! Presentation code wants to follow a particular knight from move to move,
//! so identities live here, outside the board, and are advanced with the
//! metadata of each committed move instead of by diffing two boards.

use cozy_chess::{Board, Color, File, Piece, Rank, Square};
use log::warn;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use crate::board::cozy::{color_char, piece_char};
use crate::board::{AppliedMove, Game};

/// Opaque handle of one physical piece, e.g. `wn-2`. Keeps the kind the
/// piece had when tracking started, even after it promotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    color: Color,
    kind: Piece,
    ordinal: u8,
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", color_char(self.color), piece_char(self.kind), self.ordinal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedPiece {
    pub id: PieceId,
    pub kind: Piece,
    pub color: Color,
    pub square: Square,
}

impl Serialize for TrackedPiece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TrackedPiece", 4)?;
        s.serialize_field("id", &self.id.to_string())?;
        s.serialize_field("kind", &piece_char(self.kind).to_string())?;
        s.serialize_field("color", &color_char(self.color).to_string())?;
        s.serialize_field("square", &self.square.to_string())?;
        s.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct TrackedPieces {
    pieces: Vec<TrackedPiece>,
}

impl TrackedPieces {
    /// Fresh identities for every piece on `board`, numbered per color and
    /// kind in board reading order (a8..h8 down to a1..h1).
    pub fn from_board(board: &Board) -> Self {
        let mut counts = [[0u8; 6]; 2];
        let mut pieces = Vec::with_capacity(32);
        for &rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let square = Square::new(file, rank);
                if let (Some(kind), Some(color)) = (board.piece_on(square), board.color_on(square)) {
                    let n = &mut counts[color as usize][kind as usize];
                    *n += 1;
                    pieces.push(TrackedPiece { id: PieceId { color, kind, ordinal: *n }, kind, color, square });
                }
            }
        }
        Self { pieces }
    }

    pub fn from_game(game: &Game) -> Self { Self::from_board(game.board()) }

    /// Identities after `applied` has been played. A capture retires the
    /// captured piece, the mover keeps its id, promotions change its kind
    /// and castling carries the rook along. If nothing stands on the origin
    /// square the mapping is returned unchanged.
    pub fn advance(&self, applied: &AppliedMove) -> Self {
        let Some(mover) = self.at(applied.from).map(|p| p.id) else {
            warn!("no tracked piece on {} for move {}; identities left unchanged", applied.from, applied);
            return self.clone();
        };

        let captured_on = if applied.flags.en_passant {
            Some(Square::new(applied.to.file(), applied.from.rank()))
        } else if applied.is_capture() {
            Some(applied.to)
        } else {
            None
        };

        let mut next: Vec<TrackedPiece> = self.pieces.iter()
            .filter(|p| Some(p.square) != captured_on)
            .copied()
            .collect();

        if let Some(p) = next.iter_mut().find(|p| p.id == mover) {
            p.square = applied.to;
            if let Some(kind) = applied.flags.promotion { p.kind = kind; }
        }

        if applied.flags.is_castle() {
            let rank = if applied.color == Color::White { Rank::First } else { Rank::Eighth };
            let (from_file, to_file) = if applied.flags.castle_king_side { (File::H, File::F) } else { (File::A, File::D) };
            let rook_from = Square::new(from_file, rank);
            match next.iter_mut().find(|p| p.square == rook_from && p.id != mover) {
                Some(rook) => rook.square = Square::new(to_file, rank),
                None => warn!("castling {} without a tracked rook on {}", applied, rook_from),
            }
        }

        Self { pieces: next }
    }

    pub fn at(&self, square: Square) -> Option<&TrackedPiece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub fn get(&self, id: PieceId) -> Option<&TrackedPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedPiece> { self.pieces.iter() }

    pub fn len(&self) -> usize { self.pieces.len() }

    pub fn is_empty(&self) -> bool { self.pieces.is_empty() }

    /// True when squares are pairwise distinct and every tracked piece
    /// matches the board, piece for piece.
    pub fn matches_board(&self, board: &Board) -> bool {
        let mut seen = 0u64;
        for p in &self.pieces {
            let bit = 1u64 << (p.square as usize);
            if seen & bit != 0 { return false; }
            seen |= bit;
            if board.piece_on(p.square) != Some(p.kind) || board.color_on(p.square) != Some(p.color) {
                return false;
            }
        }
        self.pieces.len() == board.occupied().len() as usize
    }
}

impl<'a> IntoIterator for &'a TrackedPieces {
    type Item = &'a TrackedPiece;
    type IntoIter = std::slice::Iter<'a, TrackedPiece>;
    fn into_iter(self) -> Self::IntoIter { self.pieces.iter() }
}

pub fn initialize_tracking(game: &Game) -> TrackedPieces { TrackedPieces::from_game(game) }

pub fn advance(pieces: &TrackedPieces, applied: &AppliedMove) -> TrackedPieces { pieces.advance(applied) }
