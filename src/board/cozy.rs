use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Square};
use std::fmt;
use crate::board::zobrist;
use crate::error::{GameError, Result};

/// Terminal state of a position as seen by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Side to move is mated.
    Checkmate,
    /// Stalemate, fifty-move rule, threefold repetition or dead material.
    Draw,
    Ongoing,
}

impl Outcome {
    pub fn is_terminal(self) -> bool { self != Outcome::Ongoing }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub castle_king_side: bool,
    pub castle_queen_side: bool,
    pub en_passant: bool,
    pub promotion: Option<Piece>,
}

impl MoveFlags {
    pub fn is_castle(&self) -> bool { self.castle_king_side || self.castle_queen_side }
}

/// A move after it has been played, annotated with what it did.
///
/// `to` is the destination in standard notation: for castling it is the
/// king's target square (g- or c-file), not the rook square cozy-chess uses
/// internally. `mv` keeps the board's own encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    pub color: Color,
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub flags: MoveFlags,
    pub check: bool,
    pub outcome: Outcome,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool { self.captured.is_some() }
}

impl fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.flags.promotion { write!(f, "{}", piece_char(p))?; }
        Ok(())
    }
}

pub fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

pub fn color_char(color: Color) -> char {
    if color == Color::White { 'w' } else { 'b' }
}

/// Reversible game over a cozy-chess board.
///
/// cozy-chess is copy-make, so every `make` pushes the previous board and
/// `undo_move` pops it back. Position keys ride along for repetition draws.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    stack: Vec<(Board, Move)>,
    keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

impl Game {
    pub fn new() -> Self { Self::from_board(Board::default()) }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Board::from_fen(fen, false)
            .map(Self::from_board)
            .map_err(|e| GameError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn from_board(board: Board) -> Self {
        let key = zobrist::compute(&board);
        Self { board, stack: Vec::with_capacity(128), keys: vec![key] }
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn turn(&self) -> Color { self.board.side_to_move() }

    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    /// Number of moves that can be undone.
    pub fn ply(&self) -> usize { self.stack.len() }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|ml| {
            if ml.from == from { moves.extend(ml); }
            false
        });
        moves
    }

    /// Play a move taken from `legal_moves` without building an `AppliedMove`.
    pub fn make(&mut self, mv: Move) {
        let prev = self.board.clone();
        self.board.play(mv);
        self.stack.push((prev, mv));
        self.keys.push(zobrist::compute(&self.board));
    }

    /// Validate and play `mv`, reporting captures and special-move flags.
    pub fn apply_move(&mut self, mv: Move) -> Result<AppliedMove> {
        if !self.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove { notation: mv.to_string() });
        }
        let color = self.board.side_to_move();
        let piece = self.board.piece_on(mv.from)
            .ok_or_else(|| GameError::IllegalMove { notation: mv.to_string() })?;
        let mut flags = MoveFlags { promotion: mv.promotion, ..MoveFlags::default() };
        let mut captured = None;
        let to = match self.castle_target(mv) {
            Some(king_to) => {
                if (mv.to.file() as u8) > (mv.from.file() as u8) {
                    flags.castle_king_side = true;
                } else {
                    flags.castle_queen_side = true;
                }
                king_to
            }
            None => {
                if let Some(p) = self.board.piece_on(mv.to) {
                    captured = Some(p);
                } else if piece == Piece::Pawn && mv.from.file() != mv.to.file() {
                    flags.en_passant = true;
                    captured = Some(Piece::Pawn);
                }
                mv.to
            }
        };
        self.make(mv);
        Ok(AppliedMove {
            mv,
            color,
            piece,
            from: mv.from,
            to,
            captured,
            flags,
            check: self.is_check(),
            outcome: self.outcome(),
        })
    }

    /// Revert the most recent move. Returns `None` when there is nothing to undo.
    pub fn undo_move(&mut self) -> Option<Move> {
        let (prev, mv) = self.stack.pop()?;
        self.board = prev;
        self.keys.pop();
        Some(mv)
    }

    pub fn outcome(&self) -> Outcome {
        match self.board.status() {
            GameStatus::Won => Outcome::Checkmate,
            GameStatus::Drawn => Outcome::Draw,
            GameStatus::Ongoing => {
                if self.is_threefold_repetition() || insufficient_material(&self.board) {
                    Outcome::Draw
                } else {
                    Outcome::Ongoing
                }
            }
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.keys.last() else { return false };
        // Only positions since the last capture or pawn move can recur.
        let window = self.board.halfmove_clock() as usize + 1;
        self.keys.iter().rev().take(window).filter(|&&k| k == current).count() >= 3
    }

    /// Look up a legal move by UCI text. Castling is accepted both as the
    /// king's two-square step (`e1g1`) and as king-takes-rook (`e1h1`).
    pub fn find_move(&self, uci: &str) -> Option<Move> {
        let uci = uci.trim().to_ascii_lowercase();
        self.legal_moves().into_iter().find(|&m| self.to_uci(m) == uci || m.to_string() == uci)
    }

    /// Standard UCI text for a legal move of this position.
    pub fn to_uci(&self, mv: Move) -> String {
        match self.castle_target(mv) {
            Some(king_to) => format!("{}{}", mv.from, king_to),
            None => mv.to_string(),
        }
    }

    fn castle_target(&self, mv: Move) -> Option<Square> {
        let mover = self.board.side_to_move();
        if self.board.piece_on(mv.from) != Some(Piece::King) || self.board.color_on(mv.to) != Some(mover) {
            return None;
        }
        let file = if (mv.to.file() as u8) > (mv.from.file() as u8) { File::G } else { File::C };
        Some(Square::new(file, mv.from.rank()))
    }
}

fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() { return false; }
    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if knights.len() + bishops.len() <= 1 { return true; }
    if !knights.is_empty() { return false; }
    let mut shades = bishops.into_iter().map(|sq| (sq.file() as u8 + sq.rank() as u8) % 2);
    match shades.next() {
        Some(first) => shades.all(|s| s == first),
        None => true,
    }
}
