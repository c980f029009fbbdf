use cozy_chess::{Board, Color, File, Piece, Rank, Square};
use std::sync::OnceLock;

// 12 piece planes, then side, castling (4) and en-passant files (8).
const PIECE_KEYS: usize = 12 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLE_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLE_KEYS + 4;
const TABLE_LEN: usize = EP_KEYS + 8;

fn piece_index(color: Color, piece: Piece) -> usize {
    let p = match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    };
    let c = if color == Color::White { 0 } else { 1 };
    c * 6 + p
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; TABLE_LEN]> = OnceLock::new();

fn table() -> &'static [u64; TABLE_LEN] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; TABLE_LEN];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

/// Position key for repetition detection. Two boards with the same key have
/// the same pieces, side to move, castling rights and capturable en-passant
/// file.
pub fn compute(board: &Board) -> u64 {
    let table = table();
    let mut key = 0u64;
    for color in [Color::White, Color::Black] {
        for piece in Piece::ALL {
            for sq in board.colors(color) & board.pieces(piece) {
                key ^= table[piece_index(color, piece) * 64 + sq as usize];
            }
        }
        let rights = board.castle_rights(color);
        let base = CASTLE_KEYS + if color == Color::White { 0 } else { 2 };
        if rights.short.is_some() { key ^= table[base]; }
        if rights.long.is_some() { key ^= table[base + 1]; }
    }
    if board.side_to_move() == Color::Black { key ^= table[SIDE_KEY]; }
    if let Some(file) = capturable_en_passant(board) { key ^= table[EP_KEYS + file as usize]; }
    key
}

// cozy-chess keeps the file after every double push; it only tells
// positions apart when a pawn of the side to move can take there.
fn capturable_en_passant(board: &Board) -> Option<File> {
    let file = board.en_passant()?;
    let rank = if board.side_to_move() == Color::White { Rank::Sixth } else { Rank::Third };
    let target = Square::new(file, rank);
    let mut capturable = false;
    board.generate_moves(|ml| {
        if ml.piece == Piece::Pawn && ml.into_iter().any(|m| m.to == target) {
            capturable = true;
        }
        capturable
    });
    capturable.then_some(file)
}
