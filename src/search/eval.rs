use cozy_chess::{Board, Color, Piece, Square};

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;
pub const KING: i32 = 20_000;

// Checkmate score; exceeds any material total so mates dominate the search.
pub const MATE_SCORE: i32 = 1_000_000;

// Tables are laid out as seen from White: index 0 is a8, index 63 is h1.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

/// Positional bonus for `piece` of `color` standing on `sq`. Black reads the
/// table mirrored vertically.
pub fn piece_square(piece: Piece, color: Color, sq: Square) -> i32 {
    let file = sq.file() as usize;
    let rank = sq.rank() as usize;
    let row = if color == Color::White { 7 - rank } else { rank };
    let idx = row * 8 + file;
    match piece {
        Piece::Pawn => PAWN_PST[idx],
        Piece::Knight => KNIGHT_PST[idx],
        _ => 0,
    }
}

/// Static evaluation in centipawns from White's perspective: material plus
/// piece-square bonuses, White adding and Black subtracting.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for piece in Piece::ALL {
            for sq in board.colors(color) & board.pieces(piece) {
                score += sign * (piece_value(piece) + piece_square(piece, color, sq));
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_table_rewards_central_advance() {
        assert_eq!(piece_square(Piece::Pawn, Color::White, Square::E4), 20);
        assert_eq!(piece_square(Piece::Pawn, Color::White, Square::E2), -20);
        assert_eq!(piece_square(Piece::Pawn, Color::Black, Square::E5), 20);
        assert_eq!(piece_square(Piece::Pawn, Color::Black, Square::E7), -20);
    }

    #[test]
    fn only_pawns_and_knights_carry_positional_bonus() {
        for sq in Square::ALL {
            assert_eq!(piece_square(Piece::Queen, Color::White, sq), 0);
            assert_eq!(piece_square(Piece::King, Color::Black, sq), 0);
        }
    }
}
