use cozy_chess::Board;
use knightline::search::eval::evaluate;

// Colour-swapped mirror: ranks reversed, piece case swapped, side flipped.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let placement: Vec<String> = fields[0].split('/').rev().map(|rank| {
        rank.chars().map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() }).collect()
    }).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };
    format!("{} {} - - 0 1", placement.join("/"), side)
}

#[test]
fn startpos_evaluates_to_exactly_zero() {
    assert_eq!(evaluate(&Board::default()), 0);
}

#[test]
fn knight_center_better_than_rim() {
    // White: Kh1, Nd4; Black: Ka8. White to move.
    let center = Board::from_fen("k7/8/8/8/3N4/8/8/7K w - - 0 1", false).unwrap();
    let rim = Board::from_fen("k7/8/8/8/8/8/8/N6K w - - 0 1", false).unwrap();
    let c = evaluate(&center);
    let r = evaluate(&rim);
    assert!(c > r, "center eval {c} should be greater than rim {r}");
}

#[test]
fn pawn_advanced_better_than_back() {
    let advanced = Board::from_fen("k7/8/8/8/4P3/8/8/7K w - - 0 1", false).unwrap();
    let back = Board::from_fen("k7/8/8/8/8/8/4P3/7K w - - 0 1", false).unwrap();
    let a = evaluate(&advanced);
    let b = evaluate(&back);
    assert!(a > b, "advanced pawn eval {a} should exceed back pawn {b}");
}

#[test]
fn material_values_are_centipawns() {
    // Extra white queen and rook; kings cancel.
    let b = Board::from_fen("k7/8/8/8/8/8/8/1RQ4K w - - 0 1", false).unwrap();
    assert_eq!(evaluate(&b), 900 + 500);
    // A black knight on b8 scores its value plus the mirrored rim penalty.
    let b = Board::from_fen("kn6/8/8/8/8/8/8/7K w - - 0 1", false).unwrap();
    assert_eq!(evaluate(&b), -(320 - 40));
}

#[test]
fn evaluation_is_antisymmetric_under_colour_swap() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "1n5k/P7/8/8/8/8/8/K7 w - - 0 1",
    ];
    for fen in fens {
        let b = Board::from_fen(fen, false).unwrap();
        let m = Board::from_fen(&mirror_fen(fen), false).unwrap();
        assert_eq!(evaluate(&b), -evaluate(&m), "not antisymmetric for {fen}");
    }
}

#[test]
fn evaluate_does_not_touch_the_board() {
    let b = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3", false).unwrap();
    let before = b.clone();
    let first = evaluate(&b);
    assert_eq!(evaluate(&b), first);
    assert_eq!(format!("{b}"), format!("{before}"));
}
