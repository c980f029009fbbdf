use knightline::board::Game;
use knightline::perft::perft;

#[test]
fn perft_startpos_small_depths() {
    let mut g = Game::new();
    assert_eq!(perft(&mut g, 1), 20);
    assert_eq!(perft(&mut g, 2), 400);
    assert_eq!(perft(&mut g, 3), 8902);
    assert_eq!(g.ply(), 0);
}

#[test]
fn perft_kiwipete_exercises_castling_and_en_passant() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut g = Game::from_fen(fen).unwrap();
    assert_eq!(perft(&mut g, 1), 48);
    assert_eq!(perft(&mut g, 2), 2039);
    assert_eq!(g.fen(), fen);
}
