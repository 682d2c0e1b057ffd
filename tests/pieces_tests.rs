//! Piece catalog, rotation and spawn tests

use blockfall::core::{get_shape, try_rotate, Board, Piece, Shape};
use blockfall::types::{PieceKind, SPAWN_X, SPAWN_Y};

#[test]
fn test_catalog_sizes() {
    let sizes: Vec<(u8, u8)> = PieceKind::ALL
        .iter()
        .map(|&k| (get_shape(k).rows(), get_shape(k).cols()))
        .collect();
    // I, J, L, O, S, T, Z
    assert_eq!(
        sizes,
        vec![(1, 4), (2, 3), (2, 3), (2, 2), (2, 3), (2, 3), (2, 3)]
    );
    for kind in PieceKind::ALL {
        assert_eq!(get_shape(kind).minos().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_spawn_never_collides_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.x, 4);
        assert!(!board.collides(piece.x, piece.y, &piece.shape), "{:?}", kind);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(back, shape, "{:?}", kind);
    }
}

#[test]
fn test_rotation_is_transpose_then_reverse() {
    // T: .#. / ### -> #. / ## / #.
    let t = get_shape(PieceKind::T).rotated_cw();
    assert_eq!((t.rows(), t.cols()), (3, 2));
    assert_eq!(t, Shape::from_bits([[1, 0], [1, 1], [1, 0]]));

    let i = get_shape(PieceKind::I).rotated_cw();
    assert_eq!((i.rows(), i.cols()), (4, 1));
}

#[test]
fn test_rotation_leaves_catalog_untouched() {
    let before = get_shape(PieceKind::S);
    let _ = before.rotated_cw();
    assert_eq!(get_shape(PieceKind::S), before);
}

#[test]
fn test_i_rotation_at_column_zero_succeeds() {
    let board = Board::new();
    let shape = get_shape(PieceKind::I);
    let (rotated, kick) =
        try_rotate(&shape, 0, 0, |x, y, s| board.collides(x, y, s)).expect("rotation fits");
    assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
    assert_eq!(kick, (0, 0));
}

#[test]
fn test_kicks_tried_in_order() {
    let mut board = Board::new();
    let shape = get_shape(PieceKind::I);

    // Column 0 blocked below the piece: (0,0) fails, (-1,0) hits the wall, (+1,0) wins.
    board.set(0, 2, Some(PieceKind::O));
    let (_, kick) = try_rotate(&shape, 0, 0, |x, y, s| board.collides(x, y, s)).unwrap();
    assert_eq!(kick, (1, 0));

    // Column 1 blocked too: only the upward kick is left.
    board.set(1, 3, Some(PieceKind::O));
    board.set(0, 2, None);
    board.set(0, 3, Some(PieceKind::O));
    let (_, kick) = try_rotate(&shape, 0, 0, |x, y, s| board.collides(x, y, s)).unwrap();
    assert_eq!(kick, (0, -1));
}

#[test]
fn test_rotation_rejected_when_every_kick_collides() {
    let board = Board::new();
    // Horizontal I resting on the floor cannot stand up: all four offsets reach past row 19.
    let shape = get_shape(PieceKind::I);
    assert!(try_rotate(&shape, 3, 19, |x, y, s| board.collides(x, y, s)).is_none());
}

#[test]
fn test_piece_cells_are_absolute() {
    let mut piece = Piece::spawn(PieceKind::Z);
    piece.x = 2;
    piece.y = 5;
    let cells: Vec<_> = piece.cells().collect();
    assert_eq!(cells, vec![(2, 5), (3, 5), (3, 6), (4, 6)]);
}
