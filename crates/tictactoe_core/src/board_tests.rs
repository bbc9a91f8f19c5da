use super::*;

#[test]
fn test_parse_three_by_three() {
    let board = Board::parse("XO./.X./..O").unwrap();
    assert_eq!(board.size(), BoardSize::Three);
    assert_eq!(board.cell(Position::new(0, 0)), Cell::Occupied(Symbol::X));
    assert_eq!(board.cell(Position::new(0, 1)), Cell::Occupied(Symbol::O));
    assert_eq!(board.cell(Position::new(2, 1)), Cell::Empty);
    assert_eq!(board.occupied_count(), 4);
    assert_eq!(board.empty_count(), 5);
}

#[test]
fn test_parse_rejects_wrong_cell_count() {
    assert!(matches!(
        Board::parse("XO./.X."),
        Err(GameError::InvalidLayout(_))
    ));
}

#[test]
fn test_get_out_of_bounds() {
    let board = Board::new(BoardSize::Three);
    assert_eq!(board.get(Position::new(3, 0)), None);
    assert_eq!(board.get(Position::new(2, 2)), Some(Cell::Empty));
}

#[test]
fn test_set_out_of_bounds_fails() {
    let mut board = Board::new(BoardSize::Four);
    let err = board
        .set(Position::new(0, 4), Cell::Occupied(Symbol::X))
        .unwrap_err();
    assert_eq!(
        err,
        InvalidMoveError::OutOfBounds {
            position: Position::new(0, 4),
            size: 4
        }
    );
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_winning_line_column() {
    let board = Board::parse(".O./XO./.OX").unwrap();
    let (winner, line) = board.winning_line().unwrap();
    assert_eq!(winner, Symbol::O);
    assert_eq!(line.kind, LineKind::Column(1));
}

#[test]
fn test_winning_line_anti_diagonal_four() {
    let board = Board::parse("...X/..X./.X../X...").unwrap();
    let (winner, line) = board.winning_line().unwrap();
    assert_eq!(winner, Symbol::X);
    assert_eq!(line.kind, LineKind::AntiDiagonal);
}

#[test]
fn test_no_winner_on_partial_line() {
    let board = Board::parse("XX./OO./...").unwrap();
    assert!(board.winning_line().is_none());
}

#[test]
fn test_display_round_trips_layout() {
    let board = Board::parse("XO./.X./..O").unwrap();
    assert_eq!(board.to_string(), "XO.\n.X.\n..O");
}

#[test]
fn test_copy_does_not_alias() {
    let original = Board::new(BoardSize::Three);
    let mut copy = original;
    copy.set(Position::new(1, 1), Cell::Occupied(Symbol::X))
        .unwrap();
    assert!(original.cell(Position::new(1, 1)).is_empty());
}
