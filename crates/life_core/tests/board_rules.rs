use life_core::{Board, Pattern, Point, Size};
use pretty_assertions::assert_eq;

fn board(size: Size, cells: &[(i64, i64)]) -> Board {
    Board::with_cells(size, cells.iter().map(|&(x, y)| Point::new(x, y)))
}

#[test]
fn empty_board_is_a_fixed_point() {
    let empty = Board::new(Size::new(8, 8));
    assert_eq!(empty.step(), empty);
}

#[test]
fn isolated_cell_dies_after_one_step() {
    let lonely = board(Size::new(5, 5), &[(2, 2)]);
    assert!(lonely.step().is_empty());
}

#[test]
fn block_is_a_still_life() {
    let block = Pattern::block().make_board(Size::new(6, 6));
    let mut current = block.clone();
    for _ in 0..5 {
        current = current.step();
        assert_eq!(current, block);
    }
}

#[test]
fn blinker_repeats_every_second_step() {
    let blinker = Pattern::blinker().make_board(Size::new(5, 5));
    let once = blinker.step();
    assert!(once != blinker);
    assert_eq!(once.live_count(), 3);
    assert_eq!(once.step(), blinker);
}

#[test]
fn births_happen_on_dead_cells() {
    let corner = board(Size::new(4, 4), &[(0, 0), (1, 0), (0, 1)]);
    let next = corner.step();
    assert!(next.is_alive(Point::new(1, 1)));
    assert_eq!(next.live_count(), 4);
}

#[test]
fn edges_do_not_wrap() {
    // A horizontal blinker on the top row would turn vertical if the board
    // wrapped; with hard edges the cell above it can never be born.
    let top = board(Size::new(3, 3), &[(0, 0), (1, 0), (2, 0)]);
    let next = top.step();
    let live: Vec<Point> = next.live_cells().collect();
    assert_eq!(live, vec![Point::new(1, 0), Point::new(1, 1)]);
}

#[test]
fn out_of_bounds_cells_are_never_stored() {
    let mut b = board(Size::new(2, 2), &[(-1, 0), (2, 1), (1, 1)]);
    assert_eq!(b.live_count(), 1);

    b.set(Point::new(5, 5), true);
    b.toggle(Point::new(0, -3));
    assert_eq!(b.live_count(), 1);
    assert!(!b.is_alive(Point::new(5, 5)));
}

#[test]
fn toggle_flips_a_single_cell() {
    let mut b = Board::new(Size::new(3, 3));
    b.toggle(Point::new(1, 1));
    assert!(b.is_alive(Point::new(1, 1)));
    b.toggle(Point::new(1, 1));
    assert!(b.is_empty());
}

#[test]
fn neighbor_count_ignores_the_cell_itself() {
    let b = board(Size::new(3, 3), &[(0, 0), (1, 0), (2, 0), (1, 1)]);
    assert_eq!(b.live_neighbors(Point::new(1, 1)), 3);
    assert_eq!(b.live_neighbors(Point::new(1, 0)), 3);
    assert_eq!(b.live_neighbors(Point::new(0, 2)), 1);
}
