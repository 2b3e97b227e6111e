use life_core::{Pattern, PatternError, Point, Size};
use pretty_assertions::assert_eq;

const GLIDER_RLE: &str = "\
#N Glider
#C The smallest spaceship.
x = 3, y = 3, rule = B3/S23
bo$2bo$3o!
";

#[test]
fn parses_named_glider() {
    let pattern = Pattern::parse_rle("glider", GLIDER_RLE).unwrap();
    assert_eq!(pattern, Pattern::glider());
}

#[test]
fn title_falls_back_to_hint() {
    let pattern = Pattern::parse_rle("Blinker", "x = 3, y = 1\n3o!").unwrap();
    assert_eq!(pattern.title(), "Blinker");
    assert_eq!(pattern.size(), Size::new(3, 1));
    assert_eq!(pattern.cells(), Pattern::blinker().cells());
}

#[test]
fn body_may_span_lines_and_ends_at_bang() {
    let text = "x = 2, y = 3\no$\nbo$\n2o!\nthis is ignored";
    let pattern = Pattern::parse_rle("split", text).unwrap();
    assert_eq!(
        pattern.cells(),
        &[
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(0, 2),
            Point::new(1, 2)
        ]
    );
}

#[test]
fn blank_rows_are_skipped_by_run_counts() {
    let pattern = Pattern::parse_rle("gap", "x = 1, y = 3\no2$o!").unwrap();
    assert_eq!(pattern.cells(), &[Point::new(0, 0), Point::new(0, 2)]);
}

#[test]
fn missing_header_is_an_error() {
    assert_eq!(
        Pattern::parse_rle("none", "#C nothing here\n"),
        Err(PatternError::MissingHeader)
    );
}

#[test]
fn cells_outside_the_header_box_are_rejected() {
    assert_eq!(
        Pattern::parse_rle("wide", "x = 2, y = 1\n3o!"),
        Err(PatternError::OutOfBounds {
            line: 2,
            size: Size::new(2, 1)
        })
    );
}

#[test]
fn unknown_tokens_are_rejected() {
    assert_eq!(
        Pattern::parse_rle("bad", "x = 1, y = 1\nz!"),
        Err(PatternError::UnexpectedCharacter {
            found: 'z',
            line: 2
        })
    );
}

#[test]
fn other_rules_are_rejected() {
    assert!(matches!(
        Pattern::parse_rle("highlife", "x = 1, y = 1, rule = B36/S23\no!"),
        Err(PatternError::UnsupportedRule(_))
    ));
}

#[test]
fn make_board_centers_the_pattern() {
    let board = Pattern::glider().make_board(Size::new(7, 7));
    let live: Vec<Point> = board.live_cells().collect();
    assert_eq!(
        live,
        vec![
            Point::new(3, 2),
            Point::new(4, 3),
            Point::new(2, 4),
            Point::new(3, 4),
            Point::new(4, 4)
        ]
    );
}

#[test]
fn make_board_clips_to_small_boards() {
    let size = Size::new(2, 2);
    let board = Pattern::glider().make_board(size);
    assert!(board.live_cells().all(|cell| size.contains(cell)));
    assert!(board.live_count() < Pattern::glider().cells().len());
    assert!(Pattern::glider().make_board(Size::ZERO).is_empty());
}

#[test]
fn oversized_header_is_rejected() {
    let header = "x = 9223372036854775808, y = 1";
    assert_eq!(
        Pattern::parse_rle("t", &format!("{header}\nb!")),
        Err(PatternError::InvalidHeader(header.to_string()))
    );

    let header = format!("x = 3, y = {}", Pattern::MAX_DIMENSION + 1);
    assert_eq!(
        Pattern::parse_rle("t", &format!("{header}\no!")),
        Err(PatternError::InvalidHeader(header))
    );
}

#[test]
fn make_board_survives_extreme_sizes() {
    let huge = Pattern::new("huge", Size::new(usize::MAX, 1), vec![Point::new(0, 0)]);
    assert!(huge.make_board(Size::new(10, 10)).is_empty());

    let board = Pattern::glider().make_board(Size::new(usize::MAX, 3));
    assert!(board.live_cells().all(|cell| board.size().contains(cell)));
}

#[test]
fn default_favorites_are_the_fixed_list() {
    assert_eq!(
        Pattern::default_favorite_names(),
        vec!["Glider", "Pulsar", "Gosper glider gun"]
    );
}
