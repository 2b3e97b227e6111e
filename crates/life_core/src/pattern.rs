use thiserror::Error;

use crate::{Board, Point, Size};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("missing `x = .., y = ..` header line")]
    MissingHeader,
    #[error("invalid header line `{0}`")]
    InvalidHeader(String),
    #[error("unsupported rule `{0}`, only B3/S23 is supported")]
    UnsupportedRule(String),
    #[error("unexpected character {found:?} on line {line}")]
    UnexpectedCharacter { found: char, line: usize },
    #[error("cells on line {line} fall outside the declared {size} bounding box")]
    OutOfBounds { line: usize, size: Size },
}

/// Immutable seed for a board: a title plus live-cell offsets relative to the
/// top-left corner of the pattern's bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    title: String,
    size: Size,
    cells: Vec<Point>,
}

impl Pattern {
    /// Names favorited before the user has saved any.
    pub const DEFAULT_FAVORITE_NAMES: &'static [&'static str] =
        &["Glider", "Pulsar", "Gosper glider gun"];

    /// Largest width or height a pattern header may declare.
    pub const MAX_DIMENSION: usize = 1 << 16;

    pub fn new(title: impl Into<String>, size: Size, cells: Vec<Point>) -> Self {
        Self {
            title: title.into(),
            size,
            cells,
        }
    }

    pub fn glider() -> Self {
        Self::new(
            "Glider",
            Size::new(3, 3),
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ],
        )
    }

    pub fn blinker() -> Self {
        Self::new(
            "Blinker",
            Size::new(3, 1),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)],
        )
    }

    pub fn block() -> Self {
        Self::new(
            "Block",
            Size::new(2, 2),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1),
            ],
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn default_favorite_names() -> Vec<String> {
        Self::DEFAULT_FAVORITE_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Board of `size` with this pattern centered on it. Cells that do not
    /// fit are clipped.
    pub fn make_board(&self, size: Size) -> Board {
        let dx = centering_offset(size.width, self.size.width);
        let dy = centering_offset(size.height, self.size.height);
        Board::with_cells(
            size,
            self.cells
                .iter()
                .map(|cell| Point::new(cell.x.saturating_add(dx), cell.y.saturating_add(dy))),
        )
    }

    /// Parses a run-length encoded pattern.
    ///
    /// `#N` supplies the title, falling back to `title_hint`; other `#` lines
    /// are comments. The header must precede the body and the body ends at
    /// `!` or end of input.
    pub fn parse_rle(title_hint: &str, text: &str) -> Result<Pattern, PatternError> {
        let mut title = None;
        let mut size = None;
        let mut cells = Vec::new();
        let (mut x, mut y) = (0i64, 0i64);
        let mut run: Option<i64> = None;

        'lines: for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(name) = comment.strip_prefix('N').map(str::trim) {
                    if !name.is_empty() {
                        title = Some(name.to_string());
                    }
                }
                continue;
            }
            let Some(bounds) = size else {
                size = Some(parse_header(line)?);
                continue;
            };

            for ch in line.chars() {
                match ch {
                    '0'..='9' => {
                        let digit = i64::from(ch as u8 - b'0');
                        let count = run.unwrap_or(0).saturating_mul(10).saturating_add(digit);
                        run = Some(count);
                    }
                    'b' => x = x.saturating_add(run.take().unwrap_or(1)),
                    'o' => {
                        let count = run.take().unwrap_or(1);
                        if y >= bounds.height as i64 || x.saturating_add(count) > bounds.width as i64 {
                            return Err(PatternError::OutOfBounds {
                                line: line_no,
                                size: bounds,
                            });
                        }
                        cells.extend((x..x + count).map(|cx| Point::new(cx, y)));
                        x += count;
                    }
                    '$' => {
                        y = y.saturating_add(run.take().unwrap_or(1));
                        x = 0;
                    }
                    '!' => break 'lines,
                    c if c.is_whitespace() => {}
                    found => {
                        return Err(PatternError::UnexpectedCharacter {
                            found,
                            line: line_no,
                        })
                    }
                }
            }
        }

        let size = size.ok_or(PatternError::MissingHeader)?;
        Ok(Pattern::new(
            title.unwrap_or_else(|| title_hint.to_string()),
            size,
            cells,
        ))
    }
}

fn centering_offset(board: usize, pattern: usize) -> i64 {
    let board = i64::try_from(board).unwrap_or(i64::MAX);
    let pattern = i64::try_from(pattern).unwrap_or(i64::MAX);
    board.saturating_sub(pattern) / 2
}

fn parse_header(line: &str) -> Result<Size, PatternError> {
    let invalid = || PatternError::InvalidHeader(line.to_string());
    let dimension = |value: &str| {
        value
            .parse::<usize>()
            .ok()
            .filter(|&n| n <= Pattern::MAX_DIMENSION)
            .ok_or_else(invalid)
    };
    let mut width = None;
    let mut height = None;

    for field in line.split(',') {
        let (key, value) = field.split_once('=').ok_or_else(invalid)?;
        let value = value.trim();
        match key.trim() {
            "x" => width = Some(dimension(value)?),
            "y" => height = Some(dimension(value)?),
            "rule" => {
                let rule: String = value
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_ascii_uppercase();
                if rule != "B3/S23" && rule != "23/3" {
                    return Err(PatternError::UnsupportedRule(value.to_string()));
                }
            }
            _ => {}
        }
    }

    match (width, height) {
        (Some(width), Some(height)) => Ok(Size::new(width, height)),
        _ => Err(invalid()),
    }
}
