use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Cell coordinate; ordered row-major so live cells iterate top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub y: i64,
    pub x: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { y, x }
    }
}

/// Sparse set of live cells inside a bounded `width × height` region.
///
/// Points outside the region are dead and never stored, so edges behave as
/// hard walls rather than wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    size: Size,
    cells: BTreeSet<Point>,
}

impl Board {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: BTreeSet::new(),
        }
    }

    pub fn with_cells(size: Size, cells: impl IntoIterator<Item = Point>) -> Self {
        let mut board = Self::new(size);
        for point in cells {
            board.set(point, true);
        }
        board
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_alive(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, point: Point, alive: bool) {
        if !self.size.contains(point) {
            return;
        }
        if alive {
            self.cells.insert(point);
        } else {
            self.cells.remove(&point);
        }
    }

    pub fn toggle(&mut self, point: Point) {
        let alive = self.is_alive(point);
        self.set(point, !alive);
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    pub fn live_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn live_neighbors(&self, point: Point) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_alive(Point::new(point.x + dx, point.y + dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Next generation under B3/S23, materialized into a fresh board.
    ///
    /// Every cell of the region is visited, dead ones included, so births
    /// anywhere on the board are found.
    pub fn step(&self) -> Board {
        let mut next = Board::new(self.size);
        for y in 0..self.size.height as i64 {
            for x in 0..self.size.width as i64 {
                let point = Point::new(x, y);
                let alive = match self.live_neighbors(point) {
                    2 => self.is_alive(point),
                    3 => true,
                    _ => false,
                };
                if alive {
                    next.cells.insert(point);
                }
            }
        }
        next
    }
}
