use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical, hashable form of a visible board.
///
/// The agent never interprets a key; it is only used to index value tables and reward maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Row-major grid of cell glyphs as exposed by a simulator observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Board {
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "board must be non-empty");
        assert_eq!(cells.len(), width * height, "cell count must match board size");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a board from equal-length ASCII rows.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "rows must have equal length");
            cells.extend_from_slice(row.as_bytes());
        }
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: u8) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// Position of the first cell holding `cell`, scanning rows top to bottom.
    pub fn find(&self, cell: u8) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|c| *c == cell)
            .map(|i| (i % self.width, i / self.width))
    }

    /// Canonical key: rows joined with `'\n'`.
    pub fn key(&self) -> StateKey {
        let mut s = String::with_capacity(self.cells.len() + self.height);
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                s.push('\n');
            }
            s.extend(row.iter().map(|c| char::from(*c)));
        }
        StateKey(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key().as_str())
    }
}
