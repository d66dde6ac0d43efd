//! Text snapshot of the whole board.

use lightfield_core::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BORDER_GLYPH: char = '-';

/// `height` rows of `width` glyphs, border ring included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    rows: Vec<Vec<char>>,
}

impl Snapshot {
    pub(crate) fn new(rows: Vec<Vec<char>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        let y = usize::try_from(pos.y).ok()?;
        let x = usize::try_from(pos.x).ok()?;
        self.rows.get(y)?.get(x).copied()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for glyph in row {
                write!(f, "{}", glyph)?;
            }
        }
        Ok(())
    }
}
