//! Terrain cells of the board interior.

use lightfield_core::{Bounded, GroundType, Position, FERTILITY_MAX, ILLUMINATION_MAX};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CELL_GLYPH: char = 'G';

/// One terrain unit of the interior grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    illumination: Bounded,
    fertility: Bounded,
    occupied: bool,
    ground_type: GroundType,
    speed_modifier: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_state(Position::new(x, y), 0, false)
    }

    pub fn with_state(position: Position, illumination: i32, occupied: bool) -> Self {
        Self {
            position,
            illumination: Bounded::percent(illumination, ILLUMINATION_MAX),
            fertility: Bounded::percent(0, FERTILITY_MAX),
            occupied,
            ground_type: GroundType::PLAIN,
            speed_modifier: 0,
        }
    }

    pub fn illumination(&self) -> i32 {
        self.illumination.get()
    }

    pub fn fertility(&self) -> i32 {
        self.fertility.get()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn ground_type(&self) -> GroundType {
        self.ground_type
    }

    pub fn speed_modifier(&self) -> i32 {
        self.speed_modifier
    }

    pub fn glyph(&self) -> char {
        CELL_GLYPH
    }

    /// Set illumination, clamping into `[0, 100]`
    pub fn set_illumination(&mut self, illumination: i32) {
        let previous = self.illumination.get();
        if self.illumination.set(illumination).was_clamped() {
            info!(
                position = %self.position,
                requested = illumination,
                applied = self.illumination.get(),
                "Cell illumination out of range, clamped"
            );
        }
        if previous != self.illumination.get() {
            debug!(
                position = %self.position,
                "Cell illumination changed: {} -> {}",
                previous,
                self.illumination.get()
            );
        }
    }

    /// Set fertility, clamping into `[0, 100]`
    pub fn set_fertility(&mut self, fertility: i32) {
        if self.fertility.set(fertility).was_clamped() {
            info!(
                position = %self.position,
                requested = fertility,
                applied = self.fertility.get(),
                "Cell fertility out of range, clamped"
            );
        }
    }

    pub fn set_occupied(&mut self, occupied: bool) {
        debug!(position = %self.position, "Cell occupation changed: {} -> {}", self.occupied, occupied);
        self.occupied = occupied;
    }
}

/// Pattern entry used to fill the board with custom terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    pub position: Position,
    #[serde(default)]
    pub ground_type: GroundType,
    #[serde(default)]
    pub illumination: i32,
    #[serde(default)]
    pub fertility: i32,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub speed_modifier: i32,
}

impl CellSpec {
    pub fn plain(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            ground_type: GroundType::PLAIN,
            illumination: 0,
            fertility: 0,
            occupied: false,
            speed_modifier: 0,
        }
    }

    pub fn build(&self) -> Cell {
        let mut cell = Cell::with_state(self.position, self.illumination, self.occupied);
        cell.set_fertility(self.fertility);
        cell.ground_type = self.ground_type;
        cell.speed_modifier = self.speed_modifier;
        cell
    }
}
