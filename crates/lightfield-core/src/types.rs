//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest allowed side of a board, border ring included
pub const MIN_SIDE: i32 = 5;

/// Difference between a board side and its populatable interior side
pub const BORDER_DIFF: i32 = 2;

pub const ILLUMINATION_MAX: i32 = 100;
pub const FERTILITY_MAX: i32 = 100;

/// 2D position on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position, saturating at `i32::MAX`
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        let distance = self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y));
        i32::try_from(distance).unwrap_or(i32::MAX)
    }

    /// Euclidean distance to another position, truncated to an integer
    pub fn euclidean_distance(&self, other: &Position) -> i32 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt() as i32
    }

    pub fn distance(&self, other: &Position, metric: DistanceMetric) -> i32 {
        match metric {
            DistanceMetric::Manhattan => self.manhattan_distance(other),
            DistanceMetric::Euclidean => self.euclidean_distance(other),
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Metric used to measure how far a cell is from the light source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Manhattan,
    Euclidean,
}

/// Outcome of writing a value into a [`Bounded`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    Exact,
    RaisedToMin,
    LoweredToMax,
}

impl Clamp {
    pub fn was_clamped(&self) -> bool {
        *self != Clamp::Exact
    }
}

/// Integer attribute that always stays inside `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounded {
    value: i32,
    min: i32,
    max: i32,
}

impl Bounded {
    pub fn new(value: i32, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Bounded value with range `[0, max]`
    pub fn percent(value: i32, max: i32) -> Self {
        Self::new(value, 0, max)
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Write a new value, clamping it into range
    pub fn set(&mut self, value: i32) -> Clamp {
        let (clamp, applied) = if value > self.max {
            (Clamp::LoweredToMax, self.max)
        } else if value < self.min {
            (Clamp::RaisedToMin, self.min)
        } else {
            (Clamp::Exact, value)
        };
        self.value = applied;
        clamp
    }
}

impl fmt::Display for Bounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}..={}]", self.value, self.min, self.max)
    }
}

/// Terrain code of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundType(pub i32);

impl GroundType {
    pub const PLAIN: GroundType = GroundType(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(&pos2), 7);
    }

    #[test]
    fn test_manhattan_distance_saturates() {
        let far = Position::new(i32::MIN, 0);
        assert_eq!(far.manhattan_distance(&Position::new(0, 0)), i32::MAX);
        let corner = Position::new(i32::MAX, i32::MAX);
        assert_eq!(corner.manhattan_distance(&Position::new(-1, -1)), i32::MAX);
        assert_eq!(far.euclidean_distance(&Position::new(1, 1)), i32::MAX);
    }

    #[test]
    fn test_euclidean_distance() {
        let pos1 = Position::new(0, 0);
        assert_eq!(pos1.euclidean_distance(&Position::new(3, 4)), 5);
        // sqrt(2) truncates to 1
        assert_eq!(pos1.euclidean_distance(&Position::new(1, 1)), 1);
        assert_eq!(
            pos1.distance(&Position::new(3, 4), DistanceMetric::Manhattan),
            7
        );
    }

    #[test]
    fn test_bounded_clamps_on_write() {
        let mut value = Bounded::percent(0, 100);
        assert_eq!(value.set(150), Clamp::LoweredToMax);
        assert_eq!(value.get(), 100);
        assert_eq!(value.set(-3), Clamp::RaisedToMin);
        assert_eq!(value.get(), 0);
        assert_eq!(value.set(42), Clamp::Exact);
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn test_bounded_swaps_inverted_range() {
        let value = Bounded::new(7, 10, 1);
        assert_eq!(value.bounds(), (1, 10));
        assert_eq!(value.get(), 7);
    }

    #[test]
    fn test_distance_metric_serialization() {
        let json = serde_json::to_string(&DistanceMetric::Euclidean).unwrap();
        assert_eq!(json, "\"euclidean\"");
    }

    proptest! {
        #[test]
        fn prop_bounded_stays_in_range(start in -500i32..500, writes in proptest::collection::vec(-1000i32..1000, 0..20)) {
            let mut value = Bounded::percent(start, 100);
            prop_assert!((0..=100).contains(&value.get()));
            for w in writes {
                value.set(w);
                prop_assert!((0..=100).contains(&value.get()));
            }
        }

        #[test]
        fn prop_manhattan_is_symmetric(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(a.manhattan_distance(&b), b.manhattan_distance(&a));
            prop_assert!(a.euclidean_distance(&b) <= a.manhattan_distance(&b));
        }
    }
}
