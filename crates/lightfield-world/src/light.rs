//! The roaming light source and the loop it follows along the border.

use lightfield_core::Position;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const LIGHT_GLYPH: char = 'O';

/// Point emitter whose radiation falls off linearly with distance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: Position,
    power: i32,
}

impl LightSource {
    pub fn new(position: Position, power: i32) -> Self {
        if power < 0 {
            info!(requested = power, "Light power below zero, 0 applied instead");
        }
        Self {
            position,
            power: power.max(0),
        }
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn glyph(&self) -> char {
        LIGHT_GLYPH
    }

    /// Radiation received at `distance`, floored at zero
    pub fn radiation_at(&self, distance: i32) -> i32 {
        (self.power - distance).max(0)
    }
}

/// Closed loop of border coordinates the light steps through once per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightPath {
    steps: Vec<Position>,
}

impl LightPath {
    pub fn new(steps: Vec<Position>) -> Self {
        Self { steps }
    }

    /// Loop around the whole border ring of a `width` x `height` board.
    ///
    /// Starts at the top-left corner, runs down the left column, along the
    /// bottom row, up the right column and back along the top row.
    pub fn border_loop(width: i32, height: i32) -> Self {
        if width < 2 || height < 2 {
            return Self::new(vec![Position::new(0, 0)]);
        }

        let (right, bottom) = (width - 1, height - 1);
        let mut steps = Vec::with_capacity((2 * (width + height) - 4) as usize);
        steps.extend((0..height).map(|y| Position::new(0, y)));
        steps.extend((1..width).map(|x| Position::new(x, bottom)));
        steps.extend((0..bottom).rev().map(|y| Position::new(right, y)));
        steps.extend((1..right).rev().map(|x| Position::new(x, 0)));

        Self { steps }
    }

    pub fn steps(&self) -> &[Position] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Entry following the first occurrence of `current`, wrapping at the end.
    /// `None` if `current` is not on the path.
    pub fn next_after(&self, current: Position) -> Option<Position> {
        let index = self.steps.iter().position(|step| *step == current)?;
        Some(self.steps[(index + 1) % self.steps.len()])
    }
}

impl From<Vec<(i32, i32)>> for LightPath {
    fn from(steps: Vec<(i32, i32)>) -> Self {
        Self::new(steps.into_iter().map(Position::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_negative_power_clamped() {
        let light = LightSource::new(Position::new(0, 0), -4);
        assert_eq!(light.power(), 0);
    }

    #[test]
    fn test_radiation_falloff() {
        let light = LightSource::new(Position::new(0, 0), 5);
        assert_eq!(light.radiation_at(0), 5);
        assert_eq!(light.radiation_at(2), 3);
        assert_eq!(light.radiation_at(5), 0);
        assert_eq!(light.radiation_at(9), 0);
    }

    #[test]
    fn test_border_loop_matches_five_by_five_tour() {
        let expected: LightPath = vec![
            (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
            (1, 4), (2, 4), (3, 4), (4, 4),
            (4, 3), (4, 2), (4, 1), (4, 0),
            (3, 0), (2, 0), (1, 0),
        ]
        .into();
        assert_eq!(LightPath::border_loop(5, 5), expected);
    }

    #[test]
    fn test_border_loop_visits_every_border_cell_once() {
        let path = LightPath::border_loop(7, 5);
        assert_eq!(path.len(), 2 * (7 + 5) - 4);

        let mut seen = std::collections::HashSet::new();
        for step in path.steps() {
            assert!(step.x == 0 || step.x == 6 || step.y == 0 || step.y == 4);
            assert!(seen.insert(*step));
        }
    }

    #[test]
    fn test_next_after_advances_and_wraps() {
        let path: LightPath = vec![(0, 0), (0, 1), (0, 2)].into();
        assert_eq!(path.next_after(Position::new(0, 1)), Some(Position::new(0, 2)));
        assert_eq!(path.next_after(Position::new(0, 2)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_next_after_off_path() {
        let path: LightPath = vec![(0, 0), (0, 1)].into();
        assert_eq!(path.next_after(Position::new(3, 3)), None);
        assert_eq!(LightPath::new(Vec::new()).next_after(Position::new(0, 0)), None);
    }

    proptest! {
        #[test]
        fn prop_border_loop_wraps(w in 2i32..40, h in 2i32..40, start in 0usize..200) {
            let path = LightPath::border_loop(w, h);
            prop_assert_eq!(path.len() as i32, 2 * (w + h) - 4);
            let steps = path.steps();
            let (first, last) = (steps[0], steps[steps.len() - 1]);
            prop_assert_eq!(path.next_after(last), Some(first));

            let origin = steps[start % steps.len()];
            let mut position = origin;
            for _ in 0..path.len() {
                position = path.next_after(position).unwrap();
            }
            prop_assert_eq!(position, origin);
        }
    }
}
