//! Creature records stored by the board.

use lightfield_core::{Bounded, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

/// Unique identifier for a creature, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub Uuid);

impl CreatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    /// Remains of a unit; never moves or acts
    Corpse,
    /// Light-feeding unit
    Producer,
}

impl CreatureKind {
    pub fn glyph(&self) -> char {
        match self {
            CreatureKind::Corpse => 'T',
            CreatureKind::Producer => 'P',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    Alive,
    Dead,
}

/// Named vital statistic, used in clamp log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vital {
    Health,
    Hunger,
    Damage,
    MovingSpeed,
    SightRange,
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vital::Health => "health",
            Vital::Hunger => "hunger",
            Vital::Damage => "damage",
            Vital::MovingSpeed => "moving_speed",
            Vital::SightRange => "sight_range",
        };
        f.write_str(name)
    }
}

/// A creature on the board. Behaviour lives elsewhere; this is the state
/// the board stores and draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub position: Position,
    health: Bounded,
    hunger: Bounded,
    damage: Bounded,
    moving_speed: Bounded,
    sight_range: Bounded,
    pub generation: u32,
    pub genome: String,
    pub life_state: LifeState,
    pub ready_to_reproduce: bool,
}

impl Creature {
    /// Producer with the default vital ranges
    pub fn producer(position: Position, generation: u32, genome: impl Into<String>) -> Self {
        Self {
            id: CreatureId::new(),
            kind: CreatureKind::Producer,
            position,
            health: Bounded::new(10, 0, 10),
            hunger: Bounded::new(0, 0, 10),
            damage: Bounded::new(0, 0, 0),
            moving_speed: Bounded::new(1, 0, 5),
            sight_range: Bounded::new(3, 1, 10),
            generation,
            genome: genome.into(),
            life_state: LifeState::Alive,
            ready_to_reproduce: false,
        }
    }

    pub fn corpse(position: Position) -> Self {
        let zero = Bounded::new(0, 0, 0);
        Self {
            id: CreatureId::new(),
            kind: CreatureKind::Corpse,
            position,
            health: zero,
            hunger: zero,
            damage: zero,
            moving_speed: zero,
            sight_range: zero,
            generation: 0,
            genome: String::new(),
            life_state: LifeState::Dead,
            ready_to_reproduce: false,
        }
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn is_alive(&self) -> bool {
        self.life_state == LifeState::Alive
    }

    pub fn vital(&self, vital: Vital) -> &Bounded {
        match vital {
            Vital::Health => &self.health,
            Vital::Hunger => &self.hunger,
            Vital::Damage => &self.damage,
            Vital::MovingSpeed => &self.moving_speed,
            Vital::SightRange => &self.sight_range,
        }
    }

    pub fn health(&self) -> i32 {
        self.health.get()
    }

    pub fn hunger(&self) -> i32 {
        self.hunger.get()
    }

    pub fn damage(&self) -> i32 {
        self.damage.get()
    }

    pub fn moving_speed(&self) -> i32 {
        self.moving_speed.get()
    }

    pub fn sight_range(&self) -> i32 {
        self.sight_range.get()
    }

    /// Write a vital stat, clamping it into its declared range
    pub fn set_vital(&mut self, vital: Vital, value: i32) {
        let id = self.id;
        let stat = match vital {
            Vital::Health => &mut self.health,
            Vital::Hunger => &mut self.hunger,
            Vital::Damage => &mut self.damage,
            Vital::MovingSpeed => &mut self.moving_speed,
            Vital::SightRange => &mut self.sight_range,
        };
        let previous = stat.get();
        if stat.set(value).was_clamped() {
            let (min, max) = stat.bounds();
            info!(
                creature = %id,
                %vital,
                requested = value,
                min,
                max,
                "Vital out of range, clamped"
            );
        }
        debug!(creature = %id, %vital, "Vital changed: {} -> {}", previous, stat.get());
    }

    pub fn set_life_state(&mut self, state: LifeState) {
        debug!(creature = %self.id, "Life state changed: {:?} -> {:?}", self.life_state, state);
        self.life_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_defaults() {
        let creature = Creature::producer(Position::new(1, 2), 0, "");
        assert_eq!(creature.position, Position::new(1, 2));
        assert_eq!(creature.health(), 10);
        assert_eq!(creature.hunger(), 0);
        assert_eq!(creature.damage(), 0);
        assert_eq!(creature.moving_speed(), 1);
        assert_eq!(creature.sight_range(), 3);
        assert_eq!(creature.vital(Vital::SightRange).bounds(), (1, 10));
        assert_eq!(creature.generation, 0);
        assert!(creature.is_alive());
        assert!(!creature.ready_to_reproduce);
        assert_eq!(creature.glyph(), 'P');
    }

    #[test]
    fn test_corpse_is_dead() {
        let corpse = Creature::corpse(Position::new(0, 0));
        assert!(!corpse.is_alive());
        assert_eq!(corpse.glyph(), 'T');
        assert_eq!(corpse.health(), 0);
    }

    #[test]
    fn test_vitals_are_clamped() {
        let mut creature = Creature::producer(Position::new(0, 0), 0, "");

        creature.set_vital(Vital::Health, 25);
        assert_eq!(creature.health(), 10);

        creature.set_vital(Vital::Hunger, -3);
        assert_eq!(creature.hunger(), 0);

        creature.set_vital(Vital::MovingSpeed, 4);
        assert_eq!(creature.moving_speed(), 4);

        creature.set_vital(Vital::SightRange, 0);
        assert_eq!(creature.sight_range(), 1);

        creature.set_vital(Vital::Damage, 7);
        assert_eq!(creature.damage(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Creature::producer(Position::new(0, 0), 0, "");
        let b = Creature::producer(Position::new(0, 0), 0, "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_life_state_change() {
        let mut creature = Creature::producer(Position::new(0, 0), 3, "AACG");
        creature.set_life_state(LifeState::Dead);
        assert!(!creature.is_alive());
        assert_eq!(creature.genome, "AACG");
        assert_eq!(creature.generation, 3);
    }
}
