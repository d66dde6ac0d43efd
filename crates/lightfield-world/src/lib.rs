//! Board, illumination and light-movement engine.
//!
//! This crate implements the 2D board where a single light source travels
//! along the border ring and lights the interior cells every tick.

pub mod board;
pub mod cell;
pub mod creature;
pub mod light;
pub mod simulation;
pub mod snapshot;

pub use board::Board;
pub use cell::{Cell, CellSpec};
pub use creature::{Creature, CreatureId, CreatureKind, LifeState, Vital};
pub use light::{LightPath, LightSource};
pub use simulation::{RunSummary, Simulation};
pub use snapshot::Snapshot;
