//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::{DistanceMetric, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Board dimensions, border ring included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Width of the board (raised to the minimum side if smaller)
    pub width: i32,
    /// Height of the board (raised to the minimum side if smaller)
    pub height: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
        }
    }
}

/// Light source parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Emitted power; radiation falls off by one per unit of distance
    pub power: i32,
    /// Starting position on the border ring
    pub start: Position,
    /// Distance metric used for illumination falloff
    pub metric: DistanceMetric,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            power: 3,
            start: Position::new(0, 0),
            metric: DistanceMetric::Manhattan,
        }
    }
}

/// Initial population parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of producers placed before the first tick
    pub initial_producers: usize,
    /// Random seed for reproducible placement
    pub seed: u64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_producers: 1,
            seed: 0,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub board: BoardConfig,
    pub light: LightConfig,
    pub population: PopulationConfig,
    /// Stop after this many ticks; `None` runs until the driver exits
    pub max_ticks: Option<u64>,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.light.power < 0 {
            return Err(Error::Validation(format!(
                "light power must be non-negative, got {}",
                self.light.power
            )));
        }

        if self.max_ticks == Some(0) {
            return Err(Error::Validation("max_ticks must be at least 1".to_string()));
        }

        Ok(())
    }
}
