//! Tick driver: advance the light, recompute illumination, render.

use crate::board::Board;
use crate::creature::Creature;
use crate::light::{LightPath, LightSource};
use crate::snapshot::Snapshot;
use lightfield_core::{Error, Position, Result, SimConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

const SPAWN_ATTEMPTS: usize = 100;

pub struct Simulation {
    board: Board,
    path: LightPath,
    config: SimConfig,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut board = Board::from_config(&config.board);
        board.set_metric(config.light.metric);
        board.fill(None);

        let start = config.light.start;
        if !board.within_bounds(start) {
            return Err(Error::OutOfBounds(start));
        }
        if !board.is_on_border(start) {
            warn!(position = %start, "Light starts off the border loop and will not move");
        }
        board.set_light(LightSource::new(start, config.light.power));

        let (width, height) = board.size();
        let path = LightPath::border_loop(width, height);
        let rng = ChaCha8Rng::seed_from_u64(config.population.seed);
        let initial_producers = config.population.initial_producers;

        let mut sim = Self {
            board,
            path,
            config,
            rng,
            tick: 0,
        };

        sim.populate(initial_producers)?;

        Ok(sim)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn path(&self) -> &LightPath {
        &self.path
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Place `count` producers on free interior cells
    pub fn populate(&mut self, count: usize) -> Result<usize> {
        for _ in 0..count {
            self.spawn_producer()?;
        }
        Ok(count)
    }

    fn spawn_producer(&mut self) -> Result<Position> {
        let (field_width, field_height) = self.board.field_size();

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..field_width),
                self.rng.gen_range(0..field_height),
            );

            if self.board.is_cell_free(pos) {
                if let Some(cell) = self.board.cell_at_mut(pos) {
                    cell.set_occupied(true);
                }
                self.board.add_creature(Creature::producer(pos, 0, ""));
                return Ok(pos);
            }
        }

        Err(Error::InvalidState("Failed to find spawn position".to_string()))
    }

    /// Run one tick and return the rendered board
    #[instrument(skip(self), fields(tick = self.tick))]
    pub fn step(&mut self) -> Option<Snapshot> {
        self.board.advance_light(&self.path);
        let recalculated = self.board.recompute_illumination();
        let snapshot = self.board.render();
        self.tick += 1;

        debug!(
            tick = self.tick,
            recalculated,
            light = ?self.board.light().map(|l| l.position),
            creatures = self.board.creatures().len(),
            "Tick complete"
        );

        snapshot
    }

    /// Run `ticks` ticks headlessly, discarding snapshots
    pub fn run(&mut self, ticks: u64) -> RunSummary {
        info!("Starting simulation for {} ticks", ticks);

        for _ in 0..ticks {
            if self.step().is_none() {
                warn!(tick = self.tick, "Tick produced no snapshot");
            }
        }

        let summary = self.summary();
        info!(
            ticks = summary.ticks,
            occupied = summary.occupied,
            creatures = summary.creatures,
            "Simulation finished"
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.tick,
            occupied: self.board.occupied_count(),
            creatures: self.board.creatures().len(),
            light_position: self.board.light().map(|light| light.position),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub occupied: usize,
    pub creatures: usize,
    pub light_position: Option<Position>,
}
