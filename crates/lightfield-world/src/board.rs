//! The board: interior grid of cells, the light source and the creatures.
//!
//! Board coordinates span `[0, width) x [0, height)` and include a one-cell
//! border ring reserved for the light source. Cells and creatures use
//! interior coordinates `[0, width - 2) x [0, height - 2)`.
//!
//! Engine operations never fail. Bad input is corrected or ignored and
//! logged at info level.

use crate::cell::{Cell, CellSpec};
use crate::creature::Creature;
use crate::light::{LightPath, LightSource};
use crate::snapshot::{Snapshot, BORDER_GLYPH};
use lightfield_core::{BoardConfig, DistanceMetric, Position, BORDER_DIFF, MIN_SIDE};
use tracing::{debug, error, info, instrument};

#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    field_width: i32,
    field_height: i32,
    cells: Vec<Vec<Option<Cell>>>,
    creatures: Vec<Creature>,
    light: Option<LightSource>,
    metric: DistanceMetric,
}

impl Board {
    /// Create an empty board. Sides below the minimum are raised to it.
    pub fn new(width: i32, height: i32) -> Self {
        let width = clamp_side("width", width);
        let height = clamp_side("height", height);
        let field_width = width - BORDER_DIFF;
        let field_height = height - BORDER_DIFF;

        let cells = (0..field_height)
            .map(|_| vec![None; field_width as usize])
            .collect();

        debug!(width, height, field_width, field_height, "Board created");

        Self {
            width,
            height,
            field_width,
            field_height,
            cells,
            creatures: Vec::new(),
            light: None,
            metric: DistanceMetric::Manhattan,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// `(width, height)` of the whole board
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// `(width, height)` of the populatable interior
    pub fn field_size(&self) -> (i32, i32) {
        (self.field_width, self.field_height)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: DistanceMetric) {
        self.metric = metric;
    }

    // -------------------------------------------------------------------
    // Population
    // -------------------------------------------------------------------

    /// Populate the interior with cells. Without a pattern every slot gets a
    /// fresh default cell; with one, each spec inside the interior replaces
    /// its slot and specs outside it are skipped. Returns the number of
    /// cells placed.
    pub fn fill(&mut self, pattern: Option<&[CellSpec]>) -> usize {
        let mut placed = 0;

        match pattern {
            None => {
                for y in 0..self.field_height {
                    for x in 0..self.field_width {
                        self.cells[y as usize][x as usize] = Some(Cell::new(x, y));
                        placed += 1;
                    }
                }
            }
            Some(specs) => {
                for spec in specs {
                    match self.slot(spec.position) {
                        Some((row, col)) => {
                            self.cells[row][col] = Some(spec.build());
                            placed += 1;
                        }
                        None => {
                            info!(position = %spec.position, "Pattern entry outside the field, skipped");
                        }
                    }
                }
            }
        }

        debug!(placed, "Board filled");
        placed
    }

    /// Append a creature. No placement validation happens here.
    pub fn add_creature(&mut self, creature: Creature) {
        debug!(
            creature = %creature.id,
            kind = ?creature.kind,
            position = %creature.position,
            "Creature added, {} total",
            self.creatures.len() + 1
        );
        self.creatures.push(creature);
    }

    /// Remove the creature at `index`, shifting later ones down.
    /// Out-of-range indices leave the collection untouched.
    pub fn remove_creature(&mut self, index: isize) -> Option<Creature> {
        let Some(index) = usize::try_from(index)
            .ok()
            .filter(|i| *i < self.creatures.len())
        else {
            info!(
                index,
                len = self.creatures.len(),
                "Creature index out of bounds, removal aborted"
            );
            return None;
        };

        let removed = self.creatures.remove(index);
        debug!(creature = %removed.id, index, "Creature removed");
        Some(removed)
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        let (row, col) = self.slot(pos)?;
        self.cells[row][col].as_ref()
    }

    pub fn cell_at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let (row, col) = self.slot(pos)?;
        self.cells[row][col].as_mut()
    }

    /// Number of non-empty interior slots
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Number of cells flagged as occupied
    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_occupied()).count()
    }

    /// True if `pos` holds a cell that nobody occupies
    pub fn is_cell_free(&self, pos: Position) -> bool {
        self.cell_at(pos).is_some_and(|cell| !cell.is_occupied())
    }

    pub fn manhattan_distance(a: &Position, b: &Position) -> i32 {
        a.manhattan_distance(b)
    }

    /// True if `pos` lies on the board, border ring included
    pub fn within_bounds(&self, pos: Position) -> bool {
        (0..self.height).contains(&pos.y) && (0..self.width).contains(&pos.x)
    }

    /// True if `pos` lies inside the populatable interior
    pub fn within_field(&self, pos: Position) -> bool {
        self.slot(pos).is_some()
    }

    /// True if `pos` lies on the outer border ring
    pub fn is_on_border(&self, pos: Position) -> bool {
        let on_column = (0..self.width).contains(&pos.x);
        let on_row = (0..self.height).contains(&pos.y);
        (pos.y == 0 && on_column)
            || (pos.y == self.height - 1 && on_column)
            || (pos.x == 0 && on_row)
            || (pos.x == self.width - 1 && on_row)
    }

    // -------------------------------------------------------------------
    // Light
    // -------------------------------------------------------------------

    pub fn light(&self) -> Option<&LightSource> {
        self.light.as_ref()
    }

    /// Install a light source, replacing any previous one
    pub fn set_light(&mut self, light: LightSource) {
        debug!(position = %light.position, power = light.power(), "Light source set");
        self.light = Some(light);
    }

    /// Move the light to `(x, y)` if that lies on the border ring.
    /// Returns whether the light moved.
    pub fn set_light_position(&mut self, x: i32, y: i32) -> bool {
        let target = Position::new(x, y);
        if !self.is_on_border(target) {
            info!(position = %target, "Light position is not on the border, position unchanged");
            return false;
        }

        match self.light.as_mut() {
            Some(light) => {
                debug!("Light moved: {} -> {}", light.position, target);
                light.position = target;
                true
            }
            None => {
                info!(position = %target, "No light source set, nothing to move");
                false
            }
        }
    }

    /// Step the light to the entry after its current position on `path`.
    /// A light that is off the path stays where it is.
    #[instrument(skip(self, path), fields(path_len = path.len()))]
    pub fn advance_light(&mut self, path: &LightPath) -> Option<Position> {
        let Some(light) = self.light.as_mut() else {
            info!("No light source set, nothing to advance");
            return None;
        };

        match path.next_after(light.position) {
            Some(next) => {
                debug!("Light advanced: {} -> {}", light.position, next);
                light.position = next;
                Some(next)
            }
            None => {
                debug!(position = %light.position, "Light is off its path, not moving");
                None
            }
        }
    }

    // -------------------------------------------------------------------
    // Illumination
    // -------------------------------------------------------------------

    /// Recompute every cell's illumination from the light source.
    /// Returns the number of cells updated.
    #[instrument(skip(self))]
    pub fn recompute_illumination(&mut self) -> usize {
        let Some(light) = self.light.clone() else {
            info!("No light source set, nothing to calculate");
            return 0;
        };

        let metric = self.metric;
        let mut recalculated = 0;
        for cell in self.cells.iter_mut().flatten().flatten() {
            let distance = light.position.distance(&cell.position, metric);
            cell.set_illumination(light.radiation_at(distance));
            recalculated += 1;
        }

        if recalculated == 0 {
            info!("Field holds no cells, nothing to calculate");
        }
        debug!(recalculated, light = %light.position, "Illumination recomputed");
        recalculated
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Draw the board as `height` rows of `width` glyphs.
    ///
    /// Terrain first, then creatures in insertion order, then the border
    /// ring, then the light. Returns `None` if a creature or the light
    /// cannot be placed on the grid.
    #[instrument(skip(self))]
    pub fn render(&self) -> Option<Snapshot> {
        let mut rows: Vec<Vec<char>> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| slot.as_ref().map_or(BORDER_GLYPH, Cell::glyph))
                    .collect()
            })
            .collect();

        for creature in &self.creatures {
            let Some((row, col)) = self.slot(creature.position) else {
                error!(
                    creature = %creature.id,
                    position = %creature.position,
                    "Creature outside the field, snapshot not produced"
                );
                return None;
            };
            rows[row][col] = creature.glyph();
        }

        for row in rows.iter_mut() {
            row.insert(0, BORDER_GLYPH);
            row.push(BORDER_GLYPH);
        }
        rows.insert(0, vec![BORDER_GLYPH; self.width as usize]);
        rows.push(vec![BORDER_GLYPH; self.width as usize]);

        if let Some(light) = &self.light {
            if !self.within_bounds(light.position) {
                error!(position = %light.position, "Light outside the board, snapshot not produced");
                return None;
            }
            rows[light.position.y as usize][light.position.x as usize] = light.glyph();
        }

        Some(Snapshot::new(rows))
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().flatten().flatten()
    }

    /// Interior `(row, col)` indices for `pos`
    fn slot(&self, pos: Position) -> Option<(usize, usize)> {
        if (0..self.field_height).contains(&pos.y) && (0..self.field_width).contains(&pos.x) {
            Some((pos.y as usize, pos.x as usize))
        } else {
            None
        }
    }
}

fn clamp_side(name: &str, requested: i32) -> i32 {
    if requested < MIN_SIDE {
        info!(
            side = name,
            requested,
            min = MIN_SIDE,
            "Board side lower than allowed, minimum applied instead"
        );
        MIN_SIDE
    } else {
        requested
    }
}
