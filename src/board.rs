use std::collections::VecDeque;

use log::{debug, info};

use crate::component::{Component, ComponentType, Rotation};
use crate::ports::{are_connected, Direction};
use crate::sim::{evaluate, Evaluation, Outcome};
use crate::variant::Variant;
use crate::CellPos;

/// Expected, recoverable failures of board mutations. Nothing here is fatal;
/// callers surface these to the player and carry on.
#[derive(thiserror::Error)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinates are outside the board")]
    OutOfRange,
    #[error("cell is already occupied")]
    Occupied,
    #[error("cell is empty")]
    Empty,
    #[error("component is locked")]
    Locked,
    #[error("component cannot rotate")]
    NotRotatable,
}

/// Outcome of one "run" press.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Debug, PartialEq)]
pub enum SimReport {
    /// No conducting path from source to destination; R/C were not computed.
    OpenCircuit,
    Evaluated {
        /// Cells visited by the path search, in traversal order.
        path: Vec<CellPos>,
        total_resistance: f64,
        total_capacitance: f64,
        evaluation: Evaluation,
    },
}

/// The puzzle board: a fixed grid of cells, each holding at most one
/// component, plus the toolbox that removed pieces fall back into.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Debug)]
pub struct Board {
    variant: Variant,
    rows: i32,
    cols: i32,
    grid: Vec<Option<Component>>,
    toolbox: Vec<Component>,
    max_resistors: Option<usize>,
    max_capacitors: Option<usize>,
}

impl Board {
    pub fn new(variant: Variant) -> Self {
        let rows = variant.rows();
        let cols = variant.cols();
        let mut board = Self {
            variant,
            rows,
            cols,
            grid: vec![None; (rows * cols) as usize],
            toolbox: Vec::new(),
            max_resistors: variant.max_resistors(),
            max_capacitors: variant.max_capacitors(),
        };
        board.apply_preset();
        board
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Pieces removed from the grid since the board was created.
    pub fn toolbox(&self) -> &[Component] {
        &self.toolbox
    }

    fn index(&self, (row, col): CellPos) -> Option<usize> {
        (row >= 0 && row < self.rows && col >= 0 && col < self.cols)
            .then(|| (row * self.cols + col) as usize)
    }

    /// `None` for empty cells and for any out-of-range coordinate.
    pub fn get(&self, pos: CellPos) -> Option<&Component> {
        self.grid[self.index(pos)?].as_ref()
    }

    fn get_mut(&mut self, pos: CellPos) -> Option<&mut Component> {
        let idx = self.index(pos)?;
        self.grid[idx].as_mut()
    }

    /// Put a component into an empty cell. The grid is untouched on failure.
    pub fn place(&mut self, pos: CellPos, component: Component) -> Result<(), BoardError> {
        let idx = self.index(pos).ok_or(BoardError::OutOfRange)?;
        if self.grid[idx].is_some() {
            return Err(BoardError::Occupied);
        }
        self.grid[idx] = Some(component);
        Ok(())
    }

    /// Move an unlocked occupant to the toolbox and empty the cell.
    pub fn remove(&mut self, pos: CellPos) -> Result<(), BoardError> {
        let idx = self.index(pos).ok_or(BoardError::OutOfRange)?;
        let occupant = self.grid[idx].as_ref().ok_or(BoardError::Empty)?;
        if occupant.is_locked() {
            return Err(BoardError::Locked);
        }
        let component = self.grid[idx].take().ok_or(BoardError::Empty)?;
        self.toolbox.push(component);
        Ok(())
    }

    /// Quarter-turn the occupant, returning its new rotation.
    pub fn rotate(&mut self, pos: CellPos) -> Result<Rotation, BoardError> {
        self.index(pos).ok_or(BoardError::OutOfRange)?;
        let component = self.get_mut(pos).ok_or(BoardError::Empty)?;
        if !component.is_rotatable() {
            return Err(BoardError::NotRotatable);
        }
        Ok(component.rotate())
    }

    /// Whether another piece of this type may be placed. Wire-family pieces
    /// are unlimited; resistors and capacitors are capped per variant. This
    /// is the pre-placement check; [`Board::place`] itself does not count.
    pub fn can_add(&self, ty: ComponentType) -> bool {
        let cap = match ty {
            ComponentType::Resistor => self.max_resistors,
            ComponentType::Capacitor => self.max_capacitors,
            _ => return true,
        };
        match cap {
            None => true,
            Some(limit) => self.count_of(ty) < limit,
        }
    }

    fn count_of(&self, ty: ComponentType) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|c| c.ty() == ty)
            .count()
    }

    /// Empty every cell and re-apply the variant's locked preset. Player
    /// pieces are discarded, not returned to the toolbox.
    pub fn clear_grid(&mut self) {
        self.grid.fill(None);
        self.apply_preset();
    }

    fn apply_preset(&mut self) {
        for (pos, component) in self.variant.preset() {
            // Preset coordinates are fixed per variant and the grid is empty;
            // a failure here means the preset itself is broken.
            let placed = self.place(pos, component);
            debug_assert!(placed.is_ok(), "preset placement at {pos:?} failed");
        }
    }

    fn find_cell(&self, ty: ComponentType) -> Option<CellPos> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.get((row, col)).is_some_and(|c| c.ty() == ty) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Breadth-first search for the conducting path from source to
    /// destination.
    ///
    /// Neighbors are tried in the fixed order up, down, left, right, and a
    /// cell is appended to the result the moment it is enqueued, so the
    /// returned order is deterministic. The traversal runs to exhaustion
    /// rather than stopping at the destination; cells conducting onward past
    /// the destination are therefore part of the result and visible to the
    /// aggregation step.
    ///
    /// Returns `None` when the board has no source or destination, or the
    /// destination is never reached.
    pub fn find_valid_path(&self) -> Option<Vec<CellPos>> {
        let start = self.find_cell(ComponentType::Source)?;
        let end = self.find_cell(ComponentType::Destination)?;

        let mut visited = vec![false; self.grid.len()];
        let mut queue = VecDeque::new();
        let mut path = Vec::new();

        if let Some(idx) = self.index(start) {
            visited[idx] = true;
        }
        queue.push_back(start);
        path.push(start);

        let mut reached = false;
        while let Some(pos) = queue.pop_front() {
            if pos == end {
                reached = true;
            }
            let Some(current) = self.get(pos) else {
                continue;
            };

            for dir in Direction::ALL {
                let (dr, dc) = dir.offset();
                let next = (pos.0 + dr, pos.1 + dc);
                let Some(idx) = self.index(next) else {
                    continue;
                };
                if visited[idx] {
                    continue;
                }
                let Some(neighbor) = self.get(next) else {
                    continue;
                };
                if are_connected(current, neighbor, dir) {
                    visited[idx] = true;
                    queue.push_back(next);
                    path.push(next);
                }
            }
        }

        debug!(
            "path search visited {} cells, destination reached: {reached}",
            path.len()
        );
        reached.then_some(path)
    }

    /// Number of the occupant's active ports that line up with an active
    /// port of an actual neighboring component. Pieces with fewer than two
    /// are dead stubs as far as aggregation is concerned.
    pub fn flow_count(&self, pos: CellPos) -> usize {
        let Some(component) = self.get(pos) else {
            return 0;
        };
        Direction::ALL
            .iter()
            .filter(|&&dir| {
                let (dr, dc) = dir.offset();
                self.get((pos.0 + dr, pos.1 + dc))
                    .is_some_and(|neighbor| are_connected(component, neighbor, dir))
            })
            .count()
    }

    /// Values of path components of one kind that carry flow on at least two
    /// faces. A piece the search visited but that dead-ends (a stub hanging
    /// off the path) does not count toward R/C.
    fn qualifying_values(
        &self,
        path: &[CellPos],
        value: impl Fn(&Component) -> Option<f64>,
    ) -> Vec<f64> {
        path.iter()
            .filter(|&&pos| self.flow_count(pos) >= 2)
            .filter_map(|&pos| self.get(pos).and_then(&value))
            .collect()
    }

    /// Equivalent resistance of the qualifying path resistors, combined per
    /// the variant's rule (series: sum; parallel: reciprocal sum).
    pub fn total_resistance(&self, path: &[CellPos]) -> f64 {
        let values = self.qualifying_values(path, Component::resistance);
        match self.variant {
            Variant::Series => values.iter().sum(),
            Variant::Parallel => reciprocal_combine(&values),
        }
    }

    /// Equivalent capacitance of the qualifying path capacitors (series:
    /// reciprocal sum; parallel: sum).
    pub fn total_capacitance(&self, path: &[CellPos]) -> f64 {
        let values = self.qualifying_values(path, Component::capacitance);
        match self.variant {
            Variant::Series => reciprocal_combine(&values),
            Variant::Parallel => values.iter().sum(),
        }
    }

    fn supply_voltage(&self) -> f64 {
        self.find_cell(ComponentType::Source)
            .and_then(|pos| self.get(pos))
            .map_or(0.0, Component::voltage)
    }

    /// One full "run": path search, aggregation, timing evaluation, and the
    /// bulb state update. The bulb is lit only on success.
    pub fn run_simulation(&mut self) -> SimReport {
        let Some(path) = self.find_valid_path() else {
            info!("open circuit: no conducting path from source to destination");
            self.update_bulbs(0.0);
            return SimReport::OpenCircuit;
        };

        let total_resistance = self.total_resistance(&path);
        let total_capacitance = self.total_capacitance(&path);
        let evaluation = evaluate(total_resistance, total_capacitance);

        match evaluation.outcome {
            Outcome::Success => {
                let supply = self.supply_voltage();
                // Success implies R > 0.
                self.energize_path(&path, supply, supply / total_resistance);
            }
            Outcome::Failed(_) => self.update_bulbs(0.0),
        }

        info!(
            "simulation: R={total_resistance} ohm, C={total_capacitance} F, \
             duration={:.2} s, outcome={:?}",
            evaluation.duration, evaluation.outcome
        );

        SimReport::Evaluated {
            path,
            total_resistance,
            total_capacitance,
            evaluation,
        }
    }

    /// Success case: every path component sees the supply voltage and the
    /// loop current, then refreshes its derived state (resistor I = V/R,
    /// capacitor dV/dt, bulb lit).
    fn energize_path(&mut self, path: &[CellPos], supply: f64, current: f64) {
        for &pos in path {
            if let Some(component) = self.get_mut(pos) {
                component.set_voltage(supply);
                component.set_current(current);
                component.recalculate_attributes();
            }
        }
    }

    fn update_bulbs(&mut self, current: f64) {
        for cell in self.grid.iter_mut().flatten() {
            if cell.ty() == ComponentType::Bulb {
                cell.set_current(current);
                cell.recalculate_attributes();
            }
        }
    }
}

/// Reciprocal-sum combination: one value passes through unchanged, none is
/// zero, and non-positive values are skipped so the division stays sound.
fn reciprocal_combine(values: &[f64]) -> f64 {
    match values {
        [] => 0.0,
        [single] => *single,
        _ => {
            let inverse_sum: f64 = values
                .iter()
                .filter(|&&v| v > 0.0)
                .map(|v| 1.0 / v)
                .sum();
            if inverse_sum == 0.0 {
                0.0
            } else {
                1.0 / inverse_sum
            }
        }
    }
}
