//! Battlefield lawn: the cell matrix plus the plant list it indexes.

use std::time::Duration;

use garden_defence_core::{CellCoord, PlantId, PlantKind, PlantingError, EMPTY_CELL_GLYPH};

/// Plant stored inside the lawn.
#[derive(Clone, Debug)]
pub(crate) struct Plant {
    /// Identifier allocated by the lawn.
    pub(crate) id: PlantId,
    /// Catalog entry the plant was created from.
    pub(crate) kind: PlantKind,
    /// Cell referencing the plant.
    pub(crate) cell: CellCoord,
    /// Remaining health; the plant leaves the lawn at zero.
    pub(crate) health: u32,
    /// Placement time, then the time of the last shot.
    pub(crate) last_action: Duration,
}

/// Dense cell matrix paired with the plants it references.
///
/// Every occupied cell names exactly one plant in `plants`, and every plant
/// records the cell that names it. All mutation goes through [`Lawn::place`]
/// and [`Lawn::remove`] so the two sides never drift apart.
#[derive(Clone, Debug)]
pub(crate) struct Lawn {
    rows: u32,
    columns: u32,
    cells: Vec<Option<PlantId>>,
    plants: Vec<Plant>,
    next_plant_id: u32,
}

impl Lawn {
    pub(crate) fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![None; capacity],
            plants: Vec::new(),
            next_plant_id: 0,
        }
    }

    pub(crate) const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Reports whether a cell is free, failing for cells outside the lawn.
    pub(crate) fn is_empty(&self, cell: CellCoord) -> Result<bool, PlantingError> {
        let index = self.checked_index(cell)?;
        Ok(self.cells[index].is_none())
    }

    /// Fails unless the cell lies inside the lawn and holds no plant.
    pub(crate) fn ensure_vacant(&self, cell: CellCoord) -> Result<(), PlantingError> {
        if self.is_empty(cell)? {
            Ok(())
        } else {
            Err(PlantingError::CellOccupied {
                row: cell.row(),
                column: cell.column(),
            })
        }
    }

    /// Inserts a new plant into a free cell.
    ///
    /// Occupied cells are never overwritten; the call fails and the lawn is
    /// left untouched.
    pub(crate) fn place(
        &mut self,
        kind: PlantKind,
        cell: CellCoord,
        now: Duration,
    ) -> Result<PlantId, PlantingError> {
        self.ensure_vacant(cell)?;
        let index = self.checked_index(cell)?;
        let id = PlantId::new(self.next_plant_id);
        self.next_plant_id = self.next_plant_id.saturating_add(1);
        self.cells[index] = Some(id);
        self.plants.push(Plant {
            id,
            kind,
            cell,
            health: kind.spec().health,
            last_action: now,
        });
        debug_assert!(self.is_consistent(), "lawn drifted after placing {id:?}");
        Ok(id)
    }

    /// Clears a cell and drops its plant. Clearing an empty cell is a no-op.
    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<Plant> {
        let index = self.index(cell)?;
        let id = self.cells[index].take()?;
        let position = self.plants.iter().position(|plant| plant.id == id)?;
        let removed = self.plants.remove(position);
        debug_assert!(self.is_consistent(), "lawn drifted after removing {id:?}");
        Some(removed)
    }

    pub(crate) fn plant_at(&self, cell: CellCoord) -> Option<&Plant> {
        let id = self.index(cell).and_then(|index| self.cells[index])?;
        self.plants.iter().find(|plant| plant.id == id)
    }

    pub(crate) fn plant_at_mut(&mut self, cell: CellCoord) -> Option<&mut Plant> {
        let id = self.index(cell).and_then(|index| self.cells[index])?;
        self.plants.iter_mut().find(|plant| plant.id == id)
    }

    pub(crate) fn plant_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.plants.iter_mut().find(|plant| plant.id == id)
    }

    /// Plants in placement order.
    pub(crate) fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Renders one string per row, one glyph per cell.
    pub(crate) fn render_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| {
                        self.plant_at(CellCoord::new(row, column))
                            .map_or(EMPTY_CELL_GLYPH, |plant| plant.kind.icon())
                    })
                    .collect()
            })
            .collect()
    }

    /// Checks that the cell matrix and the plant list describe the same plants.
    pub(crate) fn is_consistent(&self) -> bool {
        let occupied = self.cells.iter().filter(|cell| cell.is_some()).count();
        occupied == self.plants.len()
            && self.plants.iter().all(|plant| {
                self.index(plant.cell)
                    .is_some_and(|index| self.cells[index] == Some(plant.id))
            })
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, PlantingError> {
        self.index(cell).ok_or(PlantingError::OutOfBounds {
            row: cell.row(),
            column: cell.column(),
            rows: self.rows,
            columns: self.columns,
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.row() < self.rows && cell.column() < self.columns {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
