use std::collections::BTreeSet;

use crate::constants::power_corners;
use crate::error::SetupError;
use crate::types::{Cell, PickupKind, Position};
use crate::world::Grid;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pickups {
    regular: BTreeSet<Position>,
    power: BTreeSet<Position>,
}

impl Pickups {
    pub fn initialize(grid: &Grid) -> Result<Self, SetupError> {
        let mut power = BTreeSet::new();
        for corner in power_corners(grid.width(), grid.height()) {
            if !grid.in_bounds(corner) {
                return Err(SetupError::PowerCornerOutOfBounds { corner });
            }
            if grid.cell_at(corner) != Cell::Open {
                return Err(SetupError::PowerCornerBlocked { corner });
            }
            power.insert(corner);
        }
        let regular = grid
            .open_cells()
            .filter(|pos| !power.contains(pos))
            .collect();
        Ok(Self { regular, power })
    }

    pub fn consume_at(&mut self, pos: Position) -> PickupKind {
        if self.regular.remove(&pos) {
            return PickupKind::Regular;
        }
        if self.power.remove(&pos) {
            return PickupKind::Power;
        }
        PickupKind::None
    }

    pub fn kind_at(&self, pos: Position) -> PickupKind {
        if self.regular.contains(&pos) {
            PickupKind::Regular
        } else if self.power.contains(&pos) {
            PickupKind::Power
        } else {
            PickupKind::None
        }
    }

    pub fn regular(&self) -> &BTreeSet<Position> {
        &self.regular
    }

    pub fn power(&self) -> &BTreeSet<Position> {
        &self.power
    }

    pub fn remaining(&self) -> usize {
        self.regular.len() + self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.power.is_empty()
    }
}
