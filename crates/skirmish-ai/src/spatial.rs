//! Coarse spatial bucketing of enemies.
//!
//! The grid is kept current every tick but the AI itself never queries it.
//! It is the broad-phase hook for anything that later needs neighbours.

use ahash::{AHashMap, AHashSet};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::EnemyId;

/// Key of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellKey {
    /// Cell column
    pub x: i32,
    /// Cell row
    pub y: i32,
}

impl CellKey {
    /// Creates a cell key.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell containing `pos`.
    #[must_use]
    pub fn from_position(pos: Vec2, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
        }
    }
}

/// Grid of enemy ids bucketed by cell. An id lives in at most one bucket.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: AHashMap<CellKey, AHashSet<EnemyId>>,
    /// Reverse index: which cell each id is in
    locations: AHashMap<EnemyId, CellKey>,
}

impl SpatialGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: AHashMap::new(),
            locations: AHashMap::new(),
        }
    }

    /// Returns the cell size.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Places `id` in the cell for `pos`, removing it from its previous cell.
    pub fn update(&mut self, id: EnemyId, pos: Vec2) {
        let key = CellKey::from_position(pos, self.cell_size);
        match self.locations.insert(id, key) {
            Some(previous) if previous == key => return,
            Some(previous) => self.detach(id, previous),
            None => {},
        }
        self.cells.entry(key).or_default().insert(id);
    }

    /// Removes `id` from the grid. Returns whether it was present.
    pub fn remove(&mut self, id: EnemyId) -> bool {
        match self.locations.remove(&id) {
            Some(key) => {
                self.detach(id, key);
                true
            },
            None => false,
        }
    }

    fn detach(&mut self, id: EnemyId, key: CellKey) {
        if let Some(bucket) = self.cells.get_mut(&key) {
            bucket.remove(&id);
            if bucket.is_empty() {
                self.cells.remove(&key);
            }
        }
    }

    /// Returns the cell `id` is in.
    #[must_use]
    pub fn cell_of(&self, id: EnemyId) -> Option<CellKey> {
        self.locations.get(&id).copied()
    }

    /// Returns the ids bucketed in `key`.
    pub fn ids_in_cell(&self, key: CellKey) -> impl Iterator<Item = EnemyId> + '_ {
        self.cells.get(&key).into_iter().flatten().copied()
    }

    /// Collects ids in every cell overlapping the square around `pos`.
    ///
    /// This is a broad-phase query: callers still need an exact distance check.
    #[must_use]
    pub fn query_radius(&self, pos: Vec2, radius: f32) -> Vec<EnemyId> {
        let min = CellKey::from_position(pos - Vec2::splat(radius), self.cell_size);
        let max = CellKey::from_position(pos + Vec2::splat(radius), self.cell_size);
        let mut out = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                out.extend(self.ids_in_cell(CellKey::new(x, y)));
            }
        }
        out
    }

    /// Number of tracked ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns whether the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cell_key_floor_division() {
        assert_eq!(CellKey::from_position(Vec2::new(199.0, 200.0), 200.0), CellKey::new(0, 1));
        assert_eq!(CellKey::from_position(Vec2::new(-1.0, 0.0), 200.0), CellKey::new(-1, 0));
    }

    #[test]
    fn test_update_moves_between_cells() {
        let mut grid = SpatialGrid::new(200.0);
        let id = EnemyId::from_raw(1);

        grid.update(id, Vec2::new(10.0, 10.0));
        assert_eq!(grid.cell_of(id), Some(CellKey::new(0, 0)));

        grid.update(id, Vec2::new(450.0, 10.0));
        assert_eq!(grid.cell_of(id), Some(CellKey::new(2, 0)));
        assert_eq!(grid.ids_in_cell(CellKey::new(0, 0)).count(), 0);
        assert_eq!(grid.occupied_cells(), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_remove_prunes_bucket() {
        let mut grid = SpatialGrid::new(200.0);
        let id = EnemyId::from_raw(5);
        grid.update(id, Vec2::new(300.0, 300.0));

        assert!(grid.remove(id));
        assert!(!grid.remove(id));
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_query_radius() {
        let mut grid = SpatialGrid::new(200.0);
        let near = EnemyId::from_raw(1);
        let far = EnemyId::from_raw(2);
        grid.update(near, Vec2::new(250.0, 250.0));
        grid.update(far, Vec2::new(3000.0, 3000.0));

        let found = grid.query_radius(Vec2::new(200.0, 200.0), 100.0);
        assert_eq!(found, vec![near]);
    }

    proptest! {
        #[test]
        fn prop_id_in_at_most_one_cell(
            moves in proptest::collection::vec((0u64..4, 0.0f32..4000.0, 0.0f32..4000.0), 1..64)
        ) {
            let mut grid = SpatialGrid::new(200.0);
            for (raw, x, y) in moves {
                grid.update(EnemyId::from_raw(raw), Vec2::new(x, y));
            }
            for raw in 0u64..4 {
                let id = EnemyId::from_raw(raw);
                let buckets = grid
                    .cells
                    .values()
                    .filter(|bucket| bucket.contains(&id))
                    .count();
                prop_assert!(buckets <= 1);
                prop_assert_eq!(buckets == 1, grid.cell_of(id).is_some());
            }
        }
    }
}
