// src/tile_map.rs
//! Карта клеток: координата → тип местности
//!
//! Содержит ровно по одной записи на каждую координату шестиугольной сетки
//! заданного радиуса и ничего сверх этого. Новые ключи не добавляются:
//! [`TileMap::carve`] только перезаписывает существующие клетки.

use crate::hex::{AxialCoord, HexGrid};
use crate::terrain::{TerrainClassifier, TerrainKind};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    grid: HexGrid,
    tiles: BTreeMap<AxialCoord, TerrainKind>,
}

impl TileMap {
    /// Заполняет все клетки сетки значениями `kind_of`
    pub fn from_fn(grid: HexGrid, mut kind_of: impl FnMut(AxialCoord) -> TerrainKind) -> Self {
        let tiles = grid.iter().map(|c| (c, kind_of(c))).collect();
        Self { grid, tiles }
    }

    /// Классифицирует каждую клетку сетки
    #[must_use]
    pub fn classify(grid: HexGrid, classifier: &TerrainClassifier) -> Self {
        Self::from_fn(grid, |c| classifier.classify(c))
    }

    #[must_use]
    pub fn grid(&self) -> HexGrid {
        self.grid
    }

    #[must_use]
    pub fn radius(&self) -> i32 {
        self.grid.radius()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, coord: AxialCoord) -> Option<TerrainKind> {
        self.tiles.get(&coord).copied()
    }

    #[must_use]
    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Перезаписывает тип существующей клетки.
    ///
    /// Возвращает `false`, если клетки нет на карте (карта при этом не меняется).
    pub fn carve(&mut self, coord: AxialCoord, kind: TerrainKind) -> bool {
        match self.tiles.get_mut(&coord) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Клетки в порядке возрастания `(q, r)`
    pub fn iter(&self) -> impl Iterator<Item = (AxialCoord, TerrainKind)> + '_ {
        self.tiles.iter().map(|(&c, &k)| (c, k))
    }

    #[must_use]
    pub fn stats(&self) -> TerrainStats {
        let mut stats = TerrainStats::default();
        for (_, kind) in self.iter() {
            match kind {
                TerrainKind::Path => stats.path += 1,
                TerrainKind::Water => stats.water += 1,
                TerrainKind::Forest => stats.forest += 1,
            }
        }
        stats
    }
}

/// Количество клеток каждого типа
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TerrainStats {
    pub path: usize,
    pub water: usize,
    pub forest: usize,
}

impl TerrainStats {
    #[must_use]
    pub fn count(&self, kind: TerrainKind) -> usize {
        match kind {
            TerrainKind::Path => self.path,
            TerrainKind::Water => self.water,
            TerrainKind::Forest => self.forest,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.path + self.water + self.forest
    }
}
