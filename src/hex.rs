// src/hex.rs
//! Аксиальные координаты и перечисление шестиугольной сетки
//!
//! Карта — это "шестиугольник радиуса R" в аксиальных координатах `(q, r)`:
//! все клетки, для которых `-R ≤ q ≤ R` и `max(-R, -q-R) ≤ r ≤ min(R, -q+R)`.
//! Таких клеток ровно `3R² + 3R + 1`.
//!
//! Перечисление ленивое и перезапускаемое: [`HexGrid`] хранит только радиус,
//! а каждый вызов [`HexGrid::iter`] проходит сетку заново в порядке "по q, затем по r".

use crate::error::{MapGenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Смещения шести соседей в аксиальных координатах
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// Аксиальная координата клетки
///
/// Порядок сравнения — лексикографический по `(q, r)`; на нём построен
/// детерминированный выбор между равноценными узлами в A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Шесть соседей в порядке [`NEIGHBOR_OFFSETS`]
    #[must_use]
    pub fn neighbors(self) -> [AxialCoord; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| AxialCoord::new(self.q + dq, self.r + dr))
    }

    #[must_use]
    pub fn is_adjacent(self, other: AxialCoord) -> bool {
        let dq = i64::from(other.q) - i64::from(self.q);
        let dr = i64::from(other.r) - i64::from(self.r);
        NEIGHBOR_OFFSETS
            .iter()
            .any(|&(q, r)| (i64::from(q), i64::from(r)) == (dq, dr))
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self { q, r }
    }
}

// Разности считаются в i64: концы маршрута приходят из конфига и могут лежать у границ i32
fn deltas(a: AxialCoord, b: AxialCoord) -> (i64, i64) {
    (
        i64::from(a.q) - i64::from(b.q),
        i64::from(a.r) - i64::from(b.r),
    )
}

/// Настоящее гексагональное расстояние: `max(|Δq|, |Δr|, |Δq + Δr|)`
#[must_use]
pub fn hex_distance(a: AxialCoord, b: AxialCoord) -> i64 {
    let (dq, dr) = deltas(a, b);
    dq.abs().max(dr.abs()).max((dq + dr).abs())
}

/// Манхэттенское расстояние по паре `(q, r)`: `|Δq| + |Δr|`
///
/// Для смещений вдоль оси `s` (`Δq = -Δr`) переоценивает [`hex_distance`] вдвое,
/// поэтому как эвристика A* она не допустима. Точна при `Δr = 0` или `Δq = 0`.
#[must_use]
pub fn manhattan_distance(a: AxialCoord, b: AxialCoord) -> i64 {
    let (dq, dr) = deltas(a, b);
    dq.abs() + dr.abs()
}

/// Шестиугольная сетка заданного радиуса с центром в `(0, 0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexGrid {
    radius: i32,
}

impl HexGrid {
    /// Создаёт сетку; отрицательный радиус — ошибка валидации
    pub fn new(radius: i32) -> Result<Self> {
        if radius < 0 {
            return Err(MapGenError::validation(format!(
                "radius must be non-negative, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    #[must_use]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Количество клеток: `3R² + 3R + 1`
    #[must_use]
    pub fn len(&self) -> usize {
        let r = self.radius as usize;
        3 * r * r + 3 * r + 1
    }

    /// Сетка всегда содержит хотя бы центральную клетку
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn contains(&self, coord: AxialCoord) -> bool {
        hex_distance(AxialCoord::ORIGIN, coord) <= i64::from(self.radius)
    }

    #[must_use]
    pub fn iter(&self) -> HexGridIter {
        HexGridIter {
            radius: self.radius,
            q: -self.radius,
            r: row_start(-self.radius, self.radius),
            remaining: self.len(),
        }
    }
}

impl IntoIterator for &HexGrid {
    type Item = AxialCoord;
    type IntoIter = HexGridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Перечисляет все координаты шестиугольника радиуса `radius`
pub fn generate(radius: i32) -> Result<HexGrid> {
    HexGrid::new(radius)
}

fn row_start(q: i32, radius: i32) -> i32 {
    (-radius).max(-q - radius)
}

fn row_end(q: i32, radius: i32) -> i32 {
    radius.min(-q + radius)
}

/// Итератор по клеткам [`HexGrid`]
#[derive(Debug, Clone)]
pub struct HexGridIter {
    radius: i32,
    q: i32,
    r: i32,
    remaining: usize,
}

impl Iterator for HexGridIter {
    type Item = AxialCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let coord = AxialCoord::new(self.q, self.r);
        self.remaining -= 1;

        self.r += 1;
        if self.r > row_end(self.q, self.radius) {
            self.q += 1;
            self.r = row_start(self.q, self.radius);
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HexGridIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn count_matches_closed_form() {
        for radius in 0..=12 {
            let grid = generate(radius).unwrap();
            let r = radius as usize;
            assert_eq!(grid.iter().count(), 3 * r * r + 3 * r + 1);
            assert_eq!(grid.iter().len(), grid.len());
        }
    }

    #[test]
    fn radius_zero_is_single_origin() {
        let coords: Vec<_> = generate(0).unwrap().iter().collect();
        assert_eq!(coords, vec![AxialCoord::ORIGIN]);
    }

    #[test]
    fn every_coord_is_inside_hexagon_and_unique() {
        let radius = 7;
        let grid = generate(radius).unwrap();
        let mut seen = HashSet::new();
        for c in &grid {
            assert!(-radius <= c.q && c.q <= radius);
            assert!((-radius).max(-c.q - radius) <= c.r);
            assert!(c.r <= radius.min(-c.q + radius));
            assert!(grid.contains(c));
            assert!(seen.insert(c), "duplicate {c}");
        }
    }

    #[test]
    fn enumeration_order_is_by_q_then_r() {
        let coords: Vec<_> = generate(1).unwrap().iter().map(|c| (c.q, c.r)).collect();
        assert_eq!(
            coords,
            vec![(-1, 0), (-1, 1), (0, -1), (0, 0), (0, 1), (1, -1), (1, 0)]
        );
    }

    #[test]
    fn iteration_is_restartable() {
        let grid = generate(3).unwrap();
        let first: Vec<_> = grid.iter().collect();
        let second: Vec<_> = grid.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = generate(-1).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn neighbors_are_adjacent_and_at_distance_one() {
        let c = AxialCoord::new(2, -3);
        for n in c.neighbors() {
            assert!(c.is_adjacent(n));
            assert_eq!(hex_distance(c, n), 1);
        }
        assert!(!c.is_adjacent(AxialCoord::new(3, -2)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn distances_do_not_overflow_at_i32_limits() {
        let max = AxialCoord::new(i32::MAX, 0);
        let min = AxialCoord::new(i32::MIN, 0);
        assert_eq!(hex_distance(max, min), (1_i64 << 32) - 1);
        assert_eq!(
            manhattan_distance(AxialCoord::new(i32::MIN, i32::MAX), AxialCoord::ORIGIN),
            (1_i64 << 32) - 1
        );
        assert!(!max.is_adjacent(min));
        assert!(!generate(3).unwrap().contains(min));
    }

    #[test]
    fn manhattan_overestimates_along_s_axis() {
        let a = AxialCoord::ORIGIN;
        assert_eq!(manhattan_distance(a, AxialCoord::new(3, 0)), 3);
        assert_eq!(hex_distance(a, AxialCoord::new(3, 0)), 3);
        assert_eq!(manhattan_distance(a, AxialCoord::new(2, -2)), 4);
        assert_eq!(hex_distance(a, AxialCoord::new(2, -2)), 2);
    }
}
