// src/route/astar.rs
//! Поиск маршрута A* по гексагональной смежности
//!
//! Граф — вся плоскость аксиальных координат с шестью соседями у каждой клетки и
//! единичной стоимостью шага; тип местности на стоимость не влияет. Поиск
//! ограничен [`SearchBounds`]: сетка карты плюс одно кольцо клеток вокруг неё,
//! которые являются узлами графа, но не рендерятся.
//!
//! Эвристика — манхэттенское расстояние `|Δq| + |Δr|`. Она точна при `Δr = 0`
//! (маршрут вдоль одной строки), но для смещений вдоль оси `s` переоценивает
//! настоящее расстояние, поэтому для произвольных концов маршрут может оказаться
//! длиннее кратчайшего. Связность при этом гарантируется.

use crate::hex::{AxialCoord, HexGrid, hex_distance, manhattan_distance};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

/// Область поиска: клетки на гексагональном расстоянии не больше `radius` от центра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    radius: i32,
}

impl SearchBounds {
    #[must_use]
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }

    /// Сетка карты и кольцо соседей за её краем
    #[must_use]
    pub fn around(grid: HexGrid) -> Self {
        Self::new(grid.radius() + 1)
    }

    #[must_use]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[must_use]
    pub fn contains(&self, coord: AxialCoord) -> bool {
        hex_distance(AxialCoord::ORIGIN, coord) <= i64::from(self.radius)
    }
}

/// Элемент открытого множества: минимальный `f`, при равенстве — меньшая `(q, r)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: i64,
    coord: AxialCoord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap — max-heap, поэтому сравнение перевёрнуто
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ищет маршрут от `start` до `end` включительно
///
/// Возвращает `None`, если открытое множество исчерпано, не дойдя до `end`.
/// Внутри связной области это возможно только если один из концов лежит за `bounds`.
#[must_use]
pub fn find_path(
    start: AxialCoord,
    end: AxialCoord,
    bounds: SearchBounds,
) -> Option<Vec<AxialCoord>> {
    // Конец за пределами области недостижим; соседей у границ i32 не строим
    for (label, coord) in [("start", start), ("end", end)] {
        if !bounds.contains(coord) {
            debug!(endpoint = label, %coord, "Endpoint lies outside search bounds");
            return None;
        }
    }

    let heuristic = |c: AxialCoord| manhattan_distance(c, end);

    let mut open = BinaryHeap::new();
    let mut in_open = HashSet::new();
    let mut came_from: HashMap<AxialCoord, AxialCoord> = HashMap::new();
    let mut g_score: HashMap<AxialCoord, i64> = HashMap::new();
    let mut f_score: HashMap<AxialCoord, i64> = HashMap::new();

    g_score.insert(start, 0);
    f_score.insert(start, heuristic(start));
    open.push(OpenNode {
        f: heuristic(start),
        coord: start,
    });
    in_open.insert(start);

    let mut expanded = 0usize;

    while let Some(OpenNode { f, coord: current }) = open.pop() {
        // Устаревшая запись: узел уже улучшен или уже раскрыт
        if f_score.get(&current) != Some(&f) || !in_open.remove(&current) {
            continue;
        }
        expanded += 1;

        if current == end {
            let path = reconstruct_path(&came_from, current);
            debug!(%start, %end, expanded, length = path.len(), "A* reached target");
            return Some(path);
        }

        let tentative = g_score[&current] + 1;
        for neighbor in current.neighbors() {
            if !bounds.contains(neighbor) {
                continue;
            }
            if tentative < g_score.get(&neighbor).copied().unwrap_or(i64::MAX) {
                let neighbor_f = tentative + heuristic(neighbor);
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                f_score.insert(neighbor, neighbor_f);
                open.push(OpenNode {
                    f: neighbor_f,
                    coord: neighbor,
                });
                in_open.insert(neighbor);
            }
        }
    }

    debug!(%start, %end, expanded, "A* exhausted open set");
    None
}

fn reconstruct_path(
    came_from: &HashMap<AxialCoord, AxialCoord>,
    mut current: AxialCoord,
) -> Vec<AxialCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(q: i32, r: i32) -> AxialCoord {
        AxialCoord::new(q, r)
    }

    fn assert_valid_path(path: &[AxialCoord], start: AxialCoord, end: AxialCoord) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn same_start_and_end() {
        let path = find_path(c(0, 0), c(0, 0), SearchBounds::new(1)).unwrap();
        assert_eq!(path, vec![c(0, 0)]);
    }

    #[test]
    fn straight_row_is_exact() {
        let path = find_path(c(-2, 0), c(2, 0), SearchBounds::new(3)).unwrap();
        assert_eq!(path, vec![c(-2, 0), c(-1, 0), c(0, 0), c(1, 0), c(2, 0)]);
    }

    #[test]
    fn ties_prefer_smaller_coordinate() {
        // (0, 1) и (1, 0) равноценны; раскрывается меньшая
        let path = find_path(c(0, 0), c(1, 1), SearchBounds::new(3)).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(1, 1)]);
    }

    #[test]
    fn search_is_reproducible() {
        let bounds = SearchBounds::new(6);
        let a = find_path(c(-4, 4), c(5, -3), bounds);
        let b = find_path(c(-4, 4), c(5, -3), bounds);
        assert_eq!(a, b);
    }

    #[test]
    fn every_pair_in_small_grid_is_connected() {
        let grid = HexGrid::new(3).unwrap();
        let bounds = SearchBounds::around(grid);
        for start in &grid {
            for end in &grid {
                let path = find_path(start, end, bounds).unwrap();
                assert_valid_path(&path, start, end);
                let steps = path.len() as i64 - 1;
                assert!(steps >= hex_distance(start, end), "{start} -> {end}");
                assert!(steps <= manhattan_distance(start, end), "{start} -> {end}");
            }
        }
    }

    #[test]
    fn rows_and_columns_get_shortest_paths() {
        let bounds = SearchBounds::new(6);
        for (start, end) in [(c(-5, 2), c(4, 2)), (c(1, -5), c(1, 3))] {
            let path = find_path(start, end, bounds).unwrap();
            assert_valid_path(&path, start, end);
            assert_eq!(path.len() as i64, hex_distance(start, end) + 1);
        }
    }

    #[test]
    fn boundary_endpoints_may_use_margin() {
        let grid = HexGrid::new(2).unwrap();
        let bounds = SearchBounds::around(grid);
        assert!(bounds.contains(c(3, 0)));
        let path = find_path(c(2, -2), c(-2, 2), bounds).unwrap();
        assert_valid_path(&path, c(2, -2), c(-2, 2));
        assert!(path.iter().all(|&p| bounds.contains(p)));
    }

    #[test]
    fn target_outside_bounds_exhausts() {
        let bounds = SearchBounds::new(2);
        assert!(find_path(c(0, 0), c(10, 0), bounds).is_none());
        assert!(find_path(c(10, 0), c(0, 0), bounds).is_none());
    }

    #[test]
    fn endpoints_at_i32_limits_exhaust_without_overflow() {
        let bounds = SearchBounds::new(6);
        assert!(find_path(c(-5, 0), c(i32::MAX, 0), bounds).is_none());
        assert!(find_path(c(i32::MIN, 0), c(0, 0), bounds).is_none());
        assert!(find_path(c(0, i32::MIN), c(i32::MAX, i32::MAX), bounds).is_none());
    }
}
