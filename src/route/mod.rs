// src/route/mod.rs
//! Гарантированно проходимый маршрут через карту
//!
//! Классификация местности ничего не знает о связности, поэтому после неё между
//! двумя заданными клетками прокладывается маршрут A*, и все клетки маршрута
//! принудительно становятся тропой ("прорезаются").

pub mod astar;
pub mod graph;

pub use astar::{SearchBounds, find_path};
pub use graph::{TileGraph, build_tile_graph, count_regions, is_route_connected};

use crate::error::{MapGenError, Result};
use crate::hex::AxialCoord;
use crate::terrain::TerrainKind;
use crate::tile_map::TileMap;
use tracing::warn;

/// Прокладывает маршрут от `start` до `end` и прорезает его на карте
///
/// Поиск идёт по всей области [`SearchBounds::around`] сетки карты. Если маршрут
/// не найден, возвращается [`MapGenError::PathSearchExhausted`]: при корректных
/// концах граф связен, и такая ситуация означает нарушение контракта.
pub fn connect(
    tile_map: &mut TileMap,
    start: AxialCoord,
    end: AxialCoord,
) -> Result<Vec<AxialCoord>> {
    let bounds = SearchBounds::around(tile_map.grid());
    let path =
        find_path(start, end, bounds).ok_or(MapGenError::PathSearchExhausted { start, end })?;

    carve_path(tile_map, &path);
    Ok(path)
}

/// Делает все клетки маршрута тропой. Клетки за пределами карты пропускаются.
///
/// Возвращает количество прорезанных клеток.
pub fn carve_path(tile_map: &mut TileMap, path: &[AxialCoord]) -> usize {
    let mut carved = 0;
    for &coord in path {
        if tile_map.carve(coord, TerrainKind::Path) {
            carved += 1;
        } else {
            warn!(%coord, "Route passes outside the rendered grid");
        }
    }
    carved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::generate;

    #[test]
    fn connect_carves_every_path_tile() {
        let mut map = TileMap::from_fn(generate(4).unwrap(), |_| TerrainKind::Water);
        let start = AxialCoord::new(-4, 2);
        let end = AxialCoord::new(3, -3);
        let path = connect(&mut map, start, end).unwrap();

        for &c in &path {
            assert_eq!(map.get(c), Some(TerrainKind::Path));
        }
        assert_eq!(map.stats().path, path.len());
        assert!(is_route_connected(&map, start, end));
    }

    #[test]
    fn connect_outside_bounds_is_internal_error() {
        let mut map = TileMap::from_fn(generate(2).unwrap(), |_| TerrainKind::Forest);
        let before = map.clone();
        let err = connect(&mut map, AxialCoord::new(0, 0), AxialCoord::new(9, 0)).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(map, before);
    }

    #[test]
    fn carving_skips_margin_tiles() {
        let mut map = TileMap::from_fn(generate(1).unwrap(), |_| TerrainKind::Forest);
        let path = [
            AxialCoord::new(0, 0),
            AxialCoord::new(1, 0),
            AxialCoord::new(2, 0),
        ];
        assert_eq!(carve_path(&mut map, &path), 2);
        assert_eq!(map.len(), 7);
        assert!(!map.contains(AxialCoord::new(2, 0)));
    }
}
