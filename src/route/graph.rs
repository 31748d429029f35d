// src/route/graph.rs
use crate::hex::AxialCoord;
use crate::terrain::TerrainKind;
use crate::tile_map::TileMap;
use petgraph::algo::{connected_components, has_path_connecting};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Граф смежности клеток карты, отобранных по типу местности
#[derive(Debug, Clone)]
pub struct TileGraph {
    pub graph: UnGraph<AxialCoord, ()>,
    nodes: HashMap<AxialCoord, NodeIndex>,
}

impl TileGraph {
    #[must_use]
    pub fn node(&self, coord: AxialCoord) -> Option<NodeIndex> {
        self.nodes.get(&coord).copied()
    }

    /// Есть ли путь между двумя клетками внутри графа
    #[must_use]
    pub fn connects(&self, a: AxialCoord, b: AxialCoord) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// Количество связных областей
    #[must_use]
    pub fn region_count(&self) -> usize {
        connected_components(&self.graph)
    }
}

pub fn build_tile_graph(tile_map: &TileMap, include: impl Fn(TerrainKind) -> bool) -> TileGraph {
    let mut graph = UnGraph::new_undirected();
    let mut nodes = HashMap::new();

    for (coord, kind) in tile_map.iter() {
        if include(kind) {
            nodes.insert(coord, graph.add_node(coord));
        }
    }

    for (&coord, &node) in &nodes {
        for neighbor in coord.neighbors() {
            // Каждое ребро добавляется один раз: от меньшей координаты к большей
            if neighbor <= coord {
                continue;
            }
            if let Some(&other) = nodes.get(&neighbor) {
                graph.add_edge(node, other, ());
            }
        }
    }

    TileGraph { graph, nodes }
}

/// Соединены ли `start` и `end` цепочкой проходимых клеток карты
#[must_use]
pub fn is_route_connected(tile_map: &TileMap, start: AxialCoord, end: AxialCoord) -> bool {
    build_tile_graph(tile_map, TerrainKind::is_traversable).connects(start, end)
}

/// Количество связных областей местности типа `kind`
#[must_use]
pub fn count_regions(tile_map: &TileMap, kind: TerrainKind) -> usize {
    build_tile_graph(tile_map, |k| k == kind).region_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::generate;

    #[test]
    fn full_grid_is_one_region() {
        let map = TileMap::from_fn(generate(3).unwrap(), |_| TerrainKind::Forest);
        let graph = build_tile_graph(&map, |_| true);
        assert_eq!(graph.graph.node_count(), 37);
        // 3R(3R + 1) рёбер в шестиугольнике радиуса R
        assert_eq!(graph.graph.edge_count(), 90);
        assert_eq!(graph.region_count(), 1);
        assert_eq!(count_regions(&map, TerrainKind::Water), 0);
    }

    #[test]
    fn water_column_splits_path_regions() {
        let map = TileMap::from_fn(generate(2).unwrap(), |c| {
            if c.q == 0 {
                TerrainKind::Water
            } else {
                TerrainKind::Path
            }
        });
        assert_eq!(count_regions(&map, TerrainKind::Path), 2);
        assert_eq!(count_regions(&map, TerrainKind::Water), 1);
        assert!(!is_route_connected(
            &map,
            AxialCoord::new(-2, 0),
            AxialCoord::new(2, 0)
        ));
        assert!(is_route_connected(
            &map,
            AxialCoord::new(-2, 0),
            AxialCoord::new(-1, 1)
        ));
    }

    #[test]
    fn missing_endpoint_is_not_connected() {
        let map = TileMap::from_fn(generate(1).unwrap(), |_| TerrainKind::Path);
        assert!(!is_route_connected(
            &map,
            AxialCoord::new(0, 0),
            AxialCoord::new(5, 0)
        ));
    }
}
