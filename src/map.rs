// src/map.rs
//! Сборка карты целиком
//!
//! [`MapBuilder`] выполняет один запуск генерации:
//! 1. Проверяет конфигурацию (никакой частично построенной карты при ошибке)
//! 2. Выбирает сид шума, если он не задан
//! 3. Перечисляет клетки сетки и классифицирует местность
//! 4. Прокладывает и прорезает маршрут между концами
//! 5. Проверяет, что маршрут действительно проходим
//!
//! Результат — [`GeneratedMap`], из которого внешний рендерер получает тройки
//! `(координата, тип, позиция)` через [`GeneratedMap::placements`].

use crate::config::GenerationConfig;
use crate::error::{MapGenError, Result};
use crate::hex::{self, AxialCoord};
use crate::layout::{PlanarPosition, to_planar};
use crate::route::{self, count_regions, is_route_connected};
use crate::terrain::{TerrainClassifier, TerrainKind, draw_noise_seed};
use crate::tile_map::{TerrainStats, TileMap};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Одна клетка для рендерера
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub coord: AxialCoord,
    pub kind: TerrainKind,
    pub position: PlanarPosition,
}

/// Сводка по сгенерированной карте
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub stats: TerrainStats,
    pub route_length: usize,
    /// Связные области каждого типа местности
    pub path_regions: usize,
    pub water_regions: usize,
    pub forest_regions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    seed: f32,
    hex_size: f32,
    tiles: TileMap,
    route: Vec<AxialCoord>,
}

impl GeneratedMap {
    /// Сид шума, с которым построена карта
    #[must_use]
    pub fn seed(&self) -> f32 {
        self.seed
    }

    #[must_use]
    pub fn hex_size(&self) -> f32 {
        self.hex_size
    }

    #[must_use]
    pub fn radius(&self) -> i32 {
        self.tiles.radius()
    }

    #[must_use]
    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    #[must_use]
    pub fn into_tiles(self) -> TileMap {
        self.tiles
    }

    /// Маршрут от начала до конца включительно
    #[must_use]
    pub fn route(&self) -> &[AxialCoord] {
        &self.route
    }

    #[must_use]
    pub fn position(&self, coord: AxialCoord) -> PlanarPosition {
        to_planar(coord, self.hex_size)
    }

    /// Все клетки с позициями, в порядке возрастания `(q, r)`
    #[must_use]
    pub fn placements(&self) -> Vec<TilePlacement> {
        self.tiles
            .iter()
            .map(|(coord, kind)| TilePlacement {
                coord,
                kind,
                position: self.position(coord),
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            stats: self.tiles.stats(),
            route_length: self.route.len(),
            path_regions: count_regions(&self.tiles, TerrainKind::Path),
            water_regions: count_regions(&self.tiles, TerrainKind::Water),
            forest_regions: count_regions(&self.tiles, TerrainKind::Forest),
        }
    }

    #[must_use]
    pub fn export(&self) -> MapExport {
        MapExport {
            seed: self.seed,
            radius: self.radius(),
            hex_size: self.hex_size,
            route: self.route.clone(),
            tiles: self.placements(),
        }
    }
}

/// Снимок карты для передачи рендереру в JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExport {
    pub seed: f32,
    pub radius: i32,
    pub hex_size: f32,
    pub route: Vec<AxialCoord>,
    pub tiles: Vec<TilePlacement>,
}

impl MapExport {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Оркестратор одного запуска генерации
#[derive(Debug, Clone)]
pub struct MapBuilder {
    config: GenerationConfig,
}

impl MapBuilder {
    #[must_use]
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Строит карту; недостающий сид берётся из `rand::thread_rng`
    pub fn build(&self) -> Result<GeneratedMap> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    /// Строит карту; недостающий сид берётся из `rng`
    pub fn build_with_rng<R: Rng>(&self, rng: &mut R) -> Result<GeneratedMap> {
        let config = &self.config;
        config.validate()?;

        let grid = hex::generate(config.radius)?;
        let seed = config.noise_seed.unwrap_or_else(|| draw_noise_seed(rng));
        info!(radius = config.radius, seed, tiles = grid.len(), "Generating hex map");

        let classifier = TerrainClassifier::new(seed, config.terrain.clone());
        let mut tiles = TileMap::classify(grid, &classifier);

        let (start, end) = config.route_endpoints();
        let route = route::connect(&mut tiles, start, end)?;

        if tiles.contains(start)
            && tiles.contains(end)
            && !is_route_connected(&tiles, start, end)
        {
            return Err(MapGenError::DisconnectedRoute { start, end });
        }

        let stats = tiles.stats();
        info!(
            path = stats.path,
            water = stats.water,
            forest = stats.forest,
            route_length = route.len(),
            "Hex map generated"
        );

        Ok(GeneratedMap {
            seed,
            hex_size: config.hex_size,
            tiles,
            route,
        })
    }
}

/// Строит карту по конфигурации
pub fn build_map(config: &GenerationConfig) -> Result<GeneratedMap> {
    MapBuilder::new(config.clone()).build()
}
