// src/terrain.rs
//! Классификация местности по когерентному шуму
//!
//! Каждая клетка получает тип местности по значению 2D-шума Перлина в точке
//! `((q + seed) · scale, (r + seed) · scale)`. Сид выбирается один раз на запуск
//! генерации и дальше только читается, поэтому классификация — чистая функция
//! от `(координата, сид)`.

use crate::config::TerrainSettings;
use crate::hex::AxialCoord;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Верхняя граница случайного сида шума
pub const MAX_NOISE_SEED: f32 = 10_000.0;

// Сид самой решётки FastNoiseLite фиксирован: вариативность даёт смещение координат
const NOISE_LATTICE_SEED: i32 = 1337;

// Наибольшее значение шума строго меньше 1.0
const NOISE_CEILING: f32 = 1.0 - f32::EPSILON;

/// Тип местности клетки
///
/// Порядок вариантов не несёт смысла: это метка для выбора визуального ассета.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainKind {
    Path,
    Water,
    Forest,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 3] = [TerrainKind::Path, TerrainKind::Water, TerrainKind::Forest];

    #[must_use]
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            TerrainKind::Path => [210, 190, 130],
            TerrainKind::Water => [40, 90, 170],
            TerrainKind::Forest => [40, 110, 50],
        }
    }

    /// Можно ли пройти по клетке этого типа
    #[must_use]
    pub fn is_traversable(self) -> bool {
        matches!(self, TerrainKind::Path)
    }
}

/// Переводит значение шума в тип местности по порогам из `settings`
#[must_use]
pub fn kind_for_noise(value: f32, settings: &TerrainSettings) -> TerrainKind {
    if value < settings.water_threshold {
        TerrainKind::Water
    } else if value < settings.forest_threshold {
        TerrainKind::Forest
    } else {
        TerrainKind::Path
    }
}

/// Выбирает сид шума для одного запуска генерации
pub fn draw_noise_seed<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..MAX_NOISE_SEED)
}

/// Классификатор местности с зафиксированным сидом
pub struct TerrainClassifier {
    noise: FastNoiseLite,
    seed: f32,
    settings: TerrainSettings,
}

impl TerrainClassifier {
    #[must_use]
    pub fn new(seed: f32, settings: TerrainSettings) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_seed(Some(NOISE_LATTICE_SEED));
        noise.set_noise_type(Some(NoiseType::Perlin));
        // Масштаб применяется к координатам явно
        noise.set_frequency(Some(1.0));

        Self {
            noise,
            seed,
            settings,
        }
    }

    /// Значение шума в клетке, в диапазоне `[0, 1)`
    #[must_use]
    pub fn sample(&self, coord: AxialCoord) -> f32 {
        let scale = self.settings.noise_scale;
        let x = (coord.q as f32 + self.seed) * scale;
        let y = (coord.r as f32 + self.seed) * scale;

        let value = (self.noise.get_noise_2d(x, y) + 1.0) * 0.5;
        value.clamp(0.0, NOISE_CEILING)
    }

    #[must_use]
    pub fn classify(&self, coord: AxialCoord) -> TerrainKind {
        kind_for_noise(self.sample(coord), &self.settings)
    }
}

impl fmt::Debug for TerrainClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainClassifier")
            .field("seed", &self.seed)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Тип местности клетки `coord` при сиде `seed`
///
/// Удобная обёртка для единичных запросов; для целой карты дешевле
/// один раз создать [`TerrainClassifier`].
#[must_use]
pub fn classify(coord: AxialCoord, seed: f32, settings: &TerrainSettings) -> TerrainKind {
    TerrainClassifier::new(seed, settings.clone()).classify(coord)
}
