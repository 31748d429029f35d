// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры, управляющие генерацией гексагональной карты:
//! - Размер карты (радиус) и размер шестиугольника для рендерера
//! - Сид шума и пороги классификации местности
//! - Концы гарантированно проходимого маршрута
//! - Настройки отладочного превью
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::{MapGenError, Result};
use crate::hex::AxialCoord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Пороги классификации местности по значению шума
///
/// Шум `n ∈ [0, 1)` превращается в тип клетки так:
/// - `n < water_threshold` → вода
/// - `water_threshold ≤ n < forest_threshold` → лес
/// - `n ≥ forest_threshold` → тропа
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerrainSettings {
    /// Масштаб координат при выборке шума (меньше — крупнее пятна местности)
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,

    /// Верхняя граница (не включительно) для воды
    #[serde(default = "default_water_threshold")]
    pub water_threshold: f32,

    /// Верхняя граница (не включительно) для леса
    #[serde(default = "default_forest_threshold")]
    pub forest_threshold: f32,
}

fn default_noise_scale() -> f32 {
    0.1
}
fn default_water_threshold() -> f32 {
    0.3
}
fn default_forest_threshold() -> f32 {
    0.6
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            noise_scale: 0.1,
            water_threshold: 0.3,
            forest_threshold: 0.6,
        }
    }
}

impl TerrainSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(MapGenError::validation(format!(
                "noise_scale must be positive, got {}",
                self.noise_scale
            )));
        }
        let ordered = 0.0 <= self.water_threshold
            && self.water_threshold <= self.forest_threshold
            && self.forest_threshold <= 1.0;
        if !ordered {
            return Err(MapGenError::validation(format!(
                "thresholds must satisfy 0 <= water ({}) <= forest ({}) <= 1",
                self.water_threshold, self.forest_threshold
            )));
        }
        Ok(())
    }
}

/// Концы маршрута, который прокладывается через карту
///
/// Если конец не задан, используется край средней строки: `(-R, 0)` для начала
/// и `(R, 0)` для конца.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteSettings {
    #[serde(default)]
    pub start: Option<AxialCoord>,

    #[serde(default)]
    pub end: Option<AxialCoord>,
}

impl RouteSettings {
    #[must_use]
    pub fn endpoints(&self, radius: i32) -> (AxialCoord, AxialCoord) {
        (
            self.start.unwrap_or(AxialCoord::new(-radius, 0)),
            self.end.unwrap_or(AxialCoord::new(radius, 0)),
        )
    }
}

/// Настройки отладочного PNG-превью
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewSettings {
    /// Сколько пикселей приходится на единицу мировых координат
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,

    /// Рисовать ли линию маршрута поверх клеток
    #[serde(default = "default_draw_route")]
    pub draw_route: bool,
}

fn default_pixels_per_unit() -> f32 {
    24.0
}
fn default_draw_route() -> bool {
    true
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            pixels_per_unit: 24.0,
            draw_route: true,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация одного запуска генерации. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    /// Радиус карты в клетках (по умолчанию 5)
    #[serde(default = "default_radius")]
    pub radius: i32,

    /// Размер шестиугольника в мировых единицах (по умолчанию 1.0)
    #[serde(default = "default_hex_size")]
    pub hex_size: f32,

    /// Сид шума. Если не задан, выбирается случайно в начале генерации
    #[serde(default)]
    pub noise_seed: Option<f32>,

    /// Пороги классификации местности
    #[serde(default)]
    pub terrain: TerrainSettings,

    /// Концы маршрута
    #[serde(default)]
    pub route: RouteSettings,

    /// Настройки превью
    #[serde(default)]
    pub preview: PreviewSettings,
}

impl GenerationConfig {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # hexmap.toml
    /// radius = 20
    /// hex_size = 1.0
    /// noise_seed = 4242.5
    ///
    /// [terrain]
    /// water_threshold = 0.25
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    /// Проверяет все числовые параметры до начала генерации
    pub fn validate(&self) -> Result<()> {
        if self.radius < 0 {
            return Err(MapGenError::validation(format!(
                "radius must be non-negative, got {}",
                self.radius
            )));
        }
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            return Err(MapGenError::validation(format!(
                "hex_size must be positive, got {}",
                self.hex_size
            )));
        }
        if let Some(seed) = self.noise_seed.filter(|s| !s.is_finite()) {
            return Err(MapGenError::validation(format!(
                "noise_seed must be finite, got {seed}"
            )));
        }
        if !self.preview.pixels_per_unit.is_finite() || self.preview.pixels_per_unit <= 0.0 {
            return Err(MapGenError::validation(format!(
                "pixels_per_unit must be positive, got {}",
                self.preview.pixels_per_unit
            )));
        }
        self.terrain.validate()
    }

    #[must_use]
    pub fn route_endpoints(&self) -> (AxialCoord, AxialCoord) {
        self.route.endpoints(self.radius)
    }
}

fn default_radius() -> i32 {
    5
}
fn default_hex_size() -> f32 {
    1.0
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            hex_size: 1.0,
            noise_seed: None,
            terrain: TerrainSettings::default(),
            route: RouteSettings::default(),
            preview: PreviewSettings::default(),
        }
    }
}
