// src/error.rs
//! Ошибки генерации карты
//!
//! Все операции библиотеки возвращают [`MapGenError`]. Ошибки делятся на две группы:
//! - **валидация** — некорректные входные параметры, генерация не начинается;
//! - **внутренние** — нарушение контракта поиска маршрута (граф связен, поэтому
//!   при корректных входных данных эти ошибки недостижимы).

use crate::hex::AxialCoord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapGenError {
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Path search exhausted: no route from {start} to {end}")]
    PathSearchExhausted { start: AxialCoord, end: AxialCoord },

    #[error("Carved route from {start} to {end} is not traversable")]
    DisconnectedRoute { start: AxialCoord, end: AxialCoord },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize map export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write preview image: {0}")]
    Image(#[from] image::ImageError),
}

impl MapGenError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Ошибка во входных параметрах (отрицательный радиус, неверные пороги и т.д.)
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Нарушение внутреннего контракта: маршрут не удалось проложить или он разорван
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::PathSearchExhausted { .. } | Self::DisconnectedRoute { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MapGenError>;
