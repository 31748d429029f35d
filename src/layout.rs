// src/layout.rs
//! Перевод аксиальных координат в плоскость рендерера
//!
//! Используется ориентация "flat-top" (плоская грань сверху):
//! - `x = 1.5 · size · q`
//! - `z = size · √3 · (r + q/2)`
//!
//! Ось высоты `y` к генерации не относится и всегда равна нулю.
//! Смещения соседей из [`crate::hex::NEIGHBOR_OFFSETS`] согласованы именно с этой ориентацией.

use crate::hex::AxialCoord;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

/// Позиция центра клетки на плоскости `XZ`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPosition {
    pub x: f32,
    pub z: f32,
}

impl PlanarPosition {
    #[must_use]
    pub fn distance(self, other: PlanarPosition) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// Центр клетки `coord` при размере шестиугольника `hex_size`
#[must_use]
pub fn to_planar(coord: AxialCoord, hex_size: f32) -> PlanarPosition {
    let q = coord.q as f32;
    let r = coord.r as f32;
    PlanarPosition {
        x: hex_size * 1.5 * q,
        z: hex_size * SQRT_3 * (r + q / 2.0),
    }
}

/// Клетка, внутрь которой попадает точка `(x, z)`
///
/// Обратное преобразование к [`to_planar`] с округлением в кубических координатах.
#[must_use]
pub fn from_planar(x: f32, z: f32, hex_size: f32) -> AxialCoord {
    let q = (2.0 / 3.0 * x) / hex_size;
    let r = (-x / 3.0 + SQRT_3 / 3.0 * z) / hex_size;
    cube_round(q, r)
}

fn cube_round(q: f32, r: f32) -> AxialCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    // Сумма q + r + s должна остаться нулевой: правим компоненту с наибольшей ошибкой
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    AxialCoord::new(rq as i32, rr as i32)
}
