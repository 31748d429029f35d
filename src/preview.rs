// src/preview.rs
//! Отладочное PNG-превью карты
//!
//! Не заменяет внешний рендерер: нужно только чтобы быстро посмотреть на
//! результат генерации. Каждый пиксель переводится в мировые координаты и
//! обратно в клетку через [`from_planar`], поверх рисуется маршрут.

use crate::config::PreviewSettings;
use crate::error::Result;
use crate::layout::{PlanarPosition, from_planar};
use crate::map::GeneratedMap;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::Path;

const BACKGROUND: [u8; 4] = [18, 18, 24, 255];
const ROUTE_COLOR: Rgba<u8> = Rgba([220, 50, 40, 255]);

/// Прямоугольник карты в мировых координатах вместе с полями в один шестиугольник
#[derive(Debug, Clone, Copy)]
struct Frame {
    min_x: f32,
    max_z: f32,
    pixels_per_unit: f32,
    width: u32,
    height: u32,
}

impl Frame {
    fn fit(map: &GeneratedMap, pixels_per_unit: f32) -> Self {
        let margin = map.hex_size();
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_z, mut max_z) = (f32::INFINITY, f32::NEG_INFINITY);
        for (coord, _) in map.tiles().iter() {
            let p = map.position(coord);
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
        }

        let min_x = min_x - margin;
        let max_z = max_z + margin;
        let width = ((max_x + margin - min_x) * pixels_per_unit).ceil().max(1.0) as u32;
        let height = ((max_z - (min_z - margin)) * pixels_per_unit).ceil().max(1.0) as u32;

        Self {
            min_x,
            max_z,
            pixels_per_unit,
            width,
            height,
        }
    }

    /// Центр пикселя в мировых координатах (ось `z` направлена вверх)
    fn to_world(self, px: u32, py: u32) -> PlanarPosition {
        PlanarPosition {
            x: self.min_x + (px as f32 + 0.5) / self.pixels_per_unit,
            z: self.max_z - (py as f32 + 0.5) / self.pixels_per_unit,
        }
    }

    fn to_pixel(self, p: PlanarPosition) -> (f32, f32) {
        (
            (p.x - self.min_x) * self.pixels_per_unit,
            (self.max_z - p.z) * self.pixels_per_unit,
        )
    }
}

/// Рисует карту в RGBA-изображение
#[must_use]
pub fn render_preview(map: &GeneratedMap, settings: &PreviewSettings) -> RgbaImage {
    let frame = Frame::fit(map, settings.pixels_per_unit);
    let hex_size = map.hex_size();
    let tiles = map.tiles();

    let shade = |i: usize| -> [u8; 4] {
        let px = (i % frame.width as usize) as u32;
        let py = (i / frame.width as usize) as u32;
        let world = frame.to_world(px, py);
        match tiles.get(from_planar(world.x, world.z, hex_size)) {
            Some(kind) => {
                let [r, g, b] = kind.to_rgb();
                [r, g, b, 255]
            }
            None => BACKGROUND,
        }
    };

    let mut img = RgbaImage::new(frame.width, frame.height);

    #[cfg(feature = "parallel")]
    img.par_chunks_mut(4)
        .enumerate()
        .for_each(|(i, pixel)| pixel.copy_from_slice(&shade(i)));

    #[cfg(not(feature = "parallel"))]
    img.chunks_mut(4)
        .enumerate()
        .for_each(|(i, pixel)| pixel.copy_from_slice(&shade(i)));

    if settings.draw_route {
        draw_route(&mut img, map, frame);
    }

    img
}

fn draw_route(img: &mut RgbaImage, map: &GeneratedMap, frame: Frame) {
    let centers: Vec<(f32, f32)> = map
        .route()
        .iter()
        .map(|&c| frame.to_pixel(map.position(c)))
        .collect();

    for pair in centers.windows(2) {
        draw_line_segment_mut(img, pair[0], pair[1], ROUTE_COLOR);
    }

    let marker = (map.hex_size() * frame.pixels_per_unit * 0.3).round().max(1.0) as i32;
    for &(x, y) in [centers.first(), centers.last()].into_iter().flatten() {
        draw_filled_circle_mut(img, (x.round() as i32, y.round() as i32), marker, ROUTE_COLOR);
    }
}

/// Сохраняет превью карты в PNG
pub fn save_preview_png(
    map: &GeneratedMap,
    settings: &PreviewSettings,
    path: impl AsRef<Path>,
) -> Result<()> {
    render_preview(map, settings).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, TerrainSettings};
    use crate::hex::AxialCoord;
    use crate::map::build_map;

    fn sample_map() -> GeneratedMap {
        let config = GenerationConfig {
            radius: 3,
            noise_seed: Some(64.0),
            terrain: TerrainSettings {
                water_threshold: 1.0,
                forest_threshold: 1.0,
                ..TerrainSettings::default()
            },
            ..GenerationConfig::default()
        };
        build_map(&config).unwrap()
    }

    fn pixel_at(img: &RgbaImage, frame: Frame, p: PlanarPosition) -> [u8; 4] {
        let (x, y) = frame.to_pixel(p);
        img.get_pixel(x as u32, y as u32).0
    }

    #[test]
    fn tiles_are_painted_with_their_kind() {
        let map = sample_map();
        let settings = PreviewSettings {
            pixels_per_unit: 10.0,
            draw_route: false,
        };
        let img = render_preview(&map, &settings);
        let frame = Frame::fit(&map, settings.pixels_per_unit);
        assert_eq!((img.width(), img.height()), (frame.width, frame.height));

        let [r, g, b] = crate::terrain::TerrainKind::Water.to_rgb();
        let water = map.position(AxialCoord::new(0, 2));
        assert_eq!(pixel_at(&img, frame, water), [r, g, b, 255]);

        let [r, g, b] = crate::terrain::TerrainKind::Path.to_rgb();
        let path = map.position(AxialCoord::new(1, 0));
        assert_eq!(pixel_at(&img, frame, path), [r, g, b, 255]);

        assert_eq!(img.get_pixel(0, 0).0, BACKGROUND);
    }

    #[test]
    fn route_is_drawn_on_top() {
        let map = sample_map();
        let settings = PreviewSettings {
            pixels_per_unit: 10.0,
            draw_route: true,
        };
        let img = render_preview(&map, &settings);
        let frame = Frame::fit(&map, settings.pixels_per_unit);
        let start = map.position(map.route()[0]);
        assert_eq!(pixel_at(&img, frame, start), ROUTE_COLOR.0);
    }
}
