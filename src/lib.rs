pub mod config;
pub mod error;
pub mod hex;
pub mod layout;
pub mod map;
pub mod preview;
pub mod route;
pub mod terrain;
pub mod tile_map;

pub use config::{GenerationConfig, PreviewSettings, RouteSettings, TerrainSettings};
pub use error::{MapGenError, Result};
pub use hex::{AxialCoord, HexGrid, generate};
pub use layout::{PlanarPosition, from_planar, to_planar};
pub use map::{GeneratedMap, MapBuilder, MapExport, MapSummary, TilePlacement, build_map};
pub use route::connect;
pub use terrain::{TerrainClassifier, TerrainKind, classify, draw_noise_seed};
pub use tile_map::{TerrainStats, TileMap};
