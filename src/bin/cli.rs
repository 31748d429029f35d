use clap::Parser;
use hexmap::{GenerationConfig, MapBuilder, TerrainKind, preview};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Генератор гексагональных карт: превью и экспорт для отладки
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (по умолчанию: встроенные настройки)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Путь для сохранения превью (по умолчанию: ./hexmap.png)
    #[arg(short, long, default_value = "hexmap.png")]
    output: PathBuf,

    /// Путь для экспорта клеток в JSON
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Сид ГСЧ для выбора сида шума (если он не задан в конфиге)
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Переопределить радиус карты
    #[arg(short, long)]
    radius: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let mut config = match &cli.config {
        Some(path) => GenerationConfig::from_toml_file(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(radius) = cli.radius {
        config.radius = radius;
    }

    println!("Генерация карты (радиус: {})...", config.radius);
    let builder = MapBuilder::new(config);
    let map = match cli.rng_seed {
        Some(seed) => builder.build_with_rng(&mut ChaCha8Rng::seed_from_u64(seed))?,
        None => builder.build()?,
    };

    let summary = map.summary();
    let counts: Vec<_> = TerrainKind::ALL
        .iter()
        .map(|&kind| format!("{}: {}", kind_label(kind), summary.stats.count(kind)))
        .collect();
    println!(
        "Сид шума: {}; {}; длина маршрута: {}",
        map.seed(),
        counts.join(", "),
        summary.route_length
    );

    println!("Сохранение превью в {:?}", cli.output);
    preview::save_preview_png(&map, &builder.config().preview, &cli.output)?;

    if let Some(json) = &cli.json {
        println!("Экспорт клеток в {json:?}");
        map.export().save_json(json)?;
    }

    println!("\nГотово! Карта сохранена.");
    Ok(())
}

fn kind_label(kind: TerrainKind) -> &'static str {
    match kind {
        TerrainKind::Path => "тропа",
        TerrainKind::Water => "вода",
        TerrainKind::Forest => "лес",
    }
}
