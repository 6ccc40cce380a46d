// Command line front end: config JSON + words JSON in, PNG out.
//
//     wordcloud <config.json> <words.json> <out.png>
//
// Set RUST_LOG=debug to see every placement decision.
use std::fs;
use std::process::ExitCode;

use wordcloud::engine::{words_from_json, PlacementEngine};
use wordcloud::measure::{EstimateMeasurer, Measurer};
use wordcloud::renderer::text::BitmapFont;
use wordcloud::renderer::{BlockRasterizer, Canvas, GlyphRasterizer};
use wordcloud::{Config, Result};

const USAGE: &str = "usage: wordcloud <config.json> <words.json> <out.png>";

fn run(config_path: &str, words_path: &str, out_path: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let words = words_from_json(&fs::read_to_string(words_path)?)?;

    log::info!(
        "rendering {} words on {}x{} ({:?}, {})",
        words.len(),
        config.width(),
        config.height(),
        config.placement(),
        config.size_function()
    );

    let font = match config.font_file() {
        Some(path) => Some(BitmapFont::load(path)?),
        None => {
            log::warn!("no fontFile configured; drawing words as solid blocks");
            None
        }
    };

    let estimate = EstimateMeasurer::default();
    let (measurer, rasterizer): (&dyn Measurer, &dyn GlyphRasterizer) = match &font {
        Some(font) => (font as &dyn Measurer, font as &dyn GlyphRasterizer),
        None => (&estimate as &dyn Measurer, &BlockRasterizer as &dyn GlyphRasterizer),
    };

    let mut engine = PlacementEngine::new(&config);
    let layout = engine.run(&words, measurer)?;

    if !layout.unplaced.is_empty() {
        log::warn!("{} words did not fit", layout.unplaced.len());
    }

    let img = Canvas::for_layout(&layout).render(&layout, rasterizer);
    img.save(out_path)?;

    log::info!("wrote {out_path}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, words_path, out_path] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(config_path, words_path, out_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
