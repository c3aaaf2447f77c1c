use std::path::{Path, PathBuf};

use clap::Parser;

use regionmap::config::RegionsConfig;
use regionmap::error::MapError;
use regionmap::geometry::Viewport;
use regionmap::legend;
use regionmap::render;

#[derive(Parser, Debug)]
#[command(name = "regionmap")]
#[command(about = "Render named region overlays onto a map image")]
struct Args {
    /// Viewport start X in grid units
    #[arg(allow_negative_numbers = true)]
    start_x: i32,

    /// Viewport start Y in grid units
    #[arg(allow_negative_numbers = true)]
    start_y: i32,

    /// Viewport end X in grid units
    #[arg(allow_negative_numbers = true)]
    end_x: i32,

    /// Viewport end Y in grid units
    #[arg(allow_negative_numbers = true)]
    end_y: i32,

    /// Background map image
    image_path: PathBuf,

    /// Region config JSON file
    config_path: PathBuf,

    /// Output DPI
    #[arg(long, default_value_t = 100)]
    dpi: u32,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), MapError> {
    let background = image::open(&args.image_path)
        .map_err(|e| {
            MapError::Asset(format!(
                "cannot open background image {}: {}",
                args.image_path.display(),
                e
            ))
        })?
        .to_rgba8();
    let font = legend::load_font(Path::new(legend::FONT_PATH))?;
    let config = RegionsConfig::load(&args.config_path)?;

    let (img_w, img_h) = background.dimensions();
    println!(
        "rendering {} regions onto {}x{} at {} dpi",
        config.region_count(),
        img_w,
        img_h,
        args.dpi
    );

    let viewport = Viewport::new(args.start_x, args.start_y, args.end_x, args.end_y);
    let img = render::render_map(viewport, background, &config, &font)?;
    img.save(render::OUTPUT_PATH)?;
    println!("wrote {}", render::OUTPUT_PATH);
    Ok(())
}
