use std::path::PathBuf;

use clap::Parser;

use regionmap::error::MapError;
use regionmap::extract;

#[derive(Parser, Debug)]
#[command(name = "extract_regions")]
#[command(about = "Extract a region config from a game plugin file")]
struct Args {
    /// Plugin file to run through the converter
    plugin_path: PathBuf,

    /// Output region config JSON file
    output_path: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), MapError> {
    let config = extract::extract_from_plugin(&args.plugin_path)?;
    let regions = config.region_count();
    let cells: usize = config
        .0
        .values()
        .flat_map(|r| r.values())
        .map(|info| info.locations.len())
        .sum();

    config.save(&args.output_path)?;
    println!(
        "wrote {} regions ({} cells) to {}",
        regions,
        cells,
        args.output_path.display()
    );
    Ok(())
}
