use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};

use sketchpad::{Canvas, Config, Script};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SKETCHPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Raster drawing engine with tools, flood fill and undo history"
)]
struct Cli {
    /// Stroke script to replay (TOML)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Where to write the rendered PNG
    #[arg(long, short = 'o', value_name = "PNG", default_value = "sketch.png")]
    output: PathBuf,

    /// Canvas width, overriding the script and config
    #[arg(long, value_name = "PX")]
    width: Option<i32>,

    /// Canvas height, overriding the script and config
    #[arg(long, value_name = "PX")]
    height: Option<i32>,

    /// Config file to use instead of ~/.config/sketchpad/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "script")]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let Some(script_path) = cli.script.as_deref() else {
        // No script: show usage
        println!("sketchpad: Raster drawing engine with tools, flood fill and undo history");
        println!();
        println!("Usage:");
        println!("  sketchpad --script strokes.toml --output out.png   Replay a stroke script");
        println!("  sketchpad --init-config                            Write a default config file");
        println!("  sketchpad --help                                   Show help");
        println!();
        println!("Config: ~/.config/sketchpad/config.toml");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(script_path)?;

    let width = cli.width.or(script.width).unwrap_or(config.canvas.width);
    let height = cli.height.or(script.height).unwrap_or(config.canvas.height);
    if width <= 0 || height <= 0 {
        anyhow::bail!("Canvas size must be positive, got {}x{}", width, height);
    }

    let mut canvas = Canvas::new(width, height).context("Failed to create canvas")?;
    canvas.apply_config(&config);

    let base_dir = script_path.parent().unwrap_or(Path::new("."));
    script.apply(&mut canvas, base_dir)?;

    sketchpad::script::save_png(canvas.image(), &cli.output)?;
    log::info!(
        "Rendered {} tools ({} redoable) to {}",
        canvas.tools().len(),
        canvas.redo_len(),
        cli.output.display()
    );
    Ok(())
}
