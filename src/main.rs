//! picbraille CLI - Convert images to braille art

use clap::Parser;
use picbraille::{Converter, Palette, PicbrailleError, Strategy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picbraille", version, about = "Convert images to braille art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Source pixels per dot edge; one glyph covers 2*scale x 4*scale pixels
    #[arg(short, long, default_value = "1")]
    scale: u32,
    /// Glyph selection: balanced, threshold, palette or normalized
    #[arg(short, long, default_value = "balanced")]
    mode: String,
    /// JSON glyph table for the palette modes, darkest first: {"glyphs": [...]}
    #[arg(short, long)]
    palette: Option<PathBuf>,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), PicbrailleError> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let mut strategy: Strategy = args.mode.parse()?;
    if let Some(path) = &args.palette {
        let palette = Palette::from_json_file(path)?;
        if !matches!(strategy, Strategy::Palette(_) | Strategy::Normalized(_)) {
            log::warn!("--palette has no effect in {} mode", strategy.name());
        }
        strategy = strategy.with_palette(palette);
    }

    let converter = Converter::new(args.scale)?.with_strategy(strategy);

    let mut image = image::open(&args.input)?;
    if args.invert {
        image.invert();
    }
    log::info!("loaded {} ({}x{})", args.input.display(), image.width(), image.height());

    print!("{}", converter.convert_image(&image));
    Ok(())
}
