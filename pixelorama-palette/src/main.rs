#[macro_use]
extern crate bmp;

mod palette;
mod preview;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::palette::{PALETTE_WIDTH, build_palette, build_swatches};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where to write the Pixelorama palette.
    #[arg(short, long, default_value = "Portatil.Pixelorama.json")]
    output: PathBuf,

    /// Turns on debug mode, which also writes <OUTPUT STEM>_PAL_8.BMP
    /// next to the palette, a swatch sheet of the 8-bit RGB values used.
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let palette = build_palette();
    log::debug!("Built {} colors in {} rows", palette.colors.len(), palette.height);

    palette.save(&args.output)?;

    if args.debug {
        let preview_path = preview_path(&args.output)?;
        preview::palette_to_bitmap(&build_swatches(), PALETTE_WIDTH, &preview_path)?;
    }

    Ok(())
}

/// "Portatil.Pixelorama.json" previews as "Portatil.Pixelorama_PAL_8.BMP".
fn preview_path(output: &Path) -> anyhow::Result<PathBuf> {
    let file_basename = output
        .file_stem()
        .with_context(|| format!("Could not find base filename of {}", output.display()))?;
    let out_filename = format!("{}_PAL_8.BMP", file_basename.to_string_lossy());
    Ok(output.with_file_name(out_filename))
}
