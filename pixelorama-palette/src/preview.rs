use std::path::Path;

use anyhow::Context;
use bmp::{Image, Pixel};

use crate::palette::Rgb;

const BOX_SIZE_PX: usize = 16;
const BOX_BORDER_PX: usize = 1;

/// Draw the swatches as a grid of boxes, `columns` to a row, separated by a
/// black border. Lets you eyeball the palette without opening Pixelorama.
pub fn palette_to_bitmap(swatches: &[Rgb], columns: usize, save_path: &Path) -> anyhow::Result<()> {
    let img = palette_image(swatches, columns)?;

    log::info!("Writing out palette preview {}", save_path.display());
    img.save(save_path)
        .with_context(|| format!("Could not write palette preview {}", save_path.display()))
}

fn palette_image(swatches: &[Rgb], columns: usize) -> anyhow::Result<Image> {
    let box_rows = swatches.len().div_ceil(columns);

    let width: u32 = (columns * (BOX_SIZE_PX + BOX_BORDER_PX) + BOX_BORDER_PX).try_into()?;
    let height: u32 = (box_rows * (BOX_SIZE_PX + BOX_BORDER_PX) + BOX_BORDER_PX).try_into()?;

    // Fresh images are already black, which doubles as the border.
    let mut img = Image::new(width, height);

    for (swatch_index, swatch) in swatches.iter().enumerate() {
        let i = swatch_index / columns;
        let j = swatch_index % columns;
        let xmin = BOX_BORDER_PX * (j + 1) + BOX_SIZE_PX * j;
        let ymin = BOX_BORDER_PX * (i + 1) + BOX_SIZE_PX * i;
        draw_box(&mut img, xmin.try_into()?, ymin.try_into()?, px!(swatch.r, swatch.g, swatch.b));
    }

    Ok(img)
}

fn draw_box(img: &mut Image, xmin: u32, ymin: u32, color: Pixel) {
    let side_length = BOX_SIZE_PX as u32;
    for y in ymin..ymin + side_length {
        for x in xmin..xmin + side_length {
            img.set_pixel(x, y, color);
        }
    }
}
