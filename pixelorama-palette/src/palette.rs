//! The Portatil default palette.
//!
//! 16 rows of hue bands, each row 16 colors wide. A row starts at a dark
//! anchor, ramps up to a saturated midpoint over 8 colors, then ramps from
//! the midpoint up to a pale anchor over the remaining 8.

use std::{fs::File, io::Write, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const PALETTE_COMMENT: &str = "Portatil Default Palette";
pub const PALETTE_WIDTH: usize = 16;
pub const PALETTE_HEIGHT: usize = 16;
pub const PALETTE_SIZE: usize = PALETTE_WIDTH * PALETTE_HEIGHT;

/// Colors in each half of a row.
const SEGMENT_LENGTH: usize = PALETTE_WIDTH / 2;

/// Darkest color of each row, 3 bytes (r, g, b) per row.
const MIN_VALUES: [u8; PALETTE_HEIGHT * 3] = [
    0, 0, 0,
    32, 0, 0,
    32, 8, 0,
    32, 16, 0,
    32, 16, 0,
    32, 32, 0,
    16, 32, 0,
    0, 32, 0,
    0, 32, 16,
    0, 32, 32,
    0, 16, 32,
    0, 0, 32,
    8, 0, 32,
    16, 0, 32,
    32, 0, 32,
    32, 0, 16,
];

/// Fully saturated color of each row. Last color of the dark segment.
const MID_VALUES: [u8; PALETTE_HEIGHT * 3] = [
    128, 128, 128,
    255, 0, 0,
    255, 64, 0,
    255, 128, 0,
    255, 192, 0,
    255, 255, 0,
    128, 255, 0,
    0, 255, 0,
    0, 255, 128,
    0, 255, 255,
    0, 128, 255,
    0, 0, 255,
    64, 0, 255,
    128, 0, 255,
    255, 0, 255,
    255, 0, 128,
];

/// Palest color of each row. Last color of the light segment.
const MAX_VALUES: [u8; PALETTE_HEIGHT * 3] = [
    255, 255, 255,
    255, 224, 224,
    255, 224, 224,
    255, 240, 224,
    255, 255, 224,
    255, 255, 224,
    240, 255, 224,
    224, 255, 224,
    224, 255, 240,
    224, 255, 255,
    224, 240, 255,
    224, 224, 255,
    240, 224, 255,
    240, 224, 255,
    255, 224, 255,
    255, 224, 240,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(dataview::Pod)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Read the anchor for `row` out of one of the flat anchor tables.
    fn anchor(table: &[u8], row: usize) -> Rgb {
        dataview::DataView::from(table).read::<Rgb>(row * 3)
    }

    /// Per channel step from `self` to `to` split into `steps` equal parts.
    fn step_towards(self, to: Rgb, steps: f64) -> [f64; 3] {
        [
            (f64::from(to.r) - f64::from(self.r)) / steps,
            (f64::from(to.g) - f64::from(self.g)) / steps,
            (f64::from(to.b) - f64::from(self.b)) / steps,
        ]
    }

    /// Offset `self` by `column` steps. The offset is floored before it is
    /// added so ramps band on whole integer steps.
    fn offset(self, step: [f64; 3], column: usize) -> Rgb {
        let channel = |base: u8, step: f64| -> u8 {
            let offset = (column as f64 * step).floor();
            (f64::from(base) + offset) as u8
        };
        Rgb {
            r: channel(self.r, step[0]),
            g: channel(self.g, step[1]),
            b: channel(self.b, step[2]),
        }
    }
}

/// Compute every swatch of the palette, row-major.
pub fn build_swatches() -> Vec<Rgb> {
    let mut swatches = Vec::with_capacity(PALETTE_SIZE);

    for row in 0..PALETTE_HEIGHT {
        let min = Rgb::anchor(&MIN_VALUES, row);
        let mid = Rgb::anchor(&MID_VALUES, row);
        let max = Rgb::anchor(&MAX_VALUES, row);

        // Dark segment lands on mid at its last column.
        let step = min.step_towards(mid, (SEGMENT_LENGTH - 1) as f64);
        for column in 0..SEGMENT_LENGTH {
            swatches.push(min.offset(step, column));
        }

        // Light segment skips mid, it was already emitted.
        let step = mid.step_towards(max, SEGMENT_LENGTH as f64);
        for column in 1..=SEGMENT_LENGTH {
            swatches.push(mid.offset(step, column));
        }
    }

    swatches
}

/// Build the full Portatil palette.
pub fn build_palette() -> Palette {
    Palette::from_swatches(&build_swatches())
}

/// One palette entry as Pixelorama stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub color: String,
    pub index: usize,
}

impl Color {
    /// Pixelorama wants normalized channels as a "(r, g, b, a)" string.
    /// One decimal is all it gets, so neighbouring swatches can print alike.
    pub fn new(index: usize, rgb: Rgb) -> Color {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;
        Color {
            color: format!("({:.1}, {:.1}, {:.1}, 1)", r, g, b),
            index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub comment: String,
    pub width: usize,
    pub height: usize,
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn from_swatches(swatches: &[Rgb]) -> Palette {
        let colors = swatches
            .iter()
            .enumerate()
            .map(|(index, rgb)| Color::new(index, *rgb))
            .collect();

        Palette {
            comment: PALETTE_COMMENT.to_string(),
            width: PALETTE_WIDTH,
            height: PALETTE_HEIGHT,
            colors,
        }
    }

    /// Serialize the way Pixelorama's own palette files look: four space
    /// indent, no trailing newline.
    pub fn to_json(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .context("Could not serialize palette")?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)
            .with_context(|| format!("Could not create palette file {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Could not write palette file {}", path.display()))?;
        file.flush()
            .with_context(|| format!("Could not flush palette file {}", path.display()))?;

        log::info!("Wrote {} colors to {}", self.colors.len(), path.display());
        Ok(())
    }
}
