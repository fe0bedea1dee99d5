//! PNG rendering of garden layouts for the example binaries.
//!
//! The image shows the current grid: one square block of `cell_pixels` per cell, items filled
//! with their type's color, and a marker on every item's anchor cell.
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use garden_layout::prelude::*;
use image::{Rgb, RgbImage};

/// Installs an `env_logger` backend for `tracing` records, defaulting to `info`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}

/// How items of one type are drawn.
#[derive(Debug, Clone, Copy)]
pub struct TypeStyle {
    pub fill: [u8; 3],
    pub anchor: [u8; 3],
}

impl TypeStyle {
    pub fn new(fill: [u8; 3]) -> Self {
        Self {
            fill,
            anchor: [20, 20, 20],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub cell_pixels: u32,
    pub background: [u8; 3],
    pub grid_lines: Option<[u8; 3]>,
    pub fallback: TypeStyle,
    styles: HashMap<String, TypeStyle>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert("flower".to_string(), TypeStyle::new([232, 94, 160]));
        styles.insert("mushroom".to_string(), TypeStyle::new([196, 150, 110]));
        styles.insert("fern".to_string(), TypeStyle::new([120, 190, 90]));
        styles.insert("bush".to_string(), TypeStyle::new([60, 140, 60]));
        styles.insert("pinetree".to_string(), TypeStyle::new([30, 90, 60]));
        styles.insert("roundtree".to_string(), TypeStyle::new([70, 110, 40]));
        Self {
            cell_pixels: 24,
            background: [214, 196, 160],
            grid_lines: Some([190, 172, 138]),
            fallback: TypeStyle::new([128, 128, 128]),
            styles,
        }
    }
}

impl RenderConfig {
    pub fn new(cell_pixels: u32) -> Self {
        Self {
            cell_pixels: cell_pixels.max(1),
            ..Self::default()
        }
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_grid_lines(mut self, color: Option<[u8; 3]>) -> Self {
        self.grid_lines = color;
        self
    }

    pub fn set_type_style(&mut self, item_type: impl Into<String>, style: TypeStyle) {
        self.styles.insert(item_type.into(), style);
    }

    pub fn style_for(&self, item_type: &str) -> TypeStyle {
        self.styles.get(item_type).copied().unwrap_or(self.fallback)
    }
}

pub fn render_garden_to_png(
    garden: &GardenState,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let size = u32::try_from(garden.grid_size()).context("grid too large to render")?;
    let px = config.cell_pixels.max(1);
    let side = size
        .checked_mul(px)
        .context("image side overflows u32")?;
    let mut img = RgbImage::from_pixel(side, side, Rgb(config.background));

    for item in garden.items() {
        let style = config.style_for(&item.item_type);
        for cell in garden.current_cells(item) {
            fill_cell(&mut img, cell, px, 0, style.fill);
        }
        let anchor = item
            .grid_position
            .shifted(garden.grid_shift().saturating_sub(item.grid_shift));
        fill_cell(&mut img, anchor, px, px / 3, style.anchor);
    }

    if let Some(color) = config.grid_lines {
        for i in 0..=size {
            let p = (i * px).min(side - 1);
            for t in 0..side {
                img.put_pixel(p, t, Rgb(color));
                img.put_pixel(t, p, Rgb(color));
            }
        }
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn fill_cell(img: &mut RgbImage, cell: GridCell, px: u32, inset: u32, color: [u8; 3]) {
    let (Ok(col), Ok(row)) = (u32::try_from(cell.col), u32::try_from(cell.row)) else {
        return;
    };
    let x0 = col * px + inset;
    let y0 = row * px + inset;
    let x1 = ((col + 1) * px).saturating_sub(inset).min(img.width());
    let y1 = ((row + 1) * px).saturating_sub(inset).min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgb(color));
        }
    }
}
