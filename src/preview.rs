// Preview module: turns a photo into coloured half-block terminal lines

use crate::domain::{Locator, PhotoRef};
use image::{DynamicImage, GenericImageView, Pixel, Rgb, RgbImage};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::io;
use std::path::Path;

/// Resolution the demo landscapes are painted at
const DEMO_WIDTH: u32 = 160;
const DEMO_HEIGHT: u32 = 100;

/// A photo rendered for a card of a given size
#[derive(Debug, Clone)]
pub struct PhotoPreview {
    /// One line per terminal row, one span per column
    pub lines: Vec<Line<'static>>,
    /// Dimensions of the source image in pixels
    pub source_dimensions: (u32, u32),
}

/// Loads an image from a file path
pub fn load_image(path: &Path) -> io::Result<DynamicImage> {
    image::open(path).map_err(|e| io::Error::other(format!("Image loading error: {}", e)))
}

/// Decodes (or paints, for demo assets) the full-size image behind a photo
pub fn load_photo(photo: &PhotoRef) -> io::Result<DynamicImage> {
    match &photo.locator {
        Locator::Path(path) => load_image(path),
        Locator::Demo(id) => Ok(DynamicImage::ImageRgb8(render_demo_landscape(
            *id,
            DEMO_WIDTH,
            DEMO_HEIGHT,
        ))),
    }
}

/// Calculates new dimensions to fit image within max width and height while preserving aspect ratio
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;

    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        // Image is smaller than max dimensions, don't upscale
        (original_width, original_height)
    } else {
        let new_width = ((original_width as f64 * ratio) as u32).max(1);
        let new_height = ((original_height as f64 * ratio) as u32).max(1);
        (new_width, new_height)
    }
}

/// Converts an image to styled lines using half-block characters for terminal display.
/// Uses the upper half block character (▀) with foreground color for the upper pixel
/// and background color for the lower pixel, effectively displaying 2 pixels per cell.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    // Half blocks need an even number of pixel rows
    let height = height + height % 2;

    // Triangle is fast enough for multi-megapixel photos
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;

        let mut spans = Vec::with_capacity(width as usize);

        for x in 0..width {
            let upper = img.get_pixel(x, upper_y).to_rgb();
            let lower = if lower_y < height {
                img.get_pixel(x, lower_y).to_rgb()
            } else {
                upper
            };

            let style = Style::default()
                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                .bg(Color::Rgb(lower[0], lower[1], lower[2]));

            spans.push(Span::styled("▀", style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Renders a photo to fit a card of `cols` x `rows` terminal cells
pub fn generate_photo_preview(photo: &PhotoRef, cols: u16, rows: u16) -> io::Result<PhotoPreview> {
    let img = load_photo(photo)?;
    let (original_width, original_height) = img.dimensions();

    // Each terminal row shows two pixel rows
    let (width, height) = calculate_resize_dimensions(
        original_width,
        original_height,
        cols as u32,
        rows as u32 * 2,
    );

    Ok(PhotoPreview {
        lines: image_to_halfblock_lines(&img, width, height),
        source_dimensions: (original_width, original_height),
    })
}

struct Palette {
    sky_top: [u8; 3],
    sky_bottom: [u8; 3],
    far: [u8; 3],
    near: [u8; 3],
    sun: [u8; 3],
}

const PALETTES: [Palette; 8] = [
    // Alpine Lake
    Palette {
        sky_top: [40, 90, 170],
        sky_bottom: [170, 210, 240],
        far: [110, 120, 140],
        near: [30, 90, 120],
        sun: [255, 250, 220],
    },
    // Mountain Valley
    Palette {
        sky_top: [60, 120, 200],
        sky_bottom: [200, 225, 245],
        far: [90, 110, 100],
        near: [50, 120, 50],
        sun: [255, 245, 200],
    },
    // Coastal Cliffs
    Palette {
        sky_top: [80, 140, 210],
        sky_bottom: [220, 230, 240],
        far: [150, 130, 100],
        near: [20, 80, 140],
        sun: [255, 255, 230],
    },
    // Sunrise Peaks
    Palette {
        sky_top: [90, 60, 140],
        sky_bottom: [250, 160, 90],
        far: [70, 50, 80],
        near: [40, 30, 50],
        sun: [255, 220, 120],
    },
    // Misty Forest
    Palette {
        sky_top: [150, 165, 170],
        sky_bottom: [210, 215, 210],
        far: [90, 115, 100],
        near: [30, 70, 45],
        sun: [235, 235, 225],
    },
    // Rolling Hills
    Palette {
        sky_top: [70, 150, 220],
        sky_bottom: [190, 225, 250],
        far: [120, 170, 80],
        near: [70, 140, 50],
        sun: [255, 250, 210],
    },
    // Desert Dunes
    Palette {
        sky_top: [30, 110, 190],
        sky_bottom: [240, 220, 180],
        far: [210, 160, 100],
        near: [190, 130, 70],
        sun: [255, 240, 190],
    },
    // Ocean Horizon
    Palette {
        sky_top: [20, 50, 110],
        sky_bottom: [230, 140, 110],
        far: [40, 70, 120],
        near: [15, 45, 90],
        sun: [255, 200, 140],
    },
];

fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgb([
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ])
}

/// Paints one of the built-in demo landscapes: gradient sky, a sun, a far
/// ridge and a near ridge
pub fn render_demo_landscape(id: usize, width: u32, height: u32) -> RgbImage {
    let palette = &PALETTES[id % PALETTES.len()];
    let seed = id as f32 * 1.7 + 0.3;
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;

    let sun_x = w * (0.2 + 0.6 * ((seed * 3.1).sin() * 0.5 + 0.5));
    let sun_y = h * 0.28;
    let sun_r = h * 0.09;

    RgbImage::from_fn(width, height, |x, y| {
        let fx = x as f32;
        let fy = y as f32;
        let u = fx / w;

        let far_ridge =
            h * (0.50 + 0.10 * (u * 7.0 + seed).sin() + 0.04 * (u * 17.0 + seed * 2.0).sin());
        let near_ridge =
            h * (0.70 + 0.06 * (u * 4.0 + seed * 0.5).cos() + 0.03 * (u * 23.0).sin());

        if fy >= near_ridge {
            let depth = (fy - near_ridge) / (h - near_ridge).max(1.0);
            mix(palette.near, [10, 10, 10], depth * 0.5)
        } else if fy >= far_ridge {
            let depth = (fy - far_ridge) / (near_ridge - far_ridge).max(1.0);
            mix(palette.far, palette.near, depth * 0.4)
        } else {
            let dist = ((fx - sun_x).powi(2) + (fy - sun_y).powi(2)).sqrt();
            if dist <= sun_r {
                Rgb(palette.sun)
            } else {
                let sky = mix(palette.sky_top, palette.sky_bottom, fy / far_ridge.max(1.0));
                let glow = (1.0 - (dist - sun_r) / (w * 0.25)).max(0.0) * 0.35;
                mix(sky.0, palette.sun, glow)
            }
        }
    })
}
