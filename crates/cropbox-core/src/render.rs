//! Software rendering of the viewport and preview panels.
//!
//! A shell that can blit RGB pixels needs nothing else: [`compose_viewport`]
//! produces the full viewport canvas (letterboxed image on the background
//! color), and [`draw_selection`] paints the live selection outline on top.

use crate::config::EditorConfig;
use crate::decode::{generate_thumbnail, resize, FilterType, ImageBuffer, LoadError};
use crate::geometry::{fit_to_viewport, ViewportGeometry, ViewportRect};

/// Side length of the placeholder shown before anything has been cropped.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// Color of the placeholder panel.
pub const PLACEHOLDER_COLOR: [u8; 3] = [220, 220, 220];

/// A rendered viewport and the geometry used to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportFrame {
    pub canvas: ImageBuffer,
    pub geometry: ViewportGeometry,
}

/// Render `image` letterboxed into the configured viewport.
///
/// The image is downsampled with Lanczos3 to the displayed size and pasted
/// centered on a canvas filled with the background color.
pub fn compose_viewport(
    image: &ImageBuffer,
    config: &EditorConfig,
) -> Result<ViewportFrame, LoadError> {
    let geometry = fit_to_viewport(
        image.width,
        image.height,
        config.viewport_width,
        config.viewport_height,
    );
    let displayed = resize(
        image,
        geometry.displayed_width,
        geometry.displayed_height,
        FilterType::Lanczos3,
    )?;

    let mut canvas = ImageBuffer::filled(
        config.viewport_width,
        config.viewport_height,
        config.background,
    );
    paste(&mut canvas, &displayed, geometry.offset_x, geometry.offset_y);

    Ok(ViewportFrame { canvas, geometry })
}

/// Draw a rectangle outline onto a canvas, clipped to the canvas bounds.
///
/// The stroke is drawn inward from the rectangle's edges; both `min` and
/// `max` coordinates are included in the outline.
pub fn draw_selection(canvas: &mut ImageBuffer, rect: ViewportRect, color: [u8; 3], stroke: u32) {
    let stroke = i64::from(stroke.max(1));
    let (x0, y0) = (i64::from(rect.min_x), i64::from(rect.min_y));
    let (x1, y1) = (i64::from(rect.max_x) + 1, i64::from(rect.max_y) + 1);

    fill_rect(canvas, x0, y0, x1, (y0 + stroke).min(y1), color);
    fill_rect(canvas, x0, (y1 - stroke).max(y0), x1, y1, color);
    fill_rect(canvas, x0, y0, (x0 + stroke).min(x1), y1, color);
    fill_rect(canvas, (x1 - stroke).max(x0), y0, x1, y1, color);
}

/// Preview of an image for a side panel, fitted into a `size x size` box.
pub fn preview_panel(image: &ImageBuffer, size: u32) -> Result<ImageBuffer, LoadError> {
    generate_thumbnail(image, size)
}

/// Light gray square shown in the result panel until a crop exists.
pub fn placeholder_panel() -> ImageBuffer {
    ImageBuffer::filled(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, PLACEHOLDER_COLOR)
}

fn paste(canvas: &mut ImageBuffer, image: &ImageBuffer, x: u32, y: u32) {
    let width = image.width.min(canvas.width.saturating_sub(x)) as usize;
    let height = image.height.min(canvas.height.saturating_sub(y));
    let canvas_stride = canvas.width as usize * 3;
    let image_stride = image.width as usize * 3;

    for row in 0..height {
        let dst = (y + row) as usize * canvas_stride + x as usize * 3;
        let src = row as usize * image_stride;
        canvas.pixels[dst..dst + width * 3].copy_from_slice(&image.pixels[src..src + width * 3]);
    }
}

/// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the canvas.
fn fill_rect(canvas: &mut ImageBuffer, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let x0 = x0.clamp(0, i64::from(canvas.width)) as usize;
    let x1 = x1.clamp(0, i64::from(canvas.width)) as usize;
    let y0 = y0.clamp(0, i64::from(canvas.height)) as usize;
    let y1 = y1.clamp(0, i64::from(canvas.height)) as usize;
    let stride = canvas.width as usize * 3;

    for y in y0..y1 {
        for x in x0..x1 {
            let idx = y * stride + x * 3;
            canvas.pixels[idx..idx + 3].copy_from_slice(&color);
        }
    }
}
