// File: crates/pie-render-skia/src/lib.rs
// Summary: Headless pie chart renderer on Skia CPU raster surfaces, usable as the widget's chart surface.
// Notes:
// - Angles follow Skia: 0 deg at 3 o'clock, positive clockwise. Slices start at 12 o'clock.
// - Percent radii resolve against half the smaller side of the grid area.

pub mod color;

use anyhow::Result;
use pie_core::chart::{ChartFrame, Legend};
use pie_core::series::Series;
use pie_core::theme::ResolvedTheme;
use pie_core::types::{Dimension, HEIGHT, WIDTH};
use pie_core::ChartSurface;
use skia_safe as skia;
use tracing::{debug, warn};

use crate::color::{palette, parse_hex};

const START_ANGLE: f32 = -90.0;
const HEADER_HEIGHT: f32 = 48.0;
const SWATCH: f32 = 12.0;
const LEGEND_ROW: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub background: skia::Color,
    pub text: skia::Color,
    /// Title, description, legend names and slice labels. Off for pixel tests.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH as i32,
            height: HEIGHT as i32,
            background: skia::Color::WHITE,
            text: skia::Color::from_argb(255, 51, 51, 51),
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    /// Colours and size from a resolved theme. Percentage sizes keep the current extent.
    pub fn apply_theme(&mut self, theme: &ResolvedTheme) {
        if let Some(c) = theme.background_color.as_deref().and_then(parse_hex) {
            self.background = c;
        }
        if let Some(c) = theme.text_color.as_deref().and_then(parse_hex) {
            self.text = c;
        }
        if let Dimension::Px(w) = theme.width {
            self.width = w.round().max(1.0) as i32;
        }
        if let Dimension::Px(h) = theme.height {
            self.height = h.round().max(1.0) as i32;
        }
    }
}

/// Start and sweep (degrees) of every slice, in data order.
pub fn slice_angles(series: &Series) -> Vec<(f32, f32)> {
    let mut start = START_ANGLE;
    series
        .percentages()
        .into_iter()
        .map(|pct| {
            let sweep = (pct * 3.6) as f32;
            let arc = (start, sweep);
            start += sweep;
            arc
        })
        .collect()
}

/// Donut geometry inside the grid area: center, inner and outer radius.
pub fn donut_geometry(frame: &ChartFrame, width: f32, height: f32) -> (skia::Point, f32, f32) {
    let grid = &frame.spec.grid;
    let (w, h) = (width as f64, height as f64);
    let left = grid.left.to_px(w) as f32;
    let right = width - grid.right.to_px(w) as f32;
    let top = grid.top.to_px(h) as f32;
    let bottom = height - grid.bottom.to_px(h) as f32;
    let center = skia::Point::new((left + right) / 2.0, (top + bottom) / 2.0);
    let base = ((right - left).min(bottom - top) / 2.0).max(0.0);

    let (inner, outer) = frame
        .spec
        .pie()
        .map(|s| (s.radius[0], s.radius[1]))
        .unwrap_or((Dimension::Percent(0.0), Dimension::Percent(100.0)));
    (center, inner.to_px(base as f64) as f32, outer.to_px(base as f64) as f32)
}

/// Render `frame` to a tightly packed RGBA8 buffer.
/// Returns (pixels, width, height, row_bytes).
pub fn render_to_rgba8(frame: &ChartFrame, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = raster(frame, opts)?;
    let info = skia::ImageInfo::new(
        (opts.width, opts.height),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let row_bytes = opts.width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * opts.height as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("failed to read back surface pixels");
    }
    Ok((pixels, opts.width, opts.height, row_bytes))
}

/// Render `frame` to PNG bytes.
pub fn render_to_png_bytes(frame: &ChartFrame, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = raster(frame, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render `frame` to a PNG file, creating parent directories.
pub fn render_to_png(frame: &ChartFrame, opts: &RenderOptions, path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(frame, opts)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn raster(frame: &ChartFrame, opts: &RenderOptions) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.background);

    if opts.draw_labels {
        draw_header(canvas, frame, opts);
    }
    // chart area sits below the header
    let top = if opts.draw_labels { HEADER_HEIGHT } else { 0.0 };
    canvas.save();
    canvas.translate((0.0, top));
    draw_donut(canvas, frame, opts, opts.width as f32, opts.height as f32 - top);
    draw_legend(canvas, frame, opts, opts.width as f32, opts.height as f32 - top);
    canvas.restore();
    Ok(surface)
}

// ---- helpers ----------------------------------------------------------------

fn text_paint(opts: &RenderOptions) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(opts.text);
    paint.set_anti_alias(true);
    paint
}

fn draw_header(canvas: &skia::Canvas, frame: &ChartFrame, opts: &RenderOptions) {
    let paint = text_paint(opts);
    let mut font = skia::Font::default();
    font.set_size(16.0);
    canvas.draw_str(&frame.title, (10.0, 20.0), &font, &paint);
    if frame.description_visible() {
        if let Some(description) = frame.description.as_deref() {
            font.set_size(12.0);
            canvas.draw_str(description, (10.0, 38.0), &font, &paint);
        }
    }
}

fn slice_color(series: &Series, index: usize) -> skia::Color {
    series.data[index].color().and_then(parse_hex).unwrap_or_else(|| palette(index))
}

fn draw_donut(canvas: &skia::Canvas, frame: &ChartFrame, opts: &RenderOptions, width: f32, height: f32) {
    let Some(series) = frame.spec.pie() else {
        return;
    };
    let (center, inner, outer) = donut_geometry(frame, width, height);
    if outer <= 0.0 {
        return;
    }
    // A ring is a stroked arc whose stroke covers [inner, outer].
    let mid = (inner + outer) / 2.0;
    let oval = skia::Rect::from_xywh(center.x - mid, center.y - mid, mid * 2.0, mid * 2.0);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::PaintStyle::Stroke);
    paint.set_stroke_width((outer - inner).max(1.0));

    let angles = slice_angles(series);
    for (i, &(start, sweep)) in angles.iter().enumerate() {
        if sweep <= 0.0 {
            continue;
        }
        paint.set_color(slice_color(series, i));
        canvas.draw_arc(oval, start, sweep, false, &paint);
    }

    if !opts.draw_labels {
        return;
    }
    let label_paint = text_paint(opts);
    let mut font = skia::Font::default();
    font.set_size(11.0);
    for (label, &(start, sweep)) in series.slice_labels().iter().zip(&angles) {
        let Some(text) = label.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let angle = (start + sweep / 2.0).to_radians();
        let at = (center.x + mid * angle.cos() - 8.0, center.y + mid * angle.sin() + 4.0);
        canvas.draw_str(text, at, &font, &label_paint);
    }
}

/// Legend entries stack vertically for side legends, otherwise they run in a row.
fn draw_legend(canvas: &skia::Canvas, frame: &ChartFrame, opts: &RenderOptions, width: f32, height: f32) {
    let legend: &Legend = &frame.spec.legend;
    let Some(series) = frame.spec.pie() else {
        return;
    };
    if !legend.show || series.data.is_empty() {
        return;
    }
    let vertical = legend.orient.is_some();
    let entry_width = 110.0;
    let (mut x, mut y) = if legend.left.is_some() {
        (10.0, 10.0)
    } else if legend.right.is_some() {
        (width - entry_width, 10.0)
    } else if legend.bottom.is_some() {
        (10.0, height - LEGEND_ROW)
    } else {
        (10.0, 10.0)
    };

    let text = legend
        .text_style
        .as_ref()
        .and_then(|s| parse_hex(&s.color))
        .unwrap_or(opts.text);
    let mut label_paint = text_paint(opts);
    label_paint.set_color(text);
    let mut font = skia::Font::default();
    font.set_size(12.0);
    let mut swatch = skia::Paint::default();
    swatch.set_anti_alias(true);

    for (i, slice) in series.data.iter().enumerate() {
        swatch.set_color(slice_color(series, i));
        canvas.draw_rect(skia::Rect::from_xywh(x, y, SWATCH, SWATCH), &swatch);
        if opts.draw_labels {
            canvas.draw_str(&slice.name, (x + SWATCH + 4.0, y + SWATCH - 1.0), &font, &label_paint);
        }
        if vertical {
            y += LEGEND_ROW;
        } else {
            x += entry_width;
        }
    }
}

/// `ChartSurface` that rasterizes every draw into an RGBA buffer.
#[derive(Debug, Default)]
pub struct SkiaSurface {
    opts: RenderOptions,
    frame: Option<ChartFrame>,
    pixels: Option<Vec<u8>>,
    loading: bool,
    resizes: usize,
}

impl SkiaSurface {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, ..Self::default() }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// Change the container size; takes effect on the next `resize`.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.opts.width = width.max(1);
        self.opts.height = height.max(1);
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }

    /// Last rasterized image, RGBA8 with `width * 4` row bytes.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let frame = self.frame.as_ref().ok_or_else(|| anyhow::anyhow!("nothing drawn yet"))?;
        render_to_png_bytes(frame, &self.opts)
    }

    fn rasterize(&mut self) {
        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        match render_to_rgba8(frame, &self.opts) {
            Ok((pixels, w, h, _)) => {
                debug!(w, h, "rasterized chart");
                self.pixels = Some(pixels);
            }
            Err(e) => warn!(error = %e, "chart rasterization failed"),
        }
    }
}

impl ChartSurface for SkiaSurface {
    fn draw(&mut self, frame: &ChartFrame) {
        self.frame = Some(frame.clone());
        self.rasterize();
    }

    fn resize(&mut self) {
        self.resizes += 1;
        self.rasterize();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn apply_theme(&mut self, theme: &ResolvedTheme) {
        let before = (self.opts.background, self.opts.text, self.opts.width, self.opts.height);
        self.opts.apply_theme(theme);
        if before != (self.opts.background, self.opts.text, self.opts.width, self.opts.height) {
            self.rasterize();
        }
    }
}
