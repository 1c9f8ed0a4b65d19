// File: crates/axis-render-skia/src/lib.rs
// Summary: Skia host for axis-core: paragraph-based label measurement and headless PNG rendering of a plot frame.

use std::path::Path;

use anyhow::Result;
use axis_core::{AxisId, PlotFrame, PlotPoint, ScaleTransform, TextMeasure, TickCollection, YAxis};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Measures and draws tick labels with Skia's paragraph layout.
pub struct SkiaTextMeasure {
    fonts: FontCollection,
    pub font_size: f32,
    pub mono_numeric: bool,
}

impl SkiaTextMeasure {
    pub fn new(font_size: f32) -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, font_size: font_size.max(1.0), mono_numeric: true }
    }

    fn make_style(&self, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(self.font_size);
        ts.set_color(color);
        if self.mono_numeric {
            // Tabular digits keep labels from jittering while panning
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        }
        ts
    }

    pub fn layout(&self, text: &str, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&self.make_style(color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }
}

impl Default for SkiaTextMeasure {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl TextMeasure for SkiaTextMeasure {
    fn measure_text(&self, text: &str) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let p = self.layout(text, skia::Color::TRANSPARENT);
        (p.longest_line(), p.height())
    }
}

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis: skia::Color,
    pub text: skia::Color,
    pub series: skia::Color,
    pub tick_len: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis: skia::Color::from_argb(255, 180, 180, 190),
            text: skia::Color::from_argb(255, 210, 210, 220),
            series: skia::Color::from_argb(255, 64, 160, 255),
            tick_len: 5.0,
        }
    }
}

/// Draw the frame's axes and one polyline per `(y axis, points)` entry into a PNG.
pub fn render_png(
    frame: &PlotFrame<'_>,
    series: &[(YAxis, &[PlotPoint])],
    text: &SkiaTextMeasure,
    opts: &RenderOptions,
    output_png_path: impl AsRef<Path>,
) -> Result<()> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.background);

    draw_grid(canvas, frame, opts);
    for &(y, points) in series {
        draw_polyline(canvas, frame, y, points, opts);
    }
    draw_axes(canvas, frame, text, opts);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;

    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, data.as_bytes())?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn draw_grid(canvas: &skia::Canvas, frame: &PlotFrame<'_>, opts: &RenderOptions) {
    let r = frame.plot_rect();
    let paint = stroke(opts.grid, 1.0);
    let x = frame.axis(AxisId::X);
    if x.flags.grid {
        for t in x.ticks.iter().filter(|t| t.major) {
            canvas.draw_line((t.pixel, r.min.y), (t.pixel, r.max.y), &paint);
        }
    }
    let y1 = frame.axis(AxisId::Y(YAxis::Y1));
    if y1.flags.grid {
        for t in y1.ticks.iter().filter(|t| t.major) {
            canvas.draw_line((r.min.x, t.pixel), (r.max.x, t.pixel), &paint);
        }
    }
}

fn draw_polyline(canvas: &skia::Canvas, frame: &PlotFrame<'_>, y: YAxis, points: &[PlotPoint], opts: &RenderOptions) {
    if points.len() < 2 {
        return;
    }
    let tr = frame.transform(y);
    let r = frame.plot_rect();
    let mut path = skia::Path::new();
    let p0 = tr.to_screen(points[0]);
    path.move_to((p0.x, p0.y));
    for &p in &points[1..] {
        let s = tr.to_screen(p);
        path.line_to((s.x, s.y));
    }
    canvas.save();
    canvas.clip_rect(skia::Rect::from_ltrb(r.min.x, r.min.y, r.max.x, r.max.y), None, true);
    canvas.draw_path(&path, &stroke(opts.series, 2.0));
    canvas.restore();
}

fn draw_axes(canvas: &skia::Canvas, frame: &PlotFrame<'_>, text: &SkiaTextMeasure, opts: &RenderOptions) {
    let r = frame.plot_rect();
    let axis_paint = stroke(opts.axis, 1.5);
    canvas.draw_line((r.min.x, r.max.y), (r.max.x, r.max.y), &axis_paint);
    canvas.draw_line((r.min.x, r.min.y), (r.min.x, r.max.y), &axis_paint);

    let tick_paint = stroke(opts.axis, 1.0);
    let x_ticks = &frame.axis(AxisId::X).ticks;
    for t in x_ticks.iter() {
        let len = if t.major { opts.tick_len } else { opts.tick_len * 0.5 };
        canvas.draw_line((t.pixel, r.max.y), (t.pixel, r.max.y + len), &tick_paint);
    }
    draw_labels(canvas, x_ticks, text, opts, |t, (w, _)| (t - w * 0.5, r.max.y + opts.tick_len));

    let y1 = &frame.axis(AxisId::Y(YAxis::Y1)).ticks;
    for t in y1.iter() {
        let len = if t.major { opts.tick_len } else { opts.tick_len * 0.5 };
        canvas.draw_line((r.min.x - len, t.pixel), (r.min.x, t.pixel), &tick_paint);
    }
    draw_labels(canvas, y1, text, opts, |t, (w, h)| (r.min.x - opts.tick_len - w, t - h * 0.5));

    // Secondary axes stack to the right of the plot rectangle.
    let mut left = r.max.x;
    for y in [YAxis::Y2, YAxis::Y3] {
        if !frame.plot().is_active(AxisId::Y(y)) {
            continue;
        }
        let ticks = &frame.axis(AxisId::Y(y)).ticks;
        canvas.draw_line((left, r.min.y), (left, r.max.y), &axis_paint);
        for t in ticks.iter() {
            let len = if t.major { opts.tick_len } else { opts.tick_len * 0.5 };
            canvas.draw_line((left, t.pixel), (left + len, t.pixel), &tick_paint);
        }
        let x0 = left;
        draw_labels(canvas, ticks, text, opts, |t, (_, h)| (x0 + opts.tick_len, t - h * 0.5));
        left += frame.plot().panel_width(y);
    }
}

fn draw_labels<F>(canvas: &skia::Canvas, ticks: &TickCollection, text: &SkiaTextMeasure, opts: &RenderOptions, origin: F)
where
    F: Fn(f32, (f32, f32)) -> (f32, f32),
{
    for (tick, label) in ticks.visible_labels() {
        let mut p = text.layout(label, opts.text);
        let (x, y) = origin(tick.pixel, tick.label_size);
        p.paint(canvas, (x, y));
    }
}
