// File: crates/demo/src/main.rs
// Summary: Demo loads a time/value CSV, runs fit, pan and zoom frames through a PlotContext, prints ticks and renders PNGs.

use anyhow::{Context, Result};
use axis_core::{
    AxisFlags, AxisId, AxisOptions, Condition, InputState, PixelPoint, PixelRect, PlotConfig, PlotContext, PlotFlags,
    PlotOptions, PlotPoint, ScaleKind, TickCollection, YAxis,
};
use axis_render_skia::{render_png, RenderOptions, SkiaTextMeasure};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const TITLE: &str = "series";

struct Sample {
    t: f64,
    value: f64,
    volume: Option<f64>,
}

fn main() -> Result<()> {
    init_logging()?;

    let samples = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(&raw);
            let s = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            println!("Loaded {} rows from {}", s.len(), path.display());
            s
        }
        None => {
            println!("No CSV given; using a synthetic hourly series");
            synthetic_series()
        }
    };
    if samples.is_empty() {
        anyhow::bail!("no rows loaded; expected a time column and a numeric value column");
    }

    let line: Vec<PlotPoint> = samples.iter().map(|s| PlotPoint::new(s.t, s.value)).collect();
    let volume: Vec<PlotPoint> = samples
        .iter()
        .filter_map(|s| s.volume.map(|v| PlotPoint::new(s.t, v)))
        .collect();

    let opts = RenderOptions::default();
    let text = SkiaTextMeasure::new(12.0);
    let canvas = PixelRect::from_ltwh(0.0, 0.0, opts.width as f32, opts.height as f32);
    let plot_opts = PlotOptions {
        flags: PlotFlags { y2: !volume.is_empty(), ..PlotFlags::default() },
        x: AxisOptions::new("time").kind(ScaleKind::Time),
        y: [
            AxisOptions::new("value"),
            AxisOptions::new("volume").kind(ScaleKind::Log10),
            AxisOptions::default(),
        ],
    };

    let mut ctx = PlotContext::with_config(PlotConfig::default());
    let center = PixelPoint::new(canvas.width() * 0.5, canvas.height() * 0.5);
    let frames = [
        ("fit", InputState::idle()),
        ("pan", InputState::drag(center, -120.0, 0.0)),
        ("zoom", InputState::scroll(center, 1.0)),
        ("zoom-more", InputState::scroll(center, 1.0)),
        ("refit", InputState::double_click(center)),
    ];

    for (i, (name, input)) in frames.iter().enumerate() {
        if i == 0 {
            ctx.fit_next_plot_axes(true, true, true, false);
        }
        let mut frame = ctx.begin_plot(TITLE, canvas, &plot_opts, input, &text);
        for &p in &line {
            frame.report_point(p);
        }
        if frame.set_current_y_axis(YAxis::Y2) {
            for &p in &volume {
                frame.report_point(p);
            }
            frame.set_current_y_axis(YAxis::Y1);
        }
        frame.apply_fit();

        println!("== frame {i} ({name}) ==");
        print_axis(&frame.axis(AxisId::X).label, frame.ticks(AxisId::X));
        print_axis(&frame.axis(AxisId::Y(YAxis::Y1)).label, frame.ticks(AxisId::Y(YAxis::Y1)));
        if frame.plot().is_active(AxisId::Y(YAxis::Y2)) {
            print_axis(&frame.axis(AxisId::Y(YAxis::Y2)).label, frame.ticks(AxisId::Y(YAxis::Y2)));
        }

        let out = out_name(name);
        render_png(&frame, &[(YAxis::Y1, line.as_slice()), (YAxis::Y2, volume.as_slice())], &text, &opts, &out)?;
        println!("Wrote {}", out.display());
        frame.end();
    }

    // A second plot with fixed limits and categorical ticks on X.
    ctx.set_next_plot_limits(-0.5, 3.5, 0.0, 10.0, Condition::Always);
    ctx.set_next_plot_ticks_x(&[0.0, 1.0, 2.0, 3.0], Some(&["north", "east", "south", "west"][..]), false)?;
    let locked = PlotOptions {
        x: AxisOptions::new("region").flags(AxisFlags { grid: false, ..AxisFlags::default() }),
        y: [AxisOptions::new("count"), AxisOptions::default(), AxisOptions::default()],
        ..PlotOptions::default()
    };
    let frame = ctx.begin_plot("regions", canvas, &locked, &InputState::drag(center, 50.0, 50.0), &text);
    println!("== regions (locked) ==");
    print_axis(&frame.axis(AxisId::X).label, frame.ticks(AxisId::X));
    print_axis(&frame.axis(AxisId::Y(YAxis::Y1)).label, frame.ticks(AxisId::Y(YAxis::Y1)));
    frame.end();
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn print_axis(label: &str, ticks: &TickCollection) {
    let labels: Vec<&str> = ticks.visible_labels().map(|(_, s)| s).collect();
    println!("  {label:>8}: {} ticks, labels {:?}", ticks.len(), labels);
}

/// Produce output file name like target/out/axes_<suffix>.png
fn out_name(suffix: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    out.push(format!("axes_{}.png", suffix));
    out
}

/// Load a CSV with a time column and a value column (volume optional).
fn load_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    log::info!("headers: {:?}", headers);
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"])
        .context("no time column (time/timestamp/open_time/date/datetime)")?;
    let i_value = idx(&["value", "close", "c", "price", "y"]).context("no value column (value/close/price/y)")?;
    let i_volume = idx(&["volume", "vol", "v"]);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let t = rec.get(i_time).and_then(parse_time);
        let value = rec.get(i_value).and_then(|s| s.trim().parse::<f64>().ok());
        let volume = i_volume.and_then(|i| rec.get(i)).and_then(|s| s.trim().parse::<f64>().ok());
        match (t, value) {
            (Some(t), Some(value)) => out.push(Sample { t, value, volume }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} rows without a parseable time and value");
    }
    Ok(out)
}

/// Epoch seconds from epoch s/ms integers, RFC 3339, `YYYY-MM-DD HH:MM:SS` or a bare date.
fn parse_time(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        return Some(if n > 10_i64.pow(12) { n as f64 / 1000.0 } else { n as f64 });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64 / 1000.0);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

fn synthetic_series() -> Vec<Sample> {
    let start = 1_700_000_000.0;
    (0..24 * 10)
        .map(|i| {
            let h = i as f64;
            Sample {
                t: start + h * 3600.0,
                value: 100.0 + 10.0 * (h / 12.0).sin() + h * 0.05,
                volume: Some(1_000.0 * (1.0 + (h / 7.0).cos().abs() * 50.0)),
            }
        })
        .collect()
}
