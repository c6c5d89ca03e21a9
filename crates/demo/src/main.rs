// File: crates/demo/src/main.rs
// Summary: Demo loads OHLC CSV (or a synthetic walk), binds an SMA to it, streams new candles
// through the chart and prints the indicator plus a grouped view of the data.

use anyhow::{Context, Result};
use chart_indicators::series::Candle;
use chart_indicators::{group_ohlc, Approx, Chart, IndicatorOptions, Series};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SMA_OPTIONS: &str = r#"{ "id": "sma-close", "linkedTo": "prices", "params": { "period": 14, "index": 3 } }"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let candles = match std::env::args().nth(1) {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            info!(path = %path.display(), used_alt, "using input file");
            load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            info!("no input file given, generating a synthetic walk");
            synthetic_walk(120)
        }
    };
    if candles.len() < 2 {
        anyhow::bail!("need at least two candles, got {}", candles.len());
    }
    info!(candles = candles.len(), "loaded");

    // Hold back the tail so it can be streamed in as live updates.
    let split = candles.len() - (candles.len() / 5).max(1);
    let (history, live) = candles.split_at(split);

    let mut chart = Chart::new();
    chart.add_series(Series::from_candles(history.to_vec()).with_id("prices").with_name("Prices"));
    let options = IndicatorOptions::from_json(SMA_OPTIONS).context("parsing indicator options")?;
    let sma = chart.add_indicator("sma", options).context("adding SMA")?;
    chart.redraw();
    info!(name = %sma.borrow().name, points = sma.borrow().len(), "indicator bound");

    for candle in live {
        chart.add_point("prices", candle.t, *candle)?;
        let s = sma.borrow();
        match s.points.last() {
            Some((x, y)) => println!("t={x:>14.2} close={:>12.4} sma={y:>12.4}", candle.c),
            None => println!("t={:>14.2} close={:>12.4} sma=(not enough data)", candle.t, candle.c),
        }
    }
    let repainted = chart.redraw();
    info!(repainted, "final redraw");

    let bucket = (candles.len() / 10).max(2);
    let x: Vec<f64> = candles.iter().map(|c| c.t).collect();
    let y: Vec<Option<[f64; 4]>> = candles.iter().map(|c| Some([c.o, c.h, c.l, c.c])).collect();
    let grouped = group_ohlc(&x, &y, bucket);
    println!("Grouped by {bucket}:");
    for (t, parts) in grouped.x_data.iter().zip(&grouped.y_data) {
        let Approx::Value(fields) = parts else { continue };
        let show = |a: &Approx<f64>| a.value().map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
        println!(
            "  t={t:>14.2} o={} h={} l={} c={}",
            show(&fields[0]),
            show(&fields[1]),
            show(&fields[2]),
            show(&fields[3])
        );
    }

    chart.remove_series("prices")?;
    info!(remaining = chart.series().len(), listeners = chart.events().listener_count(), "torn down");
    Ok(())
}

/// Deterministic random-ish walk so the demo runs without input data.
fn synthetic_walk(n: usize) -> Vec<Candle> {
    let mut out = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + (i as f64 * 0.35).sin() * 1.5 + 0.05;
        let h = o.max(c) + 0.75;
        let l = o.min(c) - 0.75;
        price = c;
        out.push(Candle { t: i as f64, o, h, l, c });
    }
    out
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Load Binance-like OHLC CSV into Candle vec.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);

    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        warn!("could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let t = i_time
            .and_then(|ix| rec.get(ix))
            .and_then(parse_time_to_f64)
            .unwrap_or(row as f64);
        match (parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            (Some(o), Some(h), Some(l), Some(c)) => match Candle::try_new(t, o, h, l, c) {
                Ok(candle) => out.push(candle),
                Err(reason) => {
                    warn!(row, reason, "skipping malformed candle");
                    skipped += 1;
                }
            },
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows without usable OHLC values");
    }
    Ok(out)
}

/// Epoch seconds from an integer (seconds or milliseconds) or a date/time string.
fn parse_time_to_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0);
        } // epoch ms -> sec
        return Some(n as f64);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
