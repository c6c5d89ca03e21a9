// File: crates/chart-indicators/src/sma.rs
// Summary: Simple moving average over a parent series' raw x/y arrays (sliding sum, O(n)).

use crate::indicator::{Calculator, IndicatorValues};
use crate::options::IndicatorParams;
use crate::series::PointValue;

/// SMA over `y`, reading tuple field `index` for OHLC-like values.
///
/// Returns `None` while there is not enough history (`len(x) <= period`).
/// The running sum is seeded from positions `1..=period`; sample 0 never enters
/// the window. Output holds `len(x) - period` points, stamped `x[period..]`.
pub fn sma_values(x: &[f64], y: &[PointValue], period: usize, index: usize) -> Option<IndicatorValues> {
    if period == 0 || x.len() <= period || y.len() <= period {
        return None;
    }
    let p = period as f64;
    let n = x.len().min(y.len());

    let mut sum: f64 = y[1..=period].iter().map(|v| v.field(index)).sum();

    let mut out = IndicatorValues::with_capacity(n - period);
    for i in period..n {
        out.push(x[i], sum / p);
        sum += y[i].field(index);
        sum -= y[i - period].field(index);
    }
    Some(out)
}

/// Calculator registered under the `"sma"` kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sma;

impl Calculator for Sma {
    fn label(&self) -> &'static str { "SMA" }

    fn values(&self, x: &[f64], y: &[PointValue], params: &IndicatorParams) -> Option<IndicatorValues> {
        sma_values(x, y, params.period, params.index)
    }
}
