// File: crates/chart-indicators/src/downsample.rs
// Summary: Data grouping: collapse fixed-size buckets of raw samples with the approximation
// reducers (scalar series, OHLC tuples and whole candles).
// Notes:
// - `None` samples are null points. They never enter a reducer but flag the bucket
//   as containing gaps, so an all-null bucket yields `Approx::Gap`.
// - Buckets whose result is `Approx::Absent` produce no output point.

use crate::approximation::{ohlc, Approx, Approximation, Samples};
use crate::series::Candle;

/// Grouped output: one x (first x of the bucket) per emitted point.
#[derive(Clone, Debug, PartialEq)]
pub struct Grouped<T> {
    pub x_data: Vec<f64>,
    pub y_data: Vec<Approx<T>>,
}

impl<T> Default for Grouped<T> {
    fn default() -> Self { Self { x_data: Vec::new(), y_data: Vec::new() } }
}

impl<T> Grouped<T> {
    pub fn len(&self) -> usize { self.x_data.len() }
    pub fn is_empty(&self) -> bool { self.x_data.is_empty() }
}

fn bucket_ranges(n: usize, bucket: usize) -> impl Iterator<Item = (usize, usize)> {
    let step = bucket.max(1);
    (0..n).step_by(step).map(move |i| (i, (i + step).min(n)))
}

/// Reduce `y` in buckets of `bucket` samples with `approximation`.
pub fn group_scalar(x: &[f64], y: &[Option<f64>], bucket: usize, approximation: Approximation) -> Grouped<f64> {
    let n = x.len().min(y.len());
    let mut out = Grouped::default();
    let mut values = Vec::with_capacity(bucket.max(1));
    for (start, end) in bucket_ranges(n, bucket) {
        values.clear();
        values.extend(y[start..end].iter().flatten().copied());
        let has_gaps = values.len() < end - start;
        let result = approximation.apply(Samples::with_gaps(&values, has_gaps));
        if !result.is_absent() {
            out.x_data.push(x[start]);
            out.y_data.push(result);
        }
    }
    out
}

/// Reduce `[open, high, low, close]` tuples in buckets of `bucket` samples.
pub fn group_ohlc(x: &[f64], y: &[Option<[f64; 4]>], bucket: usize) -> Grouped<[Approx<f64>; 4]> {
    let n = x.len().min(y.len());
    let mut out = Grouped::default();
    let mut fields: [Vec<f64>; 4] = Default::default();
    for (start, end) in bucket_ranges(n, bucket) {
        fields.iter_mut().for_each(Vec::clear);
        for tuple in y[start..end].iter().flatten() {
            for (column, v) in fields.iter_mut().zip(tuple) {
                column.push(*v);
            }
        }
        let has_gaps = fields[0].len() < end - start;
        let result = ohlc(
            Samples::with_gaps(&fields[0], has_gaps),
            Samples::with_gaps(&fields[1], has_gaps),
            Samples::with_gaps(&fields[2], has_gaps),
            Samples::with_gaps(&fields[3], has_gaps),
        );
        if !result.is_absent() {
            out.x_data.push(x[start]);
            out.y_data.push(result);
        }
    }
    out
}

/// Aggregate OHLC candles into fixed-size buckets of `bucket` width.
/// For each bucket: open=first.open, close=last.close, high=max high, low=min low, t=first.t
pub fn aggregate_ohlc_buckets(data: &[Candle], bucket: usize) -> Vec<Candle> {
    if bucket <= 1 || data.len() <= 2 { return data.to_vec(); }
    let x: Vec<f64> = data.iter().map(|c| c.t).collect();
    let y: Vec<Option<[f64; 4]>> = data.iter().map(|c| Some([c.o, c.h, c.l, c.c])).collect();
    let grouped = group_ohlc(&x, &y, bucket);
    grouped
        .x_data
        .iter()
        .zip(grouped.y_data)
        .filter_map(|(&t, parts)| match parts.value()? {
            [Approx::Value(o), Approx::Value(h), Approx::Value(l), Approx::Value(c)] => Some(Candle { t, o, h, l, c }),
            _ => None,
        })
        .collect()
}
