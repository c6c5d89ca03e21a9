// File: crates/chart-indicators/tests/grouping.rs
// Purpose: Bucketed data grouping over scalar and OHLC data, including null points.

use chart_indicators::series::Candle;
use chart_indicators::{aggregate_ohlc_buckets, group_ohlc, group_scalar, Approx, Approximation};

fn xs(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn scalar_buckets_keep_gaps_for_null_points() {
    let y = [Some(1.0), Some(2.0), None, Some(4.0), None, None];
    let g = group_scalar(&xs(6), &y, 2, Approximation::Average);
    assert_eq!(g.x_data, vec![0.0, 2.0, 4.0]);
    assert_eq!(g.y_data, vec![Approx::Value(1.5), Approx::Value(4.0), Approx::Gap]);
}

#[test]
fn trailing_partial_bucket_is_reduced() {
    let y: Vec<Option<f64>> = (1..=5).map(|v| Some(v as f64)).collect();
    let g = group_scalar(&xs(5), &y, 2, Approximation::Sum);
    assert_eq!(g.x_data, vec![0.0, 2.0, 4.0]);
    assert_eq!(g.y_data, vec![Approx::Value(3.0), Approx::Value(7.0), Approx::Value(5.0)]);

    let hi = group_scalar(&xs(5), &y, 3, Approximation::High);
    assert_eq!(hi.y_data, vec![Approx::Value(3.0), Approx::Value(5.0)]);
}

#[test]
fn empty_input_groups_to_nothing() {
    let g = group_scalar(&[], &[], 4, Approximation::Close);
    assert!(g.is_empty());
    assert!(group_ohlc(&[], &[], 4).is_empty());
}

#[test]
fn ohlc_buckets_reduce_per_field() {
    let y = [
        Some([1.0, 3.0, 0.5, 2.0]),
        Some([2.0, 4.0, 1.0, 3.0]),
        Some([3.0, 6.0, 2.0, 5.0]),
        None,
    ];
    let g = group_ohlc(&xs(4), &y, 2);
    assert_eq!(g.len(), 2);
    assert_eq!(
        g.y_data[0],
        Approx::Value([Approx::Value(1.0), Approx::Value(4.0), Approx::Value(0.5), Approx::Value(3.0)])
    );
    assert_eq!(
        g.y_data[1],
        Approx::Value([Approx::Value(3.0), Approx::Value(6.0), Approx::Value(2.0), Approx::Value(5.0)])
    );
}

#[test]
fn all_null_ohlc_bucket_is_dropped() {
    let y = [Some([1.0, 2.0, 0.0, 1.5]), Some([1.5, 2.5, 1.0, 2.0]), None, None];
    let g = group_ohlc(&xs(4), &y, 2);
    assert_eq!(g.x_data, vec![0.0]);
}

#[test]
fn candle_aggregation_matches_bucket_rules() {
    let candles: Vec<Candle> = (0..5)
        .map(|i| {
            let b = 10.0 + i as f64;
            Candle { t: i as f64, o: b, h: b + 1.0, l: b - 1.0, c: b + 0.5 }
        })
        .collect();

    let out = aggregate_ohlc_buckets(&candles, 2);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], Candle { t: 0.0, o: 10.0, h: 12.0, l: 9.0, c: 11.5 });
    assert_eq!(out[1], Candle { t: 2.0, o: 12.0, h: 14.0, l: 11.0, c: 13.5 });
    assert_eq!(out[2], candles[4]);

    assert_eq!(aggregate_ohlc_buckets(&candles, 1), candles);
    assert_eq!(aggregate_ohlc_buckets(&candles[..2], 4), candles[..2].to_vec());
}
