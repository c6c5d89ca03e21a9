// File: crates/chart-indicators/tests/approximation.rs
// Purpose: Reducer semantics, including the gap/absent distinction for empty groups.

use chart_indicators::approximation::{self, average, close, high, low, ohlc, open, range, sum};
use chart_indicators::{Approx, Approximation, Samples};

#[test]
fn average_of_values_and_empty_groups() {
    assert_eq!(average(Samples::new(&[1.0, 2.0, 3.0])), Approx::Value(2.0));
    assert_eq!(average(Samples::with_gaps(&[], true)), Approx::Gap);
    assert_eq!(average(Samples::with_gaps(&[], false)), Approx::Absent);
}

#[test]
fn single_field_reducers() {
    let s = Samples::new(&[3.0, -1.0, 7.0, 2.0]);
    assert_eq!(sum(s), Approx::Value(11.0));
    assert_eq!(open(s), Approx::Value(3.0));
    assert_eq!(close(s), Approx::Value(2.0));
    assert_eq!(high(s), Approx::Value(7.0));
    assert_eq!(low(s), Approx::Value(-1.0));
}

#[test]
fn non_empty_groups_ignore_gap_flag() {
    let s = Samples::with_gaps(&[4.0], true);
    for a in Approximation::ALL {
        assert_eq!(a.apply(s), Approx::Value(4.0), "{a}");
    }
}

#[test]
fn every_reducer_is_total_over_empty_input() {
    for a in Approximation::ALL {
        assert_eq!(a.apply(Samples::with_gaps(&[], true)), Approx::Gap, "{a}");
        assert_eq!(a.apply(Samples::with_gaps(&[], false)), Approx::Absent, "{a}");
        assert!(a.apply(Samples::new(&[1.5, 2.5])).value().is_some_and(f64::is_finite), "{a}");
    }
}

#[test]
fn ohlc_absent_only_when_all_components_missing() {
    let empty = Samples::new(&[]);
    assert_eq!(ohlc(empty, empty, empty, empty), Approx::Absent);

    let gaps = Samples::with_gaps(&[], true);
    assert_eq!(ohlc(gaps, empty, empty, empty), Approx::Absent);

    let highs = Samples::new(&[2.0, 9.0]);
    let got = ohlc(gaps, highs, empty, empty);
    assert_eq!(got, Approx::Value([Approx::Gap, Approx::Value(9.0), Approx::Absent, Approx::Absent]));
}

#[test]
fn ohlc_full_bucket() {
    let got = ohlc(
        Samples::new(&[1.0, 2.0]),
        Samples::new(&[3.0, 5.0]),
        Samples::new(&[0.5, 0.2]),
        Samples::new(&[2.0, 4.0]),
    );
    let parts = got.value().expect("numeric");
    assert_eq!(parts, [Approx::Value(1.0), Approx::Value(5.0), Approx::Value(0.2), Approx::Value(4.0)]);
}

#[test]
fn range_keeps_partial_results() {
    let empty = Samples::new(&[]);
    assert_eq!(range(empty, empty), Approx::Absent);
    assert_eq!(range(Samples::with_gaps(&[], true), Samples::with_gaps(&[], true)), Approx::Absent);
    assert_eq!(
        range(Samples::new(&[4.0, 1.0]), Samples::with_gaps(&[], true)),
        Approx::Value((Approx::Value(1.0), Approx::Gap))
    );
}

#[test]
fn approximation_names_round_trip() {
    for a in Approximation::ALL {
        assert_eq!(a.name().parse::<Approximation>(), Ok(a));
    }
    assert_eq!("AVERAGE".parse::<Approximation>(), Ok(Approximation::Average));
    let err = "median".parse::<Approximation>().unwrap_err();
    assert_eq!(err, approximation::UnknownApproximation("median".to_string()));
}

#[test]
fn approx_helpers() {
    assert_eq!(Approx::Value(2.0).map(|v| v * 2.0), Approx::Value(4.0));
    assert_eq!(Approx::<f64>::Gap.map(|v| v * 2.0), Approx::Gap);
    assert!(Approx::<f64>::Absent.is_absent());
    assert!(Approx::<f64>::Gap.is_gap() && !Approx::<f64>::Gap.is_value());
    assert!(Approx::<f64>::Gap.value().is_none());
    assert!(Approx::Value(1.0).is_number());
    assert!(Approx::Value(f64::NAN).is_value() && !Approx::Value(f64::NAN).is_number());
}

#[test]
fn missing_fields_do_not_count_as_numbers() {
    // Tuples without the requested field read as NaN.
    let nan = Samples::new(&[f64::NAN]);
    assert_eq!(ohlc(nan, nan, nan, nan), Approx::Absent);
    assert_eq!(range(nan, nan), Approx::Absent);

    let close = Samples::new(&[3.0]);
    let got = ohlc(nan, nan, nan, close).value().expect("close is numeric");
    assert_eq!(got[3], Approx::Value(3.0));
    assert!(got[0].value().is_some_and(f64::is_nan));
}
