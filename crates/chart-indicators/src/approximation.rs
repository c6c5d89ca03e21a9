// File: crates/chart-indicators/src/approximation.rs
// Summary: Approximation reducers (sum, average, open/high/low/close, ohlc, range) used to
// collapse a group of raw samples into one aggregate value.
// Notes:
// - Every reducer is pure. Empty input resolves to `Gap` when the group is known to
//   contain null points, and to `Absent` otherwise.

use std::fmt;
use std::str::FromStr;

/// Result of reducing a group of samples.
///
/// `Gap` and `Absent` are both "no number", but they mean different things to the
/// caller: a gap is drawn as a break in the line, an absent value produces no point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Approx<T> {
    Value(T),
    /// Known missing data inside an otherwise valid range (null point).
    Gap,
    /// No data and no claim of a gap.
    Absent,
}

impl<T> Approx<T> {
    pub fn is_value(&self) -> bool { matches!(self, Approx::Value(_)) }
    pub fn is_gap(&self) -> bool { matches!(self, Approx::Gap) }
    pub fn is_absent(&self) -> bool { matches!(self, Approx::Absent) }

    pub fn value(self) -> Option<T> {
        match self {
            Approx::Value(v) => Some(v),
            Approx::Gap | Approx::Absent => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Approx<U> {
        match self {
            Approx::Value(v) => Approx::Value(f(v)),
            Approx::Gap => Approx::Gap,
            Approx::Absent => Approx::Absent,
        }
    }
}

impl Approx<f64> {
    /// A finite value. NaN (a missing tuple field) and infinities do not count.
    pub fn is_number(&self) -> bool { matches!(self, Approx::Value(v) if v.is_finite()) }
}

/// A group of numeric samples plus the flag telling whether null points were
/// dropped while building it.
#[derive(Clone, Copy, Debug)]
pub struct Samples<'a> {
    pub values: &'a [f64],
    pub has_gaps: bool,
}

impl<'a> Samples<'a> {
    pub const fn new(values: &'a [f64]) -> Self { Self { values, has_gaps: false } }
    pub const fn with_gaps(values: &'a [f64], has_gaps: bool) -> Self { Self { values, has_gaps } }
    pub const fn len(&self) -> usize { self.values.len() }
    pub const fn is_empty(&self) -> bool { self.values.is_empty() }

    fn empty_result<T>(&self) -> Approx<T> {
        if self.has_gaps { Approx::Gap } else { Approx::Absent }
    }
}

pub fn sum(samples: Samples<'_>) -> Approx<f64> {
    if samples.is_empty() { return samples.empty_result(); }
    Approx::Value(samples.values.iter().sum())
}

pub fn average(samples: Samples<'_>) -> Approx<f64> {
    let len = samples.len();
    match sum(samples) {
        Approx::Value(total) if len > 0 => Approx::Value(total / len as f64),
        other => other,
    }
}

pub fn open(samples: Samples<'_>) -> Approx<f64> {
    match samples.values.first() {
        Some(&v) => Approx::Value(v),
        None => samples.empty_result(),
    }
}

pub fn close(samples: Samples<'_>) -> Approx<f64> {
    match samples.values.last() {
        Some(&v) => Approx::Value(v),
        None => samples.empty_result(),
    }
}

pub fn high(samples: Samples<'_>) -> Approx<f64> {
    if samples.is_empty() { return samples.empty_result(); }
    Approx::Value(samples.values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn low(samples: Samples<'_>) -> Approx<f64> {
    if samples.is_empty() { return samples.empty_result(); }
    Approx::Value(samples.values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Open/high/low/close of four parallel sample groups.
/// `Absent` only when none of the four components is numeric.
pub fn ohlc(
    opens: Samples<'_>,
    highs: Samples<'_>,
    lows: Samples<'_>,
    closes: Samples<'_>,
) -> Approx<[Approx<f64>; 4]> {
    let parts = [open(opens), high(highs), low(lows), close(closes)];
    if parts.iter().any(Approx::<f64>::is_number) { Approx::Value(parts) } else { Approx::Absent }
}

/// Low of `lows` and high of `highs`; `Absent` only when both are non-numeric.
pub fn range(lows: Samples<'_>, highs: Samples<'_>) -> Approx<(Approx<f64>, Approx<f64>)> {
    let (lo, hi) = (low(lows), high(highs));
    if lo.is_number() || hi.is_number() { Approx::Value((lo, hi)) } else { Approx::Absent }
}

/// Single-field reducers, looked up by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Approximation {
    Sum,
    Average,
    Open,
    High,
    Low,
    Close,
}

impl Approximation {
    pub const ALL: [Approximation; 6] = [
        Approximation::Sum,
        Approximation::Average,
        Approximation::Open,
        Approximation::High,
        Approximation::Low,
        Approximation::Close,
    ];

    pub fn apply(self, samples: Samples<'_>) -> Approx<f64> {
        match self {
            Approximation::Sum => sum(samples),
            Approximation::Average => average(samples),
            Approximation::Open => open(samples),
            Approximation::High => high(samples),
            Approximation::Low => low(samples),
            Approximation::Close => close(samples),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Approximation::Sum => "sum",
            Approximation::Average => "average",
            Approximation::Open => "open",
            Approximation::High => "high",
            Approximation::Low => "low",
            Approximation::Close => "close",
        }
    }
}

impl fmt::Display for Approximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approximation: {0}")]
pub struct UnknownApproximation(pub String);

impl FromStr for Approximation {
    type Err = UnknownApproximation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Approximation::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownApproximation(s.to_string()))
    }
}
