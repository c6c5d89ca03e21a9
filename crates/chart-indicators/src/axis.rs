// File: crates/chart-indicators/src/axis.rs
// Summary: Axis model with label and visible range (extremes).

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self { Self::new("Time", 0.0, 10.0) }

    pub fn default_y() -> Self { Self::new("Price", 0.0, 100.0) }

    /// Set the visible range, swapping the bounds if given reversed.
    pub fn set_extremes(&mut self, min: f64, max: f64) {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min = lo;
        self.max = hi;
    }

    pub fn contains(&self, v: f64) -> bool { v >= self.min && v <= self.max }
}
