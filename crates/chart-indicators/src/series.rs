// File: crates/chart-indicators/src/series.rs
// Summary: Series model: parallel x/y arrays where y is a scalar or a fixed-size tuple (OHLC).
// Notes:
// - Series live behind `Rc<RefCell<_>>` (`SeriesRef`) so indicator bindings can hold
//   weak, non-owning links to their parent.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type SeriesRef = Rc<RefCell<Series>>;
pub type WeakSeriesRef = Weak<RefCell<Series>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Candlestick,
}

/// One y value: a plain number, or a tuple such as `[open, high, low, close]`.
#[derive(Clone, Debug, PartialEq)]
pub enum PointValue {
    Scalar(f64),
    Tuple(Vec<f64>),
}

impl PointValue {
    /// Field `index` of a tuple, or the scalar itself. A missing field reads as NaN.
    pub fn field(&self, index: usize) -> f64 {
        match self {
            PointValue::Scalar(v) => *v,
            PointValue::Tuple(fields) => fields.get(index).copied().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for PointValue {
    fn from(v: f64) -> Self { PointValue::Scalar(v) }
}

impl From<Candle> for PointValue {
    fn from(c: Candle) -> Self { PointValue::Tuple(vec![c.o, c.h, c.l, c.c]) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub t: f64,  // time/index (displayed on X)
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    /// Try to construct a candle enforcing OHLC invariants:
    /// l <= min(o,c) and h >= max(o,c), and l <= h.
    pub fn try_new(t: f64, o: f64, h: f64, l: f64, c: f64) -> Result<Self, &'static str> {
        let lo = o.min(c);
        let hi = o.max(c);
        if l > lo { return Err("low above min(open,close)"); }
        if h < hi { return Err("high below max(open,close)"); }
        if l > h { return Err("low above high"); }
        Ok(Self { t, o, h, l, c })
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub id: Option<String>,
    pub name: String,
    pub series_type: SeriesType,
    pub x_data: Vec<f64>,
    pub y_data: Vec<PointValue>,
    /// `(x, y)` pairs of a derived series, kept alongside the raw arrays.
    pub points: Vec<(f64, f64)>,
    /// Index of the x axis in the owning chart.
    pub x_axis: usize,
    /// Identifier of the parent series this one is derived from.
    pub linked_to: Option<String>,
    pub linked_parent: Option<WeakSeriesRef>,
    pub is_dirty: bool,
    pub is_dirty_data: bool,
    /// Positional cache rebuilt by the chart on redraw; `None` means stale.
    pub processed_x_data: Option<Vec<f64>>,
}

impl Series {
    pub fn new(series_type: SeriesType) -> Self {
        Self {
            id: None,
            name: String::new(),
            series_type,
            x_data: Vec::new(),
            y_data: Vec::new(),
            points: Vec::new(),
            x_axis: 0,
            linked_to: None,
            linked_parent: None,
            is_dirty: true,
            is_dirty_data: true,
            processed_x_data: None,
        }
    }

    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        let mut s = Self::new(series_type);
        s.x_data = data.iter().map(|&(x, _)| x).collect();
        s.y_data = data.iter().map(|&(_, y)| PointValue::Scalar(y)).collect();
        s
    }

    pub fn from_candles(candles: Vec<Candle>) -> Self {
        let mut s = Self::new(SeriesType::Candlestick);
        s.x_data = candles.iter().map(|c| c.t).collect();
        s.y_data = candles.into_iter().map(PointValue::from).collect();
        s
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_axis(mut self, x_axis: usize) -> Self {
        self.x_axis = x_axis;
        self
    }

    pub fn into_ref(self) -> SeriesRef { Rc::new(RefCell::new(self)) }

    pub fn len(&self) -> usize { self.x_data.len() }
    pub fn is_empty(&self) -> bool { self.x_data.is_empty() }

    pub fn has_id(&self, id: &str) -> bool { self.id.as_deref() == Some(id) }

    /// Replace raw data wholesale and mark the series for reprocessing.
    pub fn set_values(&mut self, x_data: Vec<f64>, y_data: Vec<PointValue>) {
        self.x_data = x_data;
        self.y_data = y_data;
        self.is_dirty = true;
        self.is_dirty_data = true;
    }

    pub fn push(&mut self, x: f64, y: PointValue) {
        self.x_data.push(x);
        self.y_data.push(y);
        self.is_dirty = true;
        self.is_dirty_data = true;
    }

    /// Scalar view of the y values, reading tuple field `index`.
    pub fn y_field(&self, index: usize) -> Vec<f64> {
        self.y_data.iter().map(|v| v.field(index)).collect()
    }

    /// Drop all data and cached positions.
    pub fn clear(&mut self) {
        self.x_data.clear();
        self.y_data.clear();
        self.points.clear();
        self.processed_x_data = None;
        self.is_dirty = true;
    }

    /// Parent resolved by `Chart::link_series` or a binding, if still alive.
    pub fn parent(&self) -> Option<SeriesRef> {
        self.linked_parent.as_ref().and_then(Weak::upgrade)
    }
}
