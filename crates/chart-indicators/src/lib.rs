// File: crates/chart-indicators/src/lib.rs
// Summary: Library entry point; exports indicator bindings, the SMA calculator and the
// approximation reducers.

pub mod approximation;
pub mod axis;
pub mod binding;
pub mod chart;
pub mod downsample;
pub mod error;
pub mod events;
pub mod indicator;
pub mod options;
pub mod registry;
pub mod series;
pub mod sma;
pub mod surface;

pub use approximation::{Approx, Approximation, Samples};
pub use axis::Axis;
pub use binding::{BindTo, Binding, BindingState, CalculateOn};
pub use chart::Chart;
pub use downsample::{aggregate_ohlc_buckets, group_ohlc, group_scalar, Grouped};
pub use error::{ChartError, LinkError};
pub use events::{EventHub, EventTarget, Subscription};
pub use indicator::{Calculator, Indicator, IndicatorValues, SeriesIndicator};
pub use options::{IndicatorOptions, IndicatorParams};
pub use registry::IndicatorRegistry;
pub use series::{Candle, PointValue, Series, SeriesRef, SeriesType};
pub use sma::{sma_values, Sma};
pub use surface::{RedrawHandle, Surface};
