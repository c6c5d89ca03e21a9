// File: crates/chart-indicators/src/indicator.rs
// Summary: Indicator traits (calculator + lifecycle) and the series-backed indicator that wires
// a calculator to a `Binding`.

use std::rc::Rc;

use crate::binding::{BindTo, Binding, BindingState, CalculateOn};
use crate::error::LinkError;
use crate::options::{IndicatorOptions, IndicatorParams};
use crate::series::{PointValue, Series, SeriesRef, SeriesType};
use crate::surface::Surface;

/// Derived x/y arrays produced by a calculator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorValues {
    pub x_data: Vec<f64>,
    pub y_data: Vec<f64>,
}

impl IndicatorValues {
    pub fn with_capacity(n: usize) -> Self {
        Self { x_data: Vec::with_capacity(n), y_data: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x_data.push(x);
        self.y_data.push(y);
    }

    pub fn len(&self) -> usize { self.x_data.len() }
    pub fn is_empty(&self) -> bool { self.x_data.is_empty() }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x_data.iter().copied().zip(self.y_data.iter().copied()).collect()
    }
}

/// Pure transform from a parent's raw arrays to derived values.
/// `None` means "not enough history yet", which is not an error.
pub trait Calculator {
    /// Short label used for the default series name, e.g. `"SMA"`.
    fn label(&self) -> &'static str;
    fn values(&self, x: &[f64], y: &[PointValue], params: &IndicatorParams) -> Option<IndicatorValues>;
}

/// Lifecycle shared by every indicator kind.
pub trait Indicator {
    fn kind(&self) -> &str;
    /// The derived series drawn for this indicator.
    fn series(&self) -> SeriesRef;
    fn options(&self) -> &IndicatorOptions;
    fn state(&self) -> BindingState;
    fn init(&mut self, surface: &dyn Surface) -> Result<(), LinkError>;
    fn recalc(&self);
    fn destroy(&mut self);
}

/// Indicator drawn as a line series, computed by a `Calculator` from its `linkedTo` parent.
pub struct SeriesIndicator {
    kind: String,
    options: IndicatorOptions,
    series: SeriesRef,
    binding: Binding,
}

impl SeriesIndicator {
    /// Recomputes on the parent's `updatedData`, first compute at bind time.
    pub fn new<C: Calculator + 'static>(kind: impl Into<String>, calculator: C, options: IndicatorOptions) -> Self {
        Self::with_trigger(kind, calculator, options, BindTo::default(), CalculateOn::Init)
    }

    pub fn with_trigger<C: Calculator + 'static>(
        kind: impl Into<String>,
        calculator: C,
        options: IndicatorOptions,
        bind_to: BindTo,
        calculate_on: CalculateOn,
    ) -> Self {
        let mut series = Series::new(SeriesType::Line).with_name(options.display_name(calculator.label()));
        series.id = options.id.clone();
        series.linked_to = options.linked_to.clone();
        Self {
            kind: kind.into(),
            options,
            series: series.into_ref(),
            binding: Binding::new(Rc::new(calculator), bind_to, calculate_on),
        }
    }

    pub fn binding(&self) -> &Binding { &self.binding }
}

impl Indicator for SeriesIndicator {
    fn kind(&self) -> &str { &self.kind }

    fn series(&self) -> SeriesRef { Rc::clone(&self.series) }

    fn options(&self) -> &IndicatorOptions { &self.options }

    fn state(&self) -> BindingState { self.binding.state() }

    fn init(&mut self, surface: &dyn Surface) -> Result<(), LinkError> {
        let linked_to = self.options.linked_to.clone();
        self.binding.bind(surface, Rc::clone(&self.series), linked_to.as_deref(), self.options.params)
    }

    fn recalc(&self) { self.binding.recalc(); }

    fn destroy(&mut self) { self.binding.destroy(); }
}
