// File: crates/chart-indicators/src/registry.rs
// Summary: Registry mapping an indicator kind ("sma") to a factory building a boxed `Indicator`.

use std::collections::HashMap;

use crate::error::ChartError;
use crate::indicator::{Indicator, SeriesIndicator};
use crate::options::IndicatorOptions;
use crate::sma::Sma;

pub type IndicatorFactory = Box<dyn Fn(IndicatorOptions) -> Result<Box<dyn Indicator>, ChartError>>;

pub struct IndicatorRegistry {
    factories: HashMap<String, IndicatorFactory>,
}

impl IndicatorRegistry {
    /// Empty registry; see `with_defaults` for the built-in kinds.
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Registry with `"sma"` registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("sma", |options| {
            options.params.validate()?;
            Ok(Box::new(SeriesIndicator::new("sma", Sma, options)))
        });
        registry
    }

    /// Register (or replace) the factory for `kind`.
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(IndicatorOptions) -> Result<Box<dyn Indicator>, ChartError> + 'static,
    {
        self.factories.insert(kind.to_string(), Box::new(factory));
    }

    pub fn create(&self, kind: &str, options: IndicatorOptions) -> Result<Box<dyn Indicator>, ChartError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ChartError::UnknownKind(kind.to_string()))?;
        factory(options)
    }

    pub fn contains(&self, kind: &str) -> bool { self.factories.contains_key(kind) }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self { Self::with_defaults() }
}
