// File: crates/chart-indicators/src/chart.rs
// Summary: Chart host: owns series, axes, the event hub and active indicators, and plays the
// rendering-surface role for indicator bindings (lookup, change events, repaint requests).

use std::rc::Rc;

use tracing::{debug, warn};

use crate::axis::Axis;
use crate::error::ChartError;
use crate::events::{EventHub, EventTarget, AFTER_SET_EXTREMES, RENDER, UPDATED_DATA};
use crate::indicator::Indicator;
use crate::options::IndicatorOptions;
use crate::registry::IndicatorRegistry;
use crate::series::{PointValue, Series, SeriesRef};
use crate::surface::{RedrawHandle, Surface};

pub struct Chart {
    series: Vec<SeriesRef>,
    pub x_axes: Vec<Axis>,
    pub y_axis: Axis,
    events: EventHub,
    registry: IndicatorRegistry,
    indicators: Vec<Box<dyn Indicator>>,
    redraw: RedrawHandle,
}

impl Chart {
    pub fn new() -> Self {
        Self::with_registry(IndicatorRegistry::with_defaults())
    }

    pub fn with_registry(registry: IndicatorRegistry) -> Self {
        Self {
            series: Vec::new(),
            x_axes: vec![Axis::default_x()],
            y_axis: Axis::default_y(),
            events: EventHub::new(),
            registry,
            indicators: Vec::new(),
            redraw: RedrawHandle::new(),
        }
    }

    pub fn registry_mut(&mut self) -> &mut IndicatorRegistry { &mut self.registry }

    pub fn add_series(&mut self, series: Series) -> SeriesRef {
        let series = series.into_ref();
        self.series.push(Rc::clone(&series));
        self.redraw.request();
        series
    }

    /// Add an x axis and return its index.
    pub fn add_x_axis(&mut self, axis: Axis) -> usize {
        self.x_axes.push(axis);
        self.x_axes.len() - 1
    }

    pub fn get(&self, id: &str) -> Option<SeriesRef> {
        self.series.iter().find(|s| s.borrow().has_id(id)).cloned()
    }

    pub fn series(&self) -> &[SeriesRef] { &self.series }

    pub fn indicators(&self) -> &[Box<dyn Indicator>] { &self.indicators }

    pub fn events(&self) -> &EventHub { &self.events }

    pub fn is_redraw_requested(&self) -> bool { self.redraw.is_requested() }

    /// Resolve every series' `linked_to` into a weak parent link.
    /// Returns the identifiers that could not be resolved.
    pub fn link_series(&mut self) -> Vec<String> {
        let mut unresolved = Vec::new();
        for s in &self.series {
            let Some(target) = s.borrow().linked_to.clone() else { continue };
            match self.get(&target) {
                Some(parent) if !Rc::ptr_eq(&parent, s) => {
                    s.borrow_mut().linked_parent = Some(Rc::downgrade(&parent));
                }
                _ => {
                    warn!(linked_to = %target, "linked series not found");
                    unresolved.push(target);
                }
            }
        }
        unresolved
    }

    /// Replace a series' raw data and notify its listeners.
    pub fn set_data(&mut self, id: &str, x_data: Vec<f64>, y_data: Vec<PointValue>) -> Result<(), ChartError> {
        let series = self.get(id).ok_or_else(|| ChartError::SeriesNotFound(id.to_string()))?;
        series.borrow_mut().set_values(x_data, y_data);
        self.data_changed(id);
        Ok(())
    }

    /// Append one point and notify the series' listeners.
    pub fn add_point(&mut self, id: &str, x: f64, y: impl Into<PointValue>) -> Result<(), ChartError> {
        let series = self.get(id).ok_or_else(|| ChartError::SeriesNotFound(id.to_string()))?;
        series.borrow_mut().push(x, y.into());
        self.data_changed(id);
        Ok(())
    }

    fn data_changed(&self, id: &str) {
        for s in &self.series {
            let mut s = s.borrow_mut();
            if s.linked_to.as_deref() == Some(id) {
                s.is_dirty = true;
                s.processed_x_data = None;
            }
        }
        self.redraw.request();
        self.events.fire(&EventTarget::Series(id.to_string()), UPDATED_DATA);
    }

    /// Change the visible range of x axis `axis` and notify its listeners.
    pub fn set_extremes(&mut self, axis: usize, min: f64, max: f64) -> Result<(), ChartError> {
        let a = self.x_axes.get_mut(axis).ok_or(ChartError::AxisNotFound(axis))?;
        a.set_extremes(min, max);
        self.redraw.request();
        self.events.fire(&EventTarget::Axis(axis), AFTER_SET_EXTREMES);
        Ok(())
    }

    /// Create an indicator of `kind`, bind it to its `linkedTo` parent and add its series.
    /// Any failure, including an `id` already taken by another series, leaves the chart untouched.
    pub fn add_indicator(&mut self, kind: &str, options: IndicatorOptions) -> Result<SeriesRef, ChartError> {
        if let Some(id) = options.id.as_deref() {
            if self.get(id).is_some() {
                return Err(ChartError::DuplicateId(id.to_string()));
            }
        }
        let mut indicator = self.registry.create(kind, options)?;
        self.link_series();
        indicator.init(&*self)?;
        let series = indicator.series();
        self.series.push(Rc::clone(&series));
        self.indicators.push(indicator);
        self.redraw.request();
        Ok(series)
    }

    /// Remove a series by identifier. Indicators are destroyed; indicators linked to the
    /// removed series go with it.
    pub fn remove_series(&mut self, id: &str) -> Result<(), ChartError> {
        let series = self.get(id).ok_or_else(|| ChartError::SeriesNotFound(id.to_string()))?;
        self.remove(&series);
        Ok(())
    }

    /// Remove a series by reference. Returns `false` if the chart does not own it.
    pub fn remove(&mut self, series: &SeriesRef) -> bool {
        let Some(pos) = self.series.iter().position(|s| Rc::ptr_eq(s, series)) else {
            warn!("remove: series not part of this chart");
            return false;
        };
        self.series.remove(pos);

        if let Some(i) = self.indicators.iter().position(|ind| Rc::ptr_eq(&ind.series(), series)) {
            let mut indicator = self.indicators.remove(i);
            indicator.destroy();
            debug!(kind = indicator.kind(), "indicator removed");
        }

        let id = series.borrow().id.clone();
        if let Some(id) = id {
            let linked: Vec<SeriesRef> = self
                .series
                .iter()
                .filter(|s| s.borrow().linked_to.as_deref() == Some(id.as_str()))
                .cloned()
                .collect();
            for child in &linked {
                self.remove(child);
            }
        }
        self.redraw.request();
        true
    }

    /// Repaint step: rebuild positional caches of dirty series, then fire `render`.
    /// Returns the number of series reprocessed.
    pub fn redraw(&mut self) -> usize {
        let requests = self.redraw.take();
        let mut repainted = 0;
        for s in &self.series {
            let mut s = s.borrow_mut();
            if s.is_dirty || s.processed_x_data.is_none() {
                s.processed_x_data = Some(s.x_data.clone());
                s.is_dirty = false;
                repainted += 1;
            }
        }
        debug!(repainted, requests, "redraw");
        self.events.fire(&EventTarget::Chart, RENDER);
        repainted
    }
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Surface for Chart {
    fn series_by_id(&self, id: &str) -> Option<SeriesRef> { self.get(id) }

    fn events(&self) -> &EventHub { &self.events }

    fn redraw_handle(&self) -> RedrawHandle { self.redraw.clone() }
}
