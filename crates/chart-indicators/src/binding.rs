// File: crates/chart-indicators/src/binding.rs
// Summary: Binding lifecycle (Unbound -> Bound -> Destroyed) tying a derived series to its
// parent and recomputing it whenever the configured event fires.
// Notes:
// - The binding owns every `Subscription` it creates. Callbacks only hold a `Weak` to the
//   recalculation state, so a listener can never reach a destroyed binding.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::error::LinkError;
use crate::events::{EventTarget, Subscription, UPDATED_DATA};
use crate::indicator::Calculator;
use crate::options::IndicatorParams;
use crate::series::{PointValue, SeriesRef, WeakSeriesRef};
use crate::surface::{RedrawHandle, Surface};

/// What triggers a recompute: an event on the parent series itself, or on its x axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindTo {
    pub series: bool,
    pub event_name: String,
}

impl Default for BindTo {
    fn default() -> Self { Self { series: true, event_name: UPDATED_DATA.to_string() } }
}

impl BindTo {
    pub fn axis(event_name: impl Into<String>) -> Self {
        Self { series: false, event_name: event_name.into() }
    }
}

/// When the first compute happens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CalculateOn {
    /// Synchronously, inside `bind`.
    #[default]
    Init,
    /// On the first firing of this chart-level event; steady-state triggers take over after.
    Event(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
    Destroyed,
}

/// Everything a recompute needs. Shared with listeners through `Weak` only.
struct Link {
    parent: WeakSeriesRef,
    derived: SeriesRef,
    params: IndicatorParams,
    calculator: Rc<dyn Calculator>,
    bind_to_series: bool,
    redraw: RedrawHandle,
}

impl Link {
    fn recalc(&self) {
        let Some(parent) = self.parent.upgrade() else {
            debug!("parent series dropped, skipping recalc");
            return;
        };
        let values = match parent.try_borrow() {
            Ok(p) => self.calculator.values(&p.x_data, &p.y_data, &self.params),
            Err(_) => {
                warn!("parent series busy, skipping recalc");
                return;
            }
        };
        let Ok(mut derived) = self.derived.try_borrow_mut() else {
            warn!("derived series busy, skipping recalc");
            return;
        };

        match values {
            Some(v) => {
                trace!(points = v.len(), period = self.params.period, "recalculated");
                derived.points = v.points();
                derived.y_data = v.y_data.into_iter().map(PointValue::Scalar).collect();
                derived.x_data = v.x_data;
            }
            None => {
                trace!(period = self.params.period, "insufficient data");
                derived.x_data.clear();
                derived.y_data.clear();
                derived.points.clear();
            }
        }
        derived.is_dirty_data = false;
        // Cached positions describe the previous arrays.
        derived.processed_x_data = None;
        derived.is_dirty = true;
        drop(derived);

        if !self.bind_to_series {
            // Axis-driven updates bypass the parent's repaint request.
            self.redraw.request();
        }
    }
}

pub struct Binding {
    bind_to: BindTo,
    calculate_on: CalculateOn,
    calculator: Rc<dyn Calculator>,
    state: BindingState,
    subscriptions: Vec<Subscription>,
    link: Option<Rc<Link>>,
}

impl Binding {
    pub fn new(calculator: Rc<dyn Calculator>, bind_to: BindTo, calculate_on: CalculateOn) -> Self {
        Self {
            bind_to,
            calculate_on,
            calculator,
            state: BindingState::Unbound,
            subscriptions: Vec::new(),
            link: None,
        }
    }

    pub fn state(&self) -> BindingState { self.state }
    pub fn bind_to(&self) -> &BindTo { &self.bind_to }
    pub fn calculate_on(&self) -> &CalculateOn { &self.calculate_on }

    /// Subscriptions still registered with the hub.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.iter().filter(|s| s.is_active()).count()
    }

    /// Resolve `linked_to` on `surface`, subscribe, and run the first compute if configured
    /// for `Init`. On error nothing is subscribed and the binding stays `Unbound`.
    /// Binding an already bound or destroyed binding does nothing.
    pub fn bind(
        &mut self,
        surface: &dyn Surface,
        derived: SeriesRef,
        linked_to: Option<&str>,
        params: IndicatorParams,
    ) -> Result<(), LinkError> {
        if self.state != BindingState::Unbound {
            warn!(state = ?self.state, "bind called on a binding that is not unbound");
            return Ok(());
        }

        let parent = match resolve(surface, linked_to) {
            Ok(parent) => parent,
            Err(e) => {
                error!(error = %e, "indicator not bound");
                return Err(e);
            }
        };
        let parent_id = linked_to.unwrap_or_default().to_string();

        let target = if self.bind_to.series {
            EventTarget::Series(parent_id.clone())
        } else {
            EventTarget::Axis(parent.borrow().x_axis)
        };

        {
            let mut d = derived.borrow_mut();
            d.linked_to = Some(parent_id.clone());
            d.linked_parent = Some(Rc::downgrade(&parent));
        }

        let link = Rc::new(Link {
            parent: Rc::downgrade(&parent),
            derived,
            params,
            calculator: Rc::clone(&self.calculator),
            bind_to_series: self.bind_to.series,
            redraw: surface.redraw_handle(),
        });

        let events = surface.events();
        let steady = Rc::downgrade(&link);
        let first = Rc::downgrade(&link);
        self.subscriptions.push(events.subscribe(target, &self.bind_to.event_name, move || {
            recalc_weak(&steady)
        }));
        self.link = Some(link);
        self.state = BindingState::Bound;
        debug!(parent = %parent_id, event = %self.bind_to.event_name, "indicator bound");

        match &self.calculate_on {
            CalculateOn::Init => self.recalc(),
            CalculateOn::Event(name) => {
                self.subscriptions
                    .push(events.subscribe_once(EventTarget::Chart, name, move || recalc_weak(&first)));
            }
        }
        Ok(())
    }

    /// Full recompute from the parent's current data. No-op unless bound.
    pub fn recalc(&self) {
        match &self.link {
            Some(link) => link.recalc(),
            None => trace!(state = ?self.state, "recalc on inactive binding"),
        }
    }

    /// Cancel every subscription and drop the derived data. Idempotent; no-op when unbound.
    pub fn destroy(&mut self) {
        if self.state != BindingState::Bound {
            return;
        }
        let cancelled = self.subscriptions.drain(..).filter(|s| s.cancel()).count();
        if let Some(link) = self.link.take() {
            let mut d = link.derived.borrow_mut();
            d.clear();
            d.linked_parent = None;
        }
        self.state = BindingState::Destroyed;
        debug!(cancelled, "binding destroyed");
    }
}

fn resolve(surface: &dyn Surface, linked_to: Option<&str>) -> Result<SeriesRef, LinkError> {
    let id = linked_to.ok_or(LinkError::MissingLinkedTo)?;
    surface.series_by_id(id).ok_or_else(|| LinkError::ParentNotFound(id.to_string()))
}

fn recalc_weak(link: &Weak<Link>) {
    if let Some(link) = link.upgrade() {
        link.recalc();
    }
}
