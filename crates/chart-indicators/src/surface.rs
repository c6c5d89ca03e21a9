// File: crates/chart-indicators/src/surface.rs
// Summary: What an indicator needs from the chart hosting it: series lookup, events, repaint.

use std::cell::Cell;
use std::rc::Rc;

use crate::events::EventHub;
use crate::series::SeriesRef;

pub trait Surface {
    fn series_by_id(&self, id: &str) -> Option<SeriesRef>;
    fn events(&self) -> &EventHub;
    fn redraw_handle(&self) -> RedrawHandle;
}

/// Shared repaint request counter. Bindings request, the chart consumes on redraw.
#[derive(Clone, Debug, Default)]
pub struct RedrawHandle(Rc<Cell<u32>>);

impl RedrawHandle {
    pub fn new() -> Self { Self::default() }

    pub fn request(&self) { self.0.set(self.0.get().saturating_add(1)); }

    pub fn is_requested(&self) -> bool { self.0.get() > 0 }

    /// Clear the counter, returning how many requests were folded into this repaint.
    pub fn take(&self) -> u32 { self.0.replace(0) }
}
