use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::prelude::*;
use tracing::warn;

use crate::api::MarkerLayer;
use crate::core::Viewport;
use crate::render::{CairoContextRenderer, Renderer};

/// Bridges a `MarkerLayer` to a GTK `DrawingArea`.
///
/// The draw callback resizes the layer to the allocated area and paints it;
/// a motion controller feeds pointer moves/leaves and queues a redraw only
/// when some marker changed hover state.
pub struct GtkMarkerArea<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    area: gtk::DrawingArea,
    layer: Rc<RefCell<MarkerLayer<R>>>,
}

impl<R> GtkMarkerArea<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    #[must_use]
    pub fn new(layer: MarkerLayer<R>) -> Self {
        let area = gtk::DrawingArea::new();
        let layer = Rc::new(RefCell::new(layer));

        {
            let layer = Rc::clone(&layer);
            area.set_draw_func(move |_area, context, width, height| {
                let viewport = Viewport::new(
                    u32::try_from(width).unwrap_or(0),
                    u32::try_from(height).unwrap_or(0),
                );
                let mut layer = layer.borrow_mut();
                if let Err(err) = layer.set_viewport(viewport) {
                    warn!(error = %err, "skipping marker draw for unusable allocation");
                    return;
                }
                if let Err(err) = layer.render_on_cairo_context(context) {
                    warn!(error = %err, "marker layer draw failed");
                }
            });
        }

        let motion = gtk::EventControllerMotion::new();
        {
            let layer = Rc::clone(&layer);
            let area = area.downgrade();
            motion.connect_motion(move |_controller, x, y| {
                let changed = layer.borrow_mut().pointer_move(x, y);
                if changed {
                    if let Some(area) = area.upgrade() {
                        area.queue_draw();
                    }
                }
            });
        }
        {
            let layer = Rc::clone(&layer);
            let area = area.downgrade();
            motion.connect_leave(move |_controller| {
                let changed = layer.borrow_mut().pointer_leave();
                if changed {
                    if let Some(area) = area.upgrade() {
                        area.queue_draw();
                    }
                }
            });
        }
        area.add_controller(motion);

        Self { area, layer }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    /// Shared handle for mutating markers from other GTK callbacks.
    /// Call `queue_redraw` afterwards.
    #[must_use]
    pub fn layer(&self) -> Rc<RefCell<MarkerLayer<R>>> {
        Rc::clone(&self.layer)
    }

    pub fn queue_redraw(&self) {
        if self.layer.borrow().needs_repaint() {
            self.area.queue_draw();
        }
    }
}
