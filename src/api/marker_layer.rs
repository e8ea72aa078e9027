use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{DataPoint, MarkerId, PlotScales, Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverTracker, HoverTransition, HoverTransitions};
use crate::marker::{ChartMarker, MarkerStyle};
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::MarkerLayerConfig;

/// Exclusive owner of a set of chart markers.
///
/// `MarkerLayer` projects sample values into canvas coordinates, routes
/// pointer positions into per-marker enter/leave events, and hands the
/// resulting frame to a renderer. Markers live exactly as long as the layer
/// holds them: `remove_marker` and `clear` are the only way they go away.
/// Draw order is insertion order.
pub struct MarkerLayer<R: Renderer> {
    renderer: R,
    viewport: Viewport,
    scales: PlotScales,
    default_style: MarkerStyle,
    markers: IndexMap<MarkerId, ChartMarker>,
    next_id: u64,
    hover: HoverTracker,
    repaint_pending: bool,
}

impl<R: Renderer> MarkerLayer<R> {
    pub fn new(renderer: R, config: MarkerLayerConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            viewport: config.viewport,
            scales: config.scales()?,
            default_style: config.marker_style,
            markers: IndexMap::new(),
            next_id: 1,
            hover: HoverTracker::new(),
            repaint_pending: true,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizes the canvas and re-projects every marker.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport == self.viewport {
            return Ok(());
        }
        self.reproject(viewport, self.scales)
    }

    #[must_use]
    pub fn scales(&self) -> PlotScales {
        self.scales
    }

    /// Replaces the axis mapping and re-projects every marker.
    pub fn set_scales(&mut self, scales: PlotScales) -> ChartResult<()> {
        self.reproject(self.viewport, scales)
    }

    pub fn set_domains(&mut self, x_domain: (f64, f64), y_domain: (f64, f64)) -> ChartResult<()> {
        self.set_scales(PlotScales::new(x_domain, y_domain)?)
    }

    #[must_use]
    pub fn default_style(&self) -> MarkerStyle {
        self.default_style
    }

    /// Style for markers added later; existing markers keep their look.
    pub fn set_default_style(&mut self, style: MarkerStyle) -> ChartResult<()> {
        self.default_style = style.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn add_marker(&mut self, x: f64, y: f64) -> ChartResult<MarkerId> {
        let style = self.default_style;
        self.add_marker_with_style(DataPoint::new(x, y), &style)
    }

    pub fn add_marker_with_style(
        &mut self,
        value: DataPoint,
        style: &MarkerStyle,
    ) -> ChartResult<MarkerId> {
        let style = style.validate()?;
        let coordinate = self.scales.project(value, self.viewport)?;
        let mut marker = ChartMarker::from_style(value, &style);
        marker.set_coordinate(coordinate);
        marker.take_repaint_request();

        let id = MarkerId::new(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, marker);
        trace!(marker = id.raw(), count = self.markers.len(), "add marker");

        self.repaint_pending = true;
        self.refresh_hover();
        Ok(id)
    }

    /// Replaces a marker's sample and moves it to the matching coordinate.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn set_marker_value(&mut self, id: MarkerId, x: f64, y: f64) -> ChartResult<bool> {
        let value = DataPoint::new(x, y);
        let coordinate = self.scales.project(value, self.viewport)?;
        let Some(marker) = self.markers.get_mut(&id) else {
            return Ok(false);
        };
        marker.set_value(x, y);
        marker.set_coordinate(coordinate);
        marker.take_repaint_request();

        self.repaint_pending = true;
        self.refresh_hover();
        Ok(true)
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&ChartMarker> {
        self.markers.get(&id)
    }

    /// Mutable access for style tweaks. Coordinates are owned by the layer
    /// and get overwritten on the next re-projection.
    ///
    /// Hover is re-evaluated against the marker's new box when the returned
    /// guard drops, so resizing under a resting cursor hovers or unhovers the
    /// marker and direct `on_pointer_enter`/`on_pointer_leave` calls are
    /// reconciled with the pointer.
    pub fn marker_mut(&mut self, id: MarkerId) -> Option<MarkerMut<'_, R>> {
        let index = self.markers.get_index_of(&id)?;
        Some(MarkerMut {
            layer: self,
            id,
            index,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &ChartMarker)> {
        self.markers.iter().map(|(id, marker)| (*id, marker))
    }

    pub fn hovered_markers(&self) -> impl Iterator<Item = (MarkerId, &ChartMarker)> {
        self.markers().filter(|(_, marker)| marker.is_hovered())
    }

    /// Topmost marker whose hover box contains `point`.
    #[must_use]
    pub fn marker_at(&self, point: Point) -> Option<MarkerId> {
        self.markers
            .iter()
            .rev()
            .find(|(_, marker)| marker.hit_test(point))
            .map(|(id, _)| *id)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Option<ChartMarker> {
        let marker = self.markers.shift_remove(&id)?;
        self.hover.forget(id);
        self.repaint_pending = true;
        trace!(marker = id.raw(), count = self.markers.len(), "remove marker");
        Some(marker)
    }

    /// Drops every marker and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.markers.len();
        self.markers.clear();
        self.hover.clear();
        self.repaint_pending = true;
        debug!(removed, "clear marker layer");
        removed
    }

    /// Feeds a pointer position in canvas pixels.
    ///
    /// Returns `true` when any marker changed hover state and the host should
    /// schedule a repaint.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        let hits: SmallVec<[MarkerId; 4]> = self
            .markers
            .iter()
            .filter(|(_, marker)| marker.hit_test(point))
            .map(|(id, _)| *id)
            .collect();
        let transitions = self.hover.on_pointer_move(point, hits);
        self.apply_hover_transitions(transitions)
    }

    /// The pointer left the canvas: every hovered marker returns to normal.
    pub fn pointer_leave(&mut self) -> bool {
        let transitions = self.hover.on_pointer_leave();
        self.apply_hover_transitions(transitions)
    }

    #[must_use]
    pub fn needs_repaint(&self) -> bool {
        self.repaint_pending
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for marker in self.markers.values() {
            marker.draw(&mut frame);
        }
        frame
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.repaint_pending = false;
        trace!(
            markers = self.markers.len(),
            commands = frame.commands.len(),
            "render marker layer"
        );
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// Used by GTK draw callbacks while keeping the renderer implementation
    /// decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.repaint_pending = false;
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn reproject(&mut self, viewport: Viewport, scales: PlotScales) -> ChartResult<()> {
        let coordinates = self
            .markers
            .values()
            .map(|marker| scales.project(marker.value(), viewport))
            .collect::<ChartResult<Vec<Point>>>()?;

        for (marker, coordinate) in self.markers.values_mut().zip(coordinates) {
            marker.set_coordinate(coordinate);
            marker.take_repaint_request();
        }
        self.viewport = viewport;
        self.scales = scales;
        debug!(
            width = viewport.width,
            height = viewport.height,
            markers = self.markers.len(),
            "re-project markers"
        );

        self.repaint_pending = true;
        self.refresh_hover();
        Ok(())
    }

    /// Re-runs hit-testing at the last cursor position after markers moved.
    fn refresh_hover(&mut self) {
        if let Some(cursor) = self.hover.cursor() {
            self.pointer_move(cursor.x, cursor.y);
        }
    }

    /// Brings one edited marker back in line with the pointer.
    fn settle_marker(&mut self, id: MarkerId) {
        self.refresh_hover();

        let tracked = self.hover.is_hovered(id);
        let Some(marker) = self.markers.get_mut(&id) else {
            return;
        };
        if marker.is_hovered() != tracked {
            trace!(marker = id.raw(), hovered = tracked, "resync marker hover");
            if tracked {
                marker.on_pointer_enter();
            } else {
                marker.on_pointer_leave();
            }
        }
        self.repaint_pending |= marker.take_repaint_request();
    }

    fn apply_hover_transitions(&mut self, transitions: HoverTransitions) -> bool {
        let mut repaint = false;
        for transition in transitions {
            let (id, entered) = match transition {
                HoverTransition::Entered(id) => (id, true),
                HoverTransition::Left(id) => (id, false),
            };
            let Some(marker) = self.markers.get_mut(&id) else {
                continue;
            };
            if entered {
                marker.on_pointer_enter();
            } else {
                marker.on_pointer_leave();
            }
            trace!(marker = id.raw(), entered, "marker hover changed");
            repaint |= marker.take_repaint_request();
        }
        self.repaint_pending |= repaint;
        repaint
    }
}

/// Mutable handle to one marker of a [`MarkerLayer`].
///
/// Dropping the handle re-runs hit-testing at the last cursor position.
pub struct MarkerMut<'a, R: Renderer> {
    layer: &'a mut MarkerLayer<R>,
    id: MarkerId,
    index: usize,
}

impl<R: Renderer> MarkerMut<'_, R> {
    #[must_use]
    pub fn id(&self) -> MarkerId {
        self.id
    }
}

impl<R: Renderer> Deref for MarkerMut<'_, R> {
    type Target = ChartMarker;

    fn deref(&self) -> &ChartMarker {
        &self.layer.markers[self.index]
    }
}

impl<R: Renderer> DerefMut for MarkerMut<'_, R> {
    fn deref_mut(&mut self) -> &mut ChartMarker {
        &mut self.layer.markers[self.index]
    }
}

impl<R: Renderer> Drop for MarkerMut<'_, R> {
    fn drop(&mut self) {
        self.layer.settle_marker(self.id);
    }
}
