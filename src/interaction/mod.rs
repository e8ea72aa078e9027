use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{MarkerId, Point};

/// Presentational hover state of a single marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Normal,
    Hovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTransition {
    Entered(MarkerId),
    Left(MarkerId),
}

pub type HoverTransitions = SmallVec<[HoverTransition; 4]>;

/// Turns raw pointer positions into per-marker enter/leave events.
///
/// This plays the part of the host toolkit's hit-testing: the owner passes
/// the ids whose hover boxes contain the pointer and applies the returned
/// transitions to its markers. Leaves are always reported before enters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverTracker {
    cursor: Option<Point>,
    hovered: Vec<MarkerId>,
}

impl HoverTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position, `None` while the pointer is outside the surface.
    #[must_use]
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(&self) -> &[MarkerId] {
        &self.hovered
    }

    #[must_use]
    pub fn is_hovered(&self, id: MarkerId) -> bool {
        self.hovered.contains(&id)
    }

    pub fn on_pointer_move<I>(&mut self, point: Point, hits: I) -> HoverTransitions
    where
        I: IntoIterator<Item = MarkerId>,
    {
        self.cursor = Some(point);

        let mut next: Vec<MarkerId> = hits.into_iter().collect();
        next.sort_unstable();
        next.dedup();

        let mut transitions = HoverTransitions::new();
        transitions.extend(
            self.hovered
                .iter()
                .filter(|id| next.binary_search(id).is_err())
                .map(|id| HoverTransition::Left(*id)),
        );
        transitions.extend(
            next.iter()
                .filter(|id| self.hovered.binary_search(id).is_err())
                .map(|id| HoverTransition::Entered(*id)),
        );

        self.hovered = next;
        transitions
    }

    pub fn on_pointer_leave(&mut self) -> HoverTransitions {
        self.cursor = None;
        self.hovered.drain(..).map(HoverTransition::Left).collect()
    }

    /// Drops `id` without emitting a transition, for markers that no longer exist.
    pub fn forget(&mut self, id: MarkerId) {
        self.hovered.retain(|hovered| *hovered != id);
    }

    pub fn clear(&mut self) {
        self.hovered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverTracker, HoverTransition};
    use crate::core::{MarkerId, Point};

    #[test]
    fn moving_between_markers_reports_leave_then_enter() {
        let mut tracker = HoverTracker::new();
        let a = MarkerId::new(1);
        let b = MarkerId::new(2);

        let first = tracker.on_pointer_move(Point::new(0.0, 0.0), [a]);
        assert_eq!(first.as_slice(), &[HoverTransition::Entered(a)]);

        let second = tracker.on_pointer_move(Point::new(5.0, 0.0), [b]);
        assert_eq!(
            second.as_slice(),
            &[HoverTransition::Left(a), HoverTransition::Entered(b)]
        );
    }

    #[test]
    fn staying_inside_reports_nothing() {
        let mut tracker = HoverTracker::new();
        let a = MarkerId::new(1);
        tracker.on_pointer_move(Point::new(0.0, 0.0), [a]);
        assert!(tracker.on_pointer_move(Point::new(1.0, 1.0), [a, a]).is_empty());
        assert!(tracker.is_hovered(a));
    }

    #[test]
    fn pointer_leave_releases_everything() {
        let mut tracker = HoverTracker::new();
        let ids = [MarkerId::new(3), MarkerId::new(1)];
        tracker.on_pointer_move(Point::new(0.0, 0.0), ids);

        let left = tracker.on_pointer_leave();
        assert_eq!(left.len(), 2);
        assert!(tracker.hovered().is_empty());
        assert_eq!(tracker.cursor(), None);
    }

    #[test]
    fn forget_is_silent() {
        let mut tracker = HoverTracker::new();
        let a = MarkerId::new(9);
        tracker.on_pointer_move(Point::new(0.0, 0.0), [a]);
        tracker.forget(a);
        assert!(tracker.on_pointer_leave().is_empty());
    }
}
