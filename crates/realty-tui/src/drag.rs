//! Drag-reorder state machine for navigation links.
//!
//! Driven by abstract signals (`begin`, `hover_over`, `commit`, `cancel`)
//! so the same controller serves the header bar, the sidebar, the bottom
//! bar, and the settings list, and tests can feed it synthetic gestures
//! without a terminal. Mouse wiring lives in the app layer.
//!
//! The only durable side effect of a gesture is the reordered id list the
//! caller gets back from [`DragController::commit`]; everything else is
//! in-memory hover feedback.

use ratatui::layout::Rect;
use realty_core::NavLinkId;

/// Layout direction of the surface a drag is happening on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which side of the hovered target the dragged item will land on.
/// `Before` is left/top, `After` is right/bottom, per the surface axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSide {
    Before,
    After,
}

/// A completed drop: dragged item, hovered target, insertion side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub dragged: NavLinkId,
    pub target: NavLinkId,
    pub side: InsertSide,
}

#[derive(Debug, Default)]
pub struct DragController {
    dragged: Option<NavLinkId>,
    hover: Option<(NavLinkId, InsertSide)>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<NavLinkId> {
        self.dragged
    }

    pub fn hover(&self) -> Option<(NavLinkId, InsertSide)> {
        self.hover
    }

    /// Start dragging `id`. A begin while another drag is active cancels
    /// the prior gesture.
    pub fn begin(&mut self, id: NavLinkId) {
        self.dragged = Some(id);
        self.hover = None;
    }

    /// Pointer moved over `target` occupying `area`. Computes the insertion
    /// side from the midpoint along `axis` and records it as the pending
    /// drop position. Returns whether the hover state changed; re-entering
    /// the same `(target, side)` pair and hovering the dragged item itself
    /// are both no-ops.
    pub fn hover_over(
        &mut self,
        target: NavLinkId,
        pointer: (u16, u16),
        area: Rect,
        axis: Axis,
    ) -> bool {
        let Some(dragged) = self.dragged else {
            return false;
        };
        if dragged == target {
            return false;
        }

        let side = match axis {
            Axis::Horizontal => {
                let midpoint = area.x + area.width / 2;
                if pointer.0 < midpoint {
                    InsertSide::Before
                } else {
                    InsertSide::After
                }
            }
            Axis::Vertical => {
                let midpoint = area.y + area.height / 2;
                if pointer.1 < midpoint {
                    InsertSide::Before
                } else {
                    InsertSide::After
                }
            }
        };

        if self.hover == Some((target, side)) {
            return false;
        }
        self.hover = Some((target, side));
        true
    }

    /// Drop. Yields the pending [`DropEvent`] if a target was hovered; a
    /// drop with no hover is a cancellation. Idle afterwards either way.
    pub fn commit(&mut self) -> Option<DropEvent> {
        let result = match (self.dragged, self.hover) {
            (Some(dragged), Some((target, side))) => Some(DropEvent {
                dragged,
                target,
                side,
            }),
            _ => None,
        };
        self.cancel();
        result
    }

    /// Abort the gesture. Safe to call in any state.
    pub fn cancel(&mut self) {
        self.dragged = None;
        self.hover = None;
    }
}

/// Apply a drop to an ordered id list.
///
/// Indexes are taken on the full order. An `After` side targets one past
/// the hovered item, and removing the dragged item first shifts targets
/// after it down by one; both adjustments happen before the splice.
/// Returns `None` when the item would land where it already is, or when
/// either id is missing from the order.
pub fn apply_reorder(
    order: &[NavLinkId],
    dragged: NavLinkId,
    target: NavLinkId,
    side: InsertSide,
) -> Option<Vec<NavLinkId>> {
    let from = order.iter().position(|&id| id == dragged)?;
    let mut to = order.iter().position(|&id| id == target)?;

    if side == InsertSide::After {
        to += 1;
    }
    if from < to {
        to -= 1;
    }
    if from == to {
        return None;
    }

    let mut reordered = order.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Some(reordered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use NavLinkId::{Attendance, Calendar, Clients, Deals, Employees, Properties};

    fn area(x: u16, width: u16) -> Rect {
        Rect::new(x, 0, width, 1)
    }

    #[test]
    fn begin_sets_dragged_and_clears_hover() {
        let mut drag = DragController::new();
        drag.begin(Clients);
        assert!(drag.is_active());
        assert_eq!(drag.dragged(), Some(Clients));
        assert_eq!(drag.hover(), None);
    }

    #[test]
    fn begin_while_active_cancels_prior_gesture() {
        let mut drag = DragController::new();
        drag.begin(Clients);
        drag.hover_over(Deals, (14, 0), area(10, 8), Axis::Horizontal);
        assert!(drag.hover().is_some());

        drag.begin(Employees);
        assert_eq!(drag.dragged(), Some(Employees));
        assert_eq!(drag.hover(), None);
    }

    #[test]
    fn side_follows_the_midpoint_horizontally() {
        let mut drag = DragController::new();
        drag.begin(Clients);

        // Target spans columns 10..18, midpoint 14.
        assert!(drag.hover_over(Deals, (12, 0), area(10, 8), Axis::Horizontal));
        assert_eq!(drag.hover(), Some((Deals, InsertSide::Before)));

        assert!(drag.hover_over(Deals, (16, 0), area(10, 8), Axis::Horizontal));
        assert_eq!(drag.hover(), Some((Deals, InsertSide::After)));
    }

    #[test]
    fn side_follows_the_midpoint_vertically() {
        let mut drag = DragController::new();
        drag.begin(Clients);

        let target = Rect::new(0, 4, 20, 2);
        assert!(drag.hover_over(Deals, (5, 4), target, Axis::Vertical));
        assert_eq!(drag.hover(), Some((Deals, InsertSide::Before)));

        assert!(drag.hover_over(Deals, (5, 5), target, Axis::Vertical));
        assert_eq!(drag.hover(), Some((Deals, InsertSide::After)));
    }

    #[test]
    fn reentering_the_same_target_and_side_is_a_noop() {
        let mut drag = DragController::new();
        drag.begin(Clients);

        assert!(drag.hover_over(Deals, (12, 0), area(10, 8), Axis::Horizontal));
        assert!(!drag.hover_over(Deals, (13, 0), area(10, 8), Axis::Horizontal));
        assert_eq!(drag.hover(), Some((Deals, InsertSide::Before)));
    }

    #[test]
    fn hovering_the_dragged_item_is_ignored() {
        let mut drag = DragController::new();
        drag.begin(Clients);
        drag.hover_over(Deals, (16, 0), area(10, 8), Axis::Horizontal);

        assert!(!drag.hover_over(Clients, (3, 0), area(0, 8), Axis::Horizontal));
        // Prior hover stays pending.
        assert_eq!(drag.hover(), Some((Deals, InsertSide::After)));
    }

    #[test]
    fn hover_without_begin_does_nothing() {
        let mut drag = DragController::new();
        assert!(!drag.hover_over(Deals, (12, 0), area(10, 8), Axis::Horizontal));
        assert_eq!(drag.hover(), None);
    }

    #[test]
    fn commit_yields_the_pending_drop_and_goes_idle() {
        let mut drag = DragController::new();
        drag.begin(Clients);
        drag.hover_over(Deals, (16, 0), area(10, 8), Axis::Horizontal);

        let drop = drag.commit().unwrap();
        assert_eq!(
            drop,
            DropEvent {
                dragged: Clients,
                target: Deals,
                side: InsertSide::After,
            }
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn commit_without_hover_is_a_cancellation() {
        let mut drag = DragController::new();
        drag.begin(Clients);
        assert_eq!(drag.commit(), None);
        assert!(!drag.is_active());
    }

    #[test]
    fn cancel_resets_from_any_state() {
        let mut drag = DragController::new();
        drag.cancel();
        assert!(!drag.is_active());

        drag.begin(Clients);
        drag.hover_over(Deals, (12, 0), area(10, 8), Axis::Horizontal);
        drag.cancel();
        assert!(!drag.is_active());
        assert_eq!(drag.hover(), None);
    }

    // ── apply_reorder ────────────────────────────────────────────────

    #[test]
    fn drop_after_a_later_target_accounts_for_the_removal_shift() {
        // [A,B,C,D,E] drag B onto D, side after → [A,C,D,B,E].
        let order = [Properties, Clients, Deals, Employees, Attendance];
        let reordered = apply_reorder(&order, Clients, Employees, InsertSide::After).unwrap();
        assert_eq!(
            reordered,
            vec![Properties, Deals, Employees, Clients, Attendance]
        );
    }

    #[test]
    fn drop_before_an_earlier_target_needs_no_shift() {
        let order = [Properties, Clients, Deals, Employees, Attendance];
        let reordered = apply_reorder(&order, Employees, Clients, InsertSide::Before).unwrap();
        assert_eq!(
            reordered,
            vec![Properties, Employees, Clients, Deals, Attendance]
        );
    }

    #[test]
    fn reorder_table_covers_both_directions() {
        let order = [Properties, Clients, Deals, Employees, Attendance];
        let cases = [
            // (dragged, target, side, expected)
            (
                Properties,
                Deals,
                InsertSide::After,
                vec![Clients, Deals, Properties, Employees, Attendance],
            ),
            (
                Attendance,
                Properties,
                InsertSide::Before,
                vec![Attendance, Properties, Clients, Deals, Employees],
            ),
            (
                Deals,
                Attendance,
                InsertSide::After,
                vec![Properties, Clients, Employees, Attendance, Deals],
            ),
            (
                Deals,
                Properties,
                InsertSide::After,
                vec![Properties, Deals, Clients, Employees, Attendance],
            ),
        ];
        for (dragged, target, side, expected) in cases {
            assert_eq!(
                apply_reorder(&order, dragged, target, side).unwrap(),
                expected,
                "{dragged:?} onto {target:?} {side:?}"
            );
        }
    }

    #[test]
    fn dropping_where_the_item_already_sits_is_a_noop() {
        let order = [Properties, Clients, Deals];
        // Before its right neighbor or after its left neighbor: same slot.
        assert_eq!(apply_reorder(&order, Clients, Deals, InsertSide::Before), None);
        assert_eq!(
            apply_reorder(&order, Clients, Properties, InsertSide::After),
            None
        );
        // Degenerate self-target is also a no-op.
        assert_eq!(apply_reorder(&order, Clients, Clients, InsertSide::Before), None);
        assert_eq!(apply_reorder(&order, Clients, Clients, InsertSide::After), None);
    }

    #[test]
    fn unknown_ids_leave_the_order_untouched() {
        let order = [Properties, Clients, Deals];
        assert_eq!(
            apply_reorder(&order, Calendar, Clients, InsertSide::Before),
            None
        );
        assert_eq!(
            apply_reorder(&order, Clients, Calendar, InsertSide::After),
            None
        );
    }
}
