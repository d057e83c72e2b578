//! Adaptive navigation layout — decides which prefix of the nav links stays
//! inline and which trailing set collapses behind the "⋯ More" affordance.
//!
//! The partition is a pure function of measured item widths and the container
//! width, recomputed every frame. Resize, reorders, and role changes all fall
//! out of that for free; there is no cached layout state to invalidate.

/// Terminal narrower than this renders the mobile navigation surfaces.
pub const MOBILE_BREAKPOINT: u16 = 80;

/// Cells between adjacent nav items.
pub const NAV_GAP: u16 = 4;

/// Bottom bar shows at most this many links inline before folding into More.
pub const BOTTOM_BAR_MAX_INLINE: usize = 5;

/// How many links the bottom bar keeps inline once it folds.
pub const BOTTOM_BAR_INLINE_COUNT: usize = 4;

/// Split point between inline items and the overflow group.
///
/// Always a prefix split: `visible_count` leading items are inline, the rest
/// overflow. The overflow group has length 0 or at least 2, never exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub visible_count: usize,
    pub overflow_count: usize,
}

impl Partition {
    fn all_visible(count: usize) -> Self {
        Self {
            visible_count: count,
            overflow_count: 0,
        }
    }

    pub fn has_overflow(self) -> bool {
        self.overflow_count > 0
    }

    /// Split a parallel slice of items at the partition point.
    pub fn split<'a, T>(self, items: &'a [T]) -> (&'a [T], &'a [T]) {
        let at = self.visible_count.min(items.len());
        items.split_at(at)
    }
}

/// Partition measured item widths against a container width.
///
/// If every item fits with gaps and no affordance, everything is visible.
/// Otherwise items accumulate left to right into the budget that remains
/// after reserving the affordance and its gap; a greedy result of exactly one
/// overflow item pulls one more visible item over, since a More menu holding
/// a single entry costs more width than it saves.
///
/// A zero-width container or empty width list fails open: all items visible.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn partition(widths: &[u16], container: u16, affordance: u16, gap: u16) -> Partition {
    if widths.is_empty() || container == 0 {
        return Partition::all_visible(widths.len());
    }

    let gap = u32::from(gap);
    let total: u32 = widths.iter().map(|&w| u32::from(w)).sum::<u32>()
        + gap * (widths.len() as u32 - 1);
    if total <= u32::from(container) {
        return Partition::all_visible(widths.len());
    }

    let available = u32::from(container).saturating_sub(u32::from(affordance) + gap);
    let mut used = 0u32;
    let mut visible_count = 0usize;
    for (i, &w) in widths.iter().enumerate() {
        let width_with_gap = if i > 0 { u32::from(w) + gap } else { u32::from(w) };
        if used + width_with_gap > available {
            break;
        }
        used += width_with_gap;
        visible_count += 1;
    }

    let mut overflow_count = widths.len() - visible_count;
    if overflow_count == 1 && visible_count > 0 {
        visible_count -= 1;
        overflow_count += 1;
    }

    Partition {
        visible_count,
        overflow_count,
    }
}

/// Fixed partition for the bottom bar: more than
/// [`BOTTOM_BAR_MAX_INLINE`] links folds to the first
/// [`BOTTOM_BAR_INLINE_COUNT`] plus More, regardless of widths.
pub fn bottom_bar_partition(count: usize) -> Partition {
    if count > BOTTOM_BAR_MAX_INLINE {
        Partition {
            visible_count: BOTTOM_BAR_INLINE_COUNT,
            overflow_count: count - BOTTOM_BAR_INLINE_COUNT,
        }
    } else {
        Partition::all_visible(count)
    }
}

/// Horizontal `(x, width)` span of each item laid out from `origin` with
/// `gap` cells between neighbors. Used for mouse hit-testing and for the
/// drop-side midpoint while dragging.
pub fn item_spans(widths: &[u16], origin: u16, gap: u16) -> Vec<(u16, u16)> {
    let mut x = origin;
    let mut spans = Vec::with_capacity(widths.len());
    for &w in widths {
        spans.push((x, w));
        x = x.saturating_add(w).saturating_add(gap);
    }
    spans
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn everything_visible_when_it_fits() {
        // 3·80 + 2·4 = 248 fits in 300 with no affordance reserved.
        let p = partition(&[80, 80, 80], 300, 60, 4);
        assert_eq!(p, Partition::all_visible(3));
    }

    #[test]
    fn exact_fit_needs_no_affordance() {
        // 2·100 + 4 = 204 == container.
        let p = partition(&[100, 100], 204, 60, 4);
        assert_eq!(p, Partition::all_visible(2));
    }

    #[test]
    fn six_wide_links_split_four_and_two() {
        // 6·80 + 5·4 = 500 > 400, budget 400 − 64 = 336, greedy stops at
        // four items (332).
        let p = partition(&[80; 6], 400, 60, 4);
        assert_eq!(p.visible_count, 4);
        assert_eq!(p.overflow_count, 2);
    }

    #[test]
    fn overflow_group_is_never_a_singleton() {
        // 5·80 + 4·4 = 416 > 400; greedy alone would leave one item over.
        let p = partition(&[80; 5], 400, 60, 4);
        assert_eq!(p.visible_count, 3);
        assert_eq!(p.overflow_count, 2);
    }

    #[test]
    fn zero_width_container_fails_open() {
        let p = partition(&[80, 80, 80], 0, 60, 4);
        assert_eq!(p, Partition::all_visible(3));
    }

    #[test]
    fn empty_input_fails_open() {
        let p = partition(&[], 400, 60, 4);
        assert_eq!(p, Partition::all_visible(0));
    }

    #[test]
    fn single_oversized_item_overflows_alone() {
        // One item that cannot fit: nothing visible, and the singleton rule
        // does not apply with an empty visible set.
        let p = partition(&[500], 400, 60, 4);
        assert_eq!(p.visible_count, 0);
        assert_eq!(p.overflow_count, 1);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn visible_set_always_fits_the_budget() {
        let cases: &[(&[u16], u16)] = &[
            (&[80, 80, 80, 80, 80, 80], 400),
            (&[40, 90, 30, 120, 55], 250),
            (&[10, 10, 10], 35),
            (&[200, 10, 10, 10], 100),
            (&[64, 64, 64, 64], 500),
        ];
        for &(widths, container) in cases {
            let p = partition(widths, container, 60, 4);
            let visible = &widths[..p.visible_count];
            let used: u32 = visible.iter().map(|&w| u32::from(w)).sum::<u32>()
                + 4 * visible.len().saturating_sub(1) as u32;
            let budget = if p.has_overflow() {
                u32::from(container).saturating_sub(64)
            } else {
                u32::from(container)
            };
            assert!(used <= budget, "widths {widths:?} in {container}");
            assert_ne!(p.overflow_count, 1, "widths {widths:?} in {container}");
        }
    }

    #[test]
    fn bottom_bar_keeps_five_inline() {
        assert_eq!(bottom_bar_partition(5), Partition::all_visible(5));
        assert_eq!(bottom_bar_partition(3), Partition::all_visible(3));
    }

    #[test]
    fn bottom_bar_folds_past_five() {
        let p = bottom_bar_partition(7);
        assert_eq!(p.visible_count, 4);
        assert_eq!(p.overflow_count, 3);

        let p = bottom_bar_partition(6);
        assert_eq!(p.visible_count, 4);
        assert_eq!(p.overflow_count, 2);
    }

    #[test]
    fn split_respects_partition_point() {
        let items = ["a", "b", "c", "d"];
        let p = Partition {
            visible_count: 3,
            overflow_count: 1,
        };
        let (visible, overflow) = p.split(&items);
        assert_eq!(visible, &["a", "b", "c"]);
        assert_eq!(overflow, &["d"]);
    }

    #[test]
    fn item_spans_advance_by_width_plus_gap() {
        let spans = item_spans(&[10, 6, 8], 2, 4);
        assert_eq!(spans, vec![(2, 10), (16, 6), (26, 8)]);
    }
}
