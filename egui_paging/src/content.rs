//! The paging content area: a full-width horizontal strip of pages the
//! user swipes between, one page per menu cell.

use crate::geometry;
use egui::{Rect, Sense, Ui, UiBuilder, pos2, vec2};

/// Events reported by [`PagingContentView`].
///
/// `ManualScroll` is only reported for user-driven motion (a drag and its
/// settling after release). Programmatic scrolls via
/// [`ContentState::scroll_to`] stay silent, so a host reacting to menu
/// selections can never be re-entered by its own command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentEvent {
    /// The strip sits `percent` of the way from page `index` toward
    /// `index + 1`. Always a complete report, never a delta; `percent` is
    /// clamped to `[0, 1]` before it is ever emitted.
    ManualScroll { index: usize, percent: f32 },
    /// A released drag committed to settling on `index`.
    WillFinishPaging { index: usize, animated: bool },
}

/// State behind a [`PagingContentView`]. The offset is kept in page units
/// so a window resize preserves the current page.
pub struct ContentState {
    page_count: usize,
    offset: f32,
    target: f32,
    page_width: f32,
    dragging: bool,
    settling: bool,
    programmatic: bool,
}

impl ContentState {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            offset: 0.0,
            target: 0.0,
            page_width: 1.0,
            dragging: false,
            settling: false,
            programmatic: false,
        }
    }

    pub fn number_of_items(&self) -> usize {
        self.page_count
    }

    /// The page the strip is on (or closest to, mid-motion).
    pub fn current_page(&self) -> usize {
        geometry::nearest_page(self.offset, self.page_count)
    }

    /// Left page index and the clamped percent of travel toward its right
    /// neighbor.
    pub fn progress(&self) -> (usize, f32) {
        geometry::page_progress(self.offset, self.page_count)
    }

    /// The page any in-flight settle or programmatic scroll is heading
    /// for (the current page when the strip is at rest).
    pub fn target_page(&self) -> usize {
        geometry::nearest_page(self.target, self.page_count)
    }

    /// Programmatic jump to a page. Never reports `ManualScroll`.
    pub fn scroll_to(&mut self, index: usize, animated: bool) {
        if self.page_count == 0 {
            return;
        }
        self.dragging = false;
        self.settling = false;
        self.target = index.min(self.page_count - 1) as f32;
        if animated {
            self.programmatic = true;
        } else {
            self.programmatic = false;
            self.offset = self.target;
        }
    }

    /// Whether a settle or programmatic scroll still has distance to cover.
    pub fn is_animating(&self) -> bool {
        !self.dragging
            && geometry::is_animating(self.offset, self.target, geometry::PAGE_SNAP_DISTANCE)
    }

    fn begin_drag(&mut self) {
        self.dragging = true;
        self.settling = false;
        self.programmatic = false;
    }

    /// Move the strip by a pointer delta in pixels. Returns whether the
    /// offset changed. Overscroll past either end is clamped away.
    fn drag_by(&mut self, dx_px: f32) -> bool {
        if !self.dragging || self.page_count == 0 {
            return false;
        }
        let max = (self.page_count - 1) as f32;
        let before = self.offset;
        self.offset = (self.offset - dx_px / self.page_width).clamp(0.0, max);
        (self.offset - before).abs() > f32::EPSILON
    }

    /// Finish a drag: pick the nearest page and start settling toward it.
    /// Returns the committed page.
    fn end_drag(&mut self) -> Option<usize> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        let page = geometry::nearest_page(self.offset, self.page_count);
        self.target = page as f32;
        self.settling = true;
        Some(page)
    }

    /// One frame of eased motion toward the target. Returns whether the
    /// offset changed.
    fn step_settle(&mut self) -> bool {
        if self.dragging || (!self.settling && !self.programmatic) {
            return false;
        }
        let before = self.offset;
        self.offset = geometry::ease_toward(
            self.offset,
            self.target,
            geometry::PAGE_SETTLE_EASING,
            geometry::PAGE_SNAP_DISTANCE,
        );
        if self.offset == self.target {
            self.settling = false;
            self.programmatic = false;
        }
        (self.offset - before).abs() > f32::EPSILON
    }

    /// True while the strip's motion originates from the user (drag or
    /// post-release settling) rather than from `scroll_to`.
    fn user_driven(&self) -> bool {
        self.dragging || self.settling
    }
}

/// The content widget. Borrows its [`ContentState`] for one frame.
pub struct PagingContentView<'a> {
    state: &'a mut ContentState,
}

impl<'a> PagingContentView<'a> {
    pub fn new(state: &'a mut ContentState) -> Self {
        Self { state }
    }

    /// Handle input, advance motion and draw the visible pages through
    /// `render_page`. Events are returned in the order they occurred.
    pub fn show(
        self,
        ui: &mut Ui,
        mut render_page: impl FnMut(&mut Ui, usize),
    ) -> Vec<ContentEvent> {
        let state = self.state;
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        state.page_width = rect.width().max(1.0);

        let mut events = Vec::new();
        let mut moved = false;

        if response.drag_started() {
            state.begin_drag();
        }
        if response.dragged() {
            moved |= state.drag_by(response.drag_delta().x);
        }
        if response.drag_stopped() {
            if let Some(page) = state.end_drag() {
                events.push(ContentEvent::WillFinishPaging {
                    index: page,
                    animated: true,
                });
            }
        }

        let user_motion = state.user_driven();
        moved |= state.step_settle();
        if moved && user_motion {
            let (index, percent) = state.progress();
            events.push(ContentEvent::ManualScroll { index, percent });
        }

        if state.dragging || state.is_animating() {
            ui.ctx().request_repaint();
        }

        // Draw the left page and, mid-transition, its right neighbor.
        let first = state.offset.floor() as usize;
        for page in first..(first + 2).min(state.page_count) {
            let x = rect.left() + (page as f32 - state.offset) * state.page_width;
            let page_rect =
                Rect::from_min_size(pos2(x, rect.top()), vec2(state.page_width, rect.height()));
            if !page_rect.intersects(rect) {
                continue;
            }
            let mut child = ui.new_child(UiBuilder::new().max_rect(page_rect));
            child.set_clip_rect(page_rect.intersect(rect));
            render_page(&mut child, page);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> ContentState {
        let mut state = ContentState::new(4);
        state.page_width = 100.0;
        state
    }

    #[test]
    fn drag_reports_left_index_and_percent() {
        let mut state = strip();
        state.begin_drag();
        assert!(state.drag_by(-60.0));
        assert_eq!(state.progress().0, 0);
        assert!((state.progress().1 - 0.6).abs() < 1e-5);
    }

    #[test]
    fn drag_clamps_at_both_ends() {
        let mut state = strip();
        state.begin_drag();
        // Pulling right on the first page goes nowhere.
        assert!(!state.drag_by(50.0));
        assert_eq!(state.progress(), (0, 0.0));

        state.offset = 3.0;
        // Pulling left on the last page goes nowhere either.
        assert!(!state.drag_by(-50.0));
        assert_eq!(state.progress(), (3, 0.0));
    }

    #[test]
    fn release_commits_nearest_page() {
        let mut state = strip();
        state.begin_drag();
        state.drag_by(-160.0);
        assert_eq!(state.end_drag(), Some(2));
        assert!(state.user_driven());
    }

    #[test]
    fn settling_after_release_stays_user_driven() {
        let mut state = strip();
        state.begin_drag();
        state.drag_by(-130.0);
        state.end_drag();
        let mut steps = 0;
        while state.is_animating() {
            assert!(state.user_driven());
            assert!(state.step_settle());
            steps += 1;
            assert!(steps < 200, "settle never converged");
        }
        state.step_settle();
        assert_eq!(state.progress(), (1, 0.0));
        assert!(!state.user_driven());
    }

    #[test]
    fn scroll_to_is_not_user_driven() {
        let mut state = strip();
        state.scroll_to(2, true);
        assert!(!state.user_driven());
        while state.is_animating() {
            state.step_settle();
            assert!(!state.user_driven());
        }
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn scroll_to_unanimated_jumps() {
        let mut state = strip();
        state.scroll_to(3, false);
        assert_eq!(state.progress(), (3, 0.0));
        assert!(!state.is_animating());
    }

    #[test]
    fn scroll_to_clamps_index() {
        let mut state = strip();
        state.scroll_to(9, false);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn scroll_to_cancels_settling() {
        let mut state = strip();
        state.begin_drag();
        state.drag_by(-130.0);
        state.end_drag();
        state.scroll_to(0, true);
        assert!(!state.user_driven());
    }

    #[test]
    fn drag_during_programmatic_scroll_takes_over() {
        let mut state = strip();
        state.scroll_to(3, true);
        state.step_settle();
        state.begin_drag();
        assert!(state.user_driven());
        assert!(!state.is_animating() || state.dragging);
    }

    #[test]
    fn empty_strip_is_inert() {
        let mut state = ContentState::new(0);
        state.begin_drag();
        assert!(!state.drag_by(-50.0));
        state.scroll_to(1, false);
        assert_eq!(state.progress(), (0, 0.0));
    }
}
