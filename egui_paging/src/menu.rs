//! The paging menu: a horizontally scrollable strip of selectable tab
//! cells with an underline indicator.

use crate::geometry;
use egui::{Align2, Color32, FontId, Rect, Sense, Ui, pos2, vec2};

/// Measured geometry of one menu cell. Produced by [`PagingMenuView`]
/// during layout; absent (the state holds no layouts) until the strip has
/// been laid out at least once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Left edge in strip coordinates.
    pub x: f32,
    /// Full cell width (label plus horizontal padding).
    pub width: f32,
    /// Measured label width; the underline tracks this, not the cell.
    pub label_width: f32,
}

impl CellLayout {
    fn label_origin(&self) -> f32 {
        self.x + (self.width - self.label_width) / 2.0
    }
}

/// The underline that tracks the focused cell. Position and width live in
/// strip coordinates; the host writes the width, the menu positions x.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FocusIndicator {
    pub x: f32,
    pub width: f32,
}

/// Emitted when the user taps a cell that is not already focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Selected { page: usize, previous: usize },
}

/// Visual parameters for the menu strip.
#[derive(Debug, Clone)]
pub struct MenuStyle {
    pub height: f32,
    pub font_size: f32,
    pub cell_padding_x: f32,
    pub underline_height: f32,
    pub background: Color32,
    pub text_color: Color32,
    pub selected_text_color: Color32,
    pub underline_color: Color32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            height: 40.0,
            font_size: 14.0,
            cell_padding_x: 18.0,
            underline_height: 3.0,
            background: Color32::from_rgb(30, 30, 30),
            text_color: Color32::from_rgb(150, 150, 150),
            selected_text_color: Color32::from_rgb(235, 235, 235),
            underline_color: Color32::from_rgb(255, 149, 0),
        }
    }
}

/// State behind a [`PagingMenuView`]. Owns the selection flags, the
/// measured cell layout and the viewport scroll position.
pub struct MenuState {
    labels: Vec<String>,
    selected: Vec<bool>,
    focused_index: usize,
    cells: Vec<CellLayout>,
    viewport_width: f32,
    scroll_offset: f32,
    target_offset: f32,
    indicator: FocusIndicator,
}

impl MenuState {
    pub fn new(labels: Vec<String>) -> Self {
        let count = labels.len();
        Self {
            labels,
            selected: vec![false; count],
            focused_index: 0,
            cells: Vec::new(),
            viewport_width: 0.0,
            scroll_offset: 0.0,
            target_offset: 0.0,
            indicator: FocusIndicator::default(),
        }
    }

    pub fn number_of_items(&self) -> usize {
        self.labels.len()
    }

    /// Whether the strip has been measured yet. Cell lookups return `None`
    /// until the first frame lays it out.
    pub fn is_laid_out(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Full cell width at `index`, if laid out and in range.
    pub fn cell_width(&self, index: usize) -> Option<f32> {
        self.cells.get(index).map(|c| c.width)
    }

    /// Measured label width at `index`. The underline interpolates label
    /// widths, not cell widths.
    pub fn label_width(&self, index: usize) -> Option<f32> {
        self.cells.get(index).map(|c| c.label_width)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Set one cell's selected flag. Out-of-range indices are ignored, so
    /// callers can blindly address `index + 1` at the strip's end.
    pub fn set_cell_selected(&mut self, index: usize, selected: bool) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = selected;
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.fill(false);
    }

    /// The cell most recently selected by tap or host command.
    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn indicator(&self) -> FocusIndicator {
        self.indicator
    }

    /// Write the underline width. The host computes this; the menu never
    /// changes the width on its own.
    pub fn set_indicator_width(&mut self, width: f32) {
        self.indicator.width = width;
    }

    /// Position the underline and the viewport for a blend of `percent`
    /// between cell `index` and its right neighbor, then reveal the
    /// blended cell span. `animated` eases the viewport over the next
    /// frames; a live drag passes `false` and the viewport jumps.
    ///
    /// No-op until the strip is laid out.
    pub fn scroll_viewport(&mut self, index: usize, percent: f32, animated: bool) {
        let Some(left) = self.cells.get(index).copied() else {
            return;
        };
        self.focused_index = index;

        let (span, label_x) = match self.cells.get(index + 1).copied() {
            Some(right) => (
                (
                    geometry::lerp(left.x, right.x, percent),
                    geometry::lerp(left.width, right.width, percent),
                ),
                geometry::lerp(left.label_origin(), right.label_origin(), percent),
            ),
            None => ((left.x, left.width), left.label_origin()),
        };
        self.indicator.x = label_x;

        let total = geometry::strip_width(&self.spans());
        let target = geometry::reveal_target(span, self.target_offset, self.viewport_width, total);
        self.target_offset = target;
        if !animated {
            self.scroll_offset = target;
        }
    }

    /// Whether the viewport scroll still has distance to cover.
    pub fn is_animating(&self) -> bool {
        geometry::is_animating(
            self.scroll_offset,
            self.target_offset,
            geometry::MENU_SNAP_DISTANCE,
        )
    }

    /// Replace the measured layout. Normally called by [`PagingMenuView`]
    /// each frame; hosts only call this directly in tests or when driving
    /// the strip headless.
    pub fn set_layout(&mut self, cells: Vec<CellLayout>, viewport_width: f32) {
        self.cells = cells;
        self.viewport_width = viewport_width;
    }

    fn spans(&self) -> Vec<(f32, f32)> {
        self.cells.iter().map(|c| (c.x, c.width)).collect()
    }

    fn step_scroll(&mut self) {
        self.scroll_offset = geometry::ease_toward(
            self.scroll_offset,
            self.target_offset,
            geometry::MENU_SCROLL_EASING,
            geometry::MENU_SNAP_DISTANCE,
        );
    }

    fn cell_at(&self, strip_x: f32) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| strip_x >= c.x && strip_x < c.x + c.width)
    }
}

/// The menu widget. Borrows its [`MenuState`] for one frame.
pub struct PagingMenuView<'a> {
    state: &'a mut MenuState,
    style: MenuStyle,
}

impl<'a> PagingMenuView<'a> {
    pub fn new(state: &'a mut MenuState) -> Self {
        Self {
            state,
            style: MenuStyle::default(),
        }
    }

    pub fn style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    /// Lay out, draw and hit-test the strip. Returns a selection event if
    /// the user tapped a cell other than the focused one.
    pub fn show(self, ui: &mut Ui) -> Option<MenuEvent> {
        let style = &self.style;
        let state = self.state;

        let desired = vec2(ui.available_width(), style.height);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        // Measure labels and refresh the cached layout. Widths follow the
        // label text, so cells are unequal.
        let font = FontId::proportional(style.font_size);
        let galleys: Vec<_> = state
            .labels
            .iter()
            .map(|label| {
                ui.fonts_mut(|f| f.layout_no_wrap(label.clone(), font.clone(), Color32::PLACEHOLDER))
            })
            .collect();
        let widths = galleys
            .iter()
            .map(|g| g.size().x + style.cell_padding_x * 2.0);
        let cells: Vec<CellLayout> = geometry::cell_positions(widths)
            .into_iter()
            .zip(galleys.iter())
            .map(|((x, width), galley)| CellLayout {
                x,
                width,
                label_width: galley.size().x,
            })
            .collect();
        state.set_layout(cells, rect.width());

        state.step_scroll();
        if state.is_animating() {
            ui.ctx().request_repaint();
        }

        // Hit-test the tap before drawing so the frame reflects it.
        let mut event = None;
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let strip_x = pos.x - rect.left() + state.scroll_offset;
                if let Some(page) = state.cell_at(strip_x) {
                    if page != state.focused_index {
                        let previous = state.focused_index;
                        state.focused_index = page;
                        event = Some(MenuEvent::Selected { page, previous });
                    }
                }
            }
        }

        let painter = ui.painter().with_clip_rect(rect);
        painter.rect_filled(rect, 0.0, style.background);

        let view_left = state.scroll_offset;
        let view_right = state.scroll_offset + rect.width();
        let text_y = rect.top() + (style.height - style.underline_height) / 2.0;

        for (index, cell) in state.cells.iter().enumerate() {
            if cell.x + cell.width < view_left || cell.x > view_right {
                continue;
            }
            let color = if state.is_selected(index) {
                style.selected_text_color
            } else {
                style.text_color
            };
            let center_x = rect.left() + cell.x + cell.width / 2.0 - state.scroll_offset;
            painter.text(
                pos2(center_x, text_y),
                Align2::CENTER_CENTER,
                &state.labels[index],
                font.clone(),
                color,
            );
        }

        // Underline. Width stays zero until the host applies it, so
        // nothing is drawn on the very first frame.
        if state.indicator.width > 0.0 {
            let underline = Rect::from_min_size(
                pos2(
                    rect.left() + state.indicator.x - state.scroll_offset,
                    rect.bottom() - style.underline_height,
                ),
                vec2(state.indicator.width, style.underline_height),
            );
            painter.rect_filled(underline, 1.5, style.underline_color);
        }

        event
    }
}
