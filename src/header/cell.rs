//! Header/footer cell: one column's rendering slot.
//!
//! A cell's position is fully determined by its column's `width`/`left` and
//! the row height; no other layout inputs exist. The cell hosts the resize
//! affordance and the frozen-cell pinning transform, but layout decisions
//! stay with the owning row.

use crate::pointer::PointerInput;
use crate::types::{Column, Content, ContentSource, HeaderRowKind, HeaderTheme};

use super::drag::ResizeController;

/// Computed inline style for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    /// Slot width in pixels.
    pub width: f32,
    /// Horizontal offset within the strip, in pixels.
    pub left: f32,
    /// Row-relative height in pixels.
    pub height: f32,
    /// Resolved background color.
    pub background_color: String,
    /// Resolved text color.
    pub text_color: String,
}

/// Render payload for one cell.
#[derive(Debug, Clone)]
pub struct CellRender {
    /// Key of the rendered column.
    pub column_key: String,
    /// Computed inline style.
    pub style: CellStyle,
    /// Resolved content fragment.
    pub content: Content,
    /// Whether the resize affordance is shown.
    pub resizable: bool,
    /// Live-resize highlight while this column is being dragged.
    pub resizing: bool,
    /// Whether the column is pinned against horizontal scroll.
    pub frozen: bool,
    /// Whether the host wraps this cell in its draggable-header shell.
    pub drag_wrap: bool,
    /// Pinning translation in pixels, when applied.
    pub pinned_offset: Option<f32>,
}

/// One column's slot in a header or footer row.
#[derive(Debug)]
pub struct HeaderCell {
    column: Column,
    row_kind: HeaderRowKind,
    height: f32,
    content: ContentSource,
    resize: ResizeController,
    pinned_offset: Option<f32>,
}

impl HeaderCell {
    /// Cell for `column` at the given row height.
    ///
    /// `content` is the row's default source; a per-column source on the
    /// descriptor takes precedence at resolution time.
    pub fn new(
        column: Column,
        row_kind: HeaderRowKind,
        height: f32,
        content: ContentSource,
    ) -> Self {
        Self {
            column,
            row_kind,
            height,
            content,
            resize: ResizeController::new(),
            pinned_offset: None,
        }
    }

    /// Column this cell renders.
    pub fn column(&self) -> &Column {
        &self.column
    }

    /// Replace the column slice, keeping drag and pin state.
    ///
    /// Used when the owning row re-renders from new metrics without
    /// remounting its cells.
    pub fn set_column(&mut self, column: Column) {
        self.column = column;
    }

    /// Row-relative height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Keep the cell's height in step with the owning row's props.
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// True while this cell's affordance is mid-drag.
    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    /// Pinning translation currently applied, if any.
    pub fn pinned_offset(&self) -> Option<f32> {
        self.pinned_offset
    }

    /// Pin the cell against body scroll.
    ///
    /// The host renders this as a `translate3d(offset, 0, 0)` on the cell
    /// element; only frozen cells receive it.
    pub fn set_scroll_left(&mut self, offset: f32) {
        self.pinned_offset = Some(offset);
    }

    /// Clear any pinning translation; the cell rides its container's
    /// native scroll.
    pub fn remove_scroll(&mut self) {
        self.pinned_offset = None;
    }

    /// Inline style from the column's metrics and the row height.
    pub fn style(&self, theme: &HeaderTheme) -> CellStyle {
        CellStyle {
            width: self.column.width,
            left: self.column.left,
            height: self.height,
            background_color: self
                .column
                .background_color
                .clone()
                .unwrap_or_else(|| theme.background_color.clone()),
            text_color: self
                .column
                .text_color
                .clone()
                .unwrap_or_else(|| theme.text_color.clone()),
        }
    }

    /// Resolve the content source for the current column.
    pub fn resolve_content(&self) -> Content {
        let source = self.column.content.as_ref().unwrap_or(&self.content);
        source.resolve(&self.column, self.row_kind, self.height)
    }

    /// Render payload for this cell.
    pub fn render(&self, theme: &HeaderTheme) -> CellRender {
        CellRender {
            column_key: self.column.key.clone(),
            style: self.style(theme),
            content: self.resolve_content(),
            resizable: self.column.resizable,
            resizing: self.resize.is_dragging(),
            frozen: self.column.is_frozen(),
            drag_wrap: self.column.draggable && self.row_kind == HeaderRowKind::Header,
            pinned_offset: self.pinned_offset,
        }
    }

    /// Pointer-down on the affordance. Ignored for non-resizable columns.
    pub(crate) fn drag_start(&mut self) {
        if self.column.resizable {
            self.resize.drag_start();
        }
    }

    /// Pointer drag over the affordance.
    pub(crate) fn drag_move(&mut self, pointer: PointerInput, cell_left_edge: f32) -> Option<f32> {
        self.resize.drag_move(pointer, cell_left_edge)
    }

    /// Drag finished over the affordance.
    pub(crate) fn drag_end(&mut self, pointer: PointerInput, cell_left_edge: f32) -> Option<f32> {
        self.resize.drag_end(pointer, cell_left_edge)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn cell(column: Column) -> HeaderCell {
        HeaderCell::new(
            column,
            HeaderRowKind::Header,
            35.0,
            ContentSource::default_header(),
        )
    }

    #[test]
    fn test_style_comes_from_column_and_height() {
        let mut column = Column::new("a", 120.0);
        column.left = 80.0;
        let style = cell(column).style(&HeaderTheme::default());
        assert_eq!(style.width, 120.0);
        assert_eq!(style.left, 80.0);
        assert_eq!(style.height, 35.0);
        assert_eq!(style.background_color, "#e0e0e0");
    }

    #[test]
    fn test_column_color_overrides_theme() {
        let mut column = Column::new("a", 120.0);
        column.background_color = Some("#ff0000".to_string());
        let style = cell(column).style(&HeaderTheme::default());
        assert_eq!(style.background_color, "#ff0000");
    }

    #[test]
    fn test_pin_and_unpin() {
        let mut cell = cell(Column::new("a", 120.0));
        assert_eq!(cell.pinned_offset(), None);
        cell.set_scroll_left(50.0);
        assert_eq!(cell.pinned_offset(), Some(50.0));
        cell.remove_scroll();
        assert_eq!(cell.pinned_offset(), None);
    }

    #[test]
    fn test_affordance_requires_resizable() {
        let mut fixed = cell(Column::new("a", 120.0));
        fixed.drag_start();
        assert!(!fixed.is_dragging());

        let mut sizable_column = Column::new("b", 120.0);
        sizable_column.resizable = true;
        let mut sizable = cell(sizable_column);
        sizable.drag_start();
        assert!(sizable.is_dragging());
    }

    #[test]
    fn test_drag_wrap_gated_to_true_header_rows() {
        let mut column = Column::new("a", 120.0);
        column.draggable = true;
        let theme = HeaderTheme::default();

        let header = cell(column.clone());
        assert!(header.render(&theme).drag_wrap);

        let summary = HeaderCell::new(
            column,
            HeaderRowKind::Summary,
            35.0,
            ContentSource::default_header(),
        );
        assert!(!summary.render(&theme).drag_wrap);
    }

    #[test]
    fn test_per_column_content_takes_precedence() {
        let mut column = Column::new("a", 120.0);
        column.name = "Amount".to_string();
        column.content = Some(ContentSource::PrebuiltComponent(Content::text("total: 7")));
        let rendered = cell(column).render(&HeaderTheme::default());
        assert_eq!(rendered.content.text, "total: 7");
        assert_eq!(rendered.content.column_key.as_deref(), Some("a"));
    }
}
