//! Header/footer row orchestration.
//!
//! The row owns the authoritative [`ColumnMetrics`] derived from its props,
//! plus a transient resize overlay while a drag is in flight. Committed
//! widths are handed back to the external grid owner as [`ResizeCommit`]
//! values; the row itself never persists them. Cells are kept in list order
//! and rendered in partition order, scrollable first and frozen last.

use std::sync::Arc;

use log::{debug, warn};

use crate::layout::{partition, same_column, same_columns, ColumnMetrics, Partition};
use crate::pointer::PointerInput;
use crate::scrollbar::ScrollbarSize;
use crate::types::{Column, ContentSource, HeaderRowKind, HeaderTheme};

use super::cell::{CellRender, HeaderCell};
use super::registry::CellRegistry;

/// Inputs the external grid owner supplies per render pass.
#[derive(Debug, Clone)]
pub struct HeaderRowProps {
    /// Viewport width in pixels; `None` lets the strip size itself.
    pub width: Option<f32>,
    /// Row height in pixels.
    pub height: f32,
    /// Column list; reference identity participates in update gating.
    pub columns: Arc<[Column]>,
    /// Body row count, used to gate refreshes of summary content.
    pub rows_count: usize,
    /// Set when underlying data changed without the row count moving.
    pub data_changed: bool,
    /// Band of the grid chrome this row renders.
    pub row_kind: HeaderRowKind,
}

impl HeaderRowProps {
    /// Props for the given columns with everything else at rest.
    pub fn new(columns: Arc<[Column]>, height: f32) -> Self {
        Self {
            width: None,
            height,
            columns,
            rows_count: 0,
            data_changed: false,
            row_kind: HeaderRowKind::default(),
        }
    }

    /// Update gate for a high-churn virtualized container.
    ///
    /// A rebuild is warranted when the width, height, column-list identity,
    /// or row count changed, or when an unchanged row count arrives flagged
    /// as a data change. Performance contract, not a correctness one.
    pub fn should_update(&self, next: &Self) -> bool {
        width_changed(self.width, next.width)
            || (self.height - next.height).abs() > f32::EPSILON
            || !Arc::ptr_eq(&self.columns, &next.columns)
            || self.rows_count != next.rows_count
            || next.data_changed
    }
}

/// Live resize overlay: a working copy of the metrics with the dragged
/// column's width applied.
///
/// Replaced wholesale on every Move, cleared on End or when structural
/// props change. Never merged field-by-field with incoming props; the
/// authoritative metrics always come from the external owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    /// Metrics with the in-flight width applied and offsets reflowed.
    pub column_metrics: ColumnMetrics,
    /// The dragged column as it currently previews.
    pub column: Column,
}

/// A completed resize, for the external owner to persist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeCommit {
    /// 0-based position of the resized column in the list.
    pub position: usize,
    /// Committed width in pixels.
    pub width: f32,
}

/// Render payload for a whole row.
#[derive(Debug, Clone)]
pub struct RowRender {
    /// Row height in pixels.
    pub height: f32,
    /// Cells in render order: scrollable first, frozen last.
    pub cells: Vec<CellRender>,
}

/// One header or footer band: cells, layout metrics, and the resize
/// protocol between them.
pub struct HeaderRow {
    props: HeaderRowProps,
    metrics: ColumnMetrics,
    partition: Partition,
    cells: Vec<HeaderCell>,
    resize_state: Option<ResizeState>,
    registry: CellRegistry,
    scroll_left: Option<f32>,
    theme: HeaderTheme,
    content: ContentSource,
}

impl HeaderRow {
    /// Row with the default theme and default header content.
    pub fn new(props: HeaderRowProps) -> Self {
        Self::with_theme(props, HeaderTheme::default())
    }

    /// Row with an explicit theme.
    pub fn with_theme(props: HeaderRowProps, theme: HeaderTheme) -> Self {
        let metrics = ColumnMetrics::new(props.columns.to_vec(), props.width.unwrap_or(0.0));
        let split = partition(&metrics.columns);
        let mut row = Self {
            props,
            metrics,
            partition: split,
            cells: Vec::new(),
            resize_state: None,
            registry: CellRegistry::new(),
            scroll_left: None,
            theme,
            content: ContentSource::default_header(),
        };
        row.rebuild_cells();
        row
    }

    /// Current props.
    pub fn props(&self) -> &HeaderRowProps {
        &self.props
    }

    /// Authoritative metrics derived from props.
    pub fn metrics(&self) -> &ColumnMetrics {
        &self.metrics
    }

    /// Metrics the row currently renders from: the resize overlay while a
    /// drag is in flight, the authoritative metrics otherwise.
    pub fn effective_metrics(&self) -> &ColumnMetrics {
        self.resize_state
            .as_ref()
            .map_or(&self.metrics, |state| &state.column_metrics)
    }

    /// In-flight resize overlay, if any.
    pub fn resize_state(&self) -> Option<&ResizeState> {
        self.resize_state.as_ref()
    }

    /// Frozen/scrollable split of the column list.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Cells in list order.
    pub fn cells(&self) -> &[HeaderCell] {
        &self.cells
    }

    /// Measurement registry backing auto-fit.
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    /// Mutable access for mounting and unmounting measurement probes.
    pub fn registry_mut(&mut self) -> &mut CellRegistry {
        &mut self.registry
    }

    /// Last body scroll offset fanned out to the cells.
    pub fn scroll_left(&self) -> Option<f32> {
        self.scroll_left
    }

    /// Theme used for cell styles.
    pub fn theme(&self) -> &HeaderTheme {
        &self.theme
    }

    /// Replace the theme; takes effect on the next render.
    pub fn set_theme(&mut self, theme: HeaderTheme) {
        self.theme = theme;
    }

    /// Replace the default content source and rebuild every cell from it.
    pub fn set_default_content(&mut self, content: ContentSource) {
        self.content = content;
        self.cells.clear();
        self.rebuild_cells();
    }

    /// Apply the next props; returns whether the row re-rendered.
    ///
    /// Runs the resize-state invalidation check before the update gate, so
    /// a structural change discards the overlay even though the rebuild
    /// itself is what makes the change visible.
    pub fn update(&mut self, next: HeaderRowProps) -> bool {
        let structural = !same_columns(&self.props.columns, &next.columns, same_column)
            || width_changed(self.props.width, next.width)
            || self.props.rows_count != next.rows_count;
        if structural && self.resize_state.take().is_some() {
            debug!("structural props change discarded the live resize preview");
        }
        if !self.props.should_update(&next) {
            return false;
        }
        self.props = next;
        self.metrics = ColumnMetrics::new(self.props.columns.to_vec(), self.props.width.unwrap_or(0.0));
        self.partition = partition(&self.metrics.columns);
        self.rebuild_cells();
        true
    }

    /// Live resize preview from a cell's Move.
    ///
    /// Locates the column in the effective metrics (the overlay wins over
    /// the authoritative copy), applies the width to a fresh copy, and
    /// keeps `total_width` from shrinking below its pre-Move value so the
    /// scrollable strip never contracts mid-drag. Unknown keys are ignored.
    pub fn handle_resize(&mut self, column_key: &str, width: f32) {
        let effective = self.effective_metrics();
        let Some(position) = effective.position_of(column_key) else {
            warn!("resize for unknown column key {column_key:?}");
            return;
        };
        let previous_total = effective.total_width;
        let mut resized = effective.resize_column(position, width);
        if resized.total_width < previous_total {
            resized.total_width = previous_total;
        }
        let Some(column) = resized.column(position).cloned() else {
            return;
        };
        self.resize_state = Some(ResizeState {
            column_metrics: resized,
            column,
        });
        self.sync_cell_columns();
    }

    /// Commit a finished drag; End is authoritative.
    ///
    /// Missing and zero widths fall back to the column's current width;
    /// negative widths pass through unchanged. The overlay is cleared
    /// either way, and the committed width goes to the external owner --
    /// the row snaps back to its authoritative metrics until new props
    /// arrive.
    pub fn handle_resize_end(
        &mut self,
        column_key: &str,
        width: Option<f32>,
    ) -> Option<ResizeCommit> {
        let overlay = self.resize_state.take();
        let metrics = overlay
            .as_ref()
            .map_or(&self.metrics, |state| &state.column_metrics);
        let Some(position) = metrics.position_of(column_key) else {
            warn!("resize end for unknown column key {column_key:?}");
            self.sync_cell_columns();
            return None;
        };
        let fallback = metrics.column(position).map_or(0.0, |column| column.width);
        let width = match width {
            Some(w) if w.is_nan() || w.abs() < f32::EPSILON => fallback,
            Some(w) => w,
            None => fallback,
        };
        debug!("column {column_key:?} committed at {width}px");
        self.sync_cell_columns();
        Some(ResizeCommit { position, width })
    }

    /// Auto-fit a column to its widest mounted cell, committed as an End.
    ///
    /// No-op when nothing is mounted under the key or the best measure is
    /// zero.
    pub fn auto_fit(&mut self, column_key: &str) -> Option<ResizeCommit> {
        let width = self.registry.auto_fit_width(column_key)?;
        self.handle_resize_end(column_key, Some(width))
    }

    /// Route a pointer-down on a cell's resize affordance.
    pub fn cell_drag_start(&mut self, column_key: &str) {
        let Some(position) = self.effective_metrics().position_of(column_key) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(position) {
            cell.drag_start();
        }
    }

    /// Route a pointer move during a cell's drag.
    ///
    /// `cell_left_edge` is the cell's live rendered left edge in the same
    /// coordinate space as the pointer sample. Re-validates the column key
    /// so Moves against stale state degrade to no-ops.
    pub fn cell_drag_move(&mut self, column_key: &str, pointer: PointerInput, cell_left_edge: f32) {
        let Some(position) = self.effective_metrics().position_of(column_key) else {
            warn!("pointer move for unknown column key {column_key:?}");
            return;
        };
        let Some(width) = self
            .cells
            .get_mut(position)
            .and_then(|cell| cell.drag_move(pointer, cell_left_edge))
        else {
            return;
        };
        self.handle_resize(column_key, width);
    }

    /// Route the end of a cell's drag; yields the commit, if any.
    pub fn cell_drag_end(
        &mut self,
        column_key: &str,
        pointer: PointerInput,
        cell_left_edge: f32,
    ) -> Option<ResizeCommit> {
        let position = self.effective_metrics().position_of(column_key)?;
        let width = self
            .cells
            .get_mut(position)
            .and_then(|cell| cell.drag_end(pointer, cell_left_edge));
        self.handle_resize_end(column_key, width)
    }

    /// Fan a body scroll offset out to the cells: frozen cells pin at
    /// `offset`, every other cell rides the container's native scroll.
    ///
    /// The offset is remembered and re-applied after rebuilds, so pinning
    /// survives re-renders.
    pub fn set_scroll_left(&mut self, offset: f32) {
        self.scroll_left = Some(offset);
        self.apply_scroll();
    }

    /// Inner cell-strip width: the viewport width plus the scrollbar, so
    /// the last column never clips under the body's scrollbar gutter.
    /// `None` when the row has no fixed width.
    pub fn strip_width(&self, scrollbar: &dyn ScrollbarSize) -> Option<f32> {
        self.props.width.map(|width| width + scrollbar.thickness())
    }

    /// Outer chrome width: the effective total minus the vertical
    /// scrollbar.
    pub fn effective_width(&self, scrollbar: &dyn ScrollbarSize) -> f32 {
        let total = self.effective_metrics().total_width;
        let adjusted = total - scrollbar.thickness();
        if adjusted.is_nan() {
            total
        } else {
            adjusted
        }
    }

    /// Render payload: cells in partition order, with the dragged column
    /// flagged as resizing.
    pub fn render(&self) -> RowRender {
        let resizing_key = self
            .resize_state
            .as_ref()
            .map(|state| state.column.key.as_str());
        let cells = self
            .partition
            .render_order()
            .filter_map(|index| self.cells.get(index))
            .map(|cell| {
                let mut rendered = cell.render(&self.theme);
                if resizing_key == Some(rendered.column_key.as_str()) {
                    rendered.resizing = true;
                }
                rendered
            })
            .collect();
        RowRender {
            height: self.props.height,
            cells,
        }
    }

    /// Rebuild cells from the effective metrics, reusing existing cells by
    /// key so drag and pin state survive a re-render.
    fn rebuild_cells(&mut self) {
        let columns = self.effective_metrics().columns.clone();
        let mut previous = std::mem::take(&mut self.cells);
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let reused = previous
                .iter()
                .position(|cell| cell.column().key == column.key)
                .map(|index| previous.swap_remove(index));
            let cell = match reused {
                Some(mut cell) => {
                    cell.set_column(column);
                    cell.set_height(self.props.height);
                    cell
                }
                None => HeaderCell::new(
                    column,
                    self.props.row_kind,
                    self.props.height,
                    self.content.clone(),
                ),
            };
            cells.push(cell);
        }
        self.cells = cells;
        self.apply_scroll();
    }

    /// Push the effective columns into the existing cells without
    /// remounting them.
    fn sync_cell_columns(&mut self) {
        let columns = self.effective_metrics().columns.clone();
        if columns.len() != self.cells.len() {
            self.rebuild_cells();
            return;
        }
        for (cell, column) in self.cells.iter_mut().zip(columns) {
            cell.set_column(column);
        }
    }

    /// Re-apply the remembered scroll offset across all cells.
    fn apply_scroll(&mut self) {
        let Some(offset) = self.scroll_left else {
            return;
        };
        for cell in &mut self.cells {
            if cell.column().is_frozen() {
                cell.set_scroll_left(offset);
            } else {
                cell.remove_scroll();
            }
        }
    }
}

/// Epsilon-tolerant change check over optional widths.
fn width_changed(previous: Option<f32>, next: Option<f32>) -> bool {
    match (previous, next) {
        (Some(a), Some(b)) => (a - b).abs() > f32::EPSILON,
        (None, None) => false,
        _ => true,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::header::registry::FixedProbe;

    fn columns(widths: &[f32]) -> Arc<[Column]> {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let mut column = Column::new(format!("c{i}"), *w);
                column.resizable = true;
                column
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn props(widths: &[f32], viewport: Option<f32>) -> HeaderRowProps {
        let mut props = HeaderRowProps::new(columns(widths), 35.0);
        props.width = viewport;
        props
    }

    #[test]
    fn test_gate_skips_identical_props() {
        let shared = columns(&[100.0, 50.0]);
        let mut first = HeaderRowProps::new(Arc::clone(&shared), 35.0);
        first.rows_count = 10;
        let second = first.clone();

        let mut row = HeaderRow::new(first);
        assert!(!row.update(second));
    }

    #[test]
    fn test_gate_passes_on_data_change_with_equal_row_count() {
        let shared = columns(&[100.0, 50.0]);
        let mut first = HeaderRowProps::new(Arc::clone(&shared), 35.0);
        first.rows_count = 10;
        let mut second = first.clone();
        second.data_changed = true;

        let mut row = HeaderRow::new(first);
        assert!(row.update(second));
    }

    #[test]
    fn test_gate_passes_on_new_column_identity() {
        let first = props(&[100.0, 50.0], None);
        // Same values, fresh allocation: identity gating must still fire.
        let second = props(&[100.0, 50.0], None);

        let mut row = HeaderRow::new(first);
        assert!(row.update(second));
    }

    #[test]
    fn test_resize_preview_overlays_without_touching_authoritative() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], Some(200.0)));
        row.handle_resize("c0", 150.0);

        let effective = row.effective_metrics();
        assert_eq!(effective.columns[0].width, 150.0);
        assert_eq!(effective.columns[1].left, 150.0);
        assert_eq!(row.metrics().columns[0].width, 100.0);
        assert_eq!(row.cells()[0].column().width, 150.0);
    }

    #[test]
    fn test_total_width_never_shrinks_mid_drag() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], Some(200.0)));
        assert_eq!(row.metrics().total_width, 200.0);

        row.handle_resize("c0", 300.0);
        assert_eq!(row.effective_metrics().total_width, 350.0);

        row.handle_resize("c0", 120.0);
        assert_eq!(row.effective_metrics().columns[0].width, 120.0);
        assert_eq!(row.effective_metrics().total_width, 350.0);
    }

    #[test]
    fn test_commit_falls_back_for_missing_and_zero_widths() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.handle_resize("c0", 150.0);
        let commit = row.handle_resize_end("c0", None).unwrap();
        assert_eq!(commit.position, 0);
        assert_eq!(commit.width, 150.0);

        let commit = row.handle_resize_end("c1", Some(0.0)).unwrap();
        assert_eq!(commit.width, 50.0);
    }

    #[test]
    fn test_commit_passes_negative_widths_through() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        let commit = row.handle_resize_end("c0", Some(-5.0)).unwrap();
        assert_eq!(commit.width, -5.0);
    }

    #[test]
    fn test_commit_clears_the_overlay() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.handle_resize("c0", 150.0);
        assert!(row.resize_state().is_some());

        row.handle_resize_end("c0", Some(150.0));
        assert!(row.resize_state().is_none());
        assert_eq!(row.effective_metrics().columns[0].width, 100.0);
        assert_eq!(row.cells()[0].column().width, 100.0);
    }

    #[test]
    fn test_structural_update_discards_preview() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.handle_resize("c0", 150.0);
        assert!(row.resize_state().is_some());

        row.update(props(&[100.0, 50.0, 75.0], None));
        assert!(row.resize_state().is_none());
    }

    #[test]
    fn test_refresh_with_equal_columns_keeps_preview() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.handle_resize("c0", 150.0);

        // New identity, same values, flagged data change: re-render without
        // losing the live preview.
        let mut refresh = props(&[100.0, 50.0], None);
        refresh.data_changed = true;
        assert!(row.update(refresh));
        assert!(row.resize_state().is_some());
        assert_eq!(row.cells()[0].column().width, 150.0);
    }

    #[test]
    fn test_unknown_key_is_a_no_op() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.handle_resize("ghost", 150.0);
        assert!(row.resize_state().is_none());
        assert_eq!(row.handle_resize_end("ghost", Some(90.0)), None);
    }

    #[test]
    fn test_scroll_fans_out_to_frozen_cells_only() {
        let mut list: Vec<Column> = columns(&[100.0, 50.0]).to_vec();
        list[1].frozen = true;
        let mut props = HeaderRowProps::new(list.into(), 35.0);
        props.rows_count = 1;

        let mut row = HeaderRow::new(props);
        row.set_scroll_left(50.0);
        assert_eq!(row.cells()[0].pinned_offset(), None);
        assert_eq!(row.cells()[1].pinned_offset(), Some(50.0));

        row.set_scroll_left(80.0);
        assert_eq!(row.cells()[1].pinned_offset(), Some(80.0));
    }

    #[test]
    fn test_scroll_offset_survives_rebuild() {
        let mut list: Vec<Column> = columns(&[100.0, 50.0]).to_vec();
        list[0].frozen = true;
        let shared: Arc<[Column]> = list.into();
        let first = HeaderRowProps::new(Arc::clone(&shared), 35.0);
        let mut second = HeaderRowProps::new(shared, 35.0);
        second.data_changed = true;

        let mut row = HeaderRow::new(first);
        row.set_scroll_left(50.0);
        assert!(row.update(second));
        assert_eq!(row.cells()[0].pinned_offset(), Some(50.0));
        assert_eq!(row.cells()[1].pinned_offset(), None);
    }

    #[test]
    fn test_render_order_and_resizing_flag() {
        let mut list: Vec<Column> = columns(&[100.0, 50.0, 75.0]).to_vec();
        list[0].frozen = true;
        let mut row = HeaderRow::new(HeaderRowProps::new(list.into(), 35.0));
        row.handle_resize("c1", 90.0);

        let rendered = row.render();
        let keys: Vec<&str> = rendered
            .cells
            .iter()
            .map(|cell| cell.column_key.as_str())
            .collect();
        assert_eq!(keys, vec!["c1", "c2", "c0"]);

        let dragged = rendered
            .cells
            .iter()
            .find(|cell| cell.column_key == "c1")
            .unwrap();
        assert!(dragged.resizing);
        assert_eq!(dragged.style.width, 90.0);
    }

    #[test]
    fn test_auto_fit_commits_via_registry() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.registry_mut().register("c1", Box::new(FixedProbe(80.0)));
        row.registry_mut().register("c1", Box::new(FixedProbe(120.0)));
        row.registry_mut().register("c1", Box::new(FixedProbe(100.0)));

        let commit = row.auto_fit("c1").unwrap();
        assert_eq!(commit.position, 1);
        assert_eq!(commit.width, 140.0);

        assert_eq!(row.auto_fit("c0"), None);
    }

    #[test]
    fn test_cell_drag_round_trip() {
        let mut row = HeaderRow::new(props(&[100.0, 50.0], None));
        row.cell_drag_start("c0");
        assert!(row.cells()[0].is_dragging());

        row.cell_drag_move("c0", PointerInput::from_page_x(150.0), 0.0);
        assert_eq!(row.effective_metrics().columns[0].width, 150.0);

        let commit = row
            .cell_drag_end("c0", PointerInput::from_page_x(160.0), 0.0)
            .unwrap();
        assert_eq!(commit, ResizeCommit { position: 0, width: 160.0 });
        assert!(!row.cells()[0].is_dragging());
        assert!(row.resize_state().is_none());
    }

    #[test]
    fn test_strip_and_effective_width() {
        use crate::scrollbar::FixedScrollbar;

        let mut row = HeaderRow::new(props(&[100.0, 50.0], Some(200.0)));
        assert_eq!(row.strip_width(&FixedScrollbar(17.0)), Some(217.0));
        assert_eq!(row.effective_width(&FixedScrollbar(17.0)), 183.0);

        row.props.width = None;
        assert_eq!(row.strip_width(&FixedScrollbar(17.0)), None);
    }
}
