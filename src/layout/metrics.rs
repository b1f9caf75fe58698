//! Derived offset/width/total-width state for a column list.
//!
//! Offsets are computed once per structural change, not per lookup: each
//! column's `left` is the running sum of the layout widths before it, so
//! `left(i) == left(i-1) + width(i-1)` and `left(0) == 0`. Hidden columns
//! keep their slot and contribute zero width.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::Column;

/// Column layout state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetrics {
    /// Columns with computed `left` offsets, in display order.
    pub columns: Vec<Column>,
    /// Viewport width the metrics were computed for.
    pub width: f32,
    /// Scrollable row width; never less than the sum of layout widths.
    pub total_width: f32,
}

impl ColumnMetrics {
    /// Compute metrics for a column list at the given viewport width.
    ///
    /// `total_width` is the larger of the width sum and the viewport, so a
    /// sparse column set still fills the row.
    pub fn new(mut columns: Vec<Column>, viewport_width: f32) -> Self {
        let sum = reflow(&mut columns);
        Self {
            columns,
            width: viewport_width,
            total_width: sum.max(viewport_width),
        }
    }

    /// Number of columns, hidden ones included.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at `position`, if in range.
    pub fn column(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    /// Position of the column with the given key.
    ///
    /// Later duplicates shadow earlier ones; duplicate keys are rejected at
    /// the API boundary, not here.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.columns.iter().rposition(|column| column.key == key)
    }

    /// New metrics with the column at `position` set to `new_width` and
    /// every offset reflowed.
    ///
    /// `total_width` becomes the new width sum; callers that must never
    /// shrink the scrollable width clamp the result against their previous
    /// value. An unknown position returns the input unchanged.
    pub fn resize_column(&self, position: usize, new_width: f32) -> Self {
        let mut next = self.clone();
        let Some(column) = next.columns.get_mut(position) else {
            warn!("resize for out-of-range column position {position}");
            return next;
        };
        column.width = new_width.max(0.0);
        next.total_width = reflow(&mut next.columns);
        next
    }
}

/// Recompute offsets in place; returns the layout width sum.
fn reflow(columns: &mut [Column]) -> f32 {
    let mut x: f32 = 0.0;
    for column in columns.iter_mut() {
        column.left = x;
        x += column.layout_width();
    }
    x
}

/// Structural equality over two column lists with a per-column predicate.
///
/// Used to decide whether cached layout or resize state must be
/// invalidated when new props arrive.
pub fn same_columns<F>(a: &[Column], b: &[Column], column_eq: F) -> bool
where
    F: Fn(&Column, &Column) -> bool,
{
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| column_eq(x, y))
}

/// Default per-column equality predicate: full-field comparison.
pub fn same_column(a: &Column, b: &Column) -> bool {
    a == b
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn columns(widths: &[f32]) -> Vec<Column> {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| Column::new(format!("c{i}"), *w))
            .collect()
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let metrics = ColumnMetrics::new(columns(&[100.0, 50.0, 75.0]), 0.0);
        assert_eq!(metrics.columns[0].left, 0.0);
        assert_eq!(metrics.columns[1].left, 100.0);
        assert_eq!(metrics.columns[2].left, 150.0);
        assert_eq!(metrics.total_width, 225.0);
    }

    #[test]
    fn test_viewport_floor_on_total_width() {
        let metrics = ColumnMetrics::new(columns(&[100.0, 50.0]), 200.0);
        assert_eq!(metrics.total_width, 200.0);

        let wide = ColumnMetrics::new(columns(&[300.0, 50.0]), 200.0);
        assert_eq!(wide.total_width, 350.0);
    }

    #[test]
    fn test_hidden_column_keeps_slot_without_width() {
        let mut cols = columns(&[100.0, 50.0, 75.0]);
        cols[1].visible = false;
        let metrics = ColumnMetrics::new(cols, 0.0);
        assert_eq!(metrics.columns[1].left, 100.0);
        assert_eq!(metrics.columns[2].left, 100.0);
        assert_eq!(metrics.total_width, 175.0);
    }

    #[test]
    fn test_resize_reflows_subsequent_offsets() {
        let metrics = ColumnMetrics::new(columns(&[100.0, 50.0, 75.0]), 0.0);
        let resized = metrics.resize_column(0, 150.0);
        assert_eq!(resized.columns[0].width, 150.0);
        assert_eq!(resized.columns[1].left, 150.0);
        assert_eq!(resized.columns[2].left, 200.0);
        assert_eq!(resized.total_width, 275.0);
        // Input metrics are untouched.
        assert_eq!(metrics.columns[1].left, 100.0);
    }

    #[test]
    fn test_resize_out_of_range_is_a_no_op() {
        let metrics = ColumnMetrics::new(columns(&[100.0, 50.0]), 0.0);
        let resized = metrics.resize_column(5, 150.0);
        assert_eq!(resized, metrics);
    }

    #[test]
    fn test_resize_clamps_negative_widths() {
        let metrics = ColumnMetrics::new(columns(&[100.0, 50.0]), 0.0);
        let resized = metrics.resize_column(0, -40.0);
        assert_eq!(resized.columns[0].width, 0.0);
        assert_eq!(resized.columns[1].left, 0.0);
    }

    #[test]
    fn test_position_of_prefers_later_duplicates() {
        let mut cols = columns(&[100.0, 50.0]);
        cols[1].key = "c0".to_string();
        let metrics = ColumnMetrics::new(cols, 0.0);
        assert_eq!(metrics.position_of("c0"), Some(1));
        assert_eq!(metrics.position_of("missing"), None);
    }

    #[test]
    fn test_same_columns_predicates() {
        let a = columns(&[100.0, 50.0]);
        let mut b = columns(&[100.0, 50.0]);
        assert!(same_columns(&a, &b, same_column));

        b[1].width = 60.0;
        assert!(!same_columns(&a, &b, same_column));
        assert!(same_columns(&a, &b, |x, y| x.key == y.key));
        assert!(!same_columns(&a, &b[..1], same_column));
    }
}
