//! Frozen/scrollable display partitioning.

use crate::types::Column;

/// Indices of a column list split into display groups.
///
/// Relative order within each group follows list order. Render order puts
/// scrollable cells first and frozen cells last, so pinned columns stack on
/// top of the scrolling strip regardless of their logical position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Indices of columns that ride the horizontal scroll.
    pub scrollable: Vec<usize>,
    /// Indices of frozen columns, pinned against scroll.
    pub frozen: Vec<usize>,
}

impl Partition {
    /// Iterate indices in render order: scrollable, then frozen.
    pub fn render_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.scrollable.iter().chain(self.frozen.iter()).copied()
    }

    /// Total number of partitioned columns.
    pub fn len(&self) -> usize {
        self.scrollable.len() + self.frozen.len()
    }

    /// Whether the partition covers no columns.
    pub fn is_empty(&self) -> bool {
        self.scrollable.is_empty() && self.frozen.is_empty()
    }
}

/// Split a column list into scrollable and frozen groups.
pub fn partition(columns: &[Column]) -> Partition {
    let mut split = Partition::default();
    for (index, column) in columns.iter().enumerate() {
        if column.is_frozen() {
            split.frozen.push(index);
        } else {
            split.scrollable.push(index);
        }
    }
    split
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn column(key: &str, frozen: bool) -> Column {
        let mut column = Column::new(key, 100.0);
        column.frozen = frozen;
        column
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let columns = vec![
            column("a", false),
            column("b", true),
            column("c", false),
            column("d", true),
        ];
        let split = partition(&columns);
        assert_eq!(split.scrollable, vec![0, 2]);
        assert_eq!(split.frozen, vec![1, 3]);
    }

    #[test]
    fn test_render_order_puts_frozen_last() {
        let columns = vec![column("a", true), column("b", false)];
        let split = partition(&columns);
        let order: Vec<usize> = split.render_order().collect();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let split = partition(&[]);
        assert!(split.is_empty());
        assert_eq!(split.render_order().count(), 0);
    }
}
