//! Layout engine for column offsets and display partitioning.
//!
//! This module handles:
//! - Computing column offsets and total row width from an ordered list
//! - Reflowing offsets when a single column is resized
//! - Splitting columns into frozen and scrollable display groups

mod metrics;
mod partition;

pub use metrics::{same_column, same_columns, ColumnMetrics};
pub use partition::{partition, Partition};
