//! Header and footer row chrome: cells, rows, and the resize protocol.
//!
//! This module handles:
//! - The per-cell drag state machine for interactive column resizing
//! - The mounted-cell measurement registry driving auto-fit
//! - Cell style computation and frozen-cell scroll pinning
//! - Row-level partitioning, scroll fan-out, and resize bridging

mod cell;
mod drag;
mod registry;
mod row;

pub use cell::{CellRender, CellStyle, HeaderCell};
pub use drag::{width_from_pointer, ResizeController};
pub use registry::{CellProbe, CellRegistry, FixedProbe, ProbeId, AUTO_FIT_PADDING};
pub use row::{HeaderRow, HeaderRowProps, ResizeCommit, ResizeState, RowRender};
