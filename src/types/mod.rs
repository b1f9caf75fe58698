//! Data types for grid chrome rows.

mod column;
mod content;

pub use column::*;
pub use content::*;
