//! gridhead - column layout and resize engine for data grid chrome rows
//!
//! Computes and maintains the header/footer band of a virtualized grid:
//! - Cumulative column offsets and total row width from ordered descriptors
//! - Interactive column resizing with live preview and commit-on-release
//! - Auto-fit from measured cell widths
//! - Frozen-column pinning against horizontal body scroll
//!
//! The core is platform-free; the browser layer mounts it over real DOM
//! elements via WebAssembly.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridHead } from 'gridhead';
//! await init();
//! const head = new GridHead(container, columns, 800, 35, 'header');
//! head.set_on_column_resize((position, width) => persistWidth(position, width));
//! body.addEventListener('scroll', () => head.set_scroll_left(body.scrollLeft));
//! ```

// Core modules
pub mod error;
pub mod header;
pub mod layout;
pub mod pointer;
pub mod props;
pub mod scrollbar;
pub mod types;

// Browser layer (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use dom::GridHead;

pub use header::{HeaderRow, HeaderRowProps, ResizeCommit};
pub use layout::ColumnMetrics;
pub use types::*;

/// Compute offsets and total width for a column descriptor array.
///
/// `columns` is an array of descriptors (camelCase keys); the result is a
/// metrics object with every `left` offset filled in and `totalWidth` no
/// smaller than `viewport_width`.
///
/// # Errors
/// Returns an error if the descriptors are malformed or share a key.
#[wasm_bindgen]
pub fn compute_column_metrics(columns: JsValue, viewport_width: f32) -> Result<JsValue, JsValue> {
    let columns: Vec<Column> = serde_wasm_bindgen::from_value(columns)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    validate_columns(&columns).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let metrics = ColumnMetrics::new(columns, viewport_width);
    serde_wasm_bindgen::to_value(&metrics)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Compute column metrics from a JSON descriptor array and return the
/// metrics as a JSON string.
///
/// This is the string-boundary variant of [`compute_column_metrics`] for
/// hosts that exchange JSON rather than structured values.
///
/// # Errors
/// Returns an error if the descriptors are malformed or share a key.
#[wasm_bindgen]
pub fn compute_column_metrics_json(columns: &str, viewport_width: f32) -> Result<String, JsValue> {
    let columns: Vec<Column> =
        serde_json::from_str(columns).map_err(|e| JsValue::from_str(&e.to_string()))?;
    validate_columns(&columns).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let metrics = ColumnMetrics::new(columns, viewport_width);
    serde_json::to_string(&metrics)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
