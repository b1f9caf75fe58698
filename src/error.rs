//! Structured error types for gridhead.
//!
//! Errors surface only at construction and bridge boundaries (descriptor
//! validation, host payload conversion). Interaction paths degrade to
//! silent no-ops instead of returning errors.

/// All errors that can occur while building gridhead state.
#[derive(Debug, thiserror::Error)]
pub enum GridheadError {
    /// Invalid column descriptor set.
    #[error("Column descriptor: {0}")]
    Column(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridheadError>;

impl From<String> for GridheadError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridheadError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridheadError> for wasm_bindgen::JsValue {
    fn from(e: GridheadError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
