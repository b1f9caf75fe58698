use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ContentSource;
use crate::error::{GridheadError, Result};

/// A single column descriptor.
///
/// `left` is derived layout state: it is recomputed from the ordered list
/// and must never be hand-set by a consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique, stable identity within a column list.
    pub key: String,
    /// Display caption.
    #[serde(default)]
    pub name: String,
    /// Width in logical pixels.
    pub width: f32,
    /// Computed left offset in logical pixels.
    #[serde(default)]
    pub left: f32,
    /// Pinned to the leading edge, exempt from horizontal scroll.
    #[serde(default, alias = "locked")]
    pub frozen: bool,
    /// Whether the resize affordance is shown.
    #[serde(default)]
    pub resizable: bool,
    /// Whether a true header cell is wrapped for drag-reordering.
    #[serde(default)]
    pub draggable: bool,
    /// Hidden columns keep their slot but contribute zero width.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Cell background override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Cell text color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Per-column content renderer; rows fall back to their default.
    #[serde(skip)]
    pub content: Option<ContentSource>,
}

fn default_visible() -> bool {
    true
}

impl Column {
    /// Create a visible, unlocked column with the given key and width.
    pub fn new(key: impl Into<String>, width: f32) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            width,
            left: 0.0,
            frozen: false,
            resizable: false,
            draggable: false,
            visible: true,
            background_color: None,
            text_color: None,
            content: None,
        }
    }

    /// Whether this column is pinned against horizontal scroll.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Width this column contributes to offsets; zero when hidden.
    pub fn layout_width(&self) -> f32 {
        if self.visible {
            self.width
        } else {
            0.0
        }
    }
}

/// Which band of the grid chrome a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderRowKind {
    /// True header band; shows captions and supports header dragging.
    #[default]
    Header,
    /// Filter band beneath the header.
    Filter,
    /// Summary/footer band.
    Summary,
}

/// Visual defaults for header and footer cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTheme {
    /// Fallback cell background when the column has no override.
    pub background_color: String,
    /// Fallback text color.
    pub text_color: String,
    /// Default row height in pixels.
    pub row_height: f32,
}

impl Default for HeaderTheme {
    fn default() -> Self {
        Self {
            background_color: "#e0e0e0".to_string(),
            text_color: "#333333".to_string(),
            row_height: 35.0,
        }
    }
}

/// Validate a column list at the API boundary.
///
/// Interaction paths never validate; they degrade to no-ops instead.
///
/// # Errors
/// Returns an error if two columns share a key.
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(GridheadError::Column(format!(
                "duplicate column key: {}",
                column.key
            )));
        }
    }
    Ok(())
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

    #[test]
    fn test_new_column_defaults() {
        let column = Column::new("id", 80.0);
        assert_eq!(column.key, "id");
        assert_eq!(column.width, 80.0);
        assert!(column.visible);
        assert!(!column.is_frozen());
        assert!(!column.resizable);
    }

    #[test]
    fn test_hidden_column_has_zero_layout_width() {
        let mut column = Column::new("id", 80.0);
        column.visible = false;
        assert_eq!(column.layout_width(), 0.0);
        assert_eq!(column.width, 80.0);
    }

    #[test]
    fn test_locked_alias_deserializes_as_frozen() {
        let column: Column =
            serde_json::from_str(r#"{"key":"a","width":100,"locked":true}"#).unwrap();
        assert!(column.is_frozen());
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let columns = vec![Column::new("a", 100.0), Column::new("a", 50.0)];
        assert!(validate_columns(&columns).is_err());
        assert!(validate_columns(&columns[..1]).is_ok());
    }
}
