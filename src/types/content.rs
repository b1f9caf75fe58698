//! Cell content model.
//!
//! A cell's content comes from one of three source shapes, resolved once
//! when the source is attached rather than re-inspected per render:
//! - a factory invoked with the column,
//! - a pre-built platform-native fragment (receives only the height, since
//!   native elements do not accept a column property),
//! - a pre-built component fragment (receives the column key and height).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use super::{Column, HeaderRowKind};

/// A resolved content fragment for one cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Display text.
    pub text: String,
    /// Key of the column this fragment was resolved for, when passed down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_key: Option<String>,
    /// Height hint in pixels, when the host passes one down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Content {
    /// Plain text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            column_key: None,
            height: None,
        }
    }
}

/// Arguments handed to a content factory.
pub struct ContentArgs<'a> {
    /// Column the content is resolved for.
    pub column: &'a Column,
    /// Band the owning row renders.
    pub row_kind: HeaderRowKind,
}

/// Where a cell's content comes from.
#[derive(Clone)]
pub enum ContentSource {
    /// Factory invoked with the column at resolution time.
    Factory(Rc<dyn Fn(&ContentArgs) -> Content>),
    /// Pre-built platform-native fragment; resolution passes only the height.
    PrebuiltNative(Content),
    /// Pre-built component fragment; resolution passes column key and height.
    PrebuiltComponent(Content),
}

impl ContentSource {
    /// Resolve this source for a column at the given cell height.
    pub fn resolve(&self, column: &Column, row_kind: HeaderRowKind, height: f32) -> Content {
        match self {
            Self::Factory(factory) => factory(&ContentArgs { column, row_kind }),
            Self::PrebuiltNative(content) => {
                let mut resolved = content.clone();
                resolved.height = Some(height);
                resolved
            }
            Self::PrebuiltComponent(content) => {
                let mut resolved = content.clone();
                resolved.column_key = Some(column.key.clone());
                resolved.height = Some(height);
                resolved
            }
        }
    }

    /// Default renderer: the column caption in true header rows, empty
    /// otherwise.
    pub fn default_header() -> Self {
        Self::Factory(Rc::new(|args: &ContentArgs| {
            let text = if args.row_kind == HeaderRowKind::Header {
                args.column.name.clone()
            } else {
                String::new()
            };
            Content {
                text,
                column_key: Some(args.column.key.clone()),
                height: None,
            }
        }))
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::PrebuiltNative(content) => f.debug_tuple("PrebuiltNative").field(content).finish(),
            Self::PrebuiltComponent(content) => {
                f.debug_tuple("PrebuiltComponent").field(content).finish()
            }
        }
    }
}

impl PartialEq for ContentSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Factories compare by identity, like host-supplied callbacks.
            (Self::Factory(a), Self::Factory(b)) => Rc::ptr_eq(a, b),
            (Self::PrebuiltNative(a), Self::PrebuiltNative(b)) => a == b,
            (Self::PrebuiltComponent(a), Self::PrebuiltComponent(b)) => a == b,
            _ => false,
        }
    }
}

/// Plain value formatter: one value rendered as its own text fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleCellFormatter {
    value: String,
}

impl SimpleCellFormatter {
    /// Formatter for the given display value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Current display value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Re-render only when the value changed.
    pub fn should_update(&self, next: &str) -> bool {
        self.value != next
    }

    /// Content fragment for the current value.
    pub fn content(&self) -> Content {
        Content::text(self.value.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_native_fragment_receives_only_height() {
        let source = ContentSource::PrebuiltNative(Content::text("raw"));
        let column = Column::new("a", 100.0);
        let resolved = source.resolve(&column, HeaderRowKind::Header, 35.0);
        assert_eq!(resolved.text, "raw");
        assert_eq!(resolved.height, Some(35.0));
        assert_eq!(resolved.column_key, None);
    }

    #[test]
    fn test_component_fragment_receives_column_and_height() {
        let source = ContentSource::PrebuiltComponent(Content::text("widget"));
        let column = Column::new("a", 100.0);
        let resolved = source.resolve(&column, HeaderRowKind::Summary, 35.0);
        assert_eq!(resolved.column_key.as_deref(), Some("a"));
        assert_eq!(resolved.height, Some(35.0));
    }

    #[test]
    fn test_factory_sees_the_column() {
        let source = ContentSource::Factory(Rc::new(|args: &ContentArgs| {
            Content::text(format!("col:{}", args.column.key))
        }));
        let column = Column::new("qty", 60.0);
        let resolved = source.resolve(&column, HeaderRowKind::Header, 35.0);
        assert_eq!(resolved.text, "col:qty");
        assert_eq!(resolved.height, None);
    }

    #[test]
    fn test_default_renderer_shows_caption_only_in_header_rows() {
        let source = ContentSource::default_header();
        let mut column = Column::new("qty", 60.0);
        column.name = "Quantity".to_string();

        let header = source.resolve(&column, HeaderRowKind::Header, 35.0);
        assert_eq!(header.text, "Quantity");

        let summary = source.resolve(&column, HeaderRowKind::Summary, 35.0);
        assert_eq!(summary.text, "");
    }

    #[test]
    fn test_formatter_updates_on_value_change_only() {
        let formatter = SimpleCellFormatter::new("42");
        assert!(!formatter.should_update("42"));
        assert!(formatter.should_update("43"));
        assert_eq!(formatter.content().text, "42");
    }
}
