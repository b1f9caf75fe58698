//! Known-property filtering.
//!
//! Hosts hand rows an arbitrary property bag; only an allow-listed subset is
//! forwarded onto the generic container elements underneath.

use serde_json::{Map, Value};

/// Property keys forwarded to the row strip element.
pub const ROW_PROPS: &[&str] = &["width", "height", "style", "onScroll"];

/// Property keys forwarded to the outer chrome container element.
pub const CONTAINER_PROPS: &[&str] = &["height", "onScroll"];

/// Extract only the allow-listed keys from a property bag.
pub fn pick_known(bag: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    let mut known = Map::new();
    for key in keys {
        if let Some(value) = bag.get(*key) {
            known.insert((*key).to_string(), value.clone());
        }
    }
    known
}

/// Row-strip subset of a property bag.
pub fn known_row_props(bag: &Map<String, Value>) -> Map<String, Value> {
    pick_known(bag, ROW_PROPS)
}

/// Outer-container subset of a property bag.
pub fn known_container_props(bag: &Map<String, Value>) -> Map<String, Value> {
    pick_known(bag, CONTAINER_PROPS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag() -> Map<String, Value> {
        serde_json::from_value(json!({
            "width": 800,
            "height": 35,
            "style": { "color": "red" },
            "onScroll": "handler",
            "rowsCount": 120,
            "dataChanged": true
        }))
        .unwrap()
    }

    #[test]
    fn test_row_props_subset() {
        let known = pick_known(&bag(), ROW_PROPS);
        assert_eq!(known.len(), 4);
        assert!(known.contains_key("width"));
        assert!(known.contains_key("style"));
        assert!(!known.contains_key("rowsCount"));
    }

    #[test]
    fn test_container_props_subset() {
        let known = pick_known(&bag(), CONTAINER_PROPS);
        assert_eq!(known.len(), 2);
        assert!(known.contains_key("height"));
        assert!(known.contains_key("onScroll"));
        assert!(!known.contains_key("width"));
    }

    #[test]
    fn test_missing_keys_are_skipped() {
        let known = pick_known(&Map::new(), ROW_PROPS);
        assert!(known.is_empty());
    }
}
