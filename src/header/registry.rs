//! Mounted-cell measurement registry.
//!
//! Auto-fit needs the rendered width of every mounted instance of a column
//! (header plus any duplicated surface such as a footer). Instances register
//! a measurement probe here on mount and drop it on unmount; auto-fit asks
//! the registry instead of scanning a global namespace.

use std::collections::HashMap;

/// Padding added on top of the widest rendered content during auto-fit.
pub const AUTO_FIT_PADDING: f32 = 20.0;

/// Measurement handle for one mounted cell.
pub trait CellProbe {
    /// Current rendered width of the cell's content, if measurable.
    fn rendered_width(&self) -> Option<f32>;
}

/// Fixed-width probe for native hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProbe(pub f32);

impl CellProbe for FixedProbe {
    fn rendered_width(&self) -> Option<f32> {
        Some(self.0)
    }
}

/// Identifier handed out on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(u64);

impl ProbeId {
    /// Raw id for bookkeeping across a bridge boundary.
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Rebuild an id previously flattened with [`ProbeId::to_raw`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Registry of currently-mounted cells keyed by column.
#[derive(Default)]
pub struct CellRegistry {
    probes: HashMap<String, Vec<(ProbeId, Box<dyn CellProbe>)>>,
    next_id: u64,
}

impl CellRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mounted cell for `key`; the returned id unregisters it.
    pub fn register(&mut self, key: &str, probe: Box<dyn CellProbe>) -> ProbeId {
        let id = ProbeId(self.next_id);
        self.next_id += 1;
        self.probes.entry(key.to_string()).or_default().push((id, probe));
        id
    }

    /// Drop a previously registered probe.
    pub fn unregister(&mut self, key: &str, id: ProbeId) {
        if let Some(entries) = self.probes.get_mut(key) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                self.probes.remove(key);
            }
        }
    }

    /// Number of mounted instances of `key`.
    pub fn instances(&self, key: &str) -> usize {
        self.probes.get(key).map_or(0, Vec::len)
    }

    /// Widest rendered instance of `key`, if any instance is measurable.
    pub fn max_rendered_width(&self, key: &str) -> Option<f32> {
        let entries = self.probes.get(key)?;
        entries
            .iter()
            .filter_map(|(_, probe)| probe.rendered_width())
            .fold(None, |best: Option<f32>, width| {
                Some(best.map_or(width, |b| b.max(width)))
            })
    }

    /// Auto-fit width for `key`: widest mounted instance plus padding.
    ///
    /// `None` when nothing is mounted or the best measure is zero; the
    /// column keeps its prior width in that case.
    pub fn auto_fit_width(&self, key: &str) -> Option<f32> {
        let max = self.max_rendered_width(key)?;
        if max <= 0.0 {
            return None;
        }
        Some(max + AUTO_FIT_PADDING)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_max_across_instances() {
        let mut registry = CellRegistry::new();
        registry.register("qty", Box::new(FixedProbe(80.0)));
        registry.register("qty", Box::new(FixedProbe(120.0)));
        registry.register("qty", Box::new(FixedProbe(100.0)));
        assert_eq!(registry.instances("qty"), 3);
        assert_eq!(registry.max_rendered_width("qty"), Some(120.0));
        assert_eq!(registry.auto_fit_width("qty"), Some(140.0));
    }

    #[test]
    fn test_unregister_removes_instance() {
        let mut registry = CellRegistry::new();
        let id = registry.register("qty", Box::new(FixedProbe(120.0)));
        registry.register("qty", Box::new(FixedProbe(80.0)));
        registry.unregister("qty", id);
        assert_eq!(registry.instances("qty"), 1);
        assert_eq!(registry.max_rendered_width("qty"), Some(80.0));
    }

    #[test]
    fn test_empty_and_zero_width_yield_no_fit() {
        let mut registry = CellRegistry::new();
        assert_eq!(registry.auto_fit_width("qty"), None);
        registry.register("qty", Box::new(FixedProbe(0.0)));
        assert_eq!(registry.auto_fit_width("qty"), None);
    }
}
