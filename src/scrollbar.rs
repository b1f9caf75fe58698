//! Scrollbar thickness probe.
//!
//! Row widths are adjusted by the space a vertical scrollbar consumes. The
//! probe is a trait so native hosts and tests can supply a fixed value while
//! the browser layer measures the real thing.

/// Source of the platform's current scrollbar thickness.
pub trait ScrollbarSize {
    /// Scrollbar thickness in logical pixels.
    fn thickness(&self) -> f32;
}

/// Fixed scrollbar thickness for native hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScrollbar(pub f32);

impl Default for FixedScrollbar {
    fn default() -> Self {
        // Classic desktop scrollbar width; overlay scrollbars report 0.
        Self(17.0)
    }
}

impl ScrollbarSize for FixedScrollbar {
    fn thickness(&self) -> f32 {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_thickness() {
        assert_eq!(FixedScrollbar(12.0).thickness(), 12.0);
        assert_eq!(FixedScrollbar::default().thickness(), 17.0);
    }
}
