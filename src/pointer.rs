//! Unified pointer coordinate extraction.
//!
//! Mouse, single-touch, and multi-touch events disagree on where the
//! horizontal coordinate lives. All resize math goes through one sample
//! type with a fixed resolution order, so the drag protocol never inspects
//! raw platform events.

/// Horizontal pointer sample taken from one platform event.
///
/// At most one constructor field is usually set; [`PointerInput::x`] applies
/// the resolution priority across whichever are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Primary pointer coordinate (mouse and drag events).
    pub page_x: Option<f32>,
    /// First active touch point, if the event carries touches.
    pub first_touch_x: Option<f32>,
    /// Last changed touch point (touch-end events list only changed touches).
    pub last_changed_touch_x: Option<f32>,
}

impl PointerInput {
    /// Sample from a primary-pointer event.
    pub fn from_page_x(page_x: f32) -> Self {
        Self {
            page_x: Some(page_x),
            ..Self::default()
        }
    }

    /// Sample from a touch event.
    pub fn from_touches(first_touch_x: Option<f32>, last_changed_touch_x: Option<f32>) -> Self {
        Self {
            page_x: None,
            first_touch_x,
            last_changed_touch_x,
        }
    }

    /// Sample with no usable coordinate.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Resolve the horizontal coordinate.
    ///
    /// Priority order is a contract: primary pointer first, then the first
    /// active touch, then the last changed touch. Callers must not reorder
    /// these fallbacks.
    pub fn x(&self) -> Option<f32> {
        self.page_x.or(self.first_touch_x).or(self.last_changed_touch_x)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_pointer_wins() {
        let pointer = PointerInput {
            page_x: Some(10.0),
            first_touch_x: Some(20.0),
            last_changed_touch_x: Some(30.0),
        };
        assert_eq!(pointer.x(), Some(10.0));
    }

    #[test]
    fn test_first_touch_before_changed_touch() {
        let pointer = PointerInput::from_touches(Some(20.0), Some(30.0));
        assert_eq!(pointer.x(), Some(20.0));
    }

    #[test]
    fn test_changed_touch_is_last_resort() {
        let pointer = PointerInput::from_touches(None, Some(30.0));
        assert_eq!(pointer.x(), Some(30.0));
    }

    #[test]
    fn test_missing_sample_has_no_coordinate() {
        assert_eq!(PointerInput::missing().x(), None);
    }
}
