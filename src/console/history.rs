//! Recall cursor over the executed-snippet history
//!
//! The cursor names the slot the next recall reads. A recall returns that
//! slot and then steps the cursor one entry further in its direction,
//! stopping at the ends. An unset cursor sits past the newest entry.

/// Position used by `previous` / `next` recall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    position: Option<usize>,
}

impl HistoryCursor {
    pub fn new() -> Self {
        HistoryCursor { position: None }
    }

    /// Slot the next recall will read, if one has been set
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_unset(&self) -> bool {
        self.position.is_none()
    }

    /// Forget the position; the next backward recall starts at the newest entry
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Index to read for a backward recall over `len` entries.
    ///
    /// Reads the cursor slot (the newest entry when unset), then moves the
    /// cursor toward older entries, clamping at 0.
    pub fn step_back(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = self.position.map_or(len - 1, |p| p.min(len - 1));
        self.position = Some(index.saturating_sub(1));
        Some(index)
    }

    /// Index to read for a forward recall over `len` entries.
    ///
    /// Unset cursor: nothing newer to recall. Otherwise reads the cursor
    /// slot, then moves toward newer entries, clamping at `len - 1`.
    pub fn step_forward(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = self.position?.min(len - 1);
        self.position = Some((index + 1).min(len - 1));
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_noop() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.step_back(0), None);
        assert_eq!(cursor.step_forward(0), None);
        assert!(cursor.is_unset());
    }

    #[test]
    fn test_back_then_forward_over_two_entries() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.step_back(2), Some(1));
        assert_eq!(cursor.step_forward(2), Some(0));
        assert_eq!(cursor.position(), Some(1));
    }

    #[test]
    fn test_back_clamps_at_oldest() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.step_back(3), Some(2));
        assert_eq!(cursor.step_back(3), Some(1));
        assert_eq!(cursor.step_back(3), Some(0));
        assert_eq!(cursor.step_back(3), Some(0));
    }

    #[test]
    fn test_forward_clamps_at_newest() {
        let mut cursor = HistoryCursor::new();
        cursor.step_back(2);
        cursor.step_back(2);
        assert_eq!(cursor.step_forward(2), Some(0));
        assert_eq!(cursor.step_forward(2), Some(1));
        assert_eq!(cursor.step_forward(2), Some(1));
    }

    #[test]
    fn test_forward_with_unset_cursor_is_noop() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.step_forward(4), None);
        assert!(cursor.is_unset());
    }

    #[test]
    fn test_reset_returns_to_newest() {
        let mut cursor = HistoryCursor::new();
        cursor.step_back(3);
        cursor.step_back(3);
        cursor.reset();
        assert_eq!(cursor.step_back(3), Some(2));
    }
}
