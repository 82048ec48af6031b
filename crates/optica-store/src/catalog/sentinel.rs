//! Infinite-scroll continuation trigger.

/// Decides when the listing should load its next page.
///
/// The view reports visibility of the sentinel (the last rendered item)
/// and the trigger fires at most once per hidden-to-visible transition,
/// and only while another page exists and no fetch is in flight. When an
/// appended page replaces the sentinel with a new last item, the trigger
/// re-arms even though visibility never dropped, which is what keeps a
/// tall viewport filling itself.
#[derive(Debug, Default)]
pub struct SentinelTrigger {
    visible: bool,
    fired_at_len: Option<usize>,
}

impl SentinelTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the sentinel's visibility. Returns `true` when a
    /// continuation should fire now.
    ///
    /// `len` identifies the current sentinel (the result-set length);
    /// `has_more` and `loading` come from the listing state.
    pub fn observe(&mut self, visible: bool, has_more: bool, loading: bool, len: usize) -> bool {
        let rising = visible && !self.visible;
        self.visible = visible;

        if !visible || loading || !has_more {
            return false;
        }
        if rising || self.fired_at_len != Some(len) {
            self.fired_at_len = Some(len);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_visibility_transition() {
        let mut trigger = SentinelTrigger::new();
        assert!(trigger.observe(true, true, false, 6));
    }

    #[test]
    fn test_does_not_refire_while_visible_and_pending() {
        let mut trigger = SentinelTrigger::new();
        assert!(trigger.observe(true, true, false, 6));
        // Fetch now pending; the sentinel staying visible must not fire
        // again.
        assert!(!trigger.observe(true, true, true, 6));
        assert!(!trigger.observe(true, true, true, 6));
    }

    #[test]
    fn test_rearms_when_result_set_grows() {
        let mut trigger = SentinelTrigger::new();
        assert!(trigger.observe(true, true, false, 6));
        assert!(!trigger.observe(true, true, true, 6));
        // Page merged: twelve items now, new last element still visible.
        assert!(trigger.observe(true, true, false, 12));
    }

    #[test]
    fn test_failed_fetch_requires_new_transition() {
        let mut trigger = SentinelTrigger::new();
        assert!(trigger.observe(true, true, false, 6));
        // Fetch failed: same length, still visible - no automatic retry.
        assert!(!trigger.observe(true, true, false, 6));
        // Scrolling away and back retries.
        assert!(!trigger.observe(false, true, false, 6));
        assert!(trigger.observe(true, true, false, 6));
    }

    #[test]
    fn test_silent_when_no_more_pages() {
        let mut trigger = SentinelTrigger::new();
        assert!(!trigger.observe(true, false, false, 6));
    }
}
