//! Scroll position for the message pane.
//!
//! Offsets count lines up from the bottom, so `0` means pinned to the newest
//! row. New content keeps the pane pinned unless the user scrolled away.

/// Scroll state with bottom pinning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Maximum offset, computed from content height during render
    pub max_scroll: u16,
    /// Current offset (0 = bottom)
    pub offset: u16,
    /// True when the user scrolled away from the bottom
    pub user_has_scrolled: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll towards older rows. Returns true if the position changed.
    pub fn scroll_up(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_add(lines).min(self.max_scroll);
        if self.offset != 0 {
            self.user_has_scrolled = true;
        }
        old != self.offset
    }

    /// Scroll towards newer rows. Returns true if the position changed.
    pub fn scroll_down(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        if self.offset == 0 {
            self.user_has_scrolled = false;
        }
        old != self.offset
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = self.max_scroll;
        self.user_has_scrolled = self.max_scroll > 0;
    }

    /// Pin to the newest content and re-enable auto-scroll.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
        self.user_has_scrolled = false;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset == 0
    }

    /// Update the limit after a render, clamping the current offset.
    pub fn update_limits(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        if self.offset > max_scroll {
            self.offset = max_scroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_limits() {
        let mut scroll = ScrollState::new();
        scroll.update_limits(10);

        assert!(scroll.scroll_up(4));
        assert_eq!(scroll.offset, 4);
        assert!(scroll.user_has_scrolled);

        scroll.scroll_up(100);
        assert_eq!(scroll.offset, 10);
        assert!(!scroll.scroll_up(1));

        scroll.update_limits(6);
        assert_eq!(scroll.offset, 6);
    }

    #[test]
    fn test_scroll_down_to_bottom_reenables_pinning() {
        let mut scroll = ScrollState::new();
        scroll.update_limits(5);
        scroll.scroll_up(3);
        scroll.scroll_down(3);
        assert!(scroll.is_at_bottom());
        assert!(!scroll.user_has_scrolled);
    }

    #[test]
    fn test_scroll_to_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_limits(8);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset, 8);
        scroll.scroll_to_bottom();
        assert!(scroll.is_at_bottom());
    }

    #[test]
    fn test_nothing_to_scroll() {
        let mut scroll = ScrollState::new();
        assert!(!scroll.scroll_up(3));
        assert!(scroll.is_at_bottom());
        assert!(!scroll.user_has_scrolled);
    }
}
