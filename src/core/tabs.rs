//! Operations tabs: exactly one tab button and one content panel active.

/// Active flags for the tab buttons and the content panels they select.
///
/// Tabs and panels are linked by number (the tab's `data-tab`), not by
/// position.
#[derive(Debug, Clone)]
pub struct TabSet {
    tab_numbers: Vec<u8>,
    content_numbers: Vec<u8>,
    tab_active: Vec<bool>,
    content_active: Vec<bool>,
}

impl TabSet {
    /// Build the set with the first tab (and its panel) active.
    pub fn new(tab_numbers: Vec<u8>, content_numbers: Vec<u8>) -> Self {
        let mut set = Self {
            tab_active: vec![false; tab_numbers.len()],
            content_active: vec![false; content_numbers.len()],
            tab_numbers,
            content_numbers,
        };
        if !set.tab_numbers.is_empty() {
            set.click(Some(0));
        }
        set
    }

    /// Handle a click inside the tab container.  `clicked` is the tab the
    /// click resolved to, or `None` when it landed between tabs.  Returns
    /// whether anything changed.
    pub fn click(&mut self, clicked: Option<usize>) -> bool {
        let Some(index) = clicked else {
            return false;
        };
        let Some(&number) = self.tab_numbers.get(index) else {
            return false;
        };

        self.tab_active.iter_mut().for_each(|a| *a = false);
        self.content_active.iter_mut().for_each(|a| *a = false);

        self.tab_active[index] = true;
        match self.content_numbers.iter().position(|&n| n == number) {
            Some(panel) => self.content_active[panel] = true,
            None => tracing::warn!(number, "no content panel for tab"),
        }
        true
    }

    /// Cycle to the tab after the active one.
    pub fn select_next(&mut self) {
        if self.tab_numbers.is_empty() {
            return;
        }
        let next = self
            .active_tab()
            .map_or(0, |i| (i + 1) % self.tab_numbers.len());
        self.click(Some(next));
    }

    pub fn active_tab(&self) -> Option<usize> {
        self.tab_active.iter().position(|&a| a)
    }

    pub fn active_content(&self) -> Option<usize> {
        self.content_active.iter().position(|&a| a)
    }

    pub fn is_tab_active(&self, index: usize) -> bool {
        self.tab_active.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> TabSet {
        TabSet::new(vec![1, 2, 3], vec![1, 2, 3])
    }

    #[test]
    fn first_tab_starts_active() {
        let t = set();
        assert_eq!(t.active_tab(), Some(0));
        assert_eq!(t.active_content(), Some(0));
    }

    #[test]
    fn click_outside_a_tab_is_ignored() {
        let mut t = set();
        t.click(Some(2));
        assert!(!t.click(None));
        assert_eq!(t.active_tab(), Some(2));
        assert_eq!(t.active_content(), Some(2));
    }

    #[test]
    fn exactly_one_of_each_active() {
        let mut t = set();
        for i in [1, 0, 2, 2] {
            assert!(t.click(Some(i)));
            assert_eq!(t.tab_active.iter().filter(|a| **a).count(), 1);
            assert_eq!(t.content_active.iter().filter(|a| **a).count(), 1);
            assert_eq!(t.active_tab(), Some(i));
        }
    }

    #[test]
    fn panels_are_matched_by_number() {
        let mut t = TabSet::new(vec![3, 1], vec![1, 2, 3]);
        assert_eq!(t.active_content(), Some(2));
        t.click(Some(1));
        assert_eq!(t.active_content(), Some(0));
    }

    #[test]
    fn select_next_wraps() {
        let mut t = set();
        t.select_next();
        t.select_next();
        t.select_next();
        assert_eq!(t.active_tab(), Some(0));
    }
}
