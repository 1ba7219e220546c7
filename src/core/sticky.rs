//! Sticky navigation: the nav bar pins to the top once the header has
//! scrolled out from under it.

use super::observer::{IntersectionObserver, ObserverOptions, RowSpan};

#[derive(Debug)]
pub struct StickyNav {
    observer: IntersectionObserver<()>,
    sticky: bool,
}

impl StickyNav {
    /// Observe the header with the viewport shrunk by the nav height, so the
    /// nav turns sticky exactly when the header would slide under it.
    pub fn new(nav_height: u16) -> Self {
        let mut observer = IntersectionObserver::new(ObserverOptions {
            threshold: 0.0,
            root_margin: -i32::from(nav_height),
        });
        observer.observe(());
        Self {
            observer,
            sticky: false,
        }
    }

    /// Feed the current viewport and header span.  Returns `true` when the
    /// sticky state changed.
    pub fn update(&mut self, viewport: RowSpan, header: RowSpan) -> bool {
        let before = self.sticky;
        for entry in self.observer.take_entries(viewport, |_| Some(header)) {
            self.sticky = !entry.is_intersecting;
        }
        if before != self.sticky {
            tracing::debug!(sticky = self.sticky, "nav stickiness changed");
        }
        before != self.sticky
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: RowSpan = RowSpan::new(0, 30);

    #[test]
    fn not_sticky_at_top() {
        let mut s = StickyNav::new(3);
        s.update(RowSpan::new(0, 30), HEADER);
        assert!(!s.is_sticky());
    }

    #[test]
    fn toggles_both_ways() {
        let mut s = StickyNav::new(3);
        s.update(RowSpan::new(0, 30), HEADER);
        // Header bottom (30) sits above the shrunk root top (28 + 3).
        assert!(s.update(RowSpan::new(28, 30), HEADER));
        assert!(s.is_sticky());
        assert!(!s.update(RowSpan::new(40, 30), HEADER));
        assert!(s.update(RowSpan::new(10, 30), HEADER));
        assert!(!s.is_sticky());
    }

    #[test]
    fn header_stays_observed() {
        let mut s = StickyNav::new(3);
        for top in [0, 50, 0, 50] {
            s.update(RowSpan::new(top, 30), HEADER);
        }
        assert!(s.is_sticky());
    }
}
