//! Page scroll with exponential ease-out.
//!
//! `scroll_into_view` only moves the target; each tick the position closes
//! a fixed fraction of the remaining distance, so long jumps start fast and
//! settle gently.  Wheel and key scrolling move position and target
//! together (no easing).

/// Vertical scroll position of the page, in rows.
#[derive(Debug, Clone)]
pub struct PageScroll {
    position: f64,
    target: f64,
    /// Largest valid offset: document height minus viewport height.
    max: f64,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl PageScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable range after a relayout.
    pub fn set_bounds(&mut self, document_height: i32, viewport_height: u16) {
        self.max = f64::from((document_height - i32::from(viewport_height)).max(0));
        self.target = self.target.clamp(0.0, self.max);
        self.position = self.position.clamp(0.0, self.max);
    }

    /// Smoothly bring `row` to the top of the viewport.
    pub fn scroll_into_view(&mut self, row: i32) {
        self.target = f64::from(row).clamp(0.0, self.max);
    }

    /// Jump by `rows` immediately.
    pub fn scroll_by(&mut self, rows: i32) {
        self.position = (self.position + f64::from(rows)).clamp(0.0, self.max);
        self.target = self.position;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_into_view(0);
    }

    /// Advance the animation one frame.
    pub fn tick(&mut self) {
        let remaining = self.target - self.position;
        if remaining.abs() < 0.5 {
            self.position = self.target;
            return;
        }
        self.position += remaining * self.speed;
    }

    /// Current top row of the viewport.
    pub fn offset(&self) -> i32 {
        self.position.round() as i32
    }

    pub fn target(&self) -> i32 {
        self.target.round() as i32
    }

    /// True while the viewport is still moving toward its target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll() -> PageScroll {
        let mut s = PageScroll::new(0.35);
        s.set_bounds(200, 40);
        s
    }

    #[test]
    fn converges_on_the_target() {
        let mut s = scroll();
        s.scroll_into_view(120);
        let mut last = s.offset();
        for _ in 0..100 {
            s.tick();
            assert!(s.offset() >= last);
            last = s.offset();
        }
        assert_eq!(s.offset(), 120);
        assert!(!s.is_animating());
    }

    #[test]
    fn targets_are_clamped() {
        let mut s = scroll();
        s.scroll_into_view(1000);
        assert_eq!(s.target(), 160);
        s.scroll_into_view(-5);
        assert_eq!(s.target(), 0);
    }

    #[test]
    fn scroll_by_is_immediate() {
        let mut s = scroll();
        s.scroll_by(10);
        assert_eq!(s.offset(), 10);
        assert!(!s.is_animating());
        s.scroll_by(-50);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn shrinking_the_document_pulls_the_viewport_back() {
        let mut s = scroll();
        s.scroll_by(150);
        s.set_bounds(100, 40);
        assert_eq!(s.offset(), 60);
    }

    #[test]
    fn short_documents_do_not_scroll() {
        let mut s = PageScroll::new(0.35);
        s.set_bounds(20, 40);
        s.scroll_by(5);
        assert_eq!(s.offset(), 0);
    }
}
