//! Reveal-on-scroll: every section starts hidden and is revealed the first
//! time enough of it scrolls into view.  Revealed sections are no longer
//! observed, so they never hide again.

use super::observer::{IntersectionObserver, ObserverOptions, RowSpan};

/// Fraction of a section that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.15;

#[derive(Debug)]
pub struct SectionReveal {
    observer: IntersectionObserver<usize>,
    hidden: Vec<bool>,
}

impl SectionReveal {
    /// Hide and observe `count` sections.
    pub fn new(count: usize) -> Self {
        let mut observer = IntersectionObserver::new(ObserverOptions {
            threshold: REVEAL_THRESHOLD,
            root_margin: 0,
        });
        for i in 0..count {
            observer.observe(i);
        }
        Self {
            observer,
            hidden: vec![true; count],
        }
    }

    /// All sections visible from the start and nothing observed.
    pub fn disabled(count: usize) -> Self {
        Self {
            observer: IntersectionObserver::new(ObserverOptions {
                threshold: REVEAL_THRESHOLD,
                root_margin: 0,
            }),
            hidden: vec![false; count],
        }
    }

    /// Check the sections against the viewport.  Returns the indices
    /// revealed by this call.
    pub fn update(&mut self, viewport: RowSpan, sections: &[RowSpan]) -> Vec<usize> {
        let mut revealed = Vec::new();
        for entry in self
            .observer
            .take_entries(viewport, |i| sections.get(i).copied())
        {
            if !entry.is_intersecting {
                continue;
            }
            if let Some(hidden) = self.hidden.get_mut(entry.target) {
                *hidden = false;
            }
            self.observer.unobserve(entry.target);
            revealed.push(entry.target);
        }
        if !revealed.is_empty() {
            tracing::debug!(?revealed, "sections revealed");
        }
        revealed
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.observer.observed_count()
    }
}
