//! Row-based intersection observer.
//!
//! Targets are vertical spans of the document (in terminal rows).  The root
//! is the scrolling viewport, grown or shrunk by a root margin.  A target
//! counts as intersecting when it overlaps the root by at least `threshold`
//! of its own height.  Entries are reported the first time a target is
//! checked after [`observe`](IntersectionObserver::observe), and afterwards
//! only when its intersecting state flips.

/// A vertical span in document rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSpan {
    pub top: i32,
    pub height: i32,
}

impl RowSpan {
    pub const fn new(top: i32, height: i32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height.max(0)
    }

    /// Grow (positive) or shrink (negative) the span on both edges.
    pub fn expand(&self, margin: i32) -> Self {
        Self {
            top: self.top - margin,
            height: (self.height + 2 * margin).max(0),
        }
    }

    pub fn overlap(&self, other: &RowSpan) -> i32 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be inside the root, `0.0..=1.0`.
    pub threshold: f64,
    /// Rows added to each edge of the viewport (negative shrinks it).
    pub root_margin: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Fraction of `target` that lies inside `root`.
pub fn intersection_ratio(target: RowSpan, root: RowSpan) -> f64 {
    if target.height <= 0 {
        return 0.0;
    }
    f64::from(target.overlap(&root)) / f64::from(target.height)
}

#[derive(Debug)]
pub struct IntersectionObserver<K> {
    options: ObserverOptions,
    /// Observed targets with the state last reported for each.
    observed: Vec<(K, Option<bool>)>,
}

impl<K: Copy + PartialEq> IntersectionObserver<K> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options: ObserverOptions {
                threshold: options.threshold.clamp(0.0, 1.0),
                root_margin: options.root_margin,
            },
            observed: Vec::new(),
        }
    }

    /// Start observing `target`.  Re-observing an observed target is a no-op.
    pub fn observe(&mut self, target: K) {
        if !self.is_observing(target) {
            self.observed.push((target, None));
        }
    }

    pub fn unobserve(&mut self, target: K) {
        self.observed.retain(|(k, _)| *k != target);
    }

    pub fn is_observing(&self, target: K) -> bool {
        self.observed.iter().any(|(k, _)| *k == target)
    }

    #[cfg(test)]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Check every observed target against `viewport`.  `rect_of` maps a
    /// target to its current span; targets it cannot place are skipped.
    pub fn take_entries<F>(&mut self, viewport: RowSpan, rect_of: F) -> Vec<Entry<K>>
    where
        F: Fn(K) -> Option<RowSpan>,
    {
        let root = viewport.expand(self.options.root_margin);
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        for (target, last) in &mut self.observed {
            let Some(rect) = rect_of(*target) else {
                continue;
            };
            let ratio = intersection_ratio(rect, root);
            let is_intersecting = rect.overlap(&root) > 0 && ratio >= threshold;
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(Entry {
                    target: *target,
                    is_intersecting,
                    ratio,
                });
            }
        }

        entries
    }
}
