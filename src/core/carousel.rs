//! Looping slider controller.
//!
//! The controller owns a cursor into a fixed sequence of slides and keeps a
//! row of dot indicators in sync with it.  It never touches the terminal:
//! the slide track and the dot row are supplied by the caller through the
//! [`SlideSurface`] and [`IndicatorSurface`] traits, so the same controller
//! drives the real page and the unit tests.

use thiserror::Error;

/// Rejected navigation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The indicator tag is not a non-negative integer.
    #[error("indicator tag {tag:?} is not a slide index")]
    InvalidTag { tag: String },
    /// The index does not name a slide.
    #[error("slide {index} is out of range (slide count {count})")]
    OutOfRange { index: usize, count: usize },
}

// ───────────────────────────────────────── surfaces ──────────

/// Where slides are positioned.  Each slide accepts a horizontal offset
/// expressed as a percentage of its own width.
pub trait SlideSurface {
    fn slide_count(&self) -> usize;
    fn set_offset(&mut self, position: usize, percent: i64);
}

/// The container of dot indicators.
pub trait IndicatorSurface {
    /// Remove every indicator.
    fn clear(&mut self);
    /// Append one indicator tagged with `tag`.
    fn append(&mut self, tag: usize);
    /// Clear the active marker from every indicator.
    fn deactivate_all(&mut self);
    /// Mark the indicator tagged `tag` as active.  Returns `false` when no
    /// indicator carries that tag.
    fn activate(&mut self, tag: i64) -> bool;
}

/// The three input channels the slider reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselInput {
    Previous,
    Next,
    /// A click on a dot, carrying the dot's tag as it was read back.
    Indicator(String),
}

// ───────────────────────────────────────── controller ────────

/// Slider state machine: states are `0..N`, `next` is `+1 mod N`,
/// `previous` is `-1 mod N`, `jump_to(k)` goes straight to `k`.
#[derive(Debug)]
pub struct Carousel<S, I> {
    slides: S,
    indicators: I,
    cursor: usize,
}

impl<S: SlideSurface, I: IndicatorSurface> Carousel<S, I> {
    /// Wrap the collaborators without touching them.  Call
    /// [`initialize`](Self::initialize) before the first frame.
    pub fn new(slides: S, indicators: I) -> Self {
        Self {
            slides,
            indicators,
            cursor: 0,
        }
    }

    /// Build the controller and run [`initialize`](Self::initialize).
    pub fn mounted(slides: S, indicators: I) -> Self {
        let mut carousel = Self::new(slides, indicators);
        carousel.initialize();
        carousel
    }

    /// Regenerate the dots (one per slide, in order), show slide 0 and
    /// activate its dot.  Existing dots are cleared first, so calling this
    /// twice leaves exactly one dot per slide.
    pub fn initialize(&mut self) {
        self.indicators.clear();
        for tag in 0..self.slides.slide_count() {
            self.indicators.append(tag);
        }
        self.cursor = 0;
        self.go_to_slide(0);
        self.activate_indicator(0);
        tracing::debug!(slides = self.slides.slide_count(), "carousel initialised");
    }

    /// Offset every slide by `100 * (position - index)` percent.  No
    /// clamping: an out-of-range index simply leaves no slide at 0%.
    pub fn go_to_slide(&mut self, index: i64) {
        for position in 0..self.slides.slide_count() {
            let percent = 100 * (position as i64 - index);
            self.slides.set_offset(position, percent);
        }
    }

    /// Make the dot tagged `index` the only active one.  An unknown tag
    /// leaves every dot inactive.
    pub fn activate_indicator(&mut self, index: i64) {
        self.indicators.deactivate_all();
        if !self.indicators.activate(index) {
            tracing::debug!(index, "no indicator with this tag");
        }
    }

    pub fn next(&mut self) {
        let count = self.slides.slide_count();
        if count == 0 {
            return;
        }
        self.cursor = if self.cursor == count - 1 { 0 } else { self.cursor + 1 };
        self.render();
    }

    pub fn previous(&mut self) {
        let count = self.slides.slide_count();
        if count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
        self.render();
    }

    /// Go straight to `index` without passing through the slides between.
    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        let count = self.slides.slide_count();
        if index >= count {
            return Err(CarouselError::OutOfRange { index, count });
        }
        self.cursor = index;
        self.render();
        Ok(())
    }

    /// Parse a dot tag read back from the indicator row and jump to it.
    pub fn jump_to_tag(&mut self, tag: &str) -> Result<usize, CarouselError> {
        let index = parse_tag(tag, self.slides.slide_count())?;
        self.jump_to(index)?;
        Ok(index)
    }

    /// Dispatch one input event.  Rejected input leaves the state untouched.
    pub fn handle(&mut self, input: CarouselInput) -> Result<(), CarouselError> {
        match input {
            CarouselInput::Previous => self.previous(),
            CarouselInput::Next => self.next(),
            CarouselInput::Indicator(tag) => {
                self.jump_to_tag(&tag)?;
            }
        }
        Ok(())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slides(&self) -> &S {
        &self.slides
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    fn render(&mut self) {
        let cursor = self.cursor as i64;
        self.go_to_slide(cursor);
        self.activate_indicator(cursor);
    }
}

/// Validate a dot tag at the input boundary.
pub fn parse_tag(tag: &str, count: usize) -> Result<usize, CarouselError> {
    let index: usize = tag.trim().parse().map_err(|_| CarouselError::InvalidTag {
        tag: tag.to_string(),
    })?;
    if index >= count {
        return Err(CarouselError::OutOfRange { index, count });
    }
    Ok(index)
}

// ───────────────────────────────────────── in-memory surfaces ─

/// A fixed sequence of slides with their current offsets.
#[derive(Debug, Clone)]
pub struct SlideTrack<T> {
    slides: Vec<T>,
    offsets: Vec<i64>,
}

impl<T> SlideTrack<T> {
    pub fn new(slides: Vec<T>) -> Self {
        let offsets = vec![0; slides.len()];
        Self { slides, offsets }
    }

    #[cfg(test)]
    pub fn offset(&self, position: usize) -> Option<i64> {
        self.offsets.get(position).copied()
    }

    #[cfg(test)]
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// The slide sitting at offset 0, if any.
    pub fn visible(&self) -> Option<(usize, &T)> {
        self.offsets
            .iter()
            .position(|&o| o == 0)
            .map(|i| (i, &self.slides[i]))
    }
}

impl<T> SlideSurface for SlideTrack<T> {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_offset(&mut self, position: usize, percent: i64) {
        if let Some(slot) = self.offsets.get_mut(position) {
            *slot = percent;
        }
    }
}

/// One dot in the indicator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub tag: usize,
    pub active: bool,
}

/// The dot indicator row.
#[derive(Debug, Clone, Default)]
pub struct DotRow {
    dots: Vec<Dot>,
}

impl DotRow {
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Tags of the currently active dots (at most one after any navigation).
    #[cfg(test)]
    pub fn active_tags(&self) -> Vec<usize> {
        self.dots.iter().filter(|d| d.active).map(|d| d.tag).collect()
    }
}

impl IndicatorSurface for DotRow {
    fn clear(&mut self) {
        self.dots.clear();
    }

    fn append(&mut self, tag: usize) {
        self.dots.push(Dot { tag, active: false });
    }

    fn deactivate_all(&mut self) {
        for dot in &mut self.dots {
            dot.active = false;
        }
    }

    fn activate(&mut self, tag: i64) -> bool {
        let Ok(tag) = usize::try_from(tag) else {
            return false;
        };
        match self.dots.iter_mut().find(|d| d.tag == tag) {
            Some(dot) => {
                dot.active = true;
                true
            }
            None => false,
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type TestCarousel = Carousel<SlideTrack<&'static str>, DotRow>;

    fn carousel(n: usize) -> TestCarousel {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        Carousel::mounted(SlideTrack::new(names[..n].to_vec()), DotRow::default())
    }

    fn assert_synced(c: &TestCarousel) {
        assert_eq!(c.indicators().active_tags(), vec![c.cursor()]);
        assert_eq!(c.slides().offset(c.cursor()), Some(0));
    }

    #[test]
    fn initialize_creates_one_dot_per_slide() {
        let c = carousel(3);
        let tags: Vec<usize> = c.indicators().dots().iter().map(|d| d.tag).collect();
        assert_eq!(tags, vec![0, 1, 2]);
        assert_eq!(c.slides().offsets(), &[0, 100, 200]);
        assert_synced(&c);
    }

    #[test]
    fn initialize_twice_does_not_duplicate_dots() {
        let mut c = carousel(3);
        c.next();
        c.initialize();
        assert_eq!(c.indicators().dots().len(), 3);
        assert_eq!(c.cursor(), 0);
        assert_synced(&c);
    }

    #[test]
    fn next_wraps_forward() {
        let mut c = carousel(3);
        let mut seen = Vec::new();
        for _ in 0..3 {
            c.next();
            seen.push((c.cursor(), c.indicators().active_tags()[0]));
        }
        assert_eq!(seen, vec![(1, 1), (2, 2), (0, 0)]);
    }

    #[test]
    fn previous_wraps_backward() {
        let mut c = carousel(3);
        c.previous();
        assert_eq!(c.cursor(), 2);
        assert_eq!(c.indicators().active_tags(), vec![2]);
    }

    #[test]
    fn indicator_jump_skips_intermediate_slides() {
        let mut c = carousel(3);
        assert_eq!(c.handle(CarouselInput::Indicator("2".into())), Ok(()));
        assert_eq!(c.cursor(), 2);
        assert_eq!(c.slides().offsets(), &[-200, -100, 0]);
        assert_synced(&c);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut c = carousel(1);
        c.next();
        assert_eq!(c.cursor(), 0);
        c.previous();
        assert_eq!(c.cursor(), 0);
        assert_synced(&c);
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut c = carousel(0);
        c.next();
        c.previous();
        assert_eq!(c.cursor(), 0);
        assert!(c.indicators().dots().is_empty());
        assert!(c.slides().visible().is_none());
        assert_eq!(
            c.jump_to(0),
            Err(CarouselError::OutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn bad_tags_are_rejected_without_moving() {
        let mut c = carousel(3);
        c.next();
        assert_eq!(
            c.jump_to_tag("two"),
            Err(CarouselError::InvalidTag { tag: "two".into() })
        );
        assert_eq!(
            c.jump_to_tag("-1"),
            Err(CarouselError::InvalidTag { tag: "-1".into() })
        );
        assert_eq!(
            c.jump_to_tag("7"),
            Err(CarouselError::OutOfRange { index: 7, count: 3 })
        );
        assert_eq!(c.cursor(), 1);
        assert_synced(&c);
    }

    #[test]
    fn tags_tolerate_surrounding_whitespace() {
        assert_eq!(parse_tag(" 1 ", 3), Ok(1));
    }

    #[test]
    fn go_to_slide_accepts_any_integer() {
        let mut c = carousel(3);
        c.go_to_slide(5);
        assert_eq!(c.slides().offsets(), &[-500, -400, -300]);
        assert!(c.slides().visible().is_none());
    }

    #[test]
    fn unknown_indicator_leaves_none_active() {
        let mut c = carousel(3);
        c.activate_indicator(9);
        assert!(c.indicators().active_tags().is_empty());
        c.activate_indicator(-1);
        assert!(c.indicators().active_tags().is_empty());
    }

    proptest! {
        #[test]
        fn next_k_times_lands_on_k_mod_n(n in 1usize..8, k in 0usize..40) {
            let mut c = carousel(n);
            for _ in 0..k {
                c.next();
            }
            prop_assert_eq!(c.cursor(), k % n);
            prop_assert_eq!(c.indicators().active_tags(), vec![k % n]);
        }

        #[test]
        fn previous_undoes_next(n in 1usize..8, start in 0usize..8) {
            let mut c = carousel(n);
            let start = start % n;
            c.jump_to(start).unwrap();
            c.next();
            c.previous();
            prop_assert_eq!(c.cursor(), start);
        }

        #[test]
        fn offsets_are_relative_to_the_cursor(n in 1usize..8, ops in proptest::collection::vec(0u8..3, 0..30)) {
            let mut c = carousel(n);
            for op in ops {
                match op {
                    0 => c.next(),
                    1 => c.previous(),
                    _ => {
                        let target = c.cursor().wrapping_mul(7) % n;
                        c.jump_to(target).unwrap();
                    }
                }
                let i = c.cursor();
                prop_assert_eq!(c.slides().offset(i), Some(0));
                if i + 1 < n {
                    prop_assert_eq!(c.slides().offset(i + 1), Some(100));
                }
                if i > 0 {
                    prop_assert_eq!(c.slides().offset(i - 1), Some(-100));
                }
                prop_assert_eq!(c.indicators().active_tags(), vec![i]);
            }
        }
    }
}
