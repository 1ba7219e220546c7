//! Clickable regions recorded while rendering, for mouse hit-testing.

use ratatui::layout::Rect;

/// What a region of the screen stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The nav bar background (hovering it is "not a link").
    NavBar,
    Logo,
    NavLink(usize),
    LearnMore,
    OpenModal,
    CloseModal,
    Overlay,
    ModalBody,
    /// The tab container outside any tab button.
    TabContainer,
    Tab(usize),
    SliderPrev,
    SliderNext,
    /// The dot row outside any dot.
    DotRow,
    /// A dot, carrying its tag exactly as rendered.
    Dot(String),
}

/// Regions in registration order; later regions sit on top.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    zones: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, target: HitTarget) {
        if rect.width > 0 && rect.height > 0 {
            self.zones.push((rect, target));
        }
    }

    /// Topmost target under `(col, row)`.
    pub fn hit(&self, col: u16, row: u16) -> Option<&HitTarget> {
        self.zones
            .iter()
            .rev()
            .find(|(r, _)| point_in_rect(*r, col, row))
            .map(|(_, t)| t)
    }

    /// Move every region from document rows into `viewport`, where document
    /// row `scroll` lands on the viewport's first row.  Regions outside the
    /// viewport are dropped and partly visible ones are clipped.
    pub fn project(self, scroll: i32, viewport: Rect) -> HitMap {
        let mut out = HitMap::default();
        let top = i32::from(viewport.y);
        let bottom = top + i32::from(viewport.height);
        for (r, target) in self.zones {
            let y0 = (i32::from(r.y) - scroll + top).max(top);
            let y1 = (i32::from(r.y) + i32::from(r.height) - scroll + top).min(bottom);
            if y1 <= y0 {
                continue;
            }
            out.push(
                Rect::new(viewport.x + r.x, y0 as u16, r.width, (y1 - y0) as u16),
                target,
            );
        }
        out
    }

    pub fn extend(&mut self, other: HitMap) {
        self.zones.extend(other.zones);
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn targets(&self) -> impl Iterator<Item = &HitTarget> {
        self.zones.iter().map(|(_, t)| t)
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
