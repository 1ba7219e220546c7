//! Navigation hover fade.
//!
//! Hovering one nav link dims its siblings and the logo; leaving it
//! restores them.  The caller resolves the pointer to a link index;
//! pointer events anywhere else never reach this module.

pub const FADED: f32 = 0.5;
pub const OPAQUE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct NavFade {
    links: Vec<f32>,
    logo: f32,
}

impl NavFade {
    pub fn new(link_count: usize) -> Self {
        Self {
            links: vec![OPAQUE; link_count],
            logo: OPAQUE,
        }
    }

    pub fn mouse_over(&mut self, link: usize) {
        self.apply(link, FADED);
    }

    pub fn mouse_out(&mut self, link: usize) {
        self.apply(link, OPAQUE);
    }

    fn apply(&mut self, hovered: usize, opacity: f32) {
        if hovered >= self.links.len() {
            return;
        }
        for (i, link) in self.links.iter_mut().enumerate() {
            if i != hovered {
                *link = opacity;
            }
        }
        self.logo = opacity;
    }

    pub fn link_opacity(&self, index: usize) -> f32 {
        self.links.get(index).copied().unwrap_or(OPAQUE)
    }

    pub fn logo_opacity(&self) -> f32 {
        self.logo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_dims_siblings_and_logo() {
        let mut f = NavFade::new(4);
        f.mouse_over(1);
        assert_eq!(f.link_opacity(1), OPAQUE);
        for i in [0, 2, 3] {
            assert_eq!(f.link_opacity(i), FADED);
        }
        assert_eq!(f.logo_opacity(), FADED);
    }

    #[test]
    fn mouse_out_restores() {
        let mut f = NavFade::new(3);
        f.mouse_over(0);
        f.mouse_out(0);
        for i in 0..3 {
            assert_eq!(f.link_opacity(i), OPAQUE);
        }
        assert_eq!(f.logo_opacity(), OPAQUE);
    }

    #[test]
    fn unknown_links_are_ignored() {
        let mut f = NavFade::new(3);
        f.mouse_over(7);
        assert_eq!(f.logo_opacity(), OPAQUE);
        assert_eq!(f.link_opacity(0), OPAQUE);
    }
}
