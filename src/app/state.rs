//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    carousel::{Carousel, DotRow, SlideTrack},
    fade::NavFade,
    lazy::{LazyImages, LoadRequest},
    modal::ModalState,
    observer::RowSpan,
    page::{Page, PageLayout, Slide, NAV_HEIGHT},
    reveal::SectionReveal,
    sticky::StickyNav,
    tabs::TabSet,
};
use crate::ui::hit::HitMap;
use crate::ui::images::FitCache;
use crate::ui::layout::AppLayout;
use crate::ui::smooth_scroll::PageScroll;

use super::loader::{ImageKey, ImageUpdate};

/// The slider as the page drives it.
pub type Slider = Carousel<SlideTrack<Slide>, DotRow>;

/// Decoded images, keyed by the element that shows them.
pub type ImageCache = HashMap<ImageKey, Arc<RgbaImage>>;

/// Top-level application state.
pub struct AppState {
    pub page: Page,
    /// Document geometry for the current viewport height.
    pub layout: PageLayout,
    pub slider: Slider,
    pub modal: ModalState,
    pub tabs: TabSet,
    pub fade: NavFade,
    pub sticky: StickyNav,
    pub reveal: SectionReveal,
    pub lazy: LazyImages,
    pub scroll: PageScroll,
    pub images: ImageCache,
    /// Scaled copies of `images`, filled while drawing.
    pub fitted: RefCell<FitCache>,
    pub config: AppConfig,
    /// Clickable regions from the last frame, in screen coordinates.
    pub hit_map: HitMap,
    /// Nav link currently under the pointer, for mouseover/mouseout.
    pub hovered_link: Option<usize>,
    /// Full terminal area from the last frame.
    pub terminal_area: Rect,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, reveal_sections: bool) -> Self {
        let slider = Carousel::mounted(SlideTrack::new(page.slides.clone()), DotRow::default());
        let tabs = TabSet::new(page.tab_numbers(), page.tab_numbers());
        let fade = NavFade::new(page.nav_links.len());
        let reveal = if reveal_sections {
            SectionReveal::new(page.sections.len())
        } else {
            SectionReveal::disabled(page.sections.len())
        };
        let lazy = LazyImages::new(page.feature_images.clone());
        let scroll = PageScroll::new(config.scroll_speed);
        let layout = page.layout(0);

        Self {
            page,
            layout,
            slider,
            modal: ModalState::default(),
            tabs,
            fade,
            sticky: StickyNav::new(NAV_HEIGHT),
            reveal,
            lazy,
            scroll,
            images: ImageCache::new(),
            fitted: RefCell::new(FitCache::default()),
            config,
            hit_map: HitMap::default(),
            hovered_link: None,
            terminal_area: Rect::default(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Recompute the document geometry for a new terminal size.
    pub fn relayout(&mut self, area: Rect) {
        if area == self.terminal_area {
            return;
        }
        self.terminal_area = area;
        let viewport = AppLayout::from_area(area).page_area;
        self.layout = self.page.layout(viewport.height);
        self.scroll.set_bounds(self.layout.height, viewport.height);
    }

    /// The rows of the document currently on screen.
    pub fn viewport(&self) -> RowSpan {
        let height = AppLayout::from_area(self.terminal_area).page_area.height;
        RowSpan::new(self.scroll.offset(), i32::from(height))
    }

    /// Run the sticky, reveal and lazy-load observers against the current
    /// viewport.  Returns the image loads to start.
    pub fn update_observers(&mut self) -> Vec<LoadRequest> {
        let viewport = self.viewport();
        self.sticky.update(viewport, self.layout.header);
        self.reveal.update(viewport, &self.layout.sections);
        self.lazy.update(viewport, &self.layout.feature_images)
    }

    /// Whether `key` still names an element on the page.
    fn wants_image(&self, key: ImageKey) -> bool {
        match key {
            ImageKey::Feature(id) => self.lazy.get(id).is_some(),
            ImageKey::Slide(position) => matches!(self.page.slides.get(position), Some(Slide::Image(_))),
        }
    }

    /// Store a finished decode.  Feature images drop their lazy flag only on
    /// success.  Completions for elements the page no longer has are dropped.
    pub fn apply_image(&mut self, update: ImageUpdate) {
        if !self.wants_image(update.key) {
            tracing::debug!(key = ?update.key, "dropping image for unknown element");
            return;
        }
        match update.result {
            Ok(pixels) => {
                if let ImageKey::Feature(id) = update.key {
                    self.lazy.on_load(id);
                }
                self.fitted.get_mut().invalidate(update.key);
                self.images.insert(update.key, pixels);
            }
            Err(e) => match update.key {
                ImageKey::Feature(id) => self.lazy.on_error(id, &e.to_string()),
                ImageKey::Slide(position) => {
                    tracing::warn!(position, error = %e, "slide image failed to load");
                }
            },
        }
    }

    /// Slides that show an image, with their position in the slider.
    pub fn image_slides(&self) -> Vec<(usize, crate::core::assets::ImageSource)> {
        self.page
            .slides
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                Slide::Image(src) => Some((i, src.clone())),
                Slide::Testimonial { .. } => None,
            })
            .collect()
    }
}
