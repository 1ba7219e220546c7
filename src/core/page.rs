//! The landing page document: content plus vertical geometry.
//!
//! Geometry is measured in terminal rows from the top of the document.  The
//! header is one viewport tall; everything below it has a fixed height so
//! scroll targets and observer rects can be computed without rendering.

use std::path::PathBuf;

use super::assets::ImageSource;
use super::observer::RowSpan;

pub const NAV_HEIGHT: u16 = 3;
pub const MIN_HEADER_HEIGHT: u16 = 20;
pub const FEATURE_HEIGHT: i32 = 9;
pub const TAB_ROW_HEIGHT: i32 = 3;
pub const TAB_CONTENT_HEIGHT: i32 = 7;
pub const SLIDE_HEIGHT: i32 = 12;
pub const DOTS_HEIGHT: i32 = 1;
pub const SIGN_UP_BODY_HEIGHT: i32 = 3;
pub const FOOTER_HEIGHT: i32 = 5;
/// Blank rows above and below each section's content.
pub const SECTION_PADDING: i32 = 2;
/// Description, title and a spacer row.
pub const SECTION_TITLE_HEIGHT: i32 = 3;

/// Number of feature images before extra images become slides.
const FEATURE_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    /// The call-to-action link styled as a button.  It opens the modal
    /// instead of scrolling.
    pub is_button: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBody {
    Features,
    Operations,
    Testimonials,
    SignUp,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: &'static str,
    pub description: &'static str,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub heading: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone)]
pub struct Tab {
    pub number: u8,
    pub label: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone)]
pub enum Slide {
    Testimonial {
        headline: &'static str,
        quote: &'static str,
        author: &'static str,
        location: &'static str,
    },
    Image(ImageSource),
}

#[derive(Debug, Clone)]
pub struct Page {
    pub brand: &'static str,
    pub nav_links: Vec<NavLink>,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub sections: Vec<Section>,
    pub features: Vec<Feature>,
    /// Lazy-loaded image for each feature, by position.
    pub feature_images: Vec<ImageSource>,
    pub tabs: Vec<Tab>,
    pub slides: Vec<Slide>,
}

/// Document geometry for one viewport height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub header: RowSpan,
    pub sections: Vec<RowSpan>,
    pub feature_images: Vec<RowSpan>,
    pub footer: RowSpan,
    pub height: i32,
}

impl PageLayout {
    /// Where a section's content (title block) starts.
    pub fn section_top(&self, index: usize) -> Option<i32> {
        self.sections.get(index).map(|s| s.top)
    }
}

impl Page {
    /// The built-in page.  The first images feed the features; any further
    /// images are appended to the slider.  Missing feature images are
    /// generated.
    pub fn new(images: &[PathBuf]) -> Self {
        let mut files = images.iter().cloned().map(ImageSource::File);
        let feature_images = (0..FEATURE_COUNT)
            .map(|i| {
                files
                    .next()
                    .unwrap_or(ImageSource::Generated { seed: i as u32 })
            })
            .collect();

        let mut slides = vec![
            Slide::Testimonial {
                headline: "Best financial decision ever!",
                quote: "Moving my savings over took five minutes and I have not \
                        thought about fees since. The app does exactly what it says.",
                author: "Aarav Lynn",
                location: "San Francisco, USA",
            },
            Slide::Testimonial {
                headline: "The last step to becoming a complete minimalist",
                quote: "One account, one card, one screen. Everything I used to \
                        juggle across three banks now fits in my pocket.",
                author: "Miyah Miles",
                location: "London, UK",
            },
            Slide::Testimonial {
                headline: "Finally free from old-school banks",
                quote: "Loans approved in an afternoon, transfers that land \
                        instantly, and support that actually answers.",
                author: "Francisco Gomes",
                location: "Lisbon, Portugal",
            },
        ];
        slides.extend(files.map(Slide::Image));

        Self {
            brand: "Ledgerly",
            nav_links: vec![
                NavLink { label: "Features", href: "#section--1", is_button: false },
                NavLink { label: "Operations", href: "#section--2", is_button: false },
                NavLink { label: "Testimonials", href: "#section--3", is_button: false },
                NavLink { label: "Open account", href: "#", is_button: true },
            ],
            hero_title: "When banking meets minimalist",
            hero_subtitle: "A simpler banking experience for a simpler life.",
            sections: vec![
                Section {
                    id: "section--1",
                    description: "Features",
                    title: "Everything you need in a modern bank and more.",
                    body: SectionBody::Features,
                },
                Section {
                    id: "section--2",
                    description: "Operations",
                    title: "Everything as simple as possible, but no simpler.",
                    body: SectionBody::Operations,
                },
                Section {
                    id: "section--3",
                    description: "Not sure yet?",
                    title: "Millions of customers are already making their lives simpler.",
                    body: SectionBody::Testimonials,
                },
                Section {
                    id: "section--sign-up",
                    description: "",
                    title: "The best day to join was one year ago. The second best is today!",
                    body: SectionBody::SignUp,
                },
            ],
            features: vec![
                Feature {
                    heading: "100% digital bank",
                    text: "Open an account from the couch, manage it from anywhere. \
                           No branches, no paperwork, no queues.",
                },
                Feature {
                    heading: "Watch your money grow",
                    text: "Savings goals with real interest, rounded-up spare change \
                           and monthly insights on where it all goes.",
                },
                Feature {
                    heading: "Free debit card included",
                    text: "Pay worldwide without conversion fees. Freeze and unfreeze \
                           the card from the app in one tap.",
                },
            ],
            feature_images,
            tabs: vec![
                Tab {
                    number: 1,
                    label: "01 Instant Transfers",
                    heading: "Transfers are instant, even across borders",
                    body: "Send money to anyone with an account number or phone \
                           number. It arrives before they have put the phone down.",
                },
                Tab {
                    number: 2,
                    label: "02 Instant Loans",
                    heading: "Buy a home or make your dreams come true, with instant loans",
                    body: "Apply in the app, get an answer in minutes and see the \
                           full repayment plan before you sign anything.",
                },
                Tab {
                    number: 3,
                    label: "03 Instant Closing",
                    heading: "No longer need your account? No problem! Close it instantly",
                    body: "Closing takes one confirmation. Your balance is sent to \
                           the account of your choice the same day.",
                },
            ],
            slides,
        }
    }

    /// Resolve a nav href (`#section--1`) to a section index.
    pub fn find_section(&self, href: &str) -> Option<usize> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn tab_numbers(&self) -> Vec<u8> {
        self.tabs.iter().map(|t| t.number).collect()
    }

    fn body_height(&self, body: SectionBody) -> i32 {
        match body {
            SectionBody::Features => self.features.len() as i32 * FEATURE_HEIGHT,
            SectionBody::Operations => TAB_ROW_HEIGHT + 1 + TAB_CONTENT_HEIGHT,
            SectionBody::Testimonials => SLIDE_HEIGHT + 1 + DOTS_HEIGHT,
            SectionBody::SignUp => SIGN_UP_BODY_HEIGHT,
        }
    }

    /// Lay the document out for a viewport `viewport_height` rows tall.
    pub fn layout(&self, viewport_height: u16) -> PageLayout {
        let header_height = i32::from(viewport_height.max(MIN_HEADER_HEIGHT));
        let header = RowSpan::new(0, header_height);

        let mut top = header.bottom();
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut feature_images = Vec::new();

        for section in &self.sections {
            let body_top = top + SECTION_PADDING + SECTION_TITLE_HEIGHT;
            let height = SECTION_PADDING * 2 + SECTION_TITLE_HEIGHT + self.body_height(section.body);
            if section.body == SectionBody::Features {
                for i in 0..self.features.len() as i32 {
                    feature_images.push(RowSpan::new(body_top + i * FEATURE_HEIGHT, FEATURE_HEIGHT - 1));
                }
            }
            sections.push(RowSpan::new(top, height));
            top += height;
        }

        let footer = RowSpan::new(top, FOOTER_HEIGHT);
        PageLayout {
            header,
            sections,
            feature_images,
            footer,
            height: footer.bottom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrefs_resolve_to_sections() {
        let page = Page::new(&[]);
        assert_eq!(page.find_section("#section--1"), Some(0));
        assert_eq!(page.find_section("#section--3"), Some(2));
        assert_eq!(page.find_section("#"), None);
        assert_eq!(page.find_section("section--1"), None);
        assert_eq!(page.find_section("#nowhere"), None);
    }

    #[test]
    fn every_scrolling_link_has_a_target() {
        let page = Page::new(&[]);
        for link in page.nav_links.iter().filter(|l| !l.is_button) {
            assert!(page.find_section(link.href).is_some(), "{}", link.label);
        }
    }

    #[test]
    fn layout_is_contiguous() {
        let page = Page::new(&[]);
        let layout = page.layout(30);
        assert_eq!(layout.header, RowSpan::new(0, 30));
        let mut top = layout.header.bottom();
        for span in &layout.sections {
            assert_eq!(span.top, top);
            top = span.bottom();
        }
        assert_eq!(layout.footer.top, top);
        assert_eq!(layout.height, top + FOOTER_HEIGHT);
    }

    #[test]
    fn short_viewports_keep_a_minimum_header() {
        let layout = Page::new(&[]).layout(5);
        assert_eq!(layout.header.height, i32::from(MIN_HEADER_HEIGHT));
    }

    #[test]
    fn feature_images_sit_inside_the_features_section() {
        let page = Page::new(&[]);
        let layout = page.layout(30);
        let features = layout.sections[0];
        assert_eq!(layout.feature_images.len(), 3);
        for img in &layout.feature_images {
            assert!(img.top >= features.top && img.bottom() <= features.bottom());
        }
    }

    #[test]
    fn extra_images_become_slides() {
        let files: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        let page = Page::new(&files);
        assert_eq!(page.feature_images[0], ImageSource::File("0.png".into()));
        assert_eq!(page.slides.len(), 5);
        assert!(matches!(&page.slides[4], Slide::Image(ImageSource::File(p)) if p == &PathBuf::from("4.png")));
    }

    #[test]
    fn missing_images_are_generated() {
        let page = Page::new(&[PathBuf::from("only.png")]);
        assert_eq!(page.feature_images[1], ImageSource::Generated { seed: 1 });
        assert_eq!(page.slides.len(), 3);
    }
}
