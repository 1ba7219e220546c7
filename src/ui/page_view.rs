//! The scrolling landing page.
//!
//! The whole document is drawn into an off-screen buffer as tall as the
//! page layout, and the rows under the viewport are copied onto the
//! terminal.  Click zones are recorded in document rows while drawing and
//! projected to screen rows afterwards.  When the nav is sticky a second
//! copy of it is pinned over the first viewport rows.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::loader::ImageKey;
use crate::app::state::AppState;
use crate::core::observer::RowSpan;
use crate::core::page::{
    SectionBody, Slide, DOTS_HEIGHT, FEATURE_HEIGHT, NAV_HEIGHT, SECTION_PADDING,
    SECTION_TITLE_HEIGHT, SLIDE_HEIGHT, TAB_CONTENT_HEIGHT, TAB_ROW_HEIGHT,
};

use super::hit::{HitMap, HitTarget};
use super::images::render_placeholder;
use super::theme::Theme;

/// Widest the page content column gets.
const MAX_CONTENT_WIDTH: u16 = 96;
/// Dots are drawn ` ● ` with a one-column gap between them.
const DOT_WIDTH: u16 = 3;
const DOT_GAP: u16 = 1;

pub struct PageView<'a> {
    pub state: &'a AppState,
    /// Shown in the footer.
    pub year: i32,
}

impl PageView<'_> {
    /// Draw the visible part of the page into `area` and return its click
    /// zones in screen coordinates.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> HitMap {
        if area.width == 0 || area.height == 0 {
            return HitMap::default();
        }
        let layout = &self.state.layout;
        let doc_height = layout.height.clamp(0, i32::from(u16::MAX)) as u16;
        let mut doc = Buffer::empty(Rect::new(0, 0, area.width, doc_height));
        let mut hits = HitMap::default();

        self.render_header(&mut doc, &mut hits);
        for (i, section) in self.state.page.sections.iter().enumerate() {
            if self.state.reveal.is_hidden(i) {
                continue;
            }
            let Some(span) = layout.sections.get(i) else {
                continue;
            };
            self.render_section_title(span.top, section.description, section.title, &mut doc);
            let body_top = span.top + SECTION_PADDING + SECTION_TITLE_HEIGHT;
            match section.body {
                SectionBody::Features => self.render_features(&mut doc),
                SectionBody::Operations => self.render_operations(body_top, &mut doc, &mut hits),
                SectionBody::Testimonials => self.render_slider(body_top, &mut doc, &mut hits),
                SectionBody::SignUp => self.render_sign_up(body_top, &mut doc, &mut hits),
            }
        }
        self.render_footer(layout.footer, &mut doc);

        let scroll = self.state.scroll.offset();
        blit(&doc, scroll, area, buf);
        let mut screen_hits = hits.project(scroll, area);

        if self.state.sticky.is_sticky() {
            let nav_area = Rect::new(area.x, area.y, area.width, NAV_HEIGHT.min(area.height));
            Clear.render(nav_area, buf);
            Block::default()
                .style(Theme::sticky_nav_style())
                .render(nav_area, buf);
            self.render_nav(nav_area, buf, &mut screen_hits);
        }
        screen_hits
    }

    /// The centred content column of the document.
    fn column(&self, width: u16) -> (u16, u16) {
        let w = width.saturating_sub(4).min(MAX_CONTENT_WIDTH);
        ((width - w) / 2, w)
    }

    // ── header ─────────────────────────────────────────────────

    fn render_nav(&self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        hits.push(area, HitTarget::NavBar);
        let row = area.y + area.height / 2;
        let fade = &self.state.fade;

        let logo = format!("◆ {}", self.state.page.brand);
        let logo_rect = Rect::new(area.x + 2, row, text_width(&logo).min(area.width), 1);
        Paragraph::new(Span::styled(logo, Theme::logo_style(fade.logo_opacity())))
            .render(logo_rect, buf);
        hits.push(logo_rect, HitTarget::Logo);

        // Links are packed against the right edge.
        let mut right = area.right().saturating_sub(2);
        for (i, link) in self.state.page.nav_links.iter().enumerate().rev() {
            let opacity = fade.link_opacity(i);
            let (label, style) = if link.is_button {
                (format!(" {} ", link.label), Theme::nav_button_style(opacity))
            } else {
                (link.label.to_string(), Theme::nav_link_style(opacity))
            };
            let w = text_width(&label);
            let x = right.saturating_sub(w);
            if x <= logo_rect.right() {
                break;
            }
            let rect = Rect::new(x, row, w, 1);
            Paragraph::new(Span::styled(label, style)).render(rect, buf);
            hits.push(rect, HitTarget::NavLink(i));
            right = x.saturating_sub(3);
        }
    }

    fn render_header(&self, doc: &mut Buffer, hits: &mut HitMap) {
        let width = doc.area.width;
        let header = self.state.layout.header;
        self.render_nav(Rect::new(0, 0, width, NAV_HEIGHT), doc, hits);

        let (x, w) = self.column(width);
        let mid = (header.height / 2).max(i32::from(NAV_HEIGHT) + 2);
        let title_rect = Rect::new(x, row(mid - 2), w, 2);
        Paragraph::new(Line::styled(self.state.page.hero_title, Theme::hero_title_style()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(title_rect, doc);
        Paragraph::new(Line::styled(self.state.page.hero_subtitle, Theme::body_style()))
            .alignment(Alignment::Center)
            .render(Rect::new(x, row(mid + 1), w, 1), doc);

        let label = "Learn more ↓";
        let bw = text_width(label);
        let button = Rect::new(x + w.saturating_sub(bw) / 2, row(mid + 3), bw.min(w), 1);
        Paragraph::new(Span::styled(label, Theme::link_button_style())).render(button, doc);
        hits.push(button, HitTarget::LearnMore);
    }

    // ── sections ───────────────────────────────────────────────

    fn render_section_title(&self, top: i32, description: &str, title: &str, doc: &mut Buffer) {
        let (x, w) = self.column(doc.area.width);
        let y = top + SECTION_PADDING;
        if !description.is_empty() {
            Paragraph::new(Line::styled(description.to_uppercase(), Theme::description_style()))
                .alignment(Alignment::Center)
                .render(Rect::new(x, row(y), w, 1), doc);
        }
        Paragraph::new(Line::styled(title, Theme::heading_style()))
            .alignment(Alignment::Center)
            .render(Rect::new(x, row(y + 1), w, 1), doc);
    }

    fn render_features(&self, doc: &mut Buffer) {
        let (x, w) = self.column(doc.area.width);
        let half = w / 2;
        let spans = &self.state.layout.feature_images;
        for (i, feature) in self.state.page.features.iter().enumerate() {
            let Some(span) = spans.get(i) else {
                continue;
            };
            let (image_x, text_x) = if i % 2 == 0 { (x, x + half) } else { (x + half, x) };
            let image_rect = Rect::new(image_x + 1, row(span.top), half.saturating_sub(2), row(span.height));
            self.render_feature_image(i, image_rect, doc);

            let text_rect = Rect::new(text_x + 2, row(span.top + 1), half.saturating_sub(4), row(FEATURE_HEIGHT - 3));
            let text = vec![
                Line::styled(feature.heading, Theme::heading_style()),
                Line::raw(""),
                Line::styled(feature.text, Theme::body_style()),
            ];
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .render(text_rect, doc);
        }
    }

    fn render_feature_image(&self, id: usize, area: Rect, doc: &mut Buffer) {
        let Some(image) = self.state.lazy.get(id) else {
            return;
        };
        if !image.lazy {
            let key = ImageKey::Feature(id);
            if let Some(pixels) = self.state.images.get(&key) {
                self.state.fitted.borrow_mut().render(key, pixels, area, doc);
                return;
            }
        }
        let label = match &image.src {
            Some(src) => format!("loading {}", src.label()),
            None => image.data_src.label(),
        };
        render_placeholder(area, image.lazy, &label, doc);
    }

    fn render_operations(&self, body_top: i32, doc: &mut Buffer, hits: &mut HitMap) {
        let (x, w) = self.column(doc.area.width);
        let tabs = &self.state.page.tabs;
        let container = Rect::new(x, row(body_top), w, row(TAB_ROW_HEIGHT));
        hits.push(container, HitTarget::TabContainer);

        let labels: Vec<String> = tabs.iter().map(|t| format!("  {}  ", t.label)).collect();
        let total: u16 = labels.iter().map(|l| text_width(l) + 2).sum();
        let mut tx = x + w.saturating_sub(total) / 2;
        for (i, (tab, label)) in tabs.iter().zip(labels).enumerate() {
            let active = self.state.tabs.is_tab_active(i);
            let tw = text_width(&label);
            // The active tab sits one row higher.
            let y = if active { body_top } else { body_top + 1 };
            Paragraph::new(Span::styled(label, Theme::tab_style(tab.number, active)))
                .render(Rect::new(tx, row(y), tw, 1), doc);
            hits.push(Rect::new(tx, row(body_top), tw, row(TAB_ROW_HEIGHT)), HitTarget::Tab(i));
            tx += tw + 2;
        }

        let content_rect = Rect::new(x, row(body_top + TAB_ROW_HEIGHT + 1), w, row(TAB_CONTENT_HEIGHT));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(content_rect);
        block.render(content_rect, doc);
        if let Some(tab) = self.state.tabs.active_content().and_then(|i| tabs.get(i)) {
            let text = vec![
                Line::styled(tab.heading, Theme::heading_style()),
                Line::raw(""),
                Line::styled(tab.body, Theme::body_style()),
            ];
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .render(inner.inner(Margin::new(1, 0)), doc);
        }
    }

    fn render_slider(&self, body_top: i32, doc: &mut Buffer, hits: &mut HitMap) {
        let (x, w) = self.column(doc.area.width);
        let slider_rect = Rect::new(x, row(body_top), w, row(SLIDE_HEIGHT));
        let arrow_y = row(body_top + SLIDE_HEIGHT / 2);

        let prev = Rect::new(x, arrow_y, 3, 1);
        let next = Rect::new(slider_rect.right().saturating_sub(3), arrow_y, 3, 1);
        Paragraph::new(Span::styled(" ◀ ", Theme::slider_button_style())).render(prev, doc);
        Paragraph::new(Span::styled(" ▶ ", Theme::slider_button_style())).render(next, doc);

        let slide_area = Rect::new(x + 5, row(body_top), w.saturating_sub(10), row(SLIDE_HEIGHT));
        if let Some((position, slide)) = self.state.slider.slides().visible() {
            self.render_slide(position, slide, slide_area, doc);
        }
        hits.push(prev, HitTarget::SliderPrev);
        hits.push(next, HitTarget::SliderNext);

        let dots = self.state.slider.indicators().dots();
        let dots_y = row(body_top + SLIDE_HEIGHT + 1);
        hits.push(Rect::new(x, dots_y, w, row(DOTS_HEIGHT)), HitTarget::DotRow);
        let shown = dot_window(dots.len(), self.state.slider.cursor(), w);
        let row_w = (shown.len() * usize::from(DOT_WIDTH + DOT_GAP)).saturating_sub(usize::from(DOT_GAP));
        let row_w = u16::try_from(row_w).unwrap_or(u16::MAX);
        let mut dx = x + w.saturating_sub(row_w) / 2;
        for dot in &dots[shown] {
            if dx.saturating_add(DOT_WIDTH) > x + w {
                break;
            }
            let rect = Rect::new(dx, dots_y, DOT_WIDTH, 1);
            let glyph = if dot.active { " ● " } else { " ○ " };
            Paragraph::new(Span::styled(glyph, Theme::dot_style(dot.active))).render(rect, doc);
            hits.push(rect, HitTarget::Dot(dot.tag.to_string()));
            dx = dx.saturating_add(DOT_WIDTH + DOT_GAP);
        }
    }

    fn render_slide(&self, position: usize, slide: &Slide, area: Rect, doc: &mut Buffer) {
        match slide {
            Slide::Testimonial {
                headline,
                quote,
                author,
                location,
            } => {
                let text = vec![
                    Line::styled(*headline, Theme::heading_style()),
                    Line::raw(""),
                    Line::styled(format!("“{quote}”"), Theme::body_style()),
                    Line::raw(""),
                    Line::styled(*author, Theme::highlight_style()),
                    Line::styled(*location, Theme::muted_style()),
                ];
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(area.inner(Margin::new(2, 1)), doc);
            }
            Slide::Image(source) => match self.state.images.get(&ImageKey::Slide(position)) {
                Some(pixels) => {
                    self.state
                        .fitted
                        .borrow_mut()
                        .render(ImageKey::Slide(position), pixels, area, doc);
                }
                None => render_placeholder(area, true, &source.label(), doc),
            },
        }
    }

    fn render_sign_up(&self, body_top: i32, doc: &mut Buffer, hits: &mut HitMap) {
        let (x, w) = self.column(doc.area.width);
        let label = "  Open your free account today!  ";
        let bw = text_width(label).min(w);
        let button = Rect::new(x + (w - bw) / 2, row(body_top + 1), bw, 1);
        Paragraph::new(Span::styled(label, Theme::button_style())).render(button, doc);
        hits.push(button, HitTarget::OpenModal);
    }

    fn render_footer(&self, footer: RowSpan, doc: &mut Buffer) {
        let (x, w) = self.column(doc.area.width);
        let text = format!(
            "© {} by {}. Use for learning or your portfolio.",
            self.year, self.state.page.brand
        );
        Paragraph::new(Line::styled(text, Theme::muted_style()))
            .alignment(Alignment::Center)
            .render(Rect::new(x, row(footer.top + 2), w, 1), doc);
    }
}

/// Copy document rows `scroll..scroll + area.height` onto `area`.
fn blit(doc: &Buffer, scroll: i32, area: Rect, buf: &mut Buffer) {
    for dy in 0..area.height {
        let doc_row = scroll + i32::from(dy);
        if doc_row < 0 || doc_row >= i32::from(doc.area.height) {
            continue;
        }
        for dx in 0..area.width.min(doc.area.width) {
            let Some(src) = doc.cell(Position::new(dx, doc_row as u16)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut(Position::new(area.x + dx, area.y + dy)) {
                *dst = src.clone();
            }
        }
    }
}

/// The dots that fit in `width` columns.  When they do not all fit, the
/// window follows the current slide.
fn dot_window(count: usize, cursor: usize, width: u16) -> std::ops::Range<usize> {
    let fit = usize::from(width.saturating_add(DOT_GAP) / (DOT_WIDTH + DOT_GAP));
    if count <= fit {
        return 0..count;
    }
    let start = cursor.saturating_sub(fit / 2).min(count - fit);
    start..start + fit
}

/// A document row as a buffer coordinate.
fn row(y: i32) -> u16 {
    y.clamp(0, i32::from(u16::MAX)) as u16
}

fn text_width(s: &str) -> u16 {
    s.chars().count().min(usize::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::page::Page;

    fn state(reveal: bool) -> AppState {
        let mut s = AppState::new(Page::new(&[]), AppConfig::default(), reveal);
        s.relayout(Rect::new(0, 0, 100, 31));
        s
    }

    fn render(s: &AppState) -> (Buffer, HitMap) {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let hits = PageView { state: s, year: 2026 }.render_and_hit(area, &mut buf);
        (buf, hits)
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    /// Scroll so the given section title sits at the top.
    fn scroll_to_section(s: &mut AppState, index: usize) {
        let top = s.layout.sections[index].top;
        s.scroll.scroll_by(top);
    }

    #[test]
    fn top_of_page_shows_nav_and_hero() {
        let s = state(true);
        let (buf, hits) = render(&s);
        let text = screen_text(&buf);
        assert!(text.contains("Ledgerly"));
        assert!(text.contains("When banking meets minimalist"));
        assert!(hits.targets().any(|t| *t == HitTarget::LearnMore));
        assert!(hits.targets().any(|t| *t == HitTarget::NavLink(3)));
    }

    #[test]
    fn hidden_sections_are_not_drawn() {
        let mut s = state(true);
        scroll_to_section(&mut s, 0);
        // Observers have not run, so every section is still hidden.
        let (buf, _) = render(&s);
        assert!(!screen_text(&buf).contains("FEATURES"));

        let mut s = state(false);
        scroll_to_section(&mut s, 0);
        let (buf, _) = render(&s);
        assert!(screen_text(&buf).contains("FEATURES"));
    }

    #[test]
    fn slider_shows_the_current_slide_and_its_dots() {
        let mut s = state(false);
        scroll_to_section(&mut s, 2);
        let (buf, hits) = render(&s);
        let text = screen_text(&buf);
        assert!(text.contains("Best financial decision ever!"));
        assert!(!text.contains("Finally free from old-school banks"));
        for tag in ["0", "1", "2"] {
            assert!(hits.targets().any(|t| *t == HitTarget::Dot(tag.into())));
        }

        s.slider.next();
        let (buf, _) = render(&s);
        assert!(screen_text(&buf).contains("The last step to becoming a complete minimalist"));
    }

    #[test]
    fn dot_zones_hit_their_dots() {
        let mut s = state(false);
        scroll_to_section(&mut s, 2);
        let (buf, hits) = render(&s);
        let (col, line) = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .find(|&(x, y)| buf[(x, y)].symbol() == "●")
            .expect("active dot drawn");
        assert_eq!(hits.hit(col, line), Some(&HitTarget::Dot("0".into())));
    }

    #[test]
    fn only_the_active_tab_content_is_shown() {
        let mut s = state(false);
        scroll_to_section(&mut s, 1);
        let (buf, _) = render(&s);
        let text = screen_text(&buf);
        assert!(text.contains("Transfers are instant"));
        assert!(!text.contains("instant loans"));

        s.tabs.click(Some(1));
        let (buf, _) = render(&s);
        let text = screen_text(&buf);
        assert!(text.contains("instant loans"));
        assert!(!text.contains("Transfers are instant"));
    }

    #[test]
    fn sticky_nav_is_pinned_on_top() {
        let mut s = state(false);
        scroll_to_section(&mut s, 1);
        s.update_observers();
        assert!(s.sticky.is_sticky());
        let (buf, hits) = render(&s);
        let first_rows: String = (0..3)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(first_rows.contains("Ledgerly"));
        assert!(hits.targets().any(|t| *t == HitTarget::NavLink(0)));
    }

    #[test]
    fn huge_sliders_show_a_window_of_dots() {
        let files: Vec<std::path::PathBuf> =
            (0..20_000).map(|i| format!("{i}.png").into()).collect();
        let mut s = AppState::new(Page::new(&files), AppConfig::default(), false);
        s.relayout(Rect::new(0, 0, 100, 31));
        scroll_to_section(&mut s, 2);

        let (_, hits) = render(&s);
        let dots = hits.targets().filter(|t| matches!(t, HitTarget::Dot(_))).count();
        assert!(dots > 0 && dots <= 24, "{dots} dots drawn");
        assert!(hits.targets().any(|t| *t == HitTarget::Dot("0".into())));

        s.slider.jump_to(15_000).unwrap();
        let (_, hits) = render(&s);
        assert!(hits.targets().any(|t| *t == HitTarget::Dot("15000".into())));
        assert!(!hits.targets().any(|t| *t == HitTarget::Dot("0".into())));
    }

    #[test]
    fn dot_window_follows_the_cursor() {
        assert_eq!(dot_window(3, 2, 96), 0..3);
        // 96 columns hold 24 dots.
        assert_eq!(dot_window(100, 0, 96), 0..24);
        assert_eq!(dot_window(100, 50, 96), 38..62);
        assert_eq!(dot_window(100, 99, 96), 76..100);
        assert_eq!(dot_window(5, 0, 0), 0..0);
    }

    #[test]
    fn footer_carries_the_year() {
        let mut s = state(false);
        s.scroll.scroll_by(10_000);
        let (buf, _) = render(&s);
        assert!(screen_text(&buf).contains("© 2026 by Ledgerly"));
    }
}
