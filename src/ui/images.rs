//! Image drawing: cached half-block renderer and the lazy placeholder.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::app::loader::ImageKey;

use super::theme::Theme;

/// Fitted copies of decoded images, one per page element.
///
/// A scaled copy is kept until the element's cell size changes or a new
/// decode lands.
#[derive(Default)]
pub struct FitCache {
    entries: HashMap<ImageKey, Fitted>,
}

struct Fitted {
    width: u16,
    height: u16,
    image: RgbaImage,
}

impl FitCache {
    /// Draw `img` into `area` with `▀` half-blocks, two pixels per cell.
    /// Aspect ratio is kept and the picture is centred horizontally.
    pub fn render(&mut self, key: ImageKey, img: &RgbaImage, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || img.width() == 0 || img.height() == 0 {
            return;
        }
        let fresh = matches!(
            self.entries.get(&key),
            Some(f) if f.width == area.width && f.height == area.height
        );
        if !fresh {
            tracing::trace!(?key, width = area.width, height = area.height, "refit image");
            let image = fit(img, area.width, area.height);
            self.entries.insert(key, Fitted { width: area.width, height: area.height, image });
        }
        if let Some(fitted) = self.entries.get(&key) {
            paint(&fitted.image, area, buf);
        }
    }

    /// Forget the fitted copy for `key`, e.g. after it was decoded again.
    pub fn invalidate(&mut self, key: ImageKey) {
        self.entries.remove(&key);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Scale `img` into a box of `width` cells by `height` cells.
fn fit(img: &RgbaImage, width: u16, height: u16) -> RgbaImage {
    let (src_w, src_h) = (f64::from(img.width()), f64::from(img.height()));
    let scale = (f64::from(width) / src_w).min(f64::from(height) * 2.0 / src_h);
    let w = (src_w * scale).round().max(1.0) as u32;
    let h = (src_h * scale).round().max(1.0) as u32;
    imageops::resize(img, w, h, FilterType::Triangle)
}

fn rgb(pixel: &Rgba<u8>) -> Color {
    Color::Rgb(pixel[0], pixel[1], pixel[2])
}

fn paint(fitted: &RgbaImage, area: Rect, buf: &mut Buffer) {
    let cols = u16::try_from(fitted.width()).unwrap_or(u16::MAX).min(area.width);
    let left = area.x + (area.width - cols) / 2;
    let rows = (0..fitted.height()).step_by(2).take(usize::from(area.height));
    for (dy, y) in (0u16..).zip(rows) {
        for dx in 0..cols {
            let top = rgb(fitted.get_pixel(u32::from(dx), y));
            let bottom = if y + 1 < fitted.height() {
                rgb(fitted.get_pixel(u32::from(dx), y + 1))
            } else {
                Color::Reset
            };
            if let Some(cell) = buf.cell_mut(Position::new(left + dx, area.y + dy)) {
                cell.set_char('▀').set_fg(top).set_bg(bottom);
            }
        }
    }
}

/// Shaded box shown while an image is lazy.  `label` is centred on it.
pub fn render_placeholder(area: Rect, lazy: bool, label: &str, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let style = Theme::placeholder_style(lazy);
    let fill = if lazy { '░' } else { '▒' };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char(fill).set_style(style);
            }
        }
    }
    let width = (label.chars().count() as u16).min(area.width);
    let label_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height / 2,
        width,
        1,
    );
    Paragraph::new(Line::styled(label.to_string(), Theme::muted_style())).render(label_area, buf);
}
