//! The "open account" modal and its dimming overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::modal::ModalState;

use super::hit::{HitMap, HitTarget};
use super::layout::centered_fixed;
use super::theme::Theme;

const FORM_FIELDS: &[&str] = &["First Name", "Last Name", "Email Address"];

/// The modal window and the overlay behind it, each drawn only while its
/// own flag says it is visible.
pub struct ModalPopup {
    pub modal: ModalState,
}

impl ModalPopup {
    /// Dim everything in `area`, draw the modal on top and return the
    /// overlay, body and close-button zones (in that stacking order).
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> HitMap {
        let mut hits = HitMap::default();

        if self.modal.overlay_visible() {
            let overlay = Theme::overlay_style();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                        cell.set_style(overlay);
                    }
                }
            }
            hits.push(area, HitTarget::Overlay);
        }
        if !self.modal.is_open() {
            return hits;
        }

        let height = FORM_FIELDS.len() as u16 * 2 + 7;
        let popup = centered_fixed(60, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);
        hits.push(popup, HitTarget::ModalBody);

        let mut lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("Open your bank account ", Theme::modal_title_style()),
                Span::styled("in just 5 minutes", Theme::highlight_style()),
            ]),
            Line::raw(""),
        ];
        for field in FORM_FIELDS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {field:<15}"), Theme::body_style()),
                Span::styled("_".repeat(30), Theme::muted_style()),
            ]));
            lines.push(Line::raw(""));
        }
        Paragraph::new(lines).render(inner, buf);

        let button = "  Next step →  ";
        let bw = (button.chars().count() as u16).min(inner.width);
        let button_rect = Rect::new(
            inner.x + (inner.width - bw) / 2,
            inner.bottom().saturating_sub(2),
            bw,
            1,
        );
        Paragraph::new(Span::styled(button, Theme::button_style()))
            .alignment(Alignment::Center)
            .render(button_rect, buf);

        let close = Rect::new(popup.right().saturating_sub(4), popup.y, 3, 1);
        Paragraph::new(Span::styled(" × ", Theme::modal_title_style())).render(close, buf);
        hits.push(close, HitTarget::CloseModal);

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> (Buffer, HitMap) {
        let mut modal = ModalState::default();
        modal.open();
        render_with(modal)
    }

    fn render_with(modal: ModalState) -> (Buffer, HitMap) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let hits = ModalPopup { modal }.render_and_hit(area, &mut buf);
        (buf, hits)
    }

    #[test]
    fn hidden_modal_draws_nothing() {
        let (buf, hits) = render_with(ModalState::default());
        assert_eq!(hits.len(), 0);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 80, 24)));
    }

    #[test]
    fn zones_stack_overlay_body_close() {
        let (_, hits) = render();
        let popup = centered_fixed(60, 13, Rect::new(0, 0, 80, 24));
        assert_eq!(hits.hit(0, 0), Some(&HitTarget::Overlay));
        assert_eq!(hits.hit(popup.x + 5, popup.y + 5), Some(&HitTarget::ModalBody));
        assert_eq!(
            hits.hit(popup.right() - 3, popup.y),
            Some(&HitTarget::CloseModal)
        );
    }

    #[test]
    fn modal_shows_the_form() {
        let (buf, _) = render();
        let text: String = (0..24)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Open your bank account in just 5 minutes"));
        assert!(text.contains("Email Address"));
        assert!(text.contains("Next step →"));
    }
}
