//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::carousel::CarouselInput;
use crate::core::page::NAV_HEIGHT;
use crate::ui::hit::HitTarget;
use crate::ui::layout::AppLayout;

use super::state::AppState;

/// Rows moved per wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, even with the modal open.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let action = state.config.match_key(key);

    // The slider listens on the whole document, so arrows work behind the
    // modal too.
    let slide = match action {
        Some(Action::SlidePrev) => Some(CarouselInput::Previous),
        Some(Action::SlideNext) => Some(CarouselInput::Next),
        _ => None,
    };
    if let Some(input) = slide {
        slider_input(state, input);
        return;
    }

    // While the modal is open Esc closes it and every other key is
    // swallowed.  Otherwise Esc is an ordinary key and may be bound.
    if state.modal.is_open() {
        if key.code == KeyCode::Esc {
            state.modal.escape();
        }
        return;
    }

    let Some(action) = action else {
        return;
    };
    match action {
        Action::ScrollUp => state.scroll.scroll_by(-1),
        Action::ScrollDown => state.scroll.scroll_by(1),
        Action::PageUp => state.scroll.scroll_by(-page_rows(state)),
        Action::PageDown => state.scroll.scroll_by(page_rows(state)),
        Action::Top => state.scroll.scroll_to_top(),
        Action::NextTab => state.tabs.select_next(),
        Action::LearnMore => scroll_to_section(state, 0),
        Action::OpenAccount => state.modal.open(),
        Action::Quit => state.should_quit = true,
        Action::SlidePrev | Action::SlideNext => {}
    }
}

/// Process a mouse event against the hit map from the last frame.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(target) = state.hit_map.hit(mouse.column, mouse.row).cloned() else {
                return;
            };
            click(state, target);
        }
        MouseEventKind::Moved => {
            let hovered = match state.hit_map.hit(mouse.column, mouse.row) {
                Some(HitTarget::NavLink(i)) => Some(*i),
                _ => None,
            };
            hover(state, hovered);
        }
        MouseEventKind::ScrollUp if !state.modal.is_open() => state.scroll.scroll_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown if !state.modal.is_open() => state.scroll.scroll_by(WHEEL_ROWS),
        _ => {}
    }
}

/// Advance animations by one frame.
pub fn handle_tick(state: &mut AppState) {
    state.scroll.tick();
}

fn click(state: &mut AppState, target: HitTarget) {
    tracing::trace!(?target, "click");
    match target {
        HitTarget::Overlay | HitTarget::CloseModal => state.modal.close(),
        HitTarget::ModalBody => {}
        HitTarget::OpenModal => state.modal.open(),
        HitTarget::LearnMore => scroll_to_section(state, 0),
        HitTarget::NavLink(i) => {
            let Some(link) = state.page.nav_links.get(i) else {
                return;
            };
            if link.is_button {
                state.modal.open();
            } else if let Some(section) = state.page.find_section(link.href) {
                scroll_to_section(state, section);
            }
        }
        HitTarget::NavBar | HitTarget::Logo => {}
        HitTarget::TabContainer => {
            state.tabs.click(None);
        }
        HitTarget::Tab(i) => {
            state.tabs.click(Some(i));
        }
        HitTarget::SliderPrev => slider_input(state, CarouselInput::Previous),
        HitTarget::SliderNext => slider_input(state, CarouselInput::Next),
        HitTarget::DotRow => {}
        HitTarget::Dot(tag) => slider_input(state, CarouselInput::Indicator(tag)),
    }
}

/// Fire mouseout on the link being left and mouseover on the one entered.
fn hover(state: &mut AppState, hovered: Option<usize>) {
    if hovered == state.hovered_link {
        return;
    }
    if let Some(old) = state.hovered_link {
        state.fade.mouse_out(old);
    }
    if let Some(new) = hovered {
        state.fade.mouse_over(new);
    }
    state.hovered_link = hovered;
}

fn slider_input(state: &mut AppState, input: CarouselInput) {
    if let Err(e) = state.slider.handle(input) {
        tracing::warn!(error = %e, "slider input ignored");
        state.status_message = Some(e.to_string());
    }
}

fn scroll_to_section(state: &mut AppState, index: usize) {
    if let Some(top) = state.layout.section_top(index) {
        state.scroll.scroll_into_view(top);
    }
}

/// Rows moved by PageUp/PageDown: one viewport minus the sticky nav.
fn page_rows(state: &AppState) -> i32 {
    let height = AppLayout::from_area(state.terminal_area).page_area.height;
    i32::from(height.saturating_sub(NAV_HEIGHT)).max(1)
}
