//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::fade::OPAQUE;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const BRAND: Color = Color::Rgb(0x5e, 0xc5, 0x76);
    pub const ACCENT: Color = Color::Rgb(0xff, 0xcb, 0x03);
    pub const TEXT: Color = Color::Rgb(0xe8, 0xe8, 0xe8);
    pub const MUTED: Color = Color::Rgb(0x88, 0x88, 0x88);

    // ── nav ────────────────────────────────────────────────────
    /// Nav text at the given fade opacity.
    pub fn nav_link_style(opacity: f32) -> Style {
        Self::faded(Style::default().fg(Self::TEXT), opacity)
    }

    pub fn logo_style(opacity: f32) -> Style {
        Self::faded(
            Style::default().fg(Self::BRAND).add_modifier(Modifier::BOLD),
            opacity,
        )
    }

    pub fn nav_button_style(opacity: f32) -> Style {
        Self::faded(
            Style::default()
                .fg(Color::Black)
                .bg(Self::BRAND)
                .add_modifier(Modifier::BOLD),
            opacity,
        )
    }

    pub fn sticky_nav_style() -> Style {
        Style::default().bg(Color::Rgb(0x22, 0x22, 0x22))
    }

    fn faded(style: Style, opacity: f32) -> Style {
        if opacity < OPAQUE {
            style.fg(Self::MUTED).add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    // ── content ────────────────────────────────────────────────
    pub fn hero_title_style() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style() -> Style {
        Style::default().fg(Self::BRAND).add_modifier(Modifier::BOLD)
    }

    pub fn description_style() -> Style {
        Style::default().fg(Self::BRAND).add_modifier(Modifier::BOLD)
    }

    pub fn heading_style() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn button_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link_button_style() -> Style {
        Style::default()
            .fg(Self::BRAND)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── tabs ───────────────────────────────────────────────────
    pub fn tab_style(number: u8, active: bool) -> Style {
        let bg = match number {
            1 => Self::ACCENT,
            2 => Self::BRAND,
            _ => Color::Rgb(0xff, 0x58, 0x5f),
        };
        let style = Style::default().fg(Color::Black).bg(bg);
        if active {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    // ── slider ─────────────────────────────────────────────────
    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::MUTED)
        }
    }

    pub fn slider_button_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn placeholder_style(lazy: bool) -> Style {
        if lazy {
            Style::default().fg(Color::Rgb(0x44, 0x44, 0x44))
        } else {
            Style::default().fg(Self::MUTED)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn modal_title_style() -> Style {
        Style::default()
            .fg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }

    pub fn overlay_style() -> Style {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
