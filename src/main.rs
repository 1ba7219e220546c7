//! A terminal landing page for a fictional bank.
//!
//! Run the binary to browse the page: a sticky nav, reveal-on-scroll
//! sections, lazy images, tabbed operations, a testimonial slider and an
//! account-opening modal.  Pass `--images <DIR>` to use your own pictures.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    loader::{spawn_decode_pool, spawn_image_load, ImageKey, ImageUpdate},
    state::AppState,
};
use crate::core::{assets, page::Page};
use crate::ui::{layout::AppLayout, page_view::PageView, popup::ModalPopup, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal landing page with a testimonial slider")]
struct Cli {
    /// Directory of images.  The first three illustrate the features, the
    /// rest are appended to the slider.
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// Frame interval in milliseconds, 10 to 500 (overrides the config file).
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Show every section immediately instead of revealing on scroll.
    #[arg(long)]
    no_reveal: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    print_config_path: bool,

    /// Write the effective config (defaults plus overrides) and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", config::config_path().display());
        return Ok(());
    }

    let mut user_config = config::AppConfig::load();
    if let Some(ms) = cli.tick_ms {
        user_config.tick_ms = config::clamp_tick_ms(ms);
    }
    if cli.write_config {
        let path = user_config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // ── build the page ────────────────────────────────────────
    let images = match &cli.images {
        Some(dir) => assets::discover_images(dir)
            .with_context(|| format!("reading images from {}", dir.display()))?,
        None => Vec::new(),
    };
    tracing::info!(images = images.len(), "building page");
    let tick_rate = Duration::from_millis(user_config.tick_ms);
    let mut state = AppState::new(Page::new(&images), user_config, !cli.no_reveal);
    let year = chrono::Local::now().year();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(tick_rate);
    let (image_tx, mut image_rx) = tokio::sync::mpsc::unbounded_channel::<ImageUpdate>();

    // Slides are not lazy; decode them up front on a bounded pool.
    let slide_jobs = state
        .image_slides()
        .into_iter()
        .map(|(position, source)| (ImageKey::Slide(position), source))
        .collect();
    spawn_decode_pool(image_tx.clone(), slide_jobs);

    // ── event loop ────────────────────────────────────────────
    let result = loop {
        let drawn = terminal.draw(|frame| {
            state.relayout(frame.area());
            let layout = AppLayout::from_area(frame.area());

            let mut hits = PageView { state: &state, year }.render_and_hit(layout.page_area, frame.buffer_mut());

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            frame.render_widget(
                Paragraph::new(status_text).style(Theme::status_bar_style()),
                layout.status_area,
            );

            // The overlay sits above everything, so its zones go last.
            hits.extend(ModalPopup { modal: state.modal }.render_and_hit(frame.area(), frame.buffer_mut()));
            state.hit_map = hits;
        });
        if let Err(e) = drawn {
            break Err(e.into());
        }

        // Observers run after layout so their rects match what was drawn.
        for request in state.update_observers() {
            spawn_image_load(image_tx.clone(), ImageKey::Feature(request.id), request.source);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize => {}
                    AppEvent::Tick => handler::handle_tick(&mut state),
                }
            }

            Some(update) = image_rx.recv() => {
                state.apply_image(update);
                while let Ok(update) = image_rx.try_recv() {
                    state.apply_image(update);
                }
            }
        }

        if state.should_quit {
            break Ok(());
        }
    };

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
