//! User configuration: keybindings, scroll feel, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/landing-tui/config.toml` (default `~/.config/landing-tui/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const DEFAULT_SCROLL_SPEED: f64 = 0.35;
pub const DEFAULT_TICK_MS: u64 = 50;

/// Frame interval bounds, in milliseconds.
const TICK_MS_MIN: u64 = 10;
const TICK_MS_MAX: u64 = 500;

/// Keep a frame interval from the config file or the command line in range.
pub fn clamp_tick_ms(ms: u64) -> u64 {
    ms.clamp(TICK_MS_MIN, TICK_MS_MAX)
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    SlidePrev,
    SlideNext,
    NextTab,
    LearnMore,
    OpenAccount,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help line and the file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::SlidePrev,
        Action::SlideNext,
        Action::NextTab,
        Action::LearnMore,
        Action::OpenAccount,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::SlidePrev => "slide_prev",
            Action::SlideNext => "slide_next",
            Action::NextTab => "next_tab",
            Action::LearnMore => "learn_more",
            Action::OpenAccount => "open_account",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short label for the status bar (e.g. `"→"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => code_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&code_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn code_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and scroll settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Smooth-scroll damping per tick, `0.05..=0.95`.
    pub scroll_speed: f64,
    /// Event-loop tick (animation frame) length.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::SlidePrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Action::SlideNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::NextTab, vec![KeyBind::new(Tab, n), KeyBind::new(Char('t'), n)]);
        m.insert(Action::LearnMore, vec![KeyBind::new(Enter, n)]);
        m.insert(Action::OpenAccount, vec![KeyBind::new(Char('o'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.is_none_or(|(_, b)| mc > b) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: slider | {}: tabs | {}: open account | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::SlidePrev),
            self.short_binding(Action::SlideNext),
            self.short_binding(Action::NextTab),
            self.short_binding(Action::OpenAccount),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "scroll_speed" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.scroll_speed = v.clamp(0.05, 0.95);
                    }
                    continue;
                }
                "tick_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.tick_ms = clamp_tick_ms(v);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# landing-tui configuration".to_string(),
            String::new(),
            "# Scrolling".to_string(),
            format!("scroll_speed = {}", self.scroll_speed),
            format!("tick_ms = {}", self.tick_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/landing-tui/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("landing-tui").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_bind_arrows_to_the_slider() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Left)), Some(Action::SlidePrev));
        assert_eq!(c.match_key(key(KeyCode::Right)), Some(Action::SlideNext));
        assert_eq!(c.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn modifiers_must_match() {
        let c = AppConfig::default();
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert_eq!(c.match_key(alt_q), None);
    }

    #[test]
    fn parse_is_tolerant() {
        let c = AppConfig::parse(
            "# comment\n\
             [section]\n\
             scroll_speed = 7\n\
             tick_ms = nope\n\
             bogus = q\n\
             quit = Ctrl+x, \"Esc\", Hyper+z\n\
             slide_next = \n",
        );
        assert_eq!(c.scroll_speed, 0.95);
        assert_eq!(c.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(
            c.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),
            ]
        );
        assert_eq!(c.bindings[&Action::SlideNext], AppConfig::default_bindings()[&Action::SlideNext]);
    }

    #[test]
    fn tick_interval_is_clamped() {
        assert_eq!(clamp_tick_ms(0), 10);
        assert_eq!(clamp_tick_ms(1), 10);
        assert_eq!(clamp_tick_ms(80), 80);
        assert_eq!(clamp_tick_ms(60_000), 500);
        assert_eq!(AppConfig::parse("tick_ms = 1").tick_ms, clamp_tick_ms(1));
        assert_eq!(AppConfig::parse("tick_ms = 9000").tick_ms, 500);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut c = AppConfig::default();
        c.tick_ms = 80;
        c.bindings
            .insert(Action::NextTab, vec![KeyBind::new(KeyCode::F(2), KeyModifiers::SHIFT)]);
        c.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.tick_ms, 80);
        assert_eq!(loaded.bindings, c.bindings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let c = AppConfig::load_from(Path::new("/no/such/config.toml"));
        assert_eq!(c.bindings, AppConfig::default_bindings());
    }

    #[test]
    fn hint_uses_first_binding() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("↑/↓: scroll"));
        assert!(hint.contains("←/→: slider"));
    }
}
