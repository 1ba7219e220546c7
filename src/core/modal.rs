//! Account-opening modal: a modal window plus the overlay behind it.

/// Visibility of the modal and its overlay.  Both start hidden and always
/// change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    modal_hidden: bool,
    overlay_hidden: bool,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            modal_hidden: true,
            overlay_hidden: true,
        }
    }
}

impl ModalState {
    pub fn open(&mut self) {
        self.modal_hidden = false;
        self.overlay_hidden = false;
        tracing::debug!("modal opened");
    }

    pub fn close(&mut self) {
        self.modal_hidden = true;
        self.overlay_hidden = true;
        tracing::debug!("modal closed");
    }

    /// Escape closes the modal only while it is showing.  Returns whether
    /// anything changed.
    pub fn escape(&mut self) -> bool {
        if self.modal_hidden {
            return false;
        }
        self.close();
        true
    }

    pub fn is_open(&self) -> bool {
        !self.modal_hidden
    }

    pub fn overlay_visible(&self) -> bool {
        !self.overlay_hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let m = ModalState::default();
        assert!(!m.is_open());
        assert!(!m.overlay_visible());
    }

    #[test]
    fn open_then_close() {
        let mut m = ModalState::default();
        m.open();
        assert!(m.is_open() && m.overlay_visible());
        m.close();
        assert!(!m.is_open() && !m.overlay_visible());
    }

    #[test]
    fn escape_only_acts_when_open() {
        let mut m = ModalState::default();
        assert!(!m.escape());
        m.open();
        assert!(m.escape());
        assert!(!m.is_open());
        assert!(!m.escape());
    }
}
