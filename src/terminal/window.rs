//! Visual state of the profile window, consulted by `reboot`

/// Window-state provider
pub trait WindowState {
    /// The window was switched off with the close button
    fn is_powered_off(&self) -> bool;

    /// The window was minimized
    fn is_minimized(&self) -> bool;

    /// Clear both flags, bringing the window back
    fn restore(&mut self);
}

/// The `profile.json` window on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileWindow {
    powered_off: bool,
    minimized: bool,
}

impl ProfileWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close button: the CRT switches off
    pub fn power_off(&mut self) {
        self.powered_off = true;
    }

    /// Minimize button
    pub fn minimize(&mut self) {
        self.minimized = true;
    }

    /// Whether the window content is currently shown
    pub fn is_visible(&self) -> bool {
        !self.powered_off && !self.minimized
    }
}

impl WindowState for ProfileWindow {
    fn is_powered_off(&self) -> bool {
        self.powered_off
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn restore(&mut self) {
        self.powered_off = false;
        self.minimized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_clears_both_flags() {
        let mut window = ProfileWindow::new();
        window.power_off();
        window.minimize();
        assert!(!window.is_visible());

        window.restore();
        assert!(!window.is_powered_off());
        assert!(!window.is_minimized());
        assert!(window.is_visible());
    }
}
