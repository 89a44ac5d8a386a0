//! UI area positioning for mouse event handling
//!
//! Converts absolute screen rows into rows of the scrollable form content.

/// Rows above the form content: the outer block's top border
pub const FORM_TOP_BORDER: u16 = 1;

/// Height of the status bar at the bottom of the screen
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// UI area for calculating mouse Y offset
///
/// # Layout
///
/// ```text
/// Row 0:      Form block top border (with title)
/// Row 1..h-3: Scrollable form content
/// Row h-2:    Form block bottom border
/// Row h-1:    Status bar
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiArea {
    /// Scrollable field content (starts after the top border)
    FormContent,
}

impl UiArea {
    /// Get the starting Y row for this UI area (absolute screen position)
    #[inline]
    pub const fn start_y(self) -> u16 {
        match self {
            UiArea::FormContent => FORM_TOP_BORDER,
        }
    }

    /// Convert absolute mouse row to row relative to this UI area
    #[inline]
    pub fn relative_row(self, mouse_row: u16) -> u16 {
        mouse_row.saturating_sub(self.start_y())
    }

    /// Check if a mouse row is within this UI area, given the terminal height
    #[inline]
    pub fn contains_row(self, mouse_row: u16, terminal_height: u16) -> bool {
        // Bottom border plus status bar
        let end = terminal_height.saturating_sub(1 + STATUS_BAR_HEIGHT);
        mouse_row >= self.start_y() && mouse_row < end
    }

    /// Convert an absolute mouse row into a content row, given the scroll offset
    #[inline]
    pub fn content_row(self, mouse_row: u16, scroll_offset: u16) -> u16 {
        self.relative_row(mouse_row).saturating_add(scroll_offset)
    }
}
