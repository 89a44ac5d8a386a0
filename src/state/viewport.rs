//! Scrollable form viewport: scroll position, scroll animation and the
//! focused field. Implements [`FocusHost`] for the terminal.

use crate::state::focus::FocusHost;
use crate::state::forms::FormSchema;
use std::time::{Duration, Instant};

/// An in-flight animated scroll
#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: u16,
    to: u16,
    start: Instant,
}

/// Scroll and focus state of the form view
#[derive(Debug)]
pub struct FormViewport {
    /// Current top row of the visible window, in content coordinates
    scroll_offset: u16,
    animation: Option<ScrollAnimation>,
    animation_duration: Duration,
    /// Total rows of laid out content
    content_height: u16,
    /// Rows available to show content
    visible_height: u16,
    /// Index of the focused field, or `field_count` for the submit button
    active: usize,
    field_names: Vec<String>,
}

impl FormViewport {
    pub fn new(schema: &FormSchema, animation_duration: Duration) -> Self {
        Self {
            scroll_offset: 0,
            animation: None,
            animation_duration,
            content_height: 0,
            visible_height: 0,
            active: 0,
            field_names: schema.fields().iter().map(|f| f.name.clone()).collect(),
        }
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Record the measured content and window heights
    pub fn set_extent(&mut self, content_height: u16, visible_height: u16) {
        self.content_height = content_height;
        self.visible_height = visible_height;
        if self.animation.is_none() {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.visible_height)
    }

    /// Advance the scroll animation
    pub fn update(&mut self, now: Instant) {
        let Some(anim) = self.animation else {
            return;
        };
        let elapsed = now.saturating_duration_since(anim.start);
        if elapsed >= self.animation_duration || self.animation_duration.is_zero() {
            self.scroll_offset = anim.to;
            self.animation = None;
            return;
        }
        let progress = elapsed.as_secs_f32() / self.animation_duration.as_secs_f32();
        // Cubic ease-out for smooth deceleration
        let eased = simple_easing::cubic_out(progress);
        let distance = anim.to as f32 - anim.from as f32;
        self.scroll_offset = (anim.from as f32 + distance * eased).round() as u16;
    }

    /// Start a scroll at `now`; jumps when `animated` is false
    pub fn scroll_to_at(&mut self, offset: u16, animated: bool, now: Instant) {
        let target = if self.content_height > 0 {
            offset.min(self.max_scroll())
        } else {
            offset
        };
        if animated && target != self.scroll_offset {
            self.animation = Some(ScrollAnimation {
                from: self.scroll_offset,
                to: target,
                start: now,
            });
        } else {
            self.animation = None;
            self.scroll_offset = target;
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        let next = (self.scroll_offset as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll_offset = next as u16;
    }

    /// Scroll just enough to show rows `[offset, offset + height)`
    pub fn reveal(&mut self, offset: u16, height: u16) {
        if offset < self.scroll_offset {
            self.scroll_to_at(offset, false, Instant::now());
        } else if offset.saturating_add(height) > self.scroll_offset.saturating_add(self.visible_height) {
            let top = offset.saturating_add(height).saturating_sub(self.visible_height);
            self.scroll_to_at(top, false, Instant::now());
        }
    }

    /// Name of the focused field; `None` when the submit button is focused
    pub fn active_field(&self) -> Option<&str> {
        self.field_names.get(self.active).map(String::as_str)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active == self.field_names.len()
    }

    /// Focus count including the submit button
    fn focus_count(&self) -> usize {
        self.field_names.len() + 1
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.focus_count();
    }

    pub fn prev_field(&mut self) {
        if self.active == 0 {
            self.active = self.focus_count() - 1;
        } else {
            self.active -= 1;
        }
    }

    /// Focus a field by name; unknown names are ignored
    pub fn focus_field(&mut self, name: &str) -> bool {
        match self.field_names.iter().position(|n| n == name) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn focus_submit(&mut self) {
        self.active = self.field_names.len();
    }

    /// Return to the top with the first field focused
    pub fn reset(&mut self) {
        self.active = 0;
        self.animation = None;
        self.scroll_offset = 0;
    }
}

impl FocusHost for FormViewport {
    fn scroll_to(&mut self, offset: u16, animated: bool) {
        self.scroll_to_at(offset, animated, Instant::now());
    }

    fn focus(&mut self, field: &str) {
        if !self.focus_field(field) {
            tracing::warn!(field, "focus requested for unknown field");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::names;

    const ANIM: Duration = Duration::from_millis(250);

    fn viewport() -> FormViewport {
        let mut vp = FormViewport::new(&FormSchema::registration(), ANIM);
        vp.set_extent(60, 20);
        vp
    }

    mod scrolling {
        use super::*;

        #[test]
        fn test_jump_scroll() {
            let mut vp = viewport();
            vp.scroll_to_at(12, false, Instant::now());
            assert_eq!(vp.scroll_offset(), 12);
            assert!(!vp.is_animating());
        }

        #[test]
        fn test_scroll_clamped_to_content() {
            let mut vp = viewport();
            vp.scroll_to_at(500, false, Instant::now());
            assert_eq!(vp.scroll_offset(), 40);
        }

        #[test]
        fn test_animated_scroll_progresses_and_completes() {
            let mut vp = viewport();
            let start = Instant::now();
            vp.scroll_to_at(30, true, start);
            assert!(vp.is_animating());
            assert_eq!(vp.scroll_offset(), 0);

            vp.update(start + ANIM / 2);
            let midway = vp.scroll_offset();
            assert!(midway > 0 && midway < 30, "midway offset was {midway}");

            vp.update(start + ANIM);
            assert_eq!(vp.scroll_offset(), 30);
            assert!(!vp.is_animating());
        }

        #[test]
        fn test_animated_scroll_to_current_offset_does_not_animate() {
            let mut vp = viewport();
            vp.scroll_to_at(0, true, Instant::now());
            assert!(!vp.is_animating());
        }

        #[test]
        fn test_manual_scroll_cancels_animation() {
            let mut vp = viewport();
            vp.scroll_to_at(30, true, Instant::now());
            vp.scroll_by(3);
            assert!(!vp.is_animating());
            assert_eq!(vp.scroll_offset(), 3);
            vp.scroll_by(-10);
            assert_eq!(vp.scroll_offset(), 0);
        }

        #[test]
        fn test_reveal_below_window() {
            let mut vp = viewport();
            vp.reveal(25, 3);
            assert_eq!(vp.scroll_offset(), 8);
            // Already visible: unchanged
            vp.reveal(10, 3);
            assert_eq!(vp.scroll_offset(), 8);
            vp.reveal(2, 3);
            assert_eq!(vp.scroll_offset(), 2);
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_starts_on_first_field() {
            let vp = viewport();
            assert_eq!(vp.active_field(), Some(names::FIRST_NAME));
        }

        #[test]
        fn test_next_field_reaches_submit_and_wraps() {
            let mut vp = viewport();
            for _ in 0..11 {
                vp.next_field();
            }
            assert!(vp.is_submit_focused());
            assert_eq!(vp.active_field(), None);
            vp.next_field();
            assert_eq!(vp.active_field(), Some(names::FIRST_NAME));
        }

        #[test]
        fn test_prev_field_wraps_to_submit() {
            let mut vp = viewport();
            vp.prev_field();
            assert!(vp.is_submit_focused());
        }

        #[test]
        fn test_focus_host_focuses_by_name() {
            let mut vp = viewport();
            FocusHost::focus(&mut vp, names::CONFIRM_SSN);
            assert_eq!(vp.active_field(), Some(names::CONFIRM_SSN));
        }

        #[test]
        fn test_focus_unknown_field_keeps_focus() {
            let mut vp = viewport();
            FocusHost::focus(&mut vp, "nickname");
            assert_eq!(vp.active_field(), Some(names::FIRST_NAME));
        }

        #[test]
        fn test_reset() {
            let mut vp = viewport();
            vp.focus_submit();
            vp.scroll_to_at(10, false, Instant::now());
            vp.reset();
            assert_eq!(vp.active_field(), Some(names::FIRST_NAME));
            assert_eq!(vp.scroll_offset(), 0);
        }
    }
}
