//! Focus recovery after a failed submit
//!
//! On failure the first invalid field (in schema order) is scrolled into view
//! and, after a fixed delay, given input focus. The delay lets the scroll
//! animation and the freshly rendered error lines settle before focus moves.

use crate::state::forms::{FieldLayout, FormSchema, ValidationResult};
use std::time::{Duration, Instant};

/// Host that owns the scroll container and the focusable inputs
#[cfg_attr(test, mockall::automock)]
pub trait FocusHost {
    /// Move the scroll container to `offset`
    fn scroll_to(&mut self, offset: u16, animated: bool);

    /// Give input focus to the field named `field`
    fn focus(&mut self, field: &str);
}

/// A focus request waiting for its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFocus {
    pub field: String,
    pub due: Instant,
}

/// Coordinates scroll-then-focus on the first invalid field
#[derive(Debug)]
pub struct FocusCoordinator {
    /// Rows kept above the target so it is not hidden under the header
    header_offset: u16,
    focus_delay: Duration,
    pending: Option<PendingFocus>,
    mounted: bool,
}

impl FocusCoordinator {
    pub fn new(header_offset: u16, focus_delay: Duration) -> Self {
        Self {
            header_offset,
            focus_delay,
            pending: None,
            mounted: true,
        }
    }

    pub fn pending(&self) -> Option<&PendingFocus> {
        self.pending.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Scroll target for a field measured at `offset`
    pub fn scroll_target(&self, offset: u16) -> u16 {
        offset.saturating_sub(self.header_offset)
    }

    /// Reveal the first invalid field and schedule focus on it.
    ///
    /// Returns the targeted field, or `None` when `result` has no errors.
    /// A field that was never measured is not scrolled to, but focus is
    /// still scheduled.
    pub fn recover<'s>(
        &mut self,
        schema: &'s FormSchema,
        result: &ValidationResult,
        layout: &FieldLayout,
        host: &mut dyn FocusHost,
        now: Instant,
    ) -> Option<&'s str> {
        if !self.is_mounted() {
            tracing::debug!("focus recovery skipped: form unmounted");
            return None;
        }
        let field = result.first_invalid(schema)?;

        match layout.offset(field) {
            Some(offset) => host.scroll_to(self.scroll_target(offset), true),
            None => tracing::debug!(field, "no layout for invalid field, skipping scroll"),
        }

        self.pending = Some(PendingFocus {
            field: field.to_string(),
            due: now + self.focus_delay,
        });
        tracing::debug!(field, delay_ms = self.focus_delay.as_millis() as u64, "focus scheduled");
        Some(field)
    }

    /// Fire the pending focus request if its deadline has passed.
    /// Returns whether a focus request was issued.
    pub fn tick(&mut self, host: &mut dyn FocusHost, now: Instant) -> bool {
        if !self.is_mounted() {
            return false;
        }
        match self.pending.take() {
            Some(pending) if now >= pending.due => {
                host.focus(&pending.field);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Drop a pending focus request; the coordinator stays usable
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(field = %pending.field, "pending focus cancelled");
        }
    }

    /// Drop any pending focus; later ticks do nothing
    pub fn unmount(&mut self) {
        self.cancel();
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::names;
    use mockall::predicate::eq;

    const DELAY: Duration = Duration::from_millis(300);

    fn errors(fields: &[&str]) -> ValidationResult {
        let mut result = ValidationResult::default();
        for field in fields {
            result.insert(field, "bad");
        }
        result
    }

    fn measured(schema: &FormSchema, fields: &[(&str, u16)]) -> FieldLayout {
        let mut layout = FieldLayout::default();
        for (name, offset) in fields {
            layout.register(schema, name, *offset, 3).unwrap();
        }
        layout
    }

    mod recover {
        use super::*;

        #[test]
        fn test_scrolls_to_biased_offset_then_schedules_focus() {
            let schema = FormSchema::registration();
            let layout = measured(&schema, &[(names::EMAIL, 10)]);
            let mut coordinator = FocusCoordinator::new(2, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_scroll_to()
                .with(eq(8), eq(true))
                .times(1)
                .return_const(());
            host.expect_focus().never();

            let now = Instant::now();
            let target = coordinator.recover(&schema, &errors(&[names::EMAIL]), &layout, &mut host, now);

            assert_eq!(target, Some(names::EMAIL));
            let pending = coordinator.pending().unwrap();
            assert_eq!(pending.field, names::EMAIL);
            assert_eq!(pending.due, now + DELAY);
        }

        #[test]
        fn test_bias_saturates_at_top() {
            let coordinator = FocusCoordinator::new(5, DELAY);
            assert_eq!(coordinator.scroll_target(3), 0);
            assert_eq!(coordinator.scroll_target(9), 4);
        }

        #[test]
        fn test_targets_first_field_in_schema_order() {
            let schema = FormSchema::registration();
            let layout = measured(&schema, &[(names::MOBILE, 13), (names::EMERGENCY_MOBILE, 33)]);
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_scroll_to()
                .with(eq(13), eq(true))
                .times(1)
                .return_const(());

            let target = coordinator.recover(
                &schema,
                &errors(&[names::EMERGENCY_MOBILE, names::MOBILE]),
                &layout,
                &mut host,
                Instant::now(),
            );
            assert_eq!(target, Some(names::MOBILE));
        }

        #[test]
        fn test_unmeasured_field_skips_scroll_but_still_focuses() {
            let schema = FormSchema::registration();
            let layout = FieldLayout::default();
            let mut coordinator = FocusCoordinator::new(1, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_scroll_to().never();
            host.expect_focus()
                .withf(|field| field == names::CONFIRM_SSN)
                .times(1)
                .return_const(());

            let now = Instant::now();
            coordinator.recover(&schema, &errors(&[names::CONFIRM_SSN]), &layout, &mut host, now);
            assert!(!coordinator.tick(&mut host, now + Duration::from_millis(10)));
            assert!(coordinator.tick(&mut host, now + DELAY));
            assert!(coordinator.pending().is_none());
        }

        #[test]
        fn test_valid_result_does_nothing() {
            let schema = FormSchema::registration();
            let mut coordinator = FocusCoordinator::new(1, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_scroll_to().never();
            host.expect_focus().never();

            let target = coordinator.recover(
                &schema,
                &ValidationResult::default(),
                &FieldLayout::default(),
                &mut host,
                Instant::now(),
            );
            assert_eq!(target, None);
            assert!(coordinator.pending().is_none());
        }

        #[test]
        fn test_second_failure_replaces_pending_focus() {
            let schema = FormSchema::registration();
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            let layout = FieldLayout::default();
            let now = Instant::now();

            coordinator.recover(&schema, &errors(&[names::CITY]), &layout, &mut host, now);
            coordinator.recover(&schema, &errors(&[names::EMAIL]), &layout, &mut host, now);
            assert_eq!(coordinator.pending().unwrap().field, names::EMAIL);
        }
    }

    mod tick {
        use super::*;

        #[test]
        fn test_focus_fires_once_after_delay() {
            let schema = FormSchema::registration();
            let layout = measured(&schema, &[(names::FIRST_NAME, 1)]);
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_scroll_to().times(1).return_const(());
            host.expect_focus()
                .withf(|field| field == names::FIRST_NAME)
                .times(1)
                .return_const(());

            let now = Instant::now();
            coordinator.recover(&schema, &errors(&[names::FIRST_NAME]), &layout, &mut host, now);
            assert!(!coordinator.tick(&mut host, now));
            assert!(coordinator.tick(&mut host, now + DELAY + Duration::from_millis(1)));
            assert!(!coordinator.tick(&mut host, now + DELAY * 2));
        }

        #[test]
        fn test_without_pending_is_noop() {
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_focus().never();
            assert!(!coordinator.tick(&mut host, Instant::now()));
        }
    }

    mod unmount {
        use super::*;

        #[test]
        fn test_cancel_keeps_coordinator_mounted() {
            let schema = FormSchema::registration();
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_focus()
                .withf(|field| field == names::EMAIL)
                .times(1)
                .return_const(());

            let now = Instant::now();
            coordinator.recover(&schema, &errors(&[names::CITY]), &FieldLayout::default(), &mut host, now);
            coordinator.cancel();
            assert!(coordinator.is_mounted());
            assert!(!coordinator.tick(&mut host, now + DELAY));

            coordinator.recover(&schema, &errors(&[names::EMAIL]), &FieldLayout::default(), &mut host, now);
            assert!(coordinator.tick(&mut host, now + DELAY));
        }

        #[test]
        fn test_unmount_cancels_pending_focus() {
            let schema = FormSchema::registration();
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            let mut host = MockFocusHost::new();
            host.expect_focus().never();

            let now = Instant::now();
            coordinator.recover(&schema, &errors(&[names::PASSWORD]), &FieldLayout::default(), &mut host, now);
            coordinator.unmount();

            assert!(!coordinator.is_mounted());
            assert!(coordinator.pending().is_none());
            assert!(!coordinator.tick(&mut host, now + DELAY));
        }

        #[test]
        fn test_recover_after_unmount_is_noop() {
            let schema = FormSchema::registration();
            let mut coordinator = FocusCoordinator::new(0, DELAY);
            coordinator.unmount();
            let mut host = MockFocusHost::new();
            host.expect_scroll_to().never();

            let target = coordinator.recover(
                &schema,
                &errors(&[names::EMAIL]),
                &FieldLayout::default(),
                &mut host,
                Instant::now(),
            );
            assert_eq!(target, None);
        }
    }
}
