//! The submit control shared by both panels.
//!
//! A control is disabled (busy) while its request is in flight. Acquiring it
//! returns a [`BusyGuard`]; dropping the guard re-enables the control, so
//! every exit path of a submit releases it. This only stops a second submit of
//! the same form. It does not cancel or de-duplicate requests.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct SubmitControl {
    busy: AtomicBool,
    idle_label: &'static str,
    busy_label: &'static str,
}

impl SubmitControl {
    #[must_use]
    pub const fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            busy: AtomicBool::new(false),
            idle_label,
            busy_label,
        }
    }

    /// Disable the control for the lifetime of the returned guard.
    ///
    /// Returns `None` if a submit is already in progress.
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { control: self })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Current label: the busy label while disabled.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            self.idle_label
        } else {
            self.busy_label
        }
    }

    #[must_use]
    pub const fn busy_label(&self) -> &'static str {
        self.busy_label
    }

    pub const fn set_idle_label(&mut self, label: &'static str) {
        self.idle_label = label;
    }
}

/// Keeps a [`SubmitControl`] disabled until dropped.
#[derive(Debug)]
#[must_use = "the control is re-enabled as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    control: &'a SubmitControl,
}

impl BusyGuard<'_> {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.control.busy_label
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_disables_until_dropped() {
        let control = SubmitControl::new("Submit", "Analyzing...");
        assert!(control.is_enabled());
        assert_eq!(control.label(), "Submit");

        {
            let guard = control.try_begin().expect("idle control");
            assert!(!control.is_enabled());
            assert_eq!(control.label(), "Analyzing...");
            assert_eq!(guard.label(), "Analyzing...");
        }

        assert!(control.is_enabled());
        assert_eq!(control.label(), "Submit");
    }

    #[test]
    fn second_submit_is_rejected_while_busy() {
        let control = SubmitControl::new("Submit", "Loading...");
        let _guard = control.try_begin().expect("idle control");
        assert!(control.try_begin().is_none());
    }

    #[test]
    fn early_return_releases_control() {
        fn submit(control: &SubmitControl) -> Result<(), &'static str> {
            let _guard = control.try_begin().ok_or("busy")?;
            Err("server said no")
        }

        let control = SubmitControl::new("Submit", "Loading...");
        assert!(submit(&control).is_err());
        assert!(control.is_enabled());
    }

    #[test]
    fn idle_label_can_change() {
        let mut control = SubmitControl::new("Login", "Loading...");
        control.set_idle_label("Register");
        assert_eq!(control.label(), "Register");
    }
}
