//! Toast notifications and the loading overlay.
//!
//! One toast is visible at a time; a new one replaces it. Every `show` arms
//! its own hide deadline `duration_ms` later, and none is ever cancelled:
//! when any deadline passes, whatever toast is up at that moment goes away.

use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at_ms: f64,
}

#[derive(Debug)]
pub struct Notifier {
    visible: Option<Toast>,
    /// Pending hide deadlines, oldest first.
    hide_at: VecDeque<f64>,
    history: VecDeque<Toast>,
    capacity: usize,
    duration_ms: f64,
    loading: bool,
    shown: usize,
}

impl Notifier {
    pub fn new(duration_ms: f64, capacity: usize) -> Self {
        Self {
            visible: None,
            hide_at: VecDeque::new(),
            history: VecDeque::with_capacity(capacity),
            capacity,
            duration_ms,
            loading: false,
            shown: 0,
        }
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, now_ms: f64) {
        // Deadlines already due fire before this toast appears.
        self.tick(now_ms);
        let toast = Toast {
            kind,
            message: message.into(),
            shown_at_ms: now_ms,
        };
        log::debug!("toast {:?}: {}", toast.kind, toast.message);
        if self.capacity > 0 {
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(toast.clone());
        }
        self.visible = Some(toast);
        self.hide_at.push_back(now_ms + self.duration_ms);
        self.shown += 1;
    }

    /// Fire every deadline that is due.
    pub fn tick(&mut self, now_ms: f64) {
        let mut fired = false;
        while self.hide_at.front().is_some_and(|&due| due <= now_ms) {
            self.hide_at.pop_front();
            fired = true;
        }
        if fired {
            self.visible = None;
        }
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.visible.as_ref()
    }

    /// Most recent toasts, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Toast> {
        self.history.iter()
    }

    /// Total toasts shown since creation.
    pub fn count(&self) -> usize {
        self.shown
    }

    pub fn count_of(&self, kind: ToastKind) -> usize {
        self.history.iter().filter(|t| t.kind == kind).count()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
