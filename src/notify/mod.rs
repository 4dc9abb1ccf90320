//! Short-lived toast messages shown in the footer
//!
//! Purely user feedback: nothing here feeds back into the engine.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_TOASTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub shown_at: Instant,
}

pub struct Notifications {
    toasts: VecDeque<Toast>,
    duration: Duration,
}

impl Notifications {
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
        }
    }

    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push_at(title, description, Instant::now());
    }

    pub fn push_at(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        now: Instant,
    ) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            title: title.into(),
            description: description.into(),
            shown_at: now,
        });
    }

    /// Newest toast that has not expired yet
    pub fn current(&self, now: Instant) -> Option<&Toast> {
        self.toasts
            .iter()
            .rev()
            .find(|toast| now.saturating_duration_since(toast.shown_at) < self.duration)
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        let duration = self.duration;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < duration);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn on_session_start(&mut self) {
        self.push(
            "Welcome to Twisted Snake!",
            "Collect food to grow, but beware - your snake will teleport randomly!",
        );
    }

    pub fn on_game_over(&mut self, score: u32, high_score: u32, new_high_score: bool) {
        if new_high_score {
            self.push(
                "New High Score!",
                format!("You achieved a new high score of {score}!"),
            );
        } else {
            self.push(
                "Game Over",
                format!("Your score: {score}. High score: {high_score}"),
            );
        }
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}
