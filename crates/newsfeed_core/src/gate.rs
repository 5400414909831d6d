use std::time::Duration;

use chrono::{DateTime, Utc};

/// Timed lockout armed after a failure; cleared when its timer fires.
///
/// Each arm bumps `generation`, so an expiry carrying an older generation
/// (a timer that was replaced but raced its cancellation) is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownState {
    active: bool,
    armed_at: Option<DateTime<Utc>>,
    duration: Duration,
    generation: u64,
}

impl CooldownState {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: false,
            armed_at: None,
            duration,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn armed_at(&self) -> Option<DateTime<Utc>> {
        self.armed_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Arms (or re-arms) the gate for the full duration and returns the
    /// generation the expiry timer must report back.
    pub fn arm(&mut self, now: DateTime<Utc>) -> u64 {
        self.generation += 1;
        self.active = true;
        self.armed_at = Some(now);
        self.generation
    }

    /// Clears the gate if `generation` belongs to the current arming.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.active && generation == self.generation {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if !self.active {
            return None;
        }
        let duration = chrono::Duration::from_std(self.duration).ok()?;
        self.armed_at.map(|armed_at| armed_at + duration)
    }

    /// Time left until the gate clears, zero if the expiry is overdue.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expires_at = self.expires_at()?;
        Some((expires_at - now).to_std().unwrap_or(Duration::ZERO))
    }
}

/// Sticky lockout after the upstream reports rate limiting.
/// Only an explicit reset reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitState {
    tripped: bool,
}

impl RateLimitState {
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn trip(&mut self) {
        self.tripped = true;
    }

    /// Returns whether the gate was tripped before the reset.
    pub fn reset(&mut self) -> bool {
        std::mem::replace(&mut self.tripped, false)
    }
}
