//! Trailing-window rate limiter
//!
//! One limiter gates every generation endpoint in the process. It keeps the
//! timestamps of admitted requests in ascending order and trims the expired
//! prefix on every check.

use garden_core::{GardenError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Millisecond time source
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct RateLimiter {
    max_requests: usize,
    window_ms: u64,
    clock: Arc<dyn Clock>,
    window: Mutex<VecDeque<u64>>,
}

impl RateLimiter {
    /// Limiter on the system clock
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::with_clock(max_requests, window, Arc::new(SystemClock))
    }

    pub fn with_clock(max_requests: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests,
            window_ms: window.as_millis() as u64,
            clock,
            window: Mutex::new(VecDeque::new()),
        }
    }

    /// Admit and record a request if the window has room
    pub fn check(&self) -> bool {
        let now = self.clock.now_ms();
        let mut window = self.lock();
        self.trim(&mut window, now);
        if window.len() < self.max_requests {
            window.push_back(now);
            true
        } else {
            false
        }
    }

    /// Seconds until the oldest admitted request leaves the window, at least 1
    pub fn retry_after_secs(&self) -> u64 {
        let now = self.clock.now_ms();
        let window = self.lock();
        self.retry_after(&window, now)
    }

    /// Check and compute the retry hint under one lock
    pub fn admit(&self) -> Result<()> {
        let now = self.clock.now_ms();
        let mut window = self.lock();
        self.trim(&mut window, now);
        if window.len() < self.max_requests {
            window.push_back(now);
            return Ok(());
        }
        Err(GardenError::RateLimitExceeded {
            retry_after_secs: self.retry_after(&window, now),
        })
    }

    /// Requests currently counted against the quota
    pub fn in_window(&self) -> usize {
        let now = self.clock.now_ms();
        let mut window = self.lock();
        self.trim(&mut window, now);
        window.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<u64>> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn trim(&self, window: &mut VecDeque<u64>, now: u64) {
        let cutoff = now.saturating_sub(self.window_ms);
        while window.front().is_some_and(|&t| t < cutoff) {
            window.pop_front();
        }
    }

    fn retry_after(&self, window: &VecDeque<u64>, now: u64) -> u64 {
        let remaining_ms = match window.front() {
            Some(&oldest) => self.window_ms.saturating_sub(now.saturating_sub(oldest)),
            None => 0,
        };
        remaining_ms.div_ceil(1000).max(1)
    }
}
