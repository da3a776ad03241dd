//! Batch orchestration of multi-item requests
//!
//! A request for N items is split into fixed-size batches. The slots of one
//! batch run concurrently on scoped threads; the next batch starts only after
//! every slot has settled and the cooldown has elapsed. A failing slot adds
//! an error string and never aborts its siblings.

use crate::config::LimitsConfig;
use garden_core::{GardenError, Result};
use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Items that succeeded and messages for those that did not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome<T> {
    pub items: Vec<T>,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    batch_size: usize,
    cooldown: Duration,
    max_quantity: usize,
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self::from_limits(&LimitsConfig::default())
    }
}

impl BatchOrchestrator {
    pub fn new(batch_size: usize, cooldown: Duration, max_quantity: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            cooldown,
            max_quantity: max_quantity.max(1),
        }
    }

    pub fn from_limits(limits: &LimitsConfig) -> Self {
        Self::new(
            limits.batch_size,
            Duration::from_millis(limits.batch_cooldown_ms),
            limits.max_quantity,
        )
    }

    pub fn max_quantity(&self) -> usize {
        self.max_quantity
    }

    /// Clamp a requested quantity to `[1, max_quantity]`; absent means 1
    pub fn clamp_quantity(&self, requested: Option<i64>) -> usize {
        match requested {
            Some(n) if n > 1 => (n as u64).min(self.max_quantity as u64) as usize,
            _ => 1,
        }
    }

    /// Run `generate` once per slot and collect the results.
    ///
    /// Fails with [`GardenError::BatchFailed`] when no slot succeeded.
    pub fn run<T, F>(&self, quantity: usize, generate: F) -> Result<BatchOutcome<T>>
    where
        T: Send,
        F: Fn() -> Result<T> + Sync,
    {
        let quantity = quantity.clamp(1, self.max_quantity);
        let batches = quantity.div_ceil(self.batch_size);
        info!(quantity, batches, batch_size = self.batch_size, "starting batch generation");

        let mut items = Vec::with_capacity(quantity);
        let mut errors = Vec::new();

        for (index, start) in (0..quantity).step_by(self.batch_size).enumerate() {
            if index > 0 && !self.cooldown.is_zero() {
                debug!(cooldown = ?self.cooldown, "cooling down between batches");
                thread::sleep(self.cooldown);
            }

            let slots = self.batch_size.min(quantity - start);
            let results: Vec<Result<T>> = thread::scope(|scope| {
                let handles: Vec<_> = (0..slots).map(|_| scope.spawn(&generate)).collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle.join().unwrap_or_else(|_| {
                            Err(GardenError::Provider("generation thread panicked".to_string()))
                        })
                    })
                    .collect()
            });

            for result in results {
                match result {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        warn!(batch = index + 1, error = %e, "generation failed");
                        errors.push(e.to_string());
                    }
                }
            }
            debug!(
                batch = index + 1,
                batches,
                succeeded = items.len(),
                failed = errors.len(),
                "batch settled"
            );
        }

        if items.is_empty() {
            return Err(GardenError::BatchFailed { errors });
        }

        info!(succeeded = items.len(), failed = errors.len(), "batch generation complete");
        Ok(BatchOutcome {
            total: items.len(),
            items,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    fn fast(batch_size: usize, max_quantity: usize) -> BatchOrchestrator {
        BatchOrchestrator::new(batch_size, Duration::ZERO, max_quantity)
    }

    #[test]
    fn test_clamp_quantity() {
        let orchestrator = fast(3, 10);
        assert_eq!(orchestrator.clamp_quantity(None), 1);
        assert_eq!(orchestrator.clamp_quantity(Some(0)), 1);
        assert_eq!(orchestrator.clamp_quantity(Some(-4)), 1);
        assert_eq!(orchestrator.clamp_quantity(Some(7)), 7);
        assert_eq!(orchestrator.clamp_quantity(Some(500)), 10);
    }

    #[test]
    fn test_partial_failure_isolated() {
        let calls = AtomicUsize::new(0);
        let outcome = fast(3, 10)
            .run(3, || {
                if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                    Err(GardenError::ValidationFailed {
                        kind: "plant".to_string(),
                        errors: vec!["oscillator is missing".to_string()],
                    })
                } else {
                    Ok("plant")
                }
            })
            .unwrap();

        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("oscillator is missing"));
    }

    #[test]
    fn test_total_failure_escalates() {
        let result: Result<BatchOutcome<()>> = fast(2, 10).run(5, || {
            Err(GardenError::Transport("connection refused".to_string()))
        });
        match result {
            Err(GardenError::BatchFailed { errors }) => assert_eq!(errors.len(), 5),
            other => panic!("expected batch failure, got {other:?}"),
        }
    }

    #[test]
    fn test_batches_run_in_order() {
        // Slot n belongs to batch n / 3 only if batches never overlap
        let started = Mutex::new(Vec::new());
        let counter = AtomicUsize::new(0);
        let outcome = fast(3, 10)
            .run(7, || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                started.lock().unwrap().push(n / 3);
                Ok(n)
            })
            .unwrap();

        assert_eq!(outcome.total, 7);
        let batches = started.into_inner().unwrap();
        assert!(batches.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_quantity_clamped_to_max() {
        let calls = AtomicUsize::new(0);
        let outcome = fast(3, 4)
            .run(50, || Ok(calls.fetch_add(1, Ordering::SeqCst)))
            .unwrap();
        assert_eq!(outcome.total, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_cooldown_between_batches_only() {
        let orchestrator = BatchOrchestrator::new(2, Duration::from_millis(50), 10);
        let start = Instant::now();
        orchestrator.run(4, || Ok(())).unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(600));

        let start = Instant::now();
        orchestrator.run(2, || Ok(())).unwrap();
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_slots_run_concurrently() {
        let orchestrator = fast(3, 10);
        let start = Instant::now();
        orchestrator
            .run(3, || {
                thread::sleep(Duration::from_millis(100));
                Ok(())
            })
            .unwrap();
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn test_outcome_serialization_skips_empty_errors() {
        let outcome = BatchOutcome {
            items: vec![1, 2],
            total: 2,
            errors: Vec::new(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert!(value.get("errors").is_none());
        assert_eq!(value["total"], 2);
    }
}
