use std::{ops::Range, sync::Mutex, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::time;

/// Artificial wait standing in for a backend round trip.
///
/// No cancellation and no timeout: once started, the wait runs to completion.
pub struct LatencySimulator {
    range_ms: Option<Range<u64>>,
    rng: Mutex<StdRng>,
}

impl LatencySimulator {
    pub fn uniform(range_ms: Range<u64>) -> Self {
        Self::with_rng(Some(range_ms), StdRng::from_entropy())
    }

    pub fn disabled() -> Self {
        Self::with_rng(None, StdRng::from_entropy())
    }

    pub fn with_rng(range_ms: Option<Range<u64>>, rng: StdRng) -> Self {
        // An empty range cannot be sampled; treat it as a fixed delay of its start.
        let range_ms = range_ms.map(|range| {
            if range.is_empty() {
                range.start..range.start + 1
            } else {
                range
            }
        });
        Self {
            range_ms,
            rng: Mutex::new(rng),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.range_ms.is_some()
    }

    /// Pick the next delay, uniformly from `[start, end)` milliseconds.
    pub fn next_delay(&self) -> Duration {
        let Some(range) = self.range_ms.clone() else {
            return Duration::ZERO;
        };
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Duration::from_millis(rng.gen_range(range))
    }

    pub async fn wait(&self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_stay_inside_half_open_range() {
        let latency = LatencySimulator::with_rng(Some(2000..4000), StdRng::seed_from_u64(3));
        for _ in 0..1000 {
            let ms = latency.next_delay().as_millis();
            assert!((2000..4000).contains(&ms), "{ms}");
        }
    }

    #[test]
    fn disabled_simulator_never_waits() {
        let latency = LatencySimulator::disabled();
        assert!(!latency.is_enabled());
        assert_eq!(latency.next_delay(), Duration::ZERO);
    }

    #[test]
    fn empty_range_becomes_fixed_delay() {
        let latency = LatencySimulator::with_rng(Some(5..5), StdRng::seed_from_u64(0));
        assert_eq!(latency.next_delay(), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn wait_sleeps_for_sampled_delay() {
        let latency = LatencySimulator::with_rng(Some(10..20), StdRng::seed_from_u64(9));
        let started = std::time::Instant::now();
        let delay = latency.wait().await;
        assert!(started.elapsed() >= delay);
    }
}
