use rand::Rng;
use std::time::Duration;

/// Latency and failure-injection knobs for the simulated remote services.
///
/// A zeroed profile is fully deterministic, which is what the test suites
/// and benches run with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    /// Probability in [0.0, 1.0] that a call fails.
    pub failure_rate: f64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
}

impl SimulationProfile {
    pub fn new(failure_rate: f64, min_latency_ms: u64, max_latency_ms: u64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            min_latency_ms: min_latency_ms.min(max_latency_ms),
            max_latency_ms: max_latency_ms.max(min_latency_ms),
        }
    }

    /// No latency, no failures.
    pub fn instant() -> Self {
        Self::new(0.0, 0, 0)
    }

    /// Sleep for a randomized duration inside the configured bounds.
    pub async fn pause(&self) {
        if self.max_latency_ms == 0 {
            return;
        }
        let millis = if self.min_latency_ms == self.max_latency_ms {
            self.max_latency_ms
        } else {
            rand::thread_rng().gen_range(self.min_latency_ms..=self.max_latency_ms)
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    /// Roll the failure dice for one call.
    pub fn should_fail(&self) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        if self.failure_rate >= 1.0 {
            return true;
        }
        rand::thread_rng().gen::<f64>() < self.failure_rate
    }
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self::instant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_profile_is_deterministic() {
        let profile = SimulationProfile::instant();
        for _ in 0..100 {
            assert!(!profile.should_fail());
        }
    }

    #[test]
    fn test_certain_failure() {
        let profile = SimulationProfile::new(1.0, 0, 0);
        for _ in 0..100 {
            assert!(profile.should_fail());
        }
    }

    #[test]
    fn test_rate_is_clamped() {
        let profile = SimulationProfile::new(7.5, 10, 5);
        assert_eq!(profile.failure_rate, 1.0);
        assert!(profile.min_latency_ms <= profile.max_latency_ms);
    }

    #[tokio::test]
    async fn test_instant_profile_does_not_sleep() {
        let profile = SimulationProfile::instant();
        let start = std::time::Instant::now();
        profile.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
