//! Simulated backend failures for fault-injection demos.

use axum::http::StatusCode;
use rand::Rng;

use crate::config::FailureConfig;

/// Decides the status code of an echo reply.
///
/// Requests to the configured path fail with 500 once every `one_in` draws on
/// average. Every other path always gets 200.
#[derive(Debug, Clone)]
pub struct FailurePolicy {
    path: String,
    one_in: u32,
}

impl FailurePolicy {
    pub fn new(config: &FailureConfig) -> Self {
        Self {
            path: config.path.clone(),
            one_in: config.one_in.max(1),
        }
    }

    /// Pick the status for a request to `path`, drawing from `rng`.
    pub fn status_for<R: Rng + ?Sized>(&self, path: &str, rng: &mut R) -> StatusCode {
        if path == self.path && rng.gen_range(0..self.one_in) == 0 {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::OK
        }
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::new(&FailureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_other_paths_never_fail() {
        let policy = FailurePolicy::default();
        let mut rng = StdRng::seed_from_u64(7);
        for path in ["/", "/fail", "/failsometimes/", "/FAILSOMETIMES", "/x/failsometimes"] {
            for _ in 0..100 {
                assert_eq!(policy.status_for(path, &mut rng), StatusCode::OK);
            }
        }
    }

    #[test]
    fn test_failure_rate_is_about_one_third() {
        let policy = FailurePolicy::default();
        let mut rng = rand::thread_rng();
        let draws = 3000;
        let failures = (0..draws)
            .filter(|_| policy.status_for("/failsometimes", &mut rng).is_server_error())
            .count();

        let rate = failures as f64 / draws as f64;
        assert!((rate - 1.0 / 3.0).abs() < 0.1, "failure rate was {}", rate);
    }

    #[test]
    fn test_one_in_one_always_fails() {
        let policy = FailurePolicy::new(&FailureConfig {
            path: "/boom".into(),
            one_in: 1,
        });
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(
                policy.status_for("/boom", &mut rng),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
