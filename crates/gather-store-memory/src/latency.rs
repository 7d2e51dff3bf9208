//! Simulated backend latency.

use std::time::Duration;

use rand::Rng;

/// How long mutating operations pretend to spend "on the network".
///
/// Once a sleep starts it always completes; there is no cancellation and no
/// timeout. Tests construct stores with [`Latency::disabled`].
#[derive(Debug, Clone, Copy)]
pub struct Latency {
  base:   Duration,
  jitter: Duration,
}

impl Latency {
  /// No artificial delay at all.
  pub const fn disabled() -> Self {
    Self { base: Duration::ZERO, jitter: Duration::ZERO }
  }

  /// A fixed delay before every simulated call resolves.
  pub const fn fixed(base: Duration) -> Self {
    Self { base, jitter: Duration::ZERO }
  }

  /// A fixed delay plus up to `jitter` of extra random wait.
  pub const fn jittered(base: Duration, jitter: Duration) -> Self {
    Self { base, jitter }
  }

  /// Sleep out the configured delay.
  pub async fn simulate(&self) {
    let mut delay = self.base;
    if self.jitter > Duration::ZERO {
      let jitter_millis = self.jitter.as_millis().min(u128::from(u64::MAX)) as u64;
      let extra = rand::thread_rng().gen_range(0..=jitter_millis);
      delay += Duration::from_millis(extra);
    }
    if delay > Duration::ZERO {
      tokio::time::sleep(delay).await;
    }
  }
}

impl Default for Latency {
  /// One second, matching the simulated API calls this store stands in for.
  fn default() -> Self { Self::fixed(Duration::from_secs(1)) }
}
