//! Engine configuration.

/// Configuration for the evolution engine.
///
/// # Examples
///
/// ```
/// use u_evolve::EngineConfig;
///
/// let config = EngineConfig::default().with_generations(250).with_seed(42);
/// assert_eq!(config.generations, 250);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Generation count used by [`Engine::run_default`](super::Engine::run_default).
    pub generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed. In a worker group each worker draws from
    /// `seed + rank`.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the default number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for the worker at `rank`, if seeded.
    pub fn worker_seed(&self, rank: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(rank as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.generations, 100);
        assert!(config.seed.is_none());
        assert_eq!(config.worker_seed(3), None);
    }

    #[test]
    fn test_worker_seed_offsets_by_rank() {
        let config = EngineConfig::default().with_seed(u64::MAX);
        assert_eq!(config.worker_seed(0), Some(u64::MAX));
        assert_eq!(config.worker_seed(1), Some(0));
    }
}
