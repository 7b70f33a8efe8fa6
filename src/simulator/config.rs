//! Simulation configuration.

use crate::catalog::{Catalog, SetId};
use crate::collection::validate_selection;
use crate::core::constants::DEFAULT_MAX_PACKS_PER_TRIAL;
use crate::core::error::RunError;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Sets whose standard cards must all be collected
    pub sets: Vec<SetId>,

    /// Number of independent trials
    pub trials: u32,

    /// Base seed; trial `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,

    /// Spend pack points on missing cards
    pub use_currency: bool,

    /// Claim bonus-draw offers with stamina
    pub use_bonus_draws: bool,

    /// Hold a premium pass for the whole trial, renewing whenever it lapses
    pub premium_pass: bool,

    /// Packs opened before a trial is abandoned as incomplete
    pub max_packs_per_trial: u32,

    /// Run trials on the rayon thread pool
    pub parallel: bool,

    /// Log progress every 10% of trials
    pub progress: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sets: vec![0],
            trials: 1000,
            seed: None,
            use_currency: false,
            use_bonus_draws: false,
            premium_pass: false,
            max_packs_per_trial: DEFAULT_MAX_PACKS_PER_TRIAL,
            parallel: false,
            progress: true,
        }
    }
}

impl SimConfig {
    /// Small, quiet run for sanity checks
    pub fn quick_check(sets: Vec<SetId>) -> Self {
        Self {
            sets,
            trials: 100,
            progress: false,
            ..Default::default()
        }
    }

    /// Free-to-play player using every optional strategy
    pub fn optimal_player(sets: Vec<SetId>) -> Self {
        Self {
            sets,
            use_currency: true,
            use_bonus_draws: true,
            ..Default::default()
        }
    }

    /// Same as `optimal_player`, with the premium pass
    pub fn premium_player(sets: Vec<SetId>) -> Self {
        Self {
            premium_pass: true,
            ..Self::optimal_player(sets)
        }
    }

    /// Rejects structurally invalid requests before any trial runs.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), RunError> {
        if self.trials == 0 {
            return Err(RunError::ZeroTrials);
        }
        if self.max_packs_per_trial == 0 {
            return Err(RunError::ZeroPackCutoff);
        }
        validate_selection(catalog, &self.sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo_catalog;

    #[test]
    fn test_default_is_valid() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(SimConfig::default().validate(&catalog), Ok(()));
    }

    #[test]
    fn test_presets() {
        let config = SimConfig::premium_player(vec![0, 1]);
        assert!(config.use_currency && config.use_bonus_draws && config.premium_pass);
        assert_eq!(config.sets, vec![0, 1]);
        assert_eq!(SimConfig::quick_check(vec![1]).trials, 100);
    }

    #[test]
    fn test_invalid_requests_rejected() {
        let catalog = demo_catalog().unwrap();
        let zero = SimConfig {
            trials: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(&catalog), Err(RunError::ZeroTrials));

        let no_cutoff = SimConfig {
            max_packs_per_trial: 0,
            ..Default::default()
        };
        assert_eq!(no_cutoff.validate(&catalog), Err(RunError::ZeroPackCutoff));

        let dup = SimConfig::quick_check(vec![1, 1]);
        assert_eq!(dup.validate(&catalog), Err(RunError::DuplicateSet(1)));

        let empty = SimConfig::quick_check(vec![]);
        assert_eq!(empty.validate(&catalog), Err(RunError::EmptySelection));
    }
}
