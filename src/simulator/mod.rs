//! Monte Carlo driver for pack-completion analysis.
//!
//! Runs many independent simulated players to analyze:
//! - Packs opened to reach 10%..100% of the standard cards
//! - Packs opened to own every card of each standard tier
//! - How currency redemption, bonus draws and the premium pass shift those numbers
//!
//! Each trial owns its own profile and seeded RNG; only the catalog is shared.

mod config;
mod report;
mod runner;
mod trial;

pub use config::SimConfig;
pub use report::{percentile, MilestoneStats, SimReport};
pub use runner::{run_simulation, run_trial};
pub use trial::{Milestone, MilestoneTracker, TrialResult, MILESTONE_COUNT};
