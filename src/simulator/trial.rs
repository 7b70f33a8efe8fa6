//! Per-trial milestone bookkeeping.

use crate::cards::Rarity;
use crate::collection::Collection;
use serde::{Deserialize, Serialize};

pub const MILESTONE_COUNT: usize = 14;

/// Attempt counters recorded for every trial: ten standard-completion
/// percentages, then full ownership of each standard tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Standard10,
    Standard20,
    Standard30,
    Standard40,
    Standard50,
    Standard60,
    Standard70,
    Standard80,
    Standard90,
    Standard100,
    AllOneDiamond,
    AllTwoDiamond,
    AllThreeDiamond,
    AllFourDiamond,
}

impl Milestone {
    pub const ALL: [Milestone; MILESTONE_COUNT] = [
        Milestone::Standard10,
        Milestone::Standard20,
        Milestone::Standard30,
        Milestone::Standard40,
        Milestone::Standard50,
        Milestone::Standard60,
        Milestone::Standard70,
        Milestone::Standard80,
        Milestone::Standard90,
        Milestone::Standard100,
        Milestone::AllOneDiamond,
        Milestone::AllTwoDiamond,
        Milestone::AllThreeDiamond,
        Milestone::AllFourDiamond,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Target standard percentage, for the percentage milestones.
    pub fn percent(self) -> Option<u32> {
        let i = self.index();
        (i < 10).then(|| (i as u32 + 1) * 10)
    }

    /// Standard tier, for the full-tier milestones.
    pub fn rarity(self) -> Option<Rarity> {
        self.index().checked_sub(10).map(|i| Rarity::STANDARD[i])
    }

    pub fn label(self) -> String {
        match (self.percent(), self.rarity()) {
            (Some(p), _) => format!("{p}% of standard cards"),
            (_, Some(r)) => format!("all {r} cards"),
            _ => String::new(),
        }
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Packs opened to reach each milestone, indexed by `Milestone::index`
    pub attempts: [u32; MILESTONE_COUNT],
    /// False if the trial hit the pack cutoff before completing
    pub completed: bool,
    pub bonus_claims: u32,
    pub cards_redeemed: u32,
    pub hours_elapsed: i64,
}

impl TrialResult {
    pub fn attempts(&self, milestone: Milestone) -> u32 {
        self.attempts[milestone.index()]
    }

    pub fn packs_opened(&self) -> u32 {
        self.attempts(Milestone::Standard100)
    }
}

/// Updates milestone counters immediately before each pack opening.
///
/// The opening counter always advances. A tier counter advances while that
/// tier is still incomplete, and a percentage counter tracks the opening
/// count while standard completion is still below its target, so each ends
/// up holding the opening that first crossed it.
#[derive(Debug, Clone, Default)]
pub struct MilestoneTracker {
    packs: u32,
    percent: [u32; 9],
    tiers: [u32; 4],
}

impl MilestoneTracker {
    pub fn packs(&self) -> u32 {
        self.packs
    }

    pub fn before_open(&mut self, collection: &Collection) {
        self.packs += 1;
        for (tier, rarity) in Rarity::STANDARD.into_iter().enumerate() {
            if !collection.has_all_rarity(rarity) {
                self.tiers[tier] += 1;
            }
        }
        let standard = collection.standard_percent();
        for (i, counter) in self.percent.iter_mut().enumerate() {
            if standard < ((i + 1) * 10) as f64 {
                *counter = self.packs;
            }
        }
    }

    pub fn attempts(&self) -> [u32; MILESTONE_COUNT] {
        let mut attempts = [0; MILESTONE_COUNT];
        attempts[..9].copy_from_slice(&self.percent);
        attempts[9] = self.packs;
        attempts[10..].copy_from_slice(&self.tiers);
        attempts
    }
}
