//! Simulation report generation.

use super::config::SimConfig;
use super::trial::{Milestone, TrialResult};
use crate::catalog::Catalog;
use crate::core::constants::{PERCENTILE_RANKS, TIME_JUMP_HOURS};
use serde::Serialize;

/// Nearest-rank percentile of an ascending slice: the value at position
/// `ceil(rank / 100 * n)`, 1-based. `None` for an empty slice.
pub fn percentile(sorted: &[u32], rank: u32) -> Option<u32> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let position = (rank as usize * n).div_ceil(100).clamp(1, n);
    sorted.get(position - 1).copied()
}

/// Percentile attempt counts for one milestone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneStats {
    pub milestone: Milestone,
    pub label: String,
    pub p5: Option<u32>,
    pub p50: Option<u32>,
    pub p95: Option<u32>,
}

impl MilestoneStats {
    fn from_trials(milestone: Milestone, completed: &[&TrialResult]) -> Self {
        let mut values: Vec<u32> = completed.iter().map(|t| t.attempts(milestone)).collect();
        values.sort_unstable();
        let [p5, p50, p95] = PERCENTILE_RANKS.map(|rank| percentile(&values, rank));
        Self {
            milestone,
            label: milestone.label(),
            p5,
            p50,
            p95,
        }
    }
}

/// Aggregated results from multiple trials.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub sets: Vec<String>,
    pub seed: Option<u64>,
    pub use_currency: bool,
    pub use_bonus_draws: bool,
    pub premium_pass: bool,

    pub trials_requested: u32,
    pub trials_completed: u32,
    pub trials_incomplete: u32,

    // Over completed trials only
    pub milestones: Vec<MilestoneStats>,
    pub avg_packs_to_complete: f64,
    pub avg_days_to_complete: f64,
    pub avg_bonus_claims: f64,
    pub avg_cards_redeemed: f64,

    // Individual trials for detailed analysis
    #[serde(skip)]
    pub trials: Vec<TrialResult>,
}

impl SimReport {
    /// Create a new report from finished trials.
    pub fn from_trials(catalog: &Catalog, config: &SimConfig, trials: Vec<TrialResult>) -> Self {
        let sets = config
            .sets
            .iter()
            .filter_map(|id| catalog.set(*id))
            .map(|set| set.name().to_string())
            .collect();

        let completed: Vec<&TrialResult> = trials.iter().filter(|t| t.completed).collect();
        let trials_completed = completed.len() as u32;
        let mean = |f: fn(&TrialResult) -> f64| {
            completed.iter().map(|t| f(t)).sum::<f64>() / trials_completed.max(1) as f64
        };

        let milestones = Milestone::ALL
            .into_iter()
            .map(|m| MilestoneStats::from_trials(m, &completed))
            .collect();

        Self {
            sets,
            seed: config.seed,
            use_currency: config.use_currency,
            use_bonus_draws: config.use_bonus_draws,
            premium_pass: config.premium_pass,
            trials_requested: config.trials,
            trials_completed,
            trials_incomplete: trials.len() as u32 - trials_completed,
            milestones,
            avg_packs_to_complete: mean(|t| t.packs_opened() as f64),
            avg_days_to_complete: mean(|t| t.hours_elapsed as f64 / 24.0),
            avg_bonus_claims: mean(|t| t.bonus_claims as f64),
            avg_cards_redeemed: mean(|t| t.cards_redeemed as f64),
            trials,
        }
    }

    pub fn milestone(&self, milestone: Milestone) -> Option<&MilestoneStats> {
        self.milestones.iter().find(|s| s.milestone == milestone)
    }

    /// Format the report as human-readable text.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 PACK COMPLETION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Sets: {}\n", self.sets.join(", ")));
        report.push_str(&format!(
            "Trials: {} total, {} completed, {} hit the pack cutoff\n\n",
            self.trials_requested, self.trials_completed, self.trials_incomplete
        ));

        report.push_str("── STRATEGY ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Currency Redemption: {}\n", on_off(self.use_currency)));
        report.push_str(&format!("  Bonus Draws:         {}\n", on_off(self.use_bonus_draws)));
        report.push_str(&format!("  Premium Pass:        {}\n\n", on_off(self.premium_pass)));

        report.push_str("── PACKS OPENED (5th / 50th / 95th percentile) ──────────────────\n");
        for stats in &self.milestones {
            if stats.milestone == Milestone::AllOneDiamond {
                report.push('\n');
            }
            report.push_str(&format!(
                "  {:<24} {:>7} {:>7} {:>7}\n",
                stats.label,
                fmt_count(stats.p5),
                fmt_count(stats.p50),
                fmt_count(stats.p95)
            ));
        }
        report.push('\n');

        report.push_str("── AVERAGES (completed trials) ──────────────────────────────────\n");
        report.push_str(&format!(
            "  Packs to Complete:   {:.1}\n",
            self.avg_packs_to_complete
        ));
        report.push_str(&format!(
            "  Days to Complete:    {:.1}\n",
            self.avg_days_to_complete
        ));
        if self.use_bonus_draws {
            report.push_str(&format!(
                "  Bonus Draws Claimed: {:.1}\n",
                self.avg_bonus_claims
            ));
        }
        if self.use_currency {
            report.push_str(&format!(
                "  Cards Redeemed:      {:.1}\n",
                self.avg_cards_redeemed
            ));
        }
        report.push_str(&format!(
            "  (one round = {TIME_JUMP_HOURS}h of game time)\n"
        ));

        report
    }

    /// Export report as JSON for programmatic analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn fmt_count(value: Option<u32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
