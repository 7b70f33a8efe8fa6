//! Per-trial ownership state and the probability queries built on it.

pub mod analysis;
pub mod ledger;
pub mod selection;

pub use analysis::{
    chance_of, chance_of_new, pack_chances, reduce_to_highest_chance, reduce_to_lowest_chance,
    PullTarget,
};
pub use ledger::SetLedger;
pub use selection::{validate_selection, Collection};
