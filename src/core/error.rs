//! Error types for catalog construction and run requests.

use crate::cards::Rarity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    #[error("fraction {num}/0 has a zero denominator")]
    ZeroDenominator { num: i64 },

    #[error("zero cannot be raised to the negative power {exp}")]
    ZeroToNegativePower { exp: i32 },

    #[error("malformed fraction {0:?}, expected \"n/d\"")]
    Malformed(String),

    #[error("fraction arithmetic overflowed 64 bits")]
    Overflow,
}

/// Fatal configuration errors. A catalog that fails to build must not be
/// simulated.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fraction(#[from] FractionError),

    #[error("slot {slot} weights sum to {sum}, expected exactly 1")]
    SlotWeightsNotUnit { slot: usize, sum: String },

    #[error("slot {slot} has a negative weight for rarity {rarity}")]
    NegativeWeight { slot: usize, rarity: Rarity },

    #[error("slot {slot} weight ladder does not fit in 64 bits")]
    WeightOverflow { slot: usize },

    #[error("pack {pack:?} gives rarity {rarity} a nonzero weight in slot {slot} but holds no {rarity} cards")]
    EmptyRarityPool {
        pack: String,
        rarity: Rarity,
        slot: usize,
    },

    #[error("set {set:?} cannot have a special unlock for card {number} {name:?}, which is obtainable from packs")]
    UnlockOnPackCard {
        set: String,
        number: u32,
        name: String,
    },

    #[error("set {set:?} has no packs")]
    NoPacks { set: String },

    #[error("pack {pack:?} in set {set:?} has no draw rates and the set has no defaults")]
    MissingRates { set: String, pack: String },

    #[error("set {set:?} declares pack {pack:?} more than once")]
    DuplicatePack { set: String, pack: String },

    #[error("set {set:?} declares card number {number} more than once")]
    DuplicateCard { set: String, number: u32 },

    #[error("card {number} in set {set:?} references unknown pack {pack:?}")]
    UnknownPack {
        set: String,
        number: u32,
        pack: String,
    },

    #[error("set {set:?} has no card number {number}")]
    UnknownCard { set: String, number: u32 },

    #[error("catalog declares set {0:?} more than once")]
    DuplicateSet(String),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structurally invalid run requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("no sets selected")]
    EmptySelection,

    #[error("set {0} selected more than once")]
    DuplicateSet(usize),

    #[error("set {0} does not exist in the catalog")]
    UnknownSet(usize),

    #[error("trial count must be positive")]
    ZeroTrials,

    #[error("pack cutoff must be positive")]
    ZeroPackCutoff,
}
