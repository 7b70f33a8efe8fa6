//! Declarative JSON catalog files.
//!
//! ```json
//! {
//!   "sets": [{
//!     "name": "Verdant Origins",
//!     "rates": [{"D": "1"}, {"D": "1"}, {"D": "1"}, {"DD": "9/10", "DDD": "1/10"}, {"DD": "1"}],
//!     "packs": [{"name": "Thornback"}],
//!     "cards": [{"number": 1, "name": "Mossling", "rarity": "D",
//!                "kind": {"type": "creature", "species": "Mossling", "variant": "standard"},
//!                "packs": ["Thornback"]}],
//!     "unlocks": [{"card": 2, "rule": {"type": "owns_all", "cards": [1]}}]
//!   }]
//! }
//! ```

use super::draw_table::PackRates;
use super::set::{CardSetBuilder, Catalog, UnlockPredicate};
use crate::cards::{CardKind, Rarity};
use crate::collection::SetLedger;
use crate::core::constants::{PACK_SIZE, RARITY_COUNT};
use crate::core::error::CatalogError;
use crate::core::Fraction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Per-slot weights keyed by rarity symbol; absent tiers weigh zero.
pub type SlotWeights = BTreeMap<Rarity, Fraction>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub sets: Vec<SetFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFile {
    pub name: String,
    /// Default rates for packs that do not declare their own.
    #[serde(default)]
    pub rates: Option<[SlotWeights; PACK_SIZE]>,
    pub packs: Vec<PackFile>,
    pub cards: Vec<CardFile>,
    #[serde(default)]
    pub unlocks: Vec<UnlockFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackFile {
    pub name: String,
    #[serde(default)]
    pub rates: Option<[SlotWeights; PACK_SIZE]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFile {
    pub number: u32,
    pub name: String,
    pub kind: CardKind,
    pub rarity: Rarity,
    /// Empty for special-unlock cards.
    #[serde(default)]
    pub packs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockFile {
    pub card: u32,
    pub rule: UnlockRule,
}

/// Ledger conditions expressible in a catalog file. Card references are
/// card numbers within the same set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnlockRule {
    OwnsAll { cards: Vec<u32> },
    OwnsAny { cards: Vec<u32> },
    RarityCount { rarity: Rarity, count: u32 },
    /// Every pack-obtainable standard card of the set is owned.
    StandardComplete,
}

impl UnlockRule {
    /// Compiles the rule against the set's card list, resolving card numbers
    /// to indices.
    fn compile(&self, set: &SetFile) -> Result<UnlockPredicate, CatalogError> {
        let resolve = |numbers: &[u32]| -> Result<Vec<usize>, CatalogError> {
            numbers
                .iter()
                .map(|n| {
                    set.cards
                        .iter()
                        .position(|c| c.number == *n)
                        .ok_or_else(|| CatalogError::UnknownCard {
                            set: set.name.clone(),
                            number: *n,
                        })
                })
                .collect()
        };

        let predicate: UnlockPredicate = match self {
            UnlockRule::OwnsAll { cards } => {
                let indices = resolve(cards)?;
                Arc::new(move |ledger: &SetLedger| indices.iter().all(|i| ledger.has_card(*i)))
            }
            UnlockRule::OwnsAny { cards } => {
                let indices = resolve(cards)?;
                Arc::new(move |ledger: &SetLedger| indices.iter().any(|i| ledger.has_card(*i)))
            }
            UnlockRule::RarityCount { rarity, count } => {
                let (rarity, count) = (*rarity, *count);
                Arc::new(move |ledger: &SetLedger| ledger.rarity_obtained(rarity) >= count)
            }
            UnlockRule::StandardComplete => {
                let indices: Vec<usize> = set
                    .cards
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.rarity.is_standard() && !c.packs.is_empty())
                    .map(|(i, _)| i)
                    .collect();
                Arc::new(move |ledger: &SetLedger| indices.iter().all(|i| ledger.has_card(*i)))
            }
        };
        Ok(predicate)
    }
}

fn pack_rates(rows: &[SlotWeights; PACK_SIZE]) -> Result<PackRates, CatalogError> {
    let rows = rows.clone().map(|weights| {
        let mut row = [Fraction::ZERO; RARITY_COUNT];
        for (rarity, weight) in weights {
            row[rarity.index()] = weight;
        }
        row
    });
    PackRates::from_rows(rows)
}

impl SetFile {
    pub fn into_builder(self) -> Result<CardSetBuilder, CatalogError> {
        let mut builder = CardSetBuilder::new(self.name.clone());
        if let Some(rows) = &self.rates {
            builder = builder.default_rates(pack_rates(rows)?);
        }
        for pack in &self.packs {
            builder = match &pack.rates {
                Some(rows) => builder.pack_with_rates(pack.name.clone(), pack_rates(rows)?),
                None => builder.pack(pack.name.clone()),
            };
        }
        for card in &self.cards {
            let packs: Vec<&str> = card.packs.iter().map(String::as_str).collect();
            builder = builder.card(
                card.number,
                card.name.clone(),
                card.kind.clone(),
                card.rarity,
                &packs,
            );
        }
        for unlock in &self.unlocks {
            builder = builder.special_unlock_arc(unlock.card, unlock.rule.compile(&self)?);
        }
        Ok(builder)
    }
}

impl CatalogFile {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let builders = self
            .sets
            .into_iter()
            .map(SetFile::into_builder)
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::from_builders(builders)
    }
}

/// Reads and validates a catalog file in one step.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    CatalogFile::load(path)?.into_catalog()
}
