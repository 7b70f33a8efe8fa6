//! Card sets, their builder, and the read-only catalog shared by all trials.

use super::draw_table::PackRates;
use super::pack::{Pack, PackId, SetId};
use crate::cards::{Card, CardKind, Rarity};
use crate::collection::SetLedger;
use crate::core::constants::RARITY_COUNT;
use crate::core::error::CatalogError;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Condition under which a special-unlock card is granted.
pub type UnlockPredicate = Arc<dyn Fn(&SetLedger) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct SpecialUnlock {
    pub card: usize,
    pub predicate: UnlockPredicate,
}

impl fmt::Debug for SpecialUnlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialUnlock")
            .field("card", &self.card)
            .finish_non_exhaustive()
    }
}

/// An immutable set: its cards, packs and special unlocks.
#[derive(Debug)]
pub struct CardSet {
    id: SetId,
    name: String,
    cards: Vec<Card>,
    packs: Vec<Pack>,
    unlocks: Vec<SpecialUnlock>,
    rarity_totals: [u32; RARITY_COUNT],
}

impl CardSet {
    pub fn id(&self) -> SetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> &Card {
        &self.cards[index]
    }

    pub fn card_by_number(&self, number: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.number == number)
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn pack(&self, index: usize) -> Option<&Pack> {
        self.packs.get(index)
    }

    pub fn pack_by_name(&self, name: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.name() == name)
    }

    pub fn unlocks(&self) -> &[SpecialUnlock] {
        &self.unlocks
    }

    pub fn total_count(&self) -> u32 {
        self.cards.len() as u32
    }

    pub fn rarity_total(&self, rarity: Rarity) -> u32 {
        self.rarity_totals[rarity.index()]
    }

    pub fn standard_total(&self) -> u32 {
        Rarity::STANDARD.iter().map(|r| self.rarity_total(*r)).sum()
    }

    pub fn rare_total(&self) -> u32 {
        self.total_count() - self.standard_total()
    }
}

#[derive(Debug, Clone)]
struct CardSpec {
    number: u32,
    name: String,
    kind: CardKind,
    rarity: Rarity,
    packs: Vec<String>,
}

/// Collects set data and validates it into a `CardSet`.
#[derive(Default)]
pub struct CardSetBuilder {
    name: String,
    default_rates: Option<PackRates>,
    packs: Vec<(String, Option<PackRates>)>,
    cards: Vec<CardSpec>,
    unlocks: Vec<(u32, UnlockPredicate)>,
}

impl CardSetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rates used by every pack declared without its own.
    pub fn default_rates(mut self, rates: PackRates) -> Self {
        self.default_rates = Some(rates);
        self
    }

    pub fn pack(mut self, name: impl Into<String>) -> Self {
        self.packs.push((name.into(), None));
        self
    }

    pub fn pack_with_rates(mut self, name: impl Into<String>, rates: PackRates) -> Self {
        self.packs.push((name.into(), Some(rates)));
        self
    }

    /// Adds a card. An empty `packs` list makes it a special-unlock card.
    pub fn card(
        mut self,
        number: u32,
        name: impl Into<String>,
        kind: CardKind,
        rarity: Rarity,
        packs: &[&str],
    ) -> Self {
        self.cards.push(CardSpec {
            number,
            name: name.into(),
            kind,
            rarity,
            packs: packs.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    pub fn special_unlock<F>(self, number: u32, predicate: F) -> Self
    where
        F: Fn(&SetLedger) -> bool + Send + Sync + 'static,
    {
        self.special_unlock_arc(number, Arc::new(predicate))
    }

    pub fn special_unlock_arc(mut self, number: u32, predicate: UnlockPredicate) -> Self {
        self.unlocks.push((number, predicate));
        self
    }

    /// Resolves names and checks every catalog invariant.
    pub fn build(self, id: SetId) -> Result<CardSet, CatalogError> {
        let set_name = self.name;
        if self.packs.is_empty() {
            return Err(CatalogError::NoPacks { set: set_name });
        }

        let mut pack_index = HashMap::new();
        let mut pack_rates = Vec::with_capacity(self.packs.len());
        for (i, (name, rates)) in self.packs.iter().enumerate() {
            if pack_index.insert(name.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePack {
                    set: set_name,
                    pack: name.clone(),
                });
            }
            let rates = match rates.as_ref().or(self.default_rates.as_ref()) {
                Some(rates) => rates.clone(),
                None => {
                    return Err(CatalogError::MissingRates {
                        set: set_name,
                        pack: name.clone(),
                    })
                }
            };
            pack_rates.push(rates);
        }

        let mut numbers = HashSet::new();
        let mut cards = Vec::with_capacity(self.cards.len());
        for (index, spec) in self.cards.into_iter().enumerate() {
            if !numbers.insert(spec.number) {
                return Err(CatalogError::DuplicateCard {
                    set: set_name,
                    number: spec.number,
                });
            }
            let mut packs = Vec::with_capacity(spec.packs.len());
            for pack in &spec.packs {
                match pack_index.get(pack) {
                    Some(i) if !packs.contains(i) => packs.push(*i),
                    Some(_) => {}
                    None => {
                        return Err(CatalogError::UnknownPack {
                            set: set_name,
                            number: spec.number,
                            pack: pack.clone(),
                        })
                    }
                }
            }
            cards.push(Card {
                index,
                number: spec.number,
                name: spec.name,
                kind: spec.kind,
                rarity: spec.rarity,
                packs,
            });
        }

        let mut unlocks = Vec::with_capacity(self.unlocks.len());
        for (number, predicate) in self.unlocks {
            let Some(card) = cards.iter().find(|c| c.number == number) else {
                return Err(CatalogError::UnknownCard {
                    set: set_name,
                    number,
                });
            };
            if !card.is_special_unlock() {
                return Err(CatalogError::UnlockOnPackCard {
                    set: set_name,
                    number,
                    name: card.name.clone(),
                });
            }
            unlocks.push(SpecialUnlock {
                card: card.index,
                predicate,
            });
        }

        let mut packs = Vec::with_capacity(pack_rates.len());
        for (i, rates) in pack_rates.into_iter().enumerate() {
            let (name, _) = &self.packs[i];
            let pack = Pack::new(
                PackId { set: id, index: i },
                name.clone(),
                cards.iter().filter(|c| c.is_in(i)),
                rates,
            );
            if let Some((slot, rarity)) = pack
                .rates()
                .reachable()
                .find(|(_, r)| pack.count_of(*r) == 0)
            {
                return Err(CatalogError::EmptyRarityPool {
                    pack: name.clone(),
                    rarity,
                    slot,
                });
            }
            packs.push(pack);
        }

        let mut rarity_totals = [0u32; RARITY_COUNT];
        for card in &cards {
            rarity_totals[card.rarity.index()] += 1;
        }

        Ok(CardSet {
            id,
            name: set_name,
            cards,
            packs,
            unlocks,
            rarity_totals,
        })
    }
}

/// All sets available to a run. Shared read-only across trials.
#[derive(Debug, Default)]
pub struct Catalog {
    sets: Vec<Arc<CardSet>>,
}

impl Catalog {
    /// Builds every set, assigning ids in declaration order.
    pub fn from_builders(
        builders: impl IntoIterator<Item = CardSetBuilder>,
    ) -> Result<Self, CatalogError> {
        let mut sets: Vec<Arc<CardSet>> = Vec::new();
        for builder in builders {
            if sets.iter().any(|s| s.name() == builder.name()) {
                return Err(CatalogError::DuplicateSet(builder.name().to_string()));
            }
            let id = sets.len();
            sets.push(Arc::new(builder.build(id)?));
        }
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[Arc<CardSet>] {
        &self.sets
    }

    pub fn set(&self, id: SetId) -> Option<&Arc<CardSet>> {
        self.sets.get(id)
    }

    pub fn find(&self, name: &str) -> Option<SetId> {
        self.sets
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn pack(&self, id: PackId) -> Option<&Pack> {
        self.sets.get(id.set)?.pack(id.index)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::draw_table::SlotRates;

    fn commons_only() -> PackRates {
        PackRates::new([0, 1, 2, 3, 4].map(|s| SlotRates::certain(s, Rarity::OneDiamond).unwrap()))
    }

    fn base() -> CardSetBuilder {
        CardSetBuilder::new("Test Set")
            .default_rates(commons_only())
            .pack("Alpha")
            .pack("Beta")
            .card(1, "Pebble", CardKind::Item, Rarity::OneDiamond, &["Alpha"])
            .card(2, "Twig", CardKind::Item, Rarity::OneDiamond, &["Beta"])
            .card(3, "Acorn", CardKind::Item, Rarity::OneDiamond, &["Alpha", "Beta"])
    }

    #[test]
    fn test_build_resolves_packs() {
        let set = base()
            .card(4, "Relic", CardKind::Tool, Rarity::TwoDiamond, &[])
            .special_unlock(4, |ledger| ledger.has_card(0))
            .build(3)
            .unwrap();
        assert_eq!(set.id(), 3);
        assert_eq!(set.packs().len(), 2);
        assert_eq!(set.pack(0).unwrap().count_of(Rarity::OneDiamond), 2);
        assert_eq!(set.pack(1).unwrap().id(), PackId { set: 3, index: 1 });
        assert_eq!(set.card(2).packs, vec![0, 1]);
        assert!(set.card(3).is_special_unlock());
        assert_eq!(set.unlocks().len(), 1);
        assert_eq!(set.standard_total(), 4);
        assert_eq!(set.rare_total(), 0);

        assert_eq!(set.card_by_number(4).map(|c| c.index), Some(3));
        assert!(set.card_by_number(9).is_none());
        assert_eq!(set.pack_by_name("Beta").map(|p| p.id().index), Some(1));
        assert!(set.pack_by_name("beta").is_none());
    }

    #[test]
    fn test_unlock_on_pack_card_rejected() {
        let err = base().special_unlock(1, |_| true).build(0).unwrap_err();
        assert!(matches!(err, CatalogError::UnlockOnPackCard { number: 1, .. }));
    }

    #[test]
    fn test_empty_rarity_pool_rejected() {
        let mut rows = [crate::core::Fraction::ZERO; RARITY_COUNT];
        rows[Rarity::TwoDiamond.index()] = crate::core::Fraction::ONE;
        let two_diamonds = PackRates::new([0, 1, 2, 3, 4].map(|s| SlotRates::new(s, rows).unwrap()));
        let err = base()
            .pack_with_rates("Gamma", two_diamonds)
            .build(0)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyRarityPool {
                rarity: Rarity::TwoDiamond,
                slot: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_structural_errors() {
        let err = CardSetBuilder::new("Empty").build(0).unwrap_err();
        assert!(matches!(err, CatalogError::NoPacks { .. }));

        let err = base().pack("Alpha").build(0).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePack { .. }));

        let err = base()
            .card(1, "Again", CardKind::Item, Rarity::OneDiamond, &["Alpha"])
            .build(0)
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard { number: 1, .. }));

        let err = base()
            .card(9, "Lost", CardKind::Item, Rarity::OneDiamond, &["Nowhere"])
            .build(0)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownPack { number: 9, .. }));

        let err = base().special_unlock(42, |_| true).build(0).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCard { number: 42, .. }));

        let err = CardSetBuilder::new("No Rates").pack("Solo").build(0).unwrap_err();
        assert!(matches!(err, CatalogError::MissingRates { .. }));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::from_builders([base(), CardSetBuilder::new("Other")
            .default_rates(commons_only())
            .pack("Solo")
            .card(1, "Shell", CardKind::Item, Rarity::OneDiamond, &["Solo"])])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("other"), Some(1));
        assert_eq!(catalog.find("missing"), None);
        let pack = catalog.pack(PackId { set: 1, index: 0 }).unwrap();
        assert_eq!(pack.name(), "Solo");
        assert!(catalog.pack(PackId { set: 1, index: 1 }).is_none());

        let err = Catalog::from_builders([base(), base()]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSet(_)));
    }
}
