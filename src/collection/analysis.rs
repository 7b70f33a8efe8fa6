//! Chance of pulling a matching card from a pack, and tie-aware reductions
//! over per-pack chances.

use super::ledger::SetLedger;
use super::selection::Collection;
use crate::cards::{Card, Rarity};
use crate::catalog::{CardSet, Pack};
use crate::core::constants::PACK_SIZE;
use std::cmp::Ordering;

/// Which cards count as a hit when computing the chance of something new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullTarget {
    Any,
    Standard,
    Rare,
    Rarity(Rarity),
}

impl PullTarget {
    pub fn matches(self, card: &Card) -> bool {
        match self {
            PullTarget::Any => true,
            PullTarget::Standard => card.is_standard(),
            PullTarget::Rare => card.is_rare(),
            PullTarget::Rarity(r) => card.rarity == r,
        }
    }
}

/// Chance that opening `pack` yields at least one card satisfying
/// `predicate`. Each slot contributes `rate(rarity) / cards_of(rarity)` per
/// matching card; slots are independent, so the result is
/// `1 - prod(1 - p_slot)`.
pub fn chance_of(pack: &Pack, set: &CardSet, predicate: impl Fn(&Card) -> bool) -> f64 {
    let mut matching = [0usize; Rarity::ALL.len()];
    for index in pack.card_indices() {
        let card = set.card(index);
        if predicate(card) {
            matching[card.rarity.index()] += 1;
        }
    }

    let mut miss_all = 1.0;
    for slot in 0..PACK_SIZE {
        let rates = pack.rates().slot(slot);
        let hit: f64 = Rarity::ALL
            .into_iter()
            .filter(|r| matching[r.index()] > 0)
            .map(|r| rates.rate(r).to_f64() * matching[r.index()] as f64 / pack.count_of(r) as f64)
            .sum();
        miss_all *= 1.0 - hit;
    }
    1.0 - miss_all
}

/// Chance that `pack` yields a card the ledger does not own yet.
pub fn chance_of_new(pack: &Pack, ledger: &SetLedger, target: PullTarget) -> f64 {
    chance_of(pack, ledger.set(), |card| {
        target.matches(card) && !ledger.has_card(card.index)
    })
}

/// Chance of something new for every pack of every selected set.
pub fn pack_chances(collection: &Collection, target: PullTarget) -> Vec<(&Pack, f64)> {
    collection
        .ledgers()
        .iter()
        .flat_map(|ledger| {
            ledger
                .set()
                .packs()
                .iter()
                .map(move |pack| (pack, chance_of_new(pack, ledger, target)))
        })
        .collect()
}

fn reduce_by<T>(mut pairs: Vec<(T, f64)>, order: impl Fn(f64, f64) -> Ordering) -> Vec<(T, f64)> {
    pairs.sort_by(|a, b| order(a.1, b.1));
    let Some(extreme) = pairs.first().map(|(_, chance)| *chance) else {
        return pairs;
    };
    pairs.retain(|(_, chance)| *chance == extreme);
    pairs
}

/// Keeps every entry tied for the highest chance. Order among ties is the
/// input order.
pub fn reduce_to_highest_chance<T>(pairs: Vec<(T, f64)>) -> Vec<(T, f64)> {
    reduce_by(pairs, |a, b| b.total_cmp(&a))
}

/// Keeps every entry tied for the lowest chance.
pub fn reduce_to_lowest_chance<T>(pairs: Vec<(T, f64)>) -> Vec<(T, f64)> {
    reduce_by(pairs, |a, b| a.total_cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{demo_catalog, PackDraw, PackId};

    #[test]
    fn test_reductions_keep_exact_ties() {
        let pairs = vec![("a", 0.25), ("b", 0.5), ("c", 0.5), ("d", 0.1), ("e", 0.1)];
        let high = reduce_to_highest_chance(pairs.clone());
        assert_eq!(high, vec![("b", 0.5), ("c", 0.5)]);
        let low = reduce_to_lowest_chance(pairs);
        assert_eq!(low, vec![("d", 0.1), ("e", 0.1)]);
        assert!(reduce_to_highest_chance::<&str>(Vec::new()).is_empty());
    }

    #[test]
    fn test_fresh_ledger_is_certain_to_pull_something_new() {
        let catalog = demo_catalog().unwrap();
        let ledger = SetLedger::new(catalog.sets()[0].clone());
        let pack = &catalog.sets()[0].packs()[0];
        let chance = chance_of_new(pack, &ledger, PullTarget::Standard);
        assert!((chance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_chance_composes_independent_slots() {
        let catalog = demo_catalog().unwrap();
        let set = &catalog.sets()[1];
        let pack = &set.packs()[0];
        // Crowns only appear in slots 4 and 5.
        let p4 = 1.0 / 400.0;
        let p5 = 1.0 / 200.0;
        let expected = 1.0 - (1.0 - p4) * (1.0 - p5);
        let chance = chance_of(pack, set, |c| c.rarity == Rarity::Crown);
        assert!((chance - expected).abs() < 1e-12);

        let nothing = chance_of(pack, set, |_| false);
        assert_eq!(nothing, 0.0);
    }

    #[test]
    fn test_pull_targets_partition_by_tier() {
        let catalog = demo_catalog().unwrap();
        let set = &catalog.sets()[1];
        let pack = &set.packs()[0];
        let mut ledger = SetLedger::new(set.clone());

        let any = chance_of_new(pack, &ledger, PullTarget::Any);
        let rare = chance_of_new(pack, &ledger, PullTarget::Rare);
        assert!((any - 1.0).abs() < 1e-12);
        // Rare tiers only live in the last two slots.
        assert!(rare > 0.0 && rare < 0.5);

        for card in set.cards().iter().filter(|c| c.is_rare()) {
            ledger.add_card(card.index);
        }
        assert_eq!(chance_of_new(pack, &ledger, PullTarget::Rare), 0.0);
        assert!((chance_of_new(pack, &ledger, PullTarget::Any) - 1.0).abs() < 1e-12);

        let four = set.cards().iter().find(|c| c.rarity == Rarity::FourDiamond).unwrap();
        assert!(PullTarget::Any.matches(four));
        assert!(PullTarget::Standard.matches(four));
        assert!(!PullTarget::Rare.matches(four));
        assert!(PullTarget::Rarity(Rarity::FourDiamond).matches(four));
    }

    #[test]
    fn test_owned_cards_lower_the_chance() {
        let catalog = demo_catalog().unwrap();
        let mut ledger = SetLedger::new(catalog.sets()[1].clone());
        let pack = &catalog.sets()[1].packs()[0];
        let target = PullTarget::Rarity(Rarity::OneDiamond);
        let before = chance_of_new(pack, &ledger, target);
        ledger.add_draw(&PackDraw {
            pack: PackId { set: 1, index: 0 },
            cards: [0, 1, 2, 3, 4],
        });
        let after = chance_of_new(pack, &ledger, target);
        assert!(after < before);
        let slot: f64 = 1.0 - 5.0 / 20.0;
        let expected = 1.0 - (1.0 - slot).powi(3);
        assert!((after - expected).abs() < 1e-12);
    }

    #[test]
    fn test_exclusive_cards_break_pack_ties() {
        let catalog = demo_catalog().unwrap();
        let mut collection = Collection::new(&catalog, &[0]).unwrap();
        let chances = pack_chances(&collection, PullTarget::Standard);
        assert_eq!(chances.len(), 2);
        assert_eq!(reduce_to_highest_chance(chances).len(), 2);

        // Own every card exclusive to the first pack.
        let ledger = collection.ledger_mut(0).unwrap();
        let set = ledger.set().clone();
        for card in set.cards().iter().filter(|c| c.is_exclusive_to(0)) {
            ledger.add_card(card.index);
        }
        let best = reduce_to_highest_chance(pack_chances(&collection, PullTarget::Standard));
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].0.name(), "Glimmerwing");
    }
}
