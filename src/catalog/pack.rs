//! Packs: per-rarity card pools paired with their draw table.

use super::draw_table::PackRates;
use crate::cards::{Card, Rarity};
use crate::core::constants::{PACK_SIZE, RARITY_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of a set inside a `Catalog`.
pub type SetId = usize;

/// Addresses one pack across the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackId {
    pub set: SetId,
    pub index: usize,
}

/// One pack opening: five card indices into the owning set, slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackDraw {
    pub pack: PackId,
    pub cards: [usize; PACK_SIZE],
}

#[derive(Debug, Clone)]
pub struct Pack {
    id: PackId,
    name: String,
    cards_by_rarity: [Vec<usize>; RARITY_COUNT],
    rates: PackRates,
}

impl Pack {
    /// Partitions `cards` (already filtered to this pack's members) by rarity.
    /// Construction-time validation lives in the set builder.
    pub(crate) fn new<'a>(
        id: PackId,
        name: impl Into<String>,
        cards: impl IntoIterator<Item = &'a Card>,
        rates: PackRates,
    ) -> Self {
        let mut cards_by_rarity: [Vec<usize>; RARITY_COUNT] = Default::default();
        for card in cards {
            cards_by_rarity[card.rarity.index()].push(card.index);
        }
        Self {
            id,
            name: name.into(),
            cards_by_rarity,
            rates,
        }
    }

    pub fn id(&self) -> PackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rates(&self) -> &PackRates {
        &self.rates
    }

    /// Card indices of `rarity` available in this pack.
    pub fn cards_of(&self, rarity: Rarity) -> &[usize] {
        &self.cards_by_rarity[rarity.index()]
    }

    pub fn count_of(&self, rarity: Rarity) -> usize {
        self.cards_by_rarity[rarity.index()].len()
    }

    pub fn total_count(&self) -> usize {
        self.cards_by_rarity.iter().map(Vec::len).sum()
    }

    pub fn standard_count(&self) -> usize {
        Rarity::STANDARD.iter().map(|r| self.count_of(*r)).sum()
    }

    pub fn rare_count(&self) -> usize {
        self.total_count() - self.standard_count()
    }

    /// All card indices in the pack, lowest rarity first.
    pub fn card_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards_by_rarity.iter().flatten().copied()
    }

    /// Draws a single card for `slot`.
    pub fn draw_slot(&self, slot: usize, rng: &mut impl Rng) -> usize {
        let rarity = self.rates.slot(slot).draw(rng);
        let pool = self.cards_of(rarity);
        // The builder guarantees every drawable rarity has a non-empty pool.
        pool[rng.gen_range(0..pool.len())]
    }

    /// Opens the pack: one rarity roll then one uniform card pick per slot.
    pub fn open(&self, rng: &mut impl Rng) -> PackDraw {
        let mut cards = [0usize; PACK_SIZE];
        for (slot, card) in cards.iter_mut().enumerate() {
            *card = self.draw_slot(slot, rng);
        }
        PackDraw {
            pack: self.id,
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Rarity};
    use crate::catalog::draw_table::SlotRates;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn card(index: usize, rarity: Rarity) -> Card {
        Card {
            index,
            number: index as u32 + 1,
            name: format!("Card {}", index + 1),
            kind: CardKind::Item,
            rarity,
            packs: vec![0],
        }
    }

    fn certain_rates(rarity: Rarity) -> PackRates {
        PackRates::new([0, 1, 2, 3, 4].map(|slot| SlotRates::certain(slot, rarity).unwrap()))
    }

    #[test]
    fn test_single_card_pack_is_deterministic() {
        let cards = vec![card(0, Rarity::TwoDiamond)];
        let pack = Pack::new(
            PackId { set: 0, index: 0 },
            "Solo",
            &cards,
            certain_rates(Rarity::TwoDiamond),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            assert_eq!(pack.open(&mut rng).cards, [0; PACK_SIZE]);
        }
    }

    #[test]
    fn test_counts_by_rarity() {
        let cards = vec![
            card(0, Rarity::OneDiamond),
            card(1, Rarity::OneDiamond),
            card(2, Rarity::FourDiamond),
            card(3, Rarity::OneStar),
            card(4, Rarity::Crown),
        ];
        let pack = Pack::new(
            PackId { set: 0, index: 0 },
            "Mixed",
            &cards,
            certain_rates(Rarity::OneDiamond),
        );
        assert_eq!(pack.count_of(Rarity::OneDiamond), 2);
        assert_eq!(pack.total_count(), 5);
        assert_eq!(pack.standard_count(), 3);
        assert_eq!(pack.rare_count(), 2);
        assert_eq!(pack.card_indices().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_open_only_draws_from_rolled_rarity() {
        let cards = vec![
            card(0, Rarity::OneDiamond),
            card(1, Rarity::OneDiamond),
            card(2, Rarity::ThreeDiamond),
        ];
        let pack = Pack::new(
            PackId { set: 0, index: 0 },
            "Commons",
            &cards,
            certain_rates(Rarity::OneDiamond),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = [false; 2];
        for _ in 0..200 {
            for idx in pack.open(&mut rng).cards {
                assert!(idx < 2, "drew card {idx} outside the rolled rarity");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
