//! Per-set ownership ledger.

use crate::cards::{Card, Rarity};
use crate::catalog::{CardSet, Pack, PackDraw, SpecialUnlock};
use crate::core::constants::{CURRENCY_CAP, CURRENCY_PER_PACK, RARITY_COUNT};
use std::fmt;
use std::sync::Arc;

/// Ownership counts, aggregates and currency for one set within one trial.
///
/// Aggregates always match the cards with a nonzero count, and the currency
/// balance stays within `0..=CURRENCY_CAP`.
#[derive(Clone)]
pub struct SetLedger {
    set: Arc<CardSet>,
    counts: Vec<u32>,
    obtained: u32,
    standard_obtained: u32,
    rarity_obtained: [u32; RARITY_COUNT],
    currency: u32,
    pending_unlocks: Vec<SpecialUnlock>,
}

impl fmt::Debug for SetLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetLedger")
            .field("set", &self.set.name())
            .field("obtained", &self.obtained)
            .field("standard_obtained", &self.standard_obtained)
            .field("currency", &self.currency)
            .field("pending_unlocks", &self.pending_unlocks.len())
            .finish()
    }
}

impl SetLedger {
    pub fn new(set: Arc<CardSet>) -> Self {
        let mut ledger = Self {
            counts: vec![0; set.cards().len()],
            pending_unlocks: set.unlocks().to_vec(),
            set,
            obtained: 0,
            standard_obtained: 0,
            rarity_obtained: [0; RARITY_COUNT],
            currency: 0,
        };
        ledger.resolve_unlocks();
        ledger
    }

    pub fn set(&self) -> &Arc<CardSet> {
        &self.set
    }

    pub fn has_card(&self, index: usize) -> bool {
        self.card_count(index) > 0
    }

    pub fn card_count(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Records one copy without evaluating unlocks. Returns true if new.
    fn insert(&mut self, index: usize) -> bool {
        let Some(count) = self.counts.get_mut(index) else {
            return false;
        };
        *count += 1;
        if *count > 1 {
            return false;
        }
        let rarity = self.set.card(index).rarity;
        self.obtained += 1;
        self.rarity_obtained[rarity.index()] += 1;
        if rarity.is_standard() {
            self.standard_obtained += 1;
        }
        true
    }

    /// Grants every pending special unlock whose predicate holds, repeating
    /// until no further unlock fires.
    fn resolve_unlocks(&mut self) {
        while let Some(pos) = self.next_ready_unlock() {
            let unlock = self.pending_unlocks.remove(pos);
            self.insert(unlock.card);
            tracing::trace!(
                set = self.set.name(),
                card = %self.set.card(unlock.card).display_name(),
                "special unlock granted"
            );
        }
    }

    fn next_ready_unlock(&self) -> Option<usize> {
        self.pending_unlocks
            .iter()
            .position(|unlock| (unlock.predicate)(self))
    }

    /// Adds a single card (bonus draw, test setup). Returns true if new.
    pub fn add_card(&mut self, index: usize) -> bool {
        let new = self.insert(index);
        self.resolve_unlocks();
        new
    }

    /// Records a pack opening: all five cards plus the per-pack currency.
    /// Returns how many of the cards were new.
    pub fn add_draw(&mut self, draw: &PackDraw) -> usize {
        let new = draw.cards.iter().filter(|i| self.insert(**i)).count();
        self.add_currency(CURRENCY_PER_PACK);
        self.resolve_unlocks();
        new
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount).min(CURRENCY_CAP);
    }

    pub fn is_currency_capped(&self) -> bool {
        self.currency >= CURRENCY_CAP
    }

    /// Redeems currency for a card. Special-unlock cards and unaffordable
    /// cards are refused.
    pub fn buy_card(&mut self, index: usize) -> bool {
        let Some(cost) = self.set.cards().get(index).and_then(Card::currency_cost) else {
            return false;
        };
        if self.currency < cost {
            return false;
        }
        self.currency = self.currency.saturating_sub(cost);
        self.insert(index);
        self.resolve_unlocks();
        true
    }

    pub fn obtained(&self) -> u32 {
        self.obtained
    }

    pub fn total(&self) -> u32 {
        self.set.total_count()
    }

    pub fn standard_obtained(&self) -> u32 {
        self.standard_obtained
    }

    pub fn standard_total(&self) -> u32 {
        self.set.standard_total()
    }

    pub fn rare_obtained(&self) -> u32 {
        self.obtained - self.standard_obtained
    }

    pub fn rare_total(&self) -> u32 {
        self.set.rare_total()
    }

    pub fn rarity_obtained(&self, rarity: Rarity) -> u32 {
        self.rarity_obtained[rarity.index()]
    }

    pub fn rarity_total(&self, rarity: Rarity) -> u32 {
        self.set.rarity_total(rarity)
    }

    pub fn complete_percent(&self) -> f64 {
        percent(self.obtained(), self.total())
    }

    pub fn standard_percent(&self) -> f64 {
        percent(self.standard_obtained(), self.standard_total())
    }

    pub fn rare_percent(&self) -> f64 {
        percent(self.rare_obtained(), self.rare_total())
    }

    pub fn rarity_percent(&self, rarity: Rarity) -> f64 {
        percent(self.rarity_obtained(rarity), self.rarity_total(rarity))
    }

    pub fn has_all(&self) -> bool {
        self.obtained() == self.total()
    }

    pub fn has_all_standard(&self) -> bool {
        self.standard_obtained() == self.standard_total()
    }

    pub fn has_all_rare(&self) -> bool {
        self.rare_obtained() == self.rare_total()
    }

    pub fn has_all_rarity(&self, rarity: Rarity) -> bool {
        self.rarity_obtained(rarity) == self.rarity_total(rarity)
    }

    /// True when every standard card the pack can produce is owned.
    pub fn has_all_standard_in(&self, pack: &Pack) -> bool {
        Rarity::STANDARD
            .iter()
            .all(|r| self.has_all_of_rarity_in(pack, *r))
    }

    pub fn has_all_of_rarity_in(&self, pack: &Pack, rarity: Rarity) -> bool {
        pack.cards_of(rarity).iter().all(|i| self.has_card(*i))
    }

    /// Unowned cards of `rarity` that `pack` can produce.
    pub fn unowned_in_pack<'a>(
        &'a self,
        pack: &'a Pack,
        rarity: Rarity,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        pack.cards_of(rarity)
            .iter()
            .filter(move |i| !self.has_card(**i))
            .map(move |i| self.set.card(*i))
    }

    /// Unowned standard cards of the set, special unlocks included.
    pub fn unowned_standard(&self) -> impl Iterator<Item = &Card> + '_ {
        self.set
            .cards()
            .iter()
            .filter(move |c| c.is_standard() && !self.has_card(c.index))
    }

    /// Total price of every unowned standard card that can be bought.
    pub fn missing_standard_cost(&self) -> u32 {
        self.unowned_standard()
            .filter_map(Card::currency_cost)
            .sum()
    }

    pub fn pending_unlocks(&self) -> usize {
        self.pending_unlocks.len()
    }
}

/// Percentage with an empty denominator counted as complete.
pub(crate) fn percent(obtained: u32, total: u32) -> f64 {
    if total == 0 {
        100.0
    } else {
        obtained as f64 * 100.0 / total as f64
    }
}
