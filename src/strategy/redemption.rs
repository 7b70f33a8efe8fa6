//! Currency redemption: turning pack points into missing standard cards.

use crate::cards::Rarity;
use crate::collection::{chance_of_new, reduce_to_lowest_chance, PullTarget, SetLedger};
use crate::profile::Profile;
use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of one redemption pass over a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redemption {
    /// Nothing affordable or nothing left to buy.
    Skipped,
    /// Balance was at its cap; one hard-to-pull card was bought.
    Liquidated { card: usize, rarity: Rarity },
    /// Every missing purchasable standard card was affordable and bought.
    BoughtAll { cards: usize },
}

/// At the currency cap, spends on the hardest card to pull: the pack(s)
/// least likely to yield a new standard card (one picked uniformly among
/// ties), then the standard tier least likely to come out of that pack new,
/// then a uniform pick among that tier's unowned cards in the pack. Below the
/// cap, buys every missing standard card at once if the balance covers all
/// of them.
pub fn redeem(ledger: &mut SetLedger, rng: &mut impl Rng) -> Redemption {
    if ledger.is_currency_capped() {
        liquidate(ledger, rng)
    } else {
        buy_all_if_affordable(ledger)
    }
}

fn liquidate(ledger: &mut SetLedger, rng: &mut impl Rng) -> Redemption {
    let set = ledger.set().clone();

    // Packs whose standard cards are all owned have nothing to sell.
    let candidates: Vec<_> = set
        .packs()
        .iter()
        .filter(|pack| !ledger.has_all_standard_in(pack))
        .map(|pack| (pack, chance_of_new(pack, ledger, PullTarget::Standard)))
        .collect();
    let lowest = reduce_to_lowest_chance(candidates);
    let Some((pack, _)) = lowest.choose(rng) else {
        return Redemption::Skipped;
    };

    // Highest tier first so exact ties favour the pricier card.
    let tiers: Vec<_> = Rarity::STANDARD
        .into_iter()
        .rev()
        .filter(|r| !ledger.has_all_of_rarity_in(pack, *r))
        .map(|r| (r, chance_of_new(pack, ledger, PullTarget::Rarity(r))))
        .collect();
    let Some((rarity, _)) = reduce_to_lowest_chance(tiers).into_iter().next() else {
        return Redemption::Skipped;
    };

    let unowned: Vec<usize> = ledger
        .unowned_in_pack(pack, rarity)
        .filter(|c| !c.is_special_unlock())
        .map(|c| c.index)
        .collect();
    match unowned.choose(rng) {
        Some(&card) if ledger.buy_card(card) => Redemption::Liquidated { card, rarity },
        _ => Redemption::Skipped,
    }
}

fn buy_all_if_affordable(ledger: &mut SetLedger) -> Redemption {
    let needed = ledger.missing_standard_cost();
    if needed == 0 || needed > ledger.currency() {
        return Redemption::Skipped;
    }
    let missing: Vec<usize> = ledger
        .unowned_standard()
        .filter(|c| !c.is_special_unlock())
        .map(|c| c.index)
        .collect();
    let cards = missing.into_iter().filter(|i| ledger.buy_card(*i)).count();
    Redemption::BoughtAll { cards }
}

/// One redemption pass over every selected set. Returns the number of cards
/// bought.
pub fn run_redemption(profile: &mut Profile, rng: &mut impl Rng) -> usize {
    let mut bought = 0;
    for ledger in profile.collection_mut().ledgers_mut() {
        let outcome = redeem(ledger, rng);
        match outcome {
            Redemption::Skipped => continue,
            Redemption::Liquidated { .. } => bought += 1,
            Redemption::BoughtAll { cards } => bought += cards,
        }
        tracing::debug!(
            set = ledger.set().name(),
            ?outcome,
            balance = ledger.currency(),
            "currency redeemed"
        );
    }
    bought
}
