//! Bonus-draw offers: generation, scoring, and the selection policy.
//!
//! An offer shows five cards from a fresh opening of some pack; paying its
//! stamina claims one of the five at random. Scoring weighs each standard
//! tier's new cards against how likely the same pack is to produce a new
//! card of that tier anyway over as many openings as the offer costs.

use crate::cards::Rarity;
use crate::catalog::{Pack, PackId};
use crate::collection::{chance_of_new, Collection, PullTarget, SetLedger};
use crate::core::constants::{
    BONUS_CARD_WEIGHT, BONUS_OFFER_BATCH, BONUS_SCORE_DIVISOR, PACK_SIZE, STAMINA_CAP,
};
use crate::profile::Profile;
use rand::Rng;

/// Openings tried before giving up on producing an all-eligible offer.
const MAX_OFFER_RESAMPLES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusOffer {
    pub pack: PackId,
    pub cards: [usize; PACK_SIZE],
    pub stamina: u32,
}

impl BonusOffer {
    /// Reopens `pack` until every card has a stamina cost. The offer costs
    /// the stamina of its highest-rarity card. Returns `None` if the pack
    /// cannot produce such an opening.
    pub fn generate(pack: &Pack, ledger: &SetLedger, rng: &mut impl Rng) -> Option<Self> {
        if !pack.rates().can_fill_bonus_offer() {
            return None;
        }
        let set = ledger.set();
        for _ in 0..MAX_OFFER_RESAMPLES {
            let draw = pack.open(rng);
            let highest = draw.cards.iter().map(|i| set.card(*i).rarity).max()?;
            if draw.cards.iter().all(|i| set.card(*i).rarity.stamina_cost().is_some()) {
                return Some(Self {
                    pack: draw.pack,
                    cards: draw.cards,
                    stamina: highest.stamina_cost()?,
                });
            }
        }
        None
    }

    pub fn contains_rarity(&self, ledger: &SetLedger, rarity: Rarity) -> bool {
        self.cards.iter().any(|i| ledger.set().card(*i).rarity == rarity)
    }
}

/// Value of an offer, per standard tier and combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferScore {
    /// Unowned cards shown, per standard tier (duplicates counted).
    pub new_cards: [u32; 4],
    pub tier_factors: [f64; 4],
    pub composite: f64,
}

impl OfferScore {
    pub fn tier_factor(&self, rarity: Rarity) -> f64 {
        Rarity::STANDARD
            .iter()
            .position(|r| *r == rarity)
            .map_or(0.0, |i| self.tier_factors[i])
    }
}

/// Factor for a tier: `new * 0.20 / (1 - (1 - p)^stamina)` where `p` is the
/// chance the offer's pack yields a new card of that tier. Tiers with no new
/// cards score zero.
pub fn score_offer(offer: &BonusOffer, pack: &Pack, ledger: &SetLedger) -> OfferScore {
    let set = ledger.set();
    let mut new_cards = [0u32; 4];
    for index in offer.cards {
        let card = set.card(index);
        if ledger.has_card(index) {
            continue;
        }
        if let Some(tier) = Rarity::STANDARD.iter().position(|r| *r == card.rarity) {
            new_cards[tier] += 1;
        }
    }

    let mut tier_factors = [0.0f64; 4];
    for (tier, rarity) in Rarity::STANDARD.into_iter().enumerate() {
        if new_cards[tier] == 0 {
            continue;
        }
        let chance = chance_of_new(pack, ledger, PullTarget::Rarity(rarity));
        let natural = 1.0 - (1.0 - chance).powi(offer.stamina as i32);
        tier_factors[tier] = new_cards[tier] as f64 * BONUS_CARD_WEIGHT / natural;
    }

    let composite = tier_factors
        .iter()
        .zip(new_cards)
        .map(|(factor, new)| factor * new as f64)
        .sum::<f64>()
        / BONUS_SCORE_DIVISOR;

    OfferScore {
        new_cards,
        tier_factors,
        composite,
    }
}

/// An offer with the ledger-dependent score it was ranked by.
#[derive(Debug, Clone, Copy)]
pub struct ScoredOffer {
    pub offer: BonusOffer,
    pub score: OfferScore,
}

/// Builds a batch of offers, each from a uniformly chosen selected set and a
/// uniformly chosen pack within it. Packs unable to produce an offer leave
/// their slot in the batch empty.
pub fn generate_offers(collection: &Collection, rng: &mut impl Rng) -> Vec<ScoredOffer> {
    let ledgers = collection.ledgers();
    let mut offers = Vec::with_capacity(BONUS_OFFER_BATCH);
    if ledgers.is_empty() {
        return offers;
    }
    for _ in 0..BONUS_OFFER_BATCH {
        let ledger = &ledgers[rng.gen_range(0..ledgers.len())];
        let packs = ledger.set().packs();
        if packs.is_empty() {
            continue;
        }
        let pack = &packs[rng.gen_range(0..packs.len())];
        if let Some(offer) = BonusOffer::generate(pack, ledger, rng) {
            let score = score_offer(&offer, pack, ledger);
            offers.push(ScoredOffer { offer, score });
        }
    }
    offers
}

/// Index of the first maximum among entries passing `eligible`.
fn argmax_by(
    offers: &[ScoredOffer],
    eligible: impl Fn(&ScoredOffer) -> bool,
    value: impl Fn(&ScoredOffer) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, offer) in offers.iter().enumerate().filter(|(_, o)| eligible(*o)) {
        let v = value(offer);
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Picks an offer to claim, or `None` to decline.
///
/// With full stamina the best composite score wins outright. Otherwise the
/// lowest standard tier not yet complete across the selection is targeted:
/// if stamina covers that tier's cost, the best-scoring offer for that tier
/// among offers showing at least one card of it is taken.
pub fn select_offer(
    offers: &[ScoredOffer],
    collection: &Collection,
    stamina: u32,
) -> Option<usize> {
    if offers.is_empty() {
        return None;
    }
    if stamina >= STAMINA_CAP {
        return argmax_by(offers, |_| true, |o| o.score.composite);
    }

    let tier = collection.lowest_incomplete_standard()?;
    let cost = tier.stamina_cost()?;
    if stamina < cost {
        return None;
    }
    argmax_by(
        offers,
        |o| {
            collection
                .ledger(o.offer.pack.set)
                .is_some_and(|ledger| o.offer.contains_rarity(ledger, tier))
        },
        |o| o.score.tier_factor(tier),
    )
}

/// One bonus-draw decision point: generate a batch, pick, and claim.
/// Returns the set and card index claimed, if any.
pub fn run_bonus_draw(profile: &mut Profile, rng: &mut impl Rng) -> Option<(PackId, usize)> {
    let offers = generate_offers(profile.collection(), rng);
    let choice = select_offer(&offers, profile.collection(), profile.stamina())?;
    let offer = offers[choice].offer;
    let card = profile.select_bonus_offer(&offer, rng)?;
    tracing::debug!(
        set = offer.pack.set,
        pack = offer.pack.index,
        stamina = offer.stamina,
        card,
        composite = offers[choice].score.composite,
        "bonus draw claimed"
    );
    Some((offer.pack, card))
}
