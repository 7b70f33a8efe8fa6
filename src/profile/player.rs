//! Simulated player: logical clock, resource pools and collection.

use super::pool::ResourcePool;
use crate::catalog::{Pack, PackDraw, SetId};
use crate::collection::Collection;
use crate::core::constants::{
    FREE_PACK_CAP, FREE_PACK_INTERVAL_HOURS, PREMIUM_PACK_CAP, PREMIUM_PACK_INTERVAL_HOURS,
    PREMIUM_PASS_MONTHS, STAMINA_CAP, STAMINA_INTERVAL_HOURS,
};
use crate::strategy::BonusOffer;
use chrono::{Duration, Months, NaiveDateTime};
use rand::Rng;

/// One player within one trial. Every pool is brought up to date whenever
/// the clock moves or a pool is touched, so reads never see stale counts.
#[derive(Debug, Clone)]
pub struct Profile {
    now: NaiveDateTime,
    free_packs: ResourcePool,
    premium_packs: ResourcePool,
    stamina: ResourcePool,
    premium_expiration: Option<NaiveDateTime>,
    collection: Collection,
}

impl Profile {
    /// Starts at the epoch with full free packs and stamina and no premium
    /// charges.
    pub fn new(collection: Collection) -> Self {
        Self::starting_at(NaiveDateTime::default(), collection)
    }

    pub fn starting_at(now: NaiveDateTime, collection: Collection) -> Self {
        Self {
            now,
            free_packs: ResourcePool::full(
                FREE_PACK_CAP,
                Duration::hours(FREE_PACK_INTERVAL_HOURS),
            ),
            premium_packs: ResourcePool::empty(
                PREMIUM_PACK_CAP,
                Duration::hours(PREMIUM_PACK_INTERVAL_HOURS),
                now,
            ),
            stamina: ResourcePool::full(STAMINA_CAP, Duration::hours(STAMINA_INTERVAL_HOURS)),
            premium_expiration: None,
            collection,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Jumps the clock forward and applies every regen tick now due.
    pub fn advance_hours(&mut self, hours: i64) {
        self.now += Duration::hours(hours.max(0));
        self.recalc_pools();
    }

    fn recalc_pools(&mut self) {
        self.free_packs.recalc(self.now);
        if let Some(expiration) = self.premium_expiration {
            self.premium_packs.recalc(self.now.min(expiration));
        }
        self.stamina.recalc(self.now);
    }

    pub fn is_premium(&self) -> bool {
        self.premium_expiration.is_some_and(|e| self.now < e)
    }

    pub fn has_been_premium(&self) -> bool {
        self.premium_expiration.is_some()
    }

    pub fn premium_expiration(&self) -> Option<NaiveDateTime> {
        self.premium_expiration
    }

    /// Buys one month of premium. An active pass is extended from its
    /// expiration; a lapsed one restarts from now. The first ever
    /// subscription fills the premium charges immediately.
    pub fn subscribe_premium(&mut self) {
        self.recalc_pools();
        let first = !self.has_been_premium();
        let start = match self.premium_expiration {
            Some(expiration) if self.now < expiration => expiration,
            _ => {
                self.premium_packs.restart_anchor(self.now);
                self.now
            }
        };
        let expiration = start
            .checked_add_months(Months::new(PREMIUM_PASS_MONTHS))
            .unwrap_or(NaiveDateTime::MAX);
        self.premium_expiration = Some(expiration);
        if first {
            self.premium_packs.refill_to_cap();
        }
        tracing::debug!(%expiration, first, "premium pass purchased");
    }

    pub fn free_packs(&self) -> u32 {
        self.free_packs.current()
    }

    pub fn premium_packs(&self) -> u32 {
        self.premium_packs.current()
    }

    pub fn packs_available(&self) -> u32 {
        self.free_packs() + self.premium_packs()
    }

    pub fn has_packs_available(&self) -> bool {
        self.packs_available() > 0
    }

    pub fn stamina(&self) -> u32 {
        self.stamina.current()
    }

    pub fn free_pool(&self) -> &ResourcePool {
        &self.free_packs
    }

    pub fn premium_pool(&self) -> &ResourcePool {
        &self.premium_packs
    }

    pub fn stamina_pool(&self) -> &ResourcePool {
        &self.stamina
    }

    /// Opens `pack` with a free charge if one is left, otherwise a premium
    /// charge. Returns `None` when no charge is available.
    pub fn open_pack(&mut self, pack: &Pack, rng: &mut impl Rng) -> Option<PackDraw> {
        self.recalc_pools();
        let spent = self.free_packs.consume(1, self.now) || self.premium_packs.consume(1, self.now);
        if !spent {
            return None;
        }
        let draw = pack.open(rng);
        self.collection.add_draw(&draw);
        Some(draw)
    }

    /// Pays the offer's stamina and claims one of its five cards uniformly at
    /// random. Returns the claimed card's index, or `None` when stamina is
    /// short.
    pub fn select_bonus_offer(&mut self, offer: &BonusOffer, rng: &mut impl Rng) -> Option<usize> {
        self.recalc_pools();
        if self.stamina.current() < offer.stamina || !self.stamina.consume(offer.stamina, self.now) {
            return None;
        }
        let card = offer.cards[rng.gen_range(0..offer.cards.len())];
        if let Some(ledger) = self.collection.ledger_mut(offer.pack.set) {
            ledger.add_card(card);
        }
        Some(card)
    }

    pub fn buy_card(&mut self, set: SetId, card: usize) -> bool {
        self.collection
            .ledger_mut(set)
            .is_some_and(|ledger| ledger.buy_card(card))
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }
}
