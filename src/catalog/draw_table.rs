//! Exact-weight rarity sampling for the five pack slots.

use crate::cards::Rarity;
use crate::core::constants::{PACK_SIZE, RARITY_COUNT};
use crate::core::error::CatalogError;
use crate::core::fraction::{lcm_of, Fraction};
use rand::Rng;

/// Rarity distribution for one slot of a pack, with its integer cutoff
/// ladder. The integer weights sum to `total_weight` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRates {
    rates: [Fraction; RARITY_COUNT],
    total_weight: u64,
    weights: [u64; RARITY_COUNT],
    cutoffs: [u64; RARITY_COUNT],
}

impl SlotRates {
    /// Builds the ladder for `slot` from one weight per rarity in canonical
    /// order. Weights must be non-negative and sum to exactly one.
    pub fn new(slot: usize, rates: [Fraction; RARITY_COUNT]) -> Result<Self, CatalogError> {
        if let Some(r) = Rarity::ALL.into_iter().find(|r| rates[r.index()].is_negative()) {
            return Err(CatalogError::NegativeWeight { slot, rarity: r });
        }
        let sum = Fraction::sum(&rates).map_err(|_| CatalogError::WeightOverflow { slot })?;
        if sum != Fraction::ONE {
            return Err(CatalogError::SlotWeightsNotUnit {
                slot,
                sum: sum.to_string(),
            });
        }

        let total = lcm_of(&rates).ok_or(CatalogError::WeightOverflow { slot })?;
        let mut weights = [0u64; RARITY_COUNT];
        let mut cutoffs = [0u64; RARITY_COUNT];
        let mut running = 0u64;
        for (i, rate) in rates.iter().enumerate() {
            let weight = rate
                .numerator()
                .checked_mul(total / rate.denominator())
                .ok_or(CatalogError::WeightOverflow { slot })?;
            weights[i] = weight as u64;
            running += weights[i];
            cutoffs[i] = running;
        }

        Ok(Self {
            rates,
            total_weight: total as u64,
            weights,
            cutoffs,
        })
    }

    /// Slot that always yields `rarity`.
    pub fn certain(slot: usize, rarity: Rarity) -> Result<Self, CatalogError> {
        let mut rates = [Fraction::ZERO; RARITY_COUNT];
        rates[rarity.index()] = Fraction::ONE;
        Self::new(slot, rates)
    }

    pub fn rate(&self, rarity: Rarity) -> Fraction {
        self.rates[rarity.index()]
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn weight(&self, rarity: Rarity) -> u64 {
        self.weights[rarity.index()]
    }

    pub fn cutoff(&self, rarity: Rarity) -> u64 {
        self.cutoffs[rarity.index()]
    }

    /// Samples a rarity: the first tier whose cutoff exceeds a uniform roll
    /// in `[0, total)` and whose own weight is nonzero.
    pub fn draw(&self, rng: &mut impl Rng) -> Rarity {
        let roll = rng.gen_range(0..self.total_weight);
        Rarity::ALL
            .into_iter()
            .find(|r| roll < self.cutoffs[r.index()] && self.weights[r.index()] > 0)
            .unwrap_or(Rarity::Crown)
    }
}

/// Per-slot rates for a whole pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRates {
    slots: [SlotRates; PACK_SIZE],
}

impl PackRates {
    pub fn new(slots: [SlotRates; PACK_SIZE]) -> Self {
        Self { slots }
    }

    /// Builds from raw weight rows, one row per slot.
    pub fn from_rows(rows: [[Fraction; RARITY_COUNT]; PACK_SIZE]) -> Result<Self, CatalogError> {
        let [r0, r1, r2, r3, r4] = rows;
        Ok(Self::new([
            SlotRates::new(0, r0)?,
            SlotRates::new(1, r1)?,
            SlotRates::new(2, r2)?,
            SlotRates::new(3, r3)?,
            SlotRates::new(4, r4)?,
        ]))
    }

    pub fn slot(&self, slot: usize) -> &SlotRates {
        &self.slots[slot]
    }

    pub fn slots(&self) -> &[SlotRates; PACK_SIZE] {
        &self.slots
    }

    /// Rarities with nonzero weight in at least one slot.
    pub fn reachable(&self) -> impl Iterator<Item = (usize, Rarity)> + '_ {
        self.slots.iter().enumerate().flat_map(|(slot, rates)| {
            Rarity::ALL
                .into_iter()
                .filter(move |r| !rates.rate(*r).is_zero())
                .map(move |r| (slot, r))
        })
    }

    /// True when every slot can produce a card that is allowed in a
    /// bonus-draw offer.
    pub fn can_fill_bonus_offer(&self) -> bool {
        self.slots.iter().all(|rates| {
            Rarity::ALL
                .into_iter()
                .any(|r| r.stamina_cost().is_some() && !rates.rate(r).is_zero())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn fifth_slot() -> [Fraction; RARITY_COUNT] {
        [
            Fraction::ZERO,
            frac(3, 5),
            frac(1, 5),
            frac(1, 10),
            frac(1, 20),
            frac(1, 50),
            frac(1, 100),
            frac(1, 100),
            frac(1, 200),
            frac(1, 200),
        ]
    }

    #[test]
    fn test_integer_weights_sum_to_total() {
        let slot = SlotRates::new(4, fifth_slot()).unwrap();
        assert_eq!(slot.total_weight(), 200);
        let sum: u64 = Rarity::ALL.iter().map(|r| slot.weight(*r)).sum();
        assert_eq!(sum, slot.total_weight());
        assert_eq!(slot.cutoff(Rarity::Crown), slot.total_weight());
        for pair in Rarity::ALL.windows(2) {
            assert!(slot.cutoff(pair[0]) <= slot.cutoff(pair[1]));
        }
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut rows = fifth_slot();
        rows[1] = frac(1, 2);
        let err = SlotRates::new(4, rows).unwrap_err();
        assert!(matches!(err, CatalogError::SlotWeightsNotUnit { slot: 4, .. }));
    }

    #[test]
    fn test_ladder_too_large_is_an_error() {
        let mut rows = [Fraction::ZERO; RARITY_COUNT];
        rows[0] = frac(1, 4_294_967_311);
        rows[1] = frac(1, 4_294_967_357);
        rows[2] = Fraction::ONE;
        let err = SlotRates::new(2, rows).unwrap_err();
        assert!(matches!(err, CatalogError::WeightOverflow { slot: 2 }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut rows = [Fraction::ZERO; RARITY_COUNT];
        rows[0] = frac(3, 2);
        rows[1] = frac(-1, 2);
        let err = SlotRates::new(0, rows).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NegativeWeight {
                rarity: Rarity::TwoDiamond,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_weight_tier_never_drawn() {
        let slot = SlotRates::new(4, fifth_slot()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5_000 {
            assert_ne!(slot.draw(&mut rng), Rarity::OneDiamond);
        }
    }

    #[test]
    fn test_certain_slot_is_deterministic() {
        let slot = SlotRates::certain(0, Rarity::ThreeDiamond).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert_eq!(slot.draw(&mut rng), Rarity::ThreeDiamond);
        }
    }

    #[test]
    fn test_observed_frequencies_match_rates() {
        let slot = SlotRates::new(4, fifth_slot()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let n = 200_000;
        let mut counts = [0u32; RARITY_COUNT];
        for _ in 0..n {
            counts[slot.draw(&mut rng).index()] += 1;
        }
        for r in Rarity::ALL {
            let expected = slot.rate(r).to_f64();
            let observed = counts[r.index()] as f64 / n as f64;
            // ~5 standard deviations at this sample size
            let tolerance = 5.0 * (expected * (1.0 - expected) / n as f64).sqrt() + 1e-4;
            assert!(
                (observed - expected).abs() <= tolerance,
                "{r}: expected {expected:.4}, observed {observed:.4}"
            );
        }
    }

    #[test]
    fn test_bonus_offer_feasibility() {
        let common = [Fraction::ONE, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO, Fraction::ZERO];
        let rates = PackRates::from_rows([common, common, common, common, fifth_slot()]).unwrap();
        assert!(rates.can_fill_bonus_offer());

        let mut crown_only = [Fraction::ZERO; RARITY_COUNT];
        crown_only[Rarity::Crown.index()] = Fraction::ONE;
        let rates = PackRates::from_rows([common, common, common, common, crown_only]).unwrap();
        assert!(!rates.can_fill_bonus_offer());
    }
}
